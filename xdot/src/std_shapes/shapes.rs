//! The drawing primitives that xdot programs decode into, and the geometric
//! queries (bounding box, hit-testing) that selection needs.

use crate::core::geometry::{
    ellipse_contains, polygon_contains, polyline_is_near, BoundingBox, Point,
};
use crate::core::style::Pen;

/// Extra distance (on top of the line width) at which a click still selects
/// a polyline.
pub const POLYLINE_TOLERANCE: f64 = 2.;

/// Extra distance (on top of the line width) at which a click still selects
/// a bezier control point.
pub const BEZIER_TOLERANCE: f64 = 5.;

/// The average width of a glyph, relative to the font size.
const GLYPH_WIDTH_RATIO: f64 = 0.6;

/// A decoded xdot shape. Every shape owns a copy of the pen that was active
/// when it was created.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Ellipse {
        center: Point,
        width: f64,
        height: f64,
        filled: bool,
        pen: Pen,
    },
    Polygon {
        points: Vec<Point>,
        filled: bool,
        pen: Pen,
    },
    Polyline {
        points: Vec<Point>,
        pen: Pen,
    },
    Bezier {
        points: Vec<Point>,
        filled: bool,
        pen: Pen,
    },
    Text {
        pos: Point,
        text: String,
        pen: Pen,
    },
    Image {
        pos: Point,
        width: f64,
        height: f64,
        path: String,
        pen: Pen,
    },
}

impl Shape {
    pub fn pen(&self) -> &Pen {
        match self {
            Shape::Ellipse { pen, .. }
            | Shape::Polygon { pen, .. }
            | Shape::Polyline { pen, .. }
            | Shape::Bezier { pen, .. }
            | Shape::Text { pen, .. }
            | Shape::Image { pen, .. } => pen,
        }
    }

    pub fn pen_mut(&mut self) -> &mut Pen {
        match self {
            Shape::Ellipse { pen, .. }
            | Shape::Polygon { pen, .. }
            | Shape::Polyline { pen, .. }
            | Shape::Bezier { pen, .. }
            | Shape::Text { pen, .. }
            | Shape::Image { pen, .. } => pen,
        }
    }

    /// \returns the name of the shape kind, for debugging.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Shape::Ellipse { .. } => "ellipse",
            Shape::Polygon { .. } => "polygon",
            Shape::Polyline { .. } => "polyline",
            Shape::Bezier { .. } => "bezier",
            Shape::Text { .. } => "text",
            Shape::Image { .. } => "image",
        }
    }

    /// \returns the axis aligned box that encloses the shape. The box of a
    /// text label is estimated from the font size, because we don't have
    /// font metrics.
    pub fn bounding_box(&self) -> BoundingBox {
        match self {
            Shape::Ellipse {
                center,
                width,
                height,
                ..
            } => BoundingBox::from_center(*center, Point::new(*width, *height)),
            Shape::Polygon { points, .. }
            | Shape::Polyline { points, .. }
            | Shape::Bezier { points, .. } => BoundingBox::from_points(points),
            Shape::Text { pos, text, pen } => {
                let width =
                    text.chars().count() as f64 * pen.font_size * GLYPH_WIDTH_RATIO;
                BoundingBox::from_center(*pos, Point::new(width, pen.font_size))
            }
            Shape::Image {
                pos, width, height, ..
            } => BoundingBox::new(pos.x, pos.y, pos.x + width, pos.y + height),
        }
    }

    /// \return true if the point \p p selects the shape.
    pub fn contains_point(&self, p: Point) -> bool {
        match self {
            Shape::Ellipse {
                center,
                width,
                height,
                ..
            } => ellipse_contains(*center, Point::new(*width, *height), p),
            Shape::Polygon { points, .. } => polygon_contains(points, p),
            Shape::Polyline { points, pen } => {
                polyline_is_near(points, p, pen.line_width + POLYLINE_TOLERANCE)
            }
            // This checks the distance to the control points and not to the
            // curve itself, so it is loose when the points are far apart.
            Shape::Bezier { points, pen, .. } => {
                let tolerance = pen.line_width + BEZIER_TOLERANCE;
                points.iter().any(|cp| cp.distance_to(p) <= tolerance)
            }
            Shape::Text { .. } | Shape::Image { .. } => {
                self.bounding_box().contains(p)
            }
        }
    }
}

/// \returns the union of the bounding boxes of \p shapes, or the zero box if
/// the list is empty.
pub fn bounding_box_of(shapes: &[Shape]) -> BoundingBox {
    BoundingBox::union_all(shapes.iter().map(|s| s.bounding_box()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(x: f64, y: f64, size: f64) -> Vec<Point> {
        vec![
            Point::new(x, y),
            Point::new(x + size, y),
            Point::new(x + size, y + size),
            Point::new(x, y + size),
        ]
    }

    #[test]
    fn ellipse() {
        let e = Shape::Ellipse {
            center: Point::new(100., 50.),
            width: 20.,
            height: 10.,
            filled: true,
            pen: Pen::new(),
        };
        assert_eq!(e.bounding_box(), BoundingBox::new(90., 45., 110., 55.));
        assert!(e.contains_point(Point::new(105., 52.)));
        assert!(!e.contains_point(Point::new(109., 54.)));
    }

    #[test]
    fn polygon() {
        let p = Shape::Polygon {
            points: square(0., 0., 10.),
            filled: false,
            pen: Pen::new(),
        };
        assert_eq!(p.bounding_box(), BoundingBox::new(0., 0., 10., 10.));
        assert!(p.contains_point(Point::new(5., 5.)));
        assert!(!p.contains_point(Point::new(50., 50.)));
    }

    #[test]
    fn triangles_contain_their_centroid() {
        let triangles = [
            [(0., 0.), (10., 0.), (0., 10.)],
            [(-5., -5.), (100., 3.), (7., 60.)],
            [(1., 1.), (2., 9.), (-8., 4.)],
        ];
        for t in triangles.iter() {
            let points: Vec<Point> =
                t.iter().map(|(x, y)| Point::new(*x, *y)).collect();
            let center = crate::core::geometry::centroid(&points);
            let shape = Shape::Polygon {
                points,
                filled: true,
                pen: Pen::new(),
            };
            assert!(shape.contains_point(center));
            let bb = shape.bounding_box();
            assert!(!shape.contains_point(Point::new(bb.x2 + 100., bb.y2 + 100.)));
        }
    }

    #[test]
    fn polyline_uses_line_width() {
        let mut pen = Pen::new();
        let line = Shape::Polyline {
            points: vec![Point::new(0., 0.), Point::new(100., 0.)],
            pen: pen.clone(),
        };
        assert!(line.contains_point(Point::new(50., 3.)));
        assert!(!line.contains_point(Point::new(50., 3.5)));

        pen.line_width = 4.;
        let thick = Shape::Polyline {
            points: vec![Point::new(0., 0.), Point::new(100., 0.)],
            pen,
        };
        assert!(thick.contains_point(Point::new(50., 5.5)));

        let single = Shape::Polyline {
            points: vec![Point::new(0., 0.)],
            pen: Pen::new(),
        };
        assert!(!single.contains_point(Point::new(0., 0.)));
    }

    #[test]
    fn bezier_checks_control_points() {
        let b = Shape::Bezier {
            points: vec![
                Point::new(0., 0.),
                Point::new(100., 0.),
                Point::new(100., 100.),
                Point::new(0., 100.),
            ],
            filled: false,
            pen: Pen::new(),
        };
        assert_eq!(b.bounding_box(), BoundingBox::new(0., 0., 100., 100.));
        assert!(b.contains_point(Point::new(103., 103.)));
        // The middle of the first segment is far from every control point.
        assert!(!b.contains_point(Point::new(50., 0.)));
    }

    #[test]
    fn text_and_image() {
        let t = Shape::Text {
            pos: Point::new(50., 50.),
            text: "abcde".to_string(),
            pen: Pen::new(),
        };
        // 5 chars * 12pt * 0.6 = 36 wide, 12 tall.
        assert_eq!(t.bounding_box(), BoundingBox::new(32., 44., 68., 56.));
        assert!(t.contains_point(Point::new(33., 55.)));
        assert!(!t.contains_point(Point::new(31., 55.)));

        let i = Shape::Image {
            pos: Point::new(10., 10.),
            width: 30.,
            height: 20.,
            path: "a.png".to_string(),
            pen: Pen::new(),
        };
        assert_eq!(i.bounding_box(), BoundingBox::new(10., 10., 40., 30.));
        assert!(i.contains_point(Point::new(40., 30.)));
        assert!(!i.contains_point(Point::new(9., 10.)));
    }

    #[test]
    fn union_of_shapes() {
        assert_eq!(bounding_box_of(&[]), BoundingBox::zero());
        let shapes = vec![
            Shape::Polyline {
                points: vec![Point::new(0., 0.), Point::new(10., 5.)],
                pen: Pen::new(),
            },
            Shape::Ellipse {
                center: Point::new(20., 20.),
                width: 4.,
                height: 4.,
                filled: false,
                pen: Pen::new(),
            },
        ];
        assert_eq!(bounding_box_of(&shapes), BoundingBox::new(0., 0., 22., 22.));
    }
}
