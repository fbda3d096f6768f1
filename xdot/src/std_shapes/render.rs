//! Implements the drawing of shapes and graphs on the backing canvas.

use super::graph::GraphElement;
use super::shapes::Shape;
use crate::core::color::Color;
use crate::core::format::RenderBackend;

/// The stroke color of highlighted nodes and edges.
pub const HIGHLIGHT_COLOR: Color = Color::new(0., 0., 1.);

/// Forwards the shape \p shape to the matching draw call of \p canvas.
pub fn render_shape(shape: &Shape, canvas: &mut dyn RenderBackend) {
    match shape {
        Shape::Ellipse {
            center,
            width,
            height,
            filled,
            pen,
        } => canvas.draw_ellipse(*center, *width, *height, *filled, pen),
        Shape::Polygon {
            points,
            filled,
            pen,
        } => canvas.draw_polygon(points, *filled, pen),
        Shape::Polyline { points, pen } => canvas.draw_polyline(points, pen),
        Shape::Bezier {
            points,
            filled,
            pen,
        } => canvas.draw_bezier(points, *filled, pen),
        Shape::Text { pos, text, pen } => canvas.draw_text(*pos, text, pen),
        Shape::Image {
            pos,
            width,
            height,
            path,
            pen,
        } => canvas.draw_image(*pos, *width, *height, path, pen),
    }
}

pub fn render_shapes(shapes: &[Shape], canvas: &mut dyn RenderBackend) {
    for s in shapes {
        render_shape(s, canvas);
    }
}

/// Draws \p shapes with the stroke color replaced by HIGHLIGHT_COLOR. The
/// fill is kept so that labels stay readable.
pub fn render_highlighted_shapes(shapes: &[Shape], canvas: &mut dyn RenderBackend) {
    for s in shapes {
        let mut s = s.clone();
        s.pen_mut().color = HIGHLIGHT_COLOR;
        render_shape(&s, canvas);
    }
}

fn render_element(shapes: &[Shape], highlighted: bool, canvas: &mut dyn RenderBackend) {
    if highlighted {
        render_highlighted_shapes(shapes, canvas);
    } else {
        render_shapes(shapes, canvas);
    }
}

/// Draws the whole graph. The background goes first, then the edges and
/// last the nodes, so that nodes are painted on top of the edges that
/// connect them. Highlighted elements are stroked with HIGHLIGHT_COLOR.
pub fn render_graph(graph: &GraphElement, canvas: &mut dyn RenderBackend) {
    render_shapes(graph.background_shapes(), canvas);
    for e in graph.edges() {
        render_element(&e.shapes, e.highlighted, canvas);
    }
    for n in graph.nodes() {
        render_element(&n.shapes, n.highlighted, canvas);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::Point;
    use crate::core::style::Pen;
    use crate::std_shapes::graph::{GraphEdge, GraphNode};

    // Records the name of every draw call, and the stroke color of text.
    #[derive(Default)]
    struct Recorder {
        calls: Vec<String>,
        colors: Vec<Color>,
    }

    impl RenderBackend for Recorder {
        fn draw_ellipse(&mut self, c: Point, _: f64, _: f64, _: bool, _: &Pen) {
            self.calls.push(format!("ellipse {}", c));
        }
        fn draw_polygon(&mut self, _: &[Point], _: bool, _: &Pen) {
            self.calls.push("polygon".to_string());
        }
        fn draw_polyline(&mut self, _: &[Point], _: &Pen) {
            self.calls.push("polyline".to_string());
        }
        fn draw_bezier(&mut self, _: &[Point], _: bool, _: &Pen) {
            self.calls.push("bezier".to_string());
        }
        fn draw_text(&mut self, _: Point, text: &str, pen: &Pen) {
            self.calls.push(format!("text {}", text));
            self.colors.push(pen.color);
        }
        fn draw_image(&mut self, _: Point, _: f64, _: f64, path: &str, _: &Pen) {
            self.calls.push(format!("image {}", path));
        }
    }

    fn text(s: &str) -> Shape {
        Shape::Text {
            pos: Point::zero(),
            text: s.to_string(),
            pen: Pen::new(),
        }
    }

    #[test]
    fn painting_order() {
        let mut g = GraphElement::new();
        g.add_node(GraphNode::new("a", vec![text("node a")]));
        g.add_edge(GraphEdge::new("a", "b", vec![text("edge")]));
        g.add_node(GraphNode::new("b", vec![text("node b")]));
        g.add_background_shape(text("background"));

        let mut rec = Recorder::default();
        render_graph(&g, &mut rec);
        assert_eq!(
            rec.calls,
            vec!["text background", "text edge", "text node a", "text node b"]
        );
    }

    #[test]
    fn highlighted_elements_change_color() {
        let mut pen = Pen::new();
        pen.color = Color::new(1., 0., 0.);
        let label = |s: &str| Shape::Text {
            pos: Point::zero(),
            text: s.to_string(),
            pen: pen.clone(),
        };
        let mut g = GraphElement::new();
        g.add_node(GraphNode::new("a", vec![label("a")]));
        g.add_node(GraphNode::new("b", vec![label("b")]));
        g.add_edge(GraphEdge::new("a", "b", vec![label("a->b")]));
        g.highlight_node("b");
        g.highlight_edge("a", "b");

        let mut rec = Recorder::default();
        render_graph(&g, &mut rec);
        assert_eq!(rec.calls, vec!["text a->b", "text a", "text b"]);
        assert_eq!(
            rec.colors,
            vec![HIGHLIGHT_COLOR, Color::new(1., 0., 0.), HIGHLIGHT_COLOR]
        );
        // The graph itself keeps the decoded colors.
        assert_eq!(g.get_node("b").unwrap().shapes[0].pen().color, pen.color);

        g.clear_highlights();
        let mut rec = Recorder::default();
        render_graph(&g, &mut rec);
        assert!(rec.colors.iter().all(|c| *c == Color::new(1., 0., 0.)));
    }

    #[test]
    fn every_shape_kind() {
        let pen = Pen::new();
        let shapes = vec![
            Shape::Ellipse {
                center: Point::new(1., 2.),
                width: 1.,
                height: 1.,
                filled: false,
                pen: pen.clone(),
            },
            Shape::Polygon {
                points: Vec::new(),
                filled: true,
                pen: pen.clone(),
            },
            Shape::Polyline {
                points: Vec::new(),
                pen: pen.clone(),
            },
            Shape::Bezier {
                points: Vec::new(),
                filled: false,
                pen: pen.clone(),
            },
            Shape::Image {
                pos: Point::zero(),
                width: 1.,
                height: 1.,
                path: "x.png".to_string(),
                pen,
            },
        ];
        let mut rec = Recorder::default();
        render_shapes(&shapes, &mut rec);
        assert_eq!(
            rec.calls,
            vec![
                "ellipse (x: 1.000, y: 2.000)",
                "polygon",
                "polyline",
                "bezier",
                "image x.png"
            ]
        );
    }
}
