//! Contains functions that are related to the geometry of shapes and their
//! interaction with points. This includes bounding boxes, polygon containment
//! and the distance between points and segments.

// Stores a 2D coordinate, or a vector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn zero() -> Point {
        Self { x: 0., y: 0. }
    }

    pub fn new(x: f64, y: f64) -> Point {
        Self { x, y }
    }

    pub fn neg(&self) -> Point {
        Point::new(-self.x, -self.y)
    }

    pub fn add(&self, other: Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }

    pub fn sub(&self, other: Point) -> Point {
        self.add(other.neg())
    }

    pub fn dot(&self, other: Point) -> f64 {
        self.x * other.x + self.y * other.y
    }

    pub fn distance_to(&self, other: Point) -> f64 {
        let d = self.sub(other);
        (d.x * d.x + d.y * d.y).sqrt()
    }

    pub fn scale(&self, s: f64) -> Point {
        Point::new(self.x * s, self.y * s)
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "(x: {:.3}, y: {:.3})", self.x, self.y)
    }
}

/// An axis aligned rectangle, stored as the two corners (x1, y1) and
/// (x2, y2), where x1 <= x2 and y1 <= y2.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoundingBox {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl BoundingBox {
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// The degenerate box at the origin. This is the box of empty
    /// collections.
    pub fn zero() -> Self {
        Self::default()
    }

    /// \returns the box that's centered at \p center with the size \p size.
    pub fn from_center(center: Point, size: Point) -> Self {
        let half = size.scale(0.5);
        BoundingBox::new(
            center.x - half.x,
            center.y - half.y,
            center.x + half.x,
            center.y + half.y,
        )
    }

    /// \returns the smallest box that contains all of the points, or the zero
    /// box if there are no points.
    pub fn from_points(points: &[Point]) -> Self {
        let first = match points.first() {
            Some(p) => *p,
            None => return BoundingBox::zero(),
        };
        let mut bb = BoundingBox::new(first.x, first.y, first.x, first.y);
        for p in points.iter().skip(1) {
            bb.x1 = bb.x1.min(p.x);
            bb.y1 = bb.y1.min(p.y);
            bb.x2 = bb.x2.max(p.x);
            bb.y2 = bb.y2.max(p.y);
        }
        bb
    }

    /// \returns the component-wise union of the boxes, or the zero box if
    /// the iterator is empty.
    pub fn union_all<I: IntoIterator<Item = BoundingBox>>(boxes: I) -> Self {
        let mut iter = boxes.into_iter();
        let first = match iter.next() {
            Some(bb) => bb,
            None => return BoundingBox::zero(),
        };
        iter.fold(first, |acc, bb| acc.union(&bb))
    }

    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox::new(
            self.x1.min(other.x1),
            self.y1.min(other.y1),
            self.x2.max(other.x2),
            self.y2.max(other.y2),
        )
    }

    /// \return true if \p p is inside the box, or on its boundary.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x1 && p.x <= self.x2 && p.y >= self.y1 && p.y <= self.y2
    }

    /// \return True if the boxes overlap (touching counts).
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        !(self.x2 < other.x1
            || self.x1 > other.x2
            || self.y2 < other.y1
            || self.y1 > other.y2)
    }

    pub fn width(&self) -> f64 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> f64 {
        self.y2 - self.y1
    }

    pub fn center(&self) -> Point {
        Point::new((self.x1 + self.x2) / 2., (self.y1 + self.y2) / 2.)
    }

    pub fn top_left(&self) -> Point {
        Point::new(self.x1, self.y1)
    }

    pub fn bottom_right(&self) -> Point {
        Point::new(self.x2, self.y2)
    }
}

impl std::fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "[{} - {}]", self.top_left(), self.bottom_right())
    }
}

/// \return true if \p p is inside the ellipse centered at \p center with the
/// size \p size (width, height).
pub fn ellipse_contains(center: Point, size: Point, p: Point) -> bool {
    let dx = (p.x - center.x) / (size.x / 2.);
    let dy = (p.y - center.y) / (size.y / 2.);
    // A flat ellipse divides by zero and produces NaN, which compares false.
    dx * dx + dy * dy <= 1.
}

/// Even-odd ray casting. \return true if \p p is inside the polygon that's
/// defined by the vertices in \p points. Polygons with fewer than three
/// vertices contain nothing.
pub fn polygon_contains(points: &[Point], p: Point) -> bool {
    if points.len() < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = points.len() - 1;
    for i in 0..points.len() {
        let pi = points[i];
        let pj = points[j];
        // Cast a ray to the right of the point and count the crossings.
        if (pi.y > p.y) != (pj.y > p.y)
            && p.x < (pj.x - pi.x) * (p.y - pi.y) / (pj.y - pi.y) + pi.x
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// \returns the distance between the point \p p and the segment \p seg.
pub fn distance_to_segment(seg: (Point, Point), p: Point) -> f64 {
    let dir = seg.1.sub(seg.0);
    let len_sq = dir.dot(dir);

    // A segment of length zero is a point.
    if len_sq == 0. {
        return p.distance_to(seg.0);
    }

    // Project the point on the line and clamp it to the segment.
    let t = (p.sub(seg.0).dot(dir) / len_sq).clamp(0., 1.);
    let closest = seg.0.add(dir.scale(t));
    p.distance_to(closest)
}

/// \return true if \p p is within \p tolerance of the polyline \p points.
pub fn polyline_is_near(points: &[Point], p: Point, tolerance: f64) -> bool {
    points
        .windows(2)
        .any(|w| distance_to_segment((w[0], w[1]), p) <= tolerance)
}

/// \returns the centroid (average of the vertices) of \p points.
pub fn centroid(points: &[Point]) -> Point {
    if points.is_empty() {
        return Point::zero();
    }
    let sum = points.iter().fold(Point::zero(), |acc, p| acc.add(*p));
    sum.scale(1. / points.len() as f64)
}

#[test]
fn polygon_contains_test() {
    let square = [
        Point::new(0., 0.),
        Point::new(10., 0.),
        Point::new(10., 10.),
        Point::new(0., 10.),
    ];
    assert!(polygon_contains(&square, Point::new(5., 5.)));
    assert!(polygon_contains(&square, centroid(&square)));
    assert!(!polygon_contains(&square, Point::new(15., 5.)));
    assert!(!polygon_contains(&square, Point::new(-100., -100.)));

    // A concave "L" shape.
    let ell = [
        Point::new(0., 0.),
        Point::new(10., 0.),
        Point::new(10., 3.),
        Point::new(3., 3.),
        Point::new(3., 10.),
        Point::new(0., 10.),
    ];
    assert!(polygon_contains(&ell, Point::new(1., 8.)));
    assert!(polygon_contains(&ell, Point::new(8., 1.)));
    assert!(!polygon_contains(&ell, Point::new(8., 8.)));

    // Degenerate polygons contain nothing.
    let line = [Point::new(0., 0.), Point::new(10., 10.)];
    assert!(!polygon_contains(&line, Point::new(5., 5.)));
}

#[test]
fn distance_to_segment_test() {
    let seg = (Point::new(0., 0.), Point::new(10., 0.));
    assert_eq!(distance_to_segment(seg, Point::new(5., 3.)), 3.);
    assert_eq!(distance_to_segment(seg, Point::new(-4., 3.)), 5.);
    assert_eq!(distance_to_segment(seg, Point::new(13., 4.)), 5.);

    let dot = (Point::new(1., 1.), Point::new(1., 1.));
    assert_eq!(distance_to_segment(dot, Point::new(4., 5.)), 5.);
}

#[test]
fn bounding_box_test() {
    let pts = [Point::new(3., -1.), Point::new(-2., 4.), Point::new(1., 1.)];
    let bb = BoundingBox::from_points(&pts);
    assert_eq!(bb, BoundingBox::new(-2., -1., 3., 4.));
    assert_eq!(BoundingBox::from_points(&[]), BoundingBox::zero());

    let other = BoundingBox::new(0., 0., 10., 2.);
    let u = BoundingBox::union_all([bb, other]);
    assert_eq!(u, BoundingBox::new(-2., -1., 10., 4.));
    assert_eq!(BoundingBox::union_all(Vec::new()), BoundingBox::zero());

    assert!(u.contains(Point::new(10., 4.)));
    assert!(!u.contains(Point::new(10.1, 4.)));
    assert!(bb.intersects(&other));
    assert!(!bb.intersects(&BoundingBox::new(20., 20., 30., 30.)));
}

#[test]
fn ellipse_contains_test() {
    let c = Point::new(100., 50.);
    let sz = Point::new(20., 10.);
    assert!(ellipse_contains(c, sz, c));
    assert!(ellipse_contains(c, sz, Point::new(110., 50.)));
    assert!(!ellipse_contains(c, sz, Point::new(109., 55.)));
    assert!(!ellipse_contains(c, Point::zero(), Point::new(1., 1.)));
}
