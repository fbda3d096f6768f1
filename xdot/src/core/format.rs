//! Defines the interface between the decoded shapes and whatever draws them.

use super::{geometry::Point, style::Pen};

/// This is the trait that all rendering backends need to implement. There is
/// one method for each kind of xdot shape. The style of the shape (colors,
/// line width, fonts) is passed in \p pen.
pub trait RenderBackend {
    /// Draw an ellipse with the center \p center and the size
    /// \p width x \p height. If \p filled is set then the shape is painted
    /// with the fill color of the pen.
    fn draw_ellipse(
        &mut self,
        center: Point,
        width: f64,
        height: f64,
        filled: bool,
        pen: &Pen,
    );

    /// Draw a closed polygon.
    fn draw_polygon(&mut self, points: &[Point], filled: bool, pen: &Pen);

    /// Draw an open sequence of line segments.
    fn draw_polyline(&mut self, points: &[Point], pen: &Pen);

    /// Draw a cubic bezier spline. The format of \p points is
    /// (start, c0, c1, end, c0, c1, end, ...).
    fn draw_bezier(&mut self, points: &[Point], filled: bool, pen: &Pen);

    /// Draw a label that's anchored at \p pos.
    fn draw_text(&mut self, pos: Point, text: &str, pen: &Pen);

    /// Draw the image at \p path. The top-left corner is at \p pos.
    fn draw_image(
        &mut self,
        pos: Point,
        width: f64,
        height: f64,
        path: &str,
        pen: &Pen,
    );
}
