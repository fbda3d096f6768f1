//! SVG rendering backend that accepts draw calls and saves the output to a file.

use crate::core::format::RenderBackend;
use crate::core::geometry::{BoundingBox, Point};
use crate::core::style::Pen;
use std::collections::HashMap;

static SVG_HEADER: &str =
    r#"<?xml version="1.0" encoding="UTF-8" standalone="no"?>"#;

static SVG_FOOTER: &str = "</svg>";

// The space that we leave around the drawing.
const MARGIN: f64 = 5.;

fn escape_string(x: &str) -> String {
    let mut res = String::new();
    for c in x.chars() {
        match c {
            '&' => {
                res.push_str("&amp;");
            }
            '<' => {
                res.push_str("&lt;");
            }
            '>' => {
                res.push_str("&gt;");
            }
            '"' => {
                res.push_str("&quot;");
            }
            '\'' => {
                res.push_str("&apos;");
            }
            _ => {
                res.push(c);
            }
        }
    }
    res
}

fn format_points(points: &[Point]) -> String {
    let coords: Vec<String> =
        points.iter().map(|p| format!("{},{}", p.x, p.y)).collect();
    coords.join(" ")
}

// Converts the pen into the svg stroke attributes.
fn stroke_attributes(pen: &Pen) -> String {
    let mut attrs = format!(
        "stroke=\"{}\" stroke-width=\"{}\"",
        pen.color.to_web_color(),
        pen.line_width
    );
    if !pen.dash_pattern.is_empty() {
        let pattern: Vec<String> =
            pen.dash_pattern.iter().map(|x| x.to_string()).collect();
        attrs.push_str(&format!(" stroke-dasharray=\"{}\"", pattern.join(",")));
    }
    attrs
}

fn fill_attribute(filled: bool, pen: &Pen) -> String {
    if filled {
        format!("fill=\"{}\"", pen.fill_color.to_web_color())
    } else {
        "fill=\"none\"".to_string()
    }
}

pub struct SVGWriter {
    content: String,
    // The region that the drawing covers.
    view: Option<BoundingBox>,
    // Maps (font size, font family) to the class name and class impl.
    font_style_map: HashMap<(usize, String), (String, String)>,
}

impl SVGWriter {
    pub fn new() -> SVGWriter {
        SVGWriter {
            content: String::new(),
            view: None,
            font_style_map: HashMap::new(),
        }
    }
}

impl Default for SVGWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl SVGWriter {
    // Grow the viewable svg window to include the box \p bb.
    fn grow_window(&mut self, bb: BoundingBox) {
        self.view = Some(match self.view {
            Some(view) => view.union(&bb),
            None => bb,
        });
    }

    fn grow_window_points(&mut self, points: &[Point]) {
        if !points.is_empty() {
            self.grow_window(BoundingBox::from_points(points));
        }
    }

    // Gets or creates a font 'class' for the parameters. Returns the class
    // name.
    fn get_or_create_font_style(&mut self, pen: &Pen) -> String {
        let font_size = pen.font_size.round().max(1.) as usize;
        let key = (font_size, pen.font_family.clone());
        if let Option::Some(x) = self.font_style_map.get(&key) {
            return x.0.clone();
        }
        let class_name = format!("a{}", self.font_style_map.len());
        let class_impl = format!(
            ".{} {{ font-size: {}px; font-family: {}, serif; }}",
            class_name,
            font_size,
            escape_string(&pen.font_family)
        );
        let impl_ = (class_name.clone(), class_impl);
        self.font_style_map.insert(key, impl_);
        class_name
    }

    fn emit_svg_font_styles(&self) -> String {
        let mut styles: Vec<&String> =
            self.font_style_map.values().map(|x| &x.1).collect();
        // Keep the output stable.
        styles.sort();

        let mut content = String::new();
        content.push_str("<style>\n");
        for style in styles {
            content.push_str(style);
            content.push('\n');
        }
        content.push_str("</style>\n");
        content
    }

    pub fn finalize(&self) -> String {
        let view = self.view.unwrap_or_default();
        let x = view.x1 - MARGIN;
        let y = view.y1 - MARGIN;
        let width = view.width() + MARGIN * 2.;
        let height = view.height() + MARGIN * 2.;

        let mut result = String::new();
        result.push_str(SVG_HEADER);
        let svg_line = format!(
            "<svg width=\"{}\" height=\"{}\" viewBox=\"{} {} {} {}\
            \" xmlns=\"http://www.w3.org/2000/svg\" \
            xmlns:xlink=\"http://www.w3.org/1999/xlink\">\n",
            width, height, x, y, width, height
        );
        result.push_str(&svg_line);
        result.push_str(&self.emit_svg_font_styles());
        result.push_str(&self.content);
        result.push_str(SVG_FOOTER);
        result
    }
}

impl RenderBackend for SVGWriter {
    fn draw_ellipse(
        &mut self,
        center: Point,
        width: f64,
        height: f64,
        filled: bool,
        pen: &Pen,
    ) {
        self.grow_window(BoundingBox::from_center(
            center,
            Point::new(width, height),
        ));
        let line = format!(
            "<ellipse cx=\"{}\" cy=\"{}\" rx=\"{}\" ry=\"{}\" {} {} />\n",
            center.x,
            center.y,
            width / 2.,
            height / 2.,
            fill_attribute(filled, pen),
            stroke_attributes(pen)
        );
        self.content.push_str(&line);
    }

    fn draw_polygon(&mut self, points: &[Point], filled: bool, pen: &Pen) {
        self.grow_window_points(points);
        let line = format!(
            "<polygon points=\"{}\" {} {} />\n",
            format_points(points),
            fill_attribute(filled, pen),
            stroke_attributes(pen)
        );
        self.content.push_str(&line);
    }

    fn draw_polyline(&mut self, points: &[Point], pen: &Pen) {
        self.grow_window_points(points);
        let line = format!(
            "<polyline points=\"{}\" fill=\"none\" {} />\n",
            format_points(points),
            stroke_attributes(pen)
        );
        self.content.push_str(&line);
    }

    fn draw_bezier(&mut self, points: &[Point], filled: bool, pen: &Pen) {
        let first = match points.first() {
            Some(p) => p,
            None => return,
        };
        self.grow_window_points(points);

        // Control points as defined in here:
        // https://developer.mozilla.org/en-US/docs/Web/SVG/Tutorial/Paths#curve_commands
        // Structured as [M (C C C) (C C C) ...]
        let mut path_builder = format!("M {} {} ", first.x, first.y);
        for curve in points[1..].chunks(3) {
            if curve.len() < 3 {
                // An incomplete curve. Connect the remaining points.
                for p in curve {
                    path_builder.push_str(&format!("L {} {} ", p.x, p.y));
                }
                break;
            }
            path_builder.push_str(&format!(
                "C {} {}, {} {}, {} {} ",
                curve[0].x, curve[0].y, curve[1].x, curve[1].y, curve[2].x, curve[2].y
            ));
        }

        let line = format!(
            "<path d=\"{}\" {} {} />\n",
            path_builder.trim_end(),
            fill_attribute(filled, pen),
            stroke_attributes(pen)
        );
        self.content.push_str(&line);
    }

    fn draw_text(&mut self, pos: Point, text: &str, pen: &Pen) {
        let width = text.chars().count() as f64 * pen.font_size * 0.6;
        self.grow_window(BoundingBox::from_center(
            pos,
            Point::new(width, pen.font_size),
        ));
        let font_class = self.get_or_create_font_style(pen);
        let line = format!(
            "<text x=\"{}\" y=\"{}\" text-anchor=\"middle\" class=\"{}\" \
            fill=\"{}\">{}</text>\n",
            pos.x,
            pos.y,
            font_class,
            pen.color.to_web_color(),
            escape_string(text)
        );
        self.content.push_str(&line);
    }

    fn draw_image(
        &mut self,
        pos: Point,
        width: f64,
        height: f64,
        path: &str,
        _pen: &Pen,
    ) {
        self.grow_window(BoundingBox::new(
            pos.x,
            pos.y,
            pos.x + width,
            pos.y + height,
        ));
        let line = format!(
            "<image xlink:href=\"{}\" x=\"{}\" y=\"{}\" width=\"{}\" \
            height=\"{}\" />\n",
            escape_string(path),
            pos.x,
            pos.y,
            width,
            height
        );
        self.content.push_str(&line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::style::LineStyleKind;

    #[test]
    fn escape() {
        assert_eq!(escape_string("a<b & \"c\""), "a&lt;b &amp; &quot;c&quot;");
    }

    #[test]
    fn empty_document() {
        let svg = SVGWriter::new();
        let doc = svg.finalize();
        assert!(doc.starts_with(SVG_HEADER));
        assert!(doc.contains("viewBox=\"-5 -5 10 10\""));
        assert!(doc.ends_with(SVG_FOOTER));
    }

    #[test]
    fn shapes_and_styles() {
        let mut svg = SVGWriter::new();
        let mut pen = Pen::new();
        svg.draw_ellipse(Point::new(10., 10.), 20., 10., true, &pen);
        pen.set_line_style(LineStyleKind::Dashed);
        svg.draw_polyline(&[Point::new(0., 0.), Point::new(40., 30.)], &pen);
        svg.draw_text(Point::new(20., 20.), "a<b", &pen);

        let doc = svg.finalize();
        assert!(doc.contains("rx=\"10\" ry=\"5\" fill=\"#ffffff\" stroke=\"#000000\""));
        assert!(doc.contains("<polyline points=\"0,0 40,30\" fill=\"none\""));
        assert!(doc.contains("stroke-dasharray=\"5,5\""));
        assert!(doc.contains(">a&lt;b</text>"));
        assert!(doc.contains("font-size: 12px; font-family: Arial"));
        assert!(doc.contains("viewBox=\"-5 -5 50 40\""));
    }

    #[test]
    fn bezier_path() {
        let mut svg = SVGWriter::new();
        let points = [
            Point::new(0., 0.),
            Point::new(1., 1.),
            Point::new(2., 2.),
            Point::new(3., 3.),
        ];
        svg.draw_bezier(&points, false, &Pen::new());
        svg.draw_bezier(&[], false, &Pen::new());
        let doc = svg.finalize();
        assert!(doc.contains("<path d=\"M 0 0 C 1 1, 2 2, 3 3\" fill=\"none\""));
    }
}
