//! Decoder for the xdot drawing language. GraphViz stores drawing programs in
//! the `_draw_`, `_ldraw_`, `_hdraw_` (etc.) attributes when it emits xdot.
//! A program is a sequence of operations, for example:
//!
//! ```txt
//! c 7 -#ff0000 S 6 -dashed E 27 18 27 18 F 14 11 -Times-Roman T 27 14 0 7 1 -a
//! ```
//!
//! Some operations draw shapes and some update the pen. The decoder is
//! forgiving: unknown operations are skipped and bad colors turn black.
//! See: <https://graphviz.org/docs/outputs/canon/#xdot>

use crate::core::color::lookup_color;
use crate::core::geometry::Point;
use crate::core::style::{LineStyleKind, Pen};
use crate::std_shapes::shapes::Shape;

#[derive(Debug, Clone)]
pub struct XDotAttrParser {
    data: Vec<u8>,
    pos: usize,
}

// Some producers escape every backslash twice. Turn each '\\' into '\'.
fn collapse_backslashes(data: &[u8]) -> Vec<u8> {
    let mut result = Vec::with_capacity(data.len());
    let mut i = 0;
    while i < data.len() {
        result.push(data[i]);
        if data[i] == b'\\' && data.get(i + 1) == Some(&b'\\') {
            i += 1;
        }
        i += 1;
    }
    result
}

impl XDotAttrParser {
    /// Creates a decoder for the program \p xdot_data. If
    /// \p broken_backslashes is set then every double backslash is collapsed
    /// into one before decoding.
    pub fn new(xdot_data: &str, broken_backslashes: bool) -> Self {
        let mut data = xdot_data.as_bytes().to_vec();
        if broken_backslashes {
            data = collapse_backslashes(&data);
        }
        Self { data, pos: 0 }
    }

    fn has_next(&self) -> bool {
        self.pos < self.data.len()
    }

    fn current(&self) -> u8 {
        self.data.get(self.pos).copied().unwrap_or(0)
    }

    fn skip_whitespace(&mut self) {
        while self.has_next() && self.current().is_ascii_whitespace() {
            self.pos += 1;
        }
    }

    // Skips one whitespace delimited word.
    fn skip_word(&mut self) {
        while self.has_next() && !self.current().is_ascii_whitespace() {
            self.pos += 1;
        }
    }

    fn read_digits(&mut self) {
        while self.has_next() && self.current().is_ascii_digit() {
            self.pos += 1;
        }
    }

    fn slice_to_str(&self, start: usize) -> &str {
        std::str::from_utf8(&self.data[start..self.pos]).unwrap_or("")
    }

    /// Reads the operation code (a run of letters).
    fn read_code(&mut self) -> String {
        self.skip_whitespace();
        let start = self.pos;
        while self.has_next() && self.current().is_ascii_alphabetic() {
            self.pos += 1;
        }
        self.slice_to_str(start).to_string()
    }

    // int : '-'? [0-9]*
    fn read_int(&mut self) -> i64 {
        self.skip_whitespace();
        let start = self.pos;
        if self.current() == b'-' {
            self.pos += 1;
        }
        self.read_digits();
        self.slice_to_str(start).parse::<i64>().unwrap_or(0)
    }

    // float : '-'? [0-9]* ('.' [0-9]*)?
    // There is no exponent in xdot numbers.
    fn read_float(&mut self) -> f64 {
        self.skip_whitespace();
        let start = self.pos;
        if self.current() == b'-' {
            self.pos += 1;
        }
        self.read_digits();
        if self.current() == b'.' {
            self.pos += 1;
            self.read_digits();
        }
        self.slice_to_str(start).parse::<f64>().unwrap_or(0.)
    }

    /// Coordinates go through this hook. This is the place to flip the y
    /// axis, if the consumer needs it.
    fn transform(&self, x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    fn read_point(&mut self) -> Point {
        let x = self.read_float();
        let y = self.read_float();
        self.transform(x, y)
    }

    // The format of text is: "n -bytes", where n is the number of bytes that
    // follow the '-'. The length is authoritative: the text may contain
    // spaces, dashes, or anything else.
    fn read_text(&mut self) -> String {
        let len = self.read_int().max(0) as usize;
        self.skip_whitespace();
        if self.current() == b'-' {
            self.pos += 1;
        }
        let start = self.pos;
        let end = (start + len).min(self.data.len());
        self.pos = end;
        String::from_utf8_lossy(&self.data[start..end]).into_owned()
    }

    // Returns true if the next word starts like a number.
    fn at_number(&mut self) -> bool {
        self.skip_whitespace();
        let ch = self.current();
        ch.is_ascii_digit() || ch == b'-' || ch == b'.'
    }

    // polygon : n (x y){n}
    // A short list ends at the first missing coordinate. The rest of the
    // program is decoded from there.
    fn read_polygon(&mut self) -> Vec<Point> {
        let n = self.read_int().max(0) as usize;
        let mut points = Vec::new();
        for _ in 0..n {
            if !self.at_number() {
                break;
            }
            let x = self.read_float();
            if !self.at_number() {
                break;
            }
            let y = self.read_float();
            points.push(self.transform(x, y));
        }
        points
    }

    fn handle_style(&mut self, pen: &mut Pen) {
        let style = self.read_text();
        if style.contains("solid") {
            pen.set_line_style(LineStyleKind::Solid);
        } else if style.contains("dashed") {
            pen.set_line_style(LineStyleKind::Dashed);
        } else if style.contains("dotted") {
            pen.set_line_style(LineStyleKind::Dotted);
        }
    }

    /// Executes the operation \p code. Operations that change the style
    /// update \p pen. Operations that draw return the new shape, which holds
    /// a copy of the pen.
    fn dispatch(&mut self, code: &str, pen: &mut Pen) -> Option<Shape> {
        match code {
            "E" | "e" => {
                let center = self.read_point();
                let width = self.read_float();
                let height = self.read_float();
                Some(Shape::Ellipse {
                    center,
                    width,
                    height,
                    filled: code == "E",
                    pen: pen.clone(),
                })
            }
            "P" | "p" => Some(Shape::Polygon {
                points: self.read_polygon(),
                filled: code == "P",
                pen: pen.clone(),
            }),
            "L" => Some(Shape::Polyline {
                points: self.read_polygon(),
                pen: pen.clone(),
            }),
            "B" | "b" => Some(Shape::Bezier {
                points: self.read_polygon(),
                filled: code == "b",
                pen: pen.clone(),
            }),
            "T" => {
                let pos = self.read_point();
                // The alignment and the width of the text are not used.
                let _align = self.read_int();
                let _width = self.read_float();
                let text = self.read_text();
                Some(Shape::Text {
                    pos,
                    text,
                    pen: pen.clone(),
                })
            }
            "I" => {
                let pos = self.read_point();
                let width = self.read_float();
                let height = self.read_float();
                let path = self.read_text();
                Some(Shape::Image {
                    pos,
                    width,
                    height,
                    path,
                    pen: pen.clone(),
                })
            }
            "S" => {
                self.handle_style(pen);
                None
            }
            "c" => {
                pen.color = lookup_color(&self.read_text());
                None
            }
            "C" => {
                pen.fill_color = lookup_color(&self.read_text());
                None
            }
            "F" => {
                let size = self.read_float();
                let family = self.read_text();
                pen.set_font(&family, size);
                None
            }
            "t" => {
                // Font characteristics (bold, italic, ...) are not tracked.
                let _flags = self.read_int();
                None
            }
            _ => {
                log::trace!("Skipping unknown xdot operation '{}'", code);
                None
            }
        }
    }

    /// Decodes the whole program. Every call starts with a fresh pen, so
    /// calling this twice returns the same shapes.
    pub fn parse(&mut self) -> Vec<Shape> {
        self.pos = 0;
        let mut shapes = Vec::new();
        let mut pen = Pen::new();

        while self.has_next() {
            self.skip_whitespace();
            if !self.has_next() {
                break;
            }

            let code = self.read_code();
            if code.is_empty() {
                // Not an operation. Skip the word so that we make progress.
                self.skip_word();
                continue;
            }

            if let Some(shape) = self.dispatch(&code, &mut pen) {
                shapes.push(shape);
            }
        }
        shapes
    }
}

/// Decodes the xdot program \p xdot_data into a list of shapes.
pub fn parse_xdot_attr(xdot_data: &str) -> Vec<Shape> {
    XDotAttrParser::new(xdot_data, false).parse()
}
