//! This module represents the pen: the stroke, fill and font state that
//! xdot drawing programs mutate as they go.

use crate::core::color::Color;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LineStyleKind {
    Solid,
    Dashed,
    Dotted,
}

impl LineStyleKind {
    /// \returns the dash pattern (on, off) that renders this line style.
    pub fn dash_pattern(&self) -> Vec<f64> {
        match self {
            LineStyleKind::Solid => Vec::new(),
            LineStyleKind::Dashed => vec![5., 5.],
            LineStyleKind::Dotted => vec![1., 3.],
        }
    }
}

/// The drawing state. Every shape keeps a copy of the pen that was active
/// when the shape was created.
#[derive(Debug, Clone, PartialEq)]
pub struct Pen {
    pub color: Color,
    pub fill_color: Color,
    pub line_width: f64,
    pub line_style: LineStyleKind,
    pub dash_pattern: Vec<f64>,
    pub font_family: String,
    pub font_size: f64,
}

impl Pen {
    pub fn new() -> Self {
        Self {
            color: Color::black(),
            fill_color: Color::white(),
            line_width: 1.,
            line_style: LineStyleKind::Solid,
            dash_pattern: Vec::new(),
            font_family: "Arial".to_string(),
            font_size: 12.,
        }
    }

    pub fn set_line_style(&mut self, style: LineStyleKind) {
        self.line_style = style;
        self.dash_pattern = style.dash_pattern();
    }

    pub fn set_font(&mut self, family: &str, size: f64) {
        self.font_family = family.to_string();
        self.font_size = size;
    }
}

impl Default for Pen {
    fn default() -> Self {
        Self::new()
    }
}
