//! Color parsing and conversion. Colors show up in xdot drawing programs as
//! hex codes, X11 names or HSV triplets. A bad color never aborts a decode:
//! anything we can't make sense of becomes opaque black.

/// An RGBA color. Every component is in the range 0..1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

// The named colors that we recognize. Names are lower case.
static COLOR_TABLE: [(&str, Color); 23] = [
    ("black", Color::new(0., 0., 0.)),
    ("white", Color::new(1., 1., 1.)),
    ("red", Color::new(1., 0., 0.)),
    ("green", Color::new(0., 0.5, 0.)),
    ("blue", Color::new(0., 0., 1.)),
    ("yellow", Color::new(1., 1., 0.)),
    ("cyan", Color::new(0., 1., 1.)),
    ("magenta", Color::new(1., 0., 1.)),
    ("gray", Color::new(0.5, 0.5, 0.5)),
    ("grey", Color::new(0.5, 0.5, 0.5)),
    ("orange", Color::new(1., 0.647, 0.)),
    ("purple", Color::new(0.5, 0., 0.5)),
    ("brown", Color::new(0.647, 0.165, 0.165)),
    ("pink", Color::new(1., 0.753, 0.796)),
    ("lightblue", Color::new(0.678, 0.847, 0.902)),
    ("lightgreen", Color::new(0.565, 0.933, 0.565)),
    ("lightgray", Color::new(0.827, 0.827, 0.827)),
    ("lightgrey", Color::new(0.827, 0.827, 0.827)),
    ("darkblue", Color::new(0., 0., 0.545)),
    ("darkgreen", Color::new(0., 0.392, 0.)),
    ("darkgray", Color::new(0.663, 0.663, 0.663)),
    ("darkgrey", Color::new(0.663, 0.663, 0.663)),
    ("transparent", Color::with_alpha(0., 0., 0., 0.)),
];

impl Color {
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, a: 1. }
    }

    pub const fn with_alpha(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    pub const fn black() -> Self {
        Color::new(0., 0., 0.)
    }

    pub const fn white() -> Self {
        Color::new(1., 1., 1.)
    }

    pub const fn transparent() -> Self {
        Color::with_alpha(0., 0., 0., 0.)
    }

    /// Parses "#RGB", "#RRGGBB" or "#RRGGBBAA". The '#' is optional.
    /// Returns opaque black if the string is malformed.
    pub fn from_hex(hex: &str) -> Self {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Color::black();
        }

        // Expand the short form: RGB -> RRGGBB.
        let digits: String = if digits.len() == 3 {
            digits.chars().flat_map(|c| [c, c]).collect()
        } else {
            digits.to_string()
        };

        if digits.len() != 6 && digits.len() != 8 {
            return Color::black();
        }

        let channel = |idx: usize| -> f64 {
            let byte = u8::from_str_radix(&digits[idx..idx + 2], 16);
            byte.map_or(0., |b| b as f64 / 255.)
        };

        let a = if digits.len() == 8 { channel(6) } else { 1. };
        Color::with_alpha(channel(0), channel(2), channel(4), a)
    }

    /// Converts hue (in degrees), saturation and value to RGB. Saturation
    /// and value are clamped to 0..1.
    pub fn from_hsv(h: f64, s: f64, v: f64) -> Self {
        let h = h.rem_euclid(360.);
        let s = s.clamp(0., 1.);
        let v = v.clamp(0., 1.);
        let c = v * s;
        let x = c * (1. - ((h / 60.) % 2. - 1.).abs());
        let m = v - c;

        let (r, g, b) = match (h / 60.) as usize {
            0 => (c, x, 0.),
            1 => (x, c, 0.),
            2 => (0., c, x),
            3 => (0., x, c),
            4 => (x, 0., c),
            _ => (c, 0., x),
        };
        let channel = |x: f64| (x + m).clamp(0., 1.);
        Color::new(channel(r), channel(g), channel(b))
    }

    /// \returns the (hue, saturation, value) triplet of the color. The hue is
    /// in degrees.
    pub fn to_hsv(&self) -> (f64, f64, f64) {
        let max = self.r.max(self.g).max(self.b);
        let min = self.r.min(self.g).min(self.b);
        let delta = max - min;

        let s = if max == 0. { 0. } else { delta / max };
        let h = if delta == 0. {
            0.
        } else if max == self.r {
            60. * ((self.g - self.b) / delta).rem_euclid(6.)
        } else if max == self.g {
            60. * ((self.b - self.r) / delta + 2.)
        } else {
            60. * ((self.r - self.g) / delta + 4.)
        };
        (h, s, max)
    }

    /// \returns the color in the "#rrggbb" format, or "#rrggbbaa" if the
    /// color is not opaque.
    pub fn to_web_color(&self) -> String {
        let to_byte = |v: f64| (v.clamp(0., 1.) * 255.).round() as u8;
        let rgb = format!(
            "#{:02x}{:02x}{:02x}",
            to_byte(self.r),
            to_byte(self.g),
            to_byte(self.b)
        );
        if self.a < 1. {
            return format!("{}{:02x}", rgb, to_byte(self.a));
        }
        rgb
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::black()
    }
}

// Parses the GraphViz "H,S,V" or "H S V" form, where each component is in
// the range 0..1. The hue wraps around, the other components saturate.
fn parse_hsv_triplet(spec: &str) -> Option<Color> {
    let parts: Vec<&str> = spec
        .split(|c: char| c == ',' || c.is_ascii_whitespace())
        .filter(|x| !x.is_empty())
        .collect();
    if parts.len() != 3 {
        return None;
    }
    let mut vals = [0.; 3];
    for (i, part) in parts.iter().enumerate() {
        vals[i] = part.parse::<f64>().ok()?;
    }
    Some(Color::from_hsv(vals[0].rem_euclid(1.) * 360., vals[1], vals[2]))
}

/// Converts a color specification to a color. This never fails: unknown
/// colors resolve to opaque black.
pub fn lookup_color(color_spec: &str) -> Color {
    let spec = color_spec.trim().to_lowercase();

    if spec.starts_with('#') {
        return Color::from_hex(&spec);
    }

    if let Some((_, color)) = COLOR_TABLE.iter().find(|(name, _)| *name == spec) {
        return *color;
    }

    // We recognize rgb(r,g,b) but don't parse it yet.
    if spec.starts_with("rgb(") {
        return Color::black();
    }

    if let Some(color) = parse_hsv_triplet(&spec) {
        return color;
    }

    log::trace!("Unknown color '{}'", color_spec);
    Color::black()
}
