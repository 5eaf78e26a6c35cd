//! Color parsing, compositing and WCAG contrast math.
//!
//! Everything here is pure. Channels stay in `f64` through every
//! intermediate step; they are only rounded when a color is formatted for
//! rendering via [`Rgb::to_css`] or [`Color::to_css`].

/// A color with channels in `0..=255` and alpha in `0..=1`.
///
/// Values outside those ranges are tolerated; only [`blend_over`] clamps
/// alpha, and only formatting clamps channels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

/// An opaque color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0.0, 0.0, 0.0);
    pub const WHITE: Rgb = Rgb::new(255.0, 255.0, 255.0);

    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    pub fn with_alpha(self, a: f64) -> Color {
        Color {
            r: self.r,
            g: self.g,
            b: self.b,
            a,
        }
    }

    /// `rgb(r, g, b)` with rounded, clamped channels.
    pub fn to_css(self) -> String {
        format!(
            "rgb({}, {}, {})",
            css_channel(self.r),
            css_channel(self.g),
            css_channel(self.b)
        )
    }
}

impl Color {
    pub const fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Drops alpha without compositing.
    pub fn rgb(self) -> Rgb {
        Rgb::new(self.r, self.g, self.b)
    }

    pub fn to_css(self) -> String {
        let alpha = self.a.clamp(0.0, 1.0);
        format!(
            "rgba({}, {}, {}, {})",
            css_channel(self.r),
            css_channel(self.g),
            css_channel(self.b),
            (alpha * 1000.0).round() / 1000.0
        )
    }
}

fn css_channel(value: f64) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

/// Parse `#rgb`, `#rrggbb`, `#rrggbbaa`, `rgb(...)` or `rgba(...)`.
///
/// Functional forms accept comma- or space-separated channels (and a `/`
/// before alpha). Anything else yields `None`; callers pick their own
/// fallback.
pub fn parse_color(text: &str) -> Option<Color> {
    let trimmed = text.trim().to_ascii_lowercase();
    if let Some(hex) = trimmed.strip_prefix('#') {
        return parse_hex(hex);
    }
    let body = trimmed
        .strip_prefix("rgba(")
        .or_else(|| trimmed.strip_prefix("rgb("))?
        .strip_suffix(')')?;
    parse_functional(body)
}

/// Parse and drop alpha, substituting `fallback` for unparseable input.
pub fn parse_rgb_or(text: &str, fallback: Rgb) -> Rgb {
    parse_color(text).map(Color::rgb).unwrap_or(fallback)
}

fn parse_hex(hex: &str) -> Option<Color> {
    if !hex.chars().all(|ch| ch.is_ascii_hexdigit()) {
        return None;
    }
    let byte = |pair: &str| u8::from_str_radix(pair, 16).ok().map(f64::from);
    match hex.len() {
        3 => {
            let mut channels = hex.chars().map(|ch| {
                let doubled: String = [ch, ch].iter().collect();
                byte(&doubled)
            });
            Some(Color::new(
                channels.next()??,
                channels.next()??,
                channels.next()??,
                1.0,
            ))
        }
        6 | 8 => {
            let r = byte(&hex[0..2])?;
            let g = byte(&hex[2..4])?;
            let b = byte(&hex[4..6])?;
            let a = if hex.len() == 8 {
                byte(&hex[6..8])? / 255.0
            } else {
                1.0
            };
            Some(Color::new(r, g, b, a))
        }
        _ => None,
    }
}

fn parse_functional(body: &str) -> Option<Color> {
    let parts: Vec<&str> = body
        .split(|ch: char| ch == ',' || ch == '/' || ch.is_whitespace())
        .filter(|part| !part.is_empty())
        .collect();
    if !(3..=4).contains(&parts.len()) {
        return None;
    }
    let mut numbers = parts.iter().map(|part| part.parse::<f64>().ok());
    let r = numbers.next()??;
    let g = numbers.next()??;
    let b = numbers.next()??;
    let a = match numbers.next() {
        Some(alpha) => alpha?,
        None => 1.0,
    };
    if ![r, g, b, a].iter().all(|value| value.is_finite()) {
        return None;
    }
    Some(Color::new(r, g, b, a))
}

/// Standard alpha compositing of `fg` over an opaque `bg`.
pub fn blend_over(fg: Color, bg: Rgb) -> Rgb {
    let alpha = fg.a.clamp(0.0, 1.0);
    let inverse = 1.0 - alpha;
    Rgb::new(
        fg.r * alpha + bg.r * inverse,
        fg.g * alpha + bg.g * inverse,
        fg.b * alpha + bg.b * inverse,
    )
}

/// Linear interpolation from `a` (ratio 0) to `b` (ratio 1).
pub fn mix_rgb(a: Rgb, b: Rgb, ratio: f64) -> Rgb {
    let t = ratio.clamp(0.0, 1.0);
    Rgb::new(
        a.r + (b.r - a.r) * t,
        a.g + (b.g - a.g) * t,
        a.b + (b.b - a.b) * t,
    )
}

fn linear_channel(value: f64) -> f64 {
    let c = value / 255.0;
    if c <= 0.03928 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// WCAG 2.x relative luminance.
pub fn relative_luminance(rgb: Rgb) -> f64 {
    0.2126 * linear_channel(rgb.r) + 0.7152 * linear_channel(rgb.g) + 0.0722 * linear_channel(rgb.b)
}

/// WCAG contrast ratio, always `>= 1`.
pub fn contrast_ratio(a: Rgb, b: Rgb) -> f64 {
    let la = relative_luminance(a);
    let lb = relative_luminance(b);
    let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
    (lighter + 0.05) / (darker + 0.05)
}
