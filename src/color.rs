use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use crate::theme::Palette;

/// Luminance above which a background counts as light.
pub const LUMINANCE_THRESHOLD: f64 = 0.5;

static THEME_VAR_REGEX: OnceLock<Regex> = OnceLock::new();

fn theme_var_regex() -> &'static Regex {
    THEME_VAR_REGEX.get_or_init(|| Regex::new(r"^var\(\s*--q-([a-z-]+)\s*\)$").unwrap())
}

/// An RGB color with channels in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(1.0, 1.0, 1.0);
    pub const BLACK: Rgb = Rgb::new(0.0, 0.0, 0.0);

    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Neutral grey with the same value on every channel.
    pub const fn grey(v: f64) -> Self {
        Self::new(v, v, v)
    }

    pub fn luminance(&self) -> f64 {
        0.299 * self.r + 0.587 * self.g + 0.114 * self.b
    }

    pub fn with_alpha(self, a: f64) -> Rgba {
        Rgba {
            r: self.r,
            g: self.g,
            b: self.b,
            a,
        }
    }
}

/// An RGB color with alpha.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Rgba {
    pub const fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    pub fn rgb(&self) -> Rgb {
        Rgb::new(self.r, self.g, self.b)
    }
}

impl From<Rgb> for Rgba {
    fn from(c: Rgb) -> Self {
        c.with_alpha(1.0)
    }
}

/// Text color that stays readable on `background`: black on light
/// backgrounds, white on dark ones.
pub fn contrasting_text_color(background: Rgb) -> Rgb {
    if background.luminance() > LUMINANCE_THRESHOLD {
        Rgb::BLACK
    } else {
        Rgb::WHITE
    }
}

/// Parse a CSS color: hex (`#rgb`, `#rrggbb`, `#rrggbbaa`), a functional
/// form such as `rgb()`, `rgba()` or `hsl()`, a small named-color table, or
/// a `var(--q-name)` theme reference. Returns `None` for anything else.
pub fn parse_css_color(value: &str, palette: &Palette) -> Option<Rgba> {
    let value = value.trim();

    if let Some(caps) = theme_var_regex().captures(value) {
        return palette.get(caps.get(1)?.as_str()).map(Rgba::from);
    }
    if value.starts_with('#') || value.contains('(') {
        return parse_color_syntax(value);
    }
    named_color(&value.to_ascii_lowercase())
}

fn parse_color_syntax(value: &str) -> Option<Rgba> {
    let parsed: csscolorparser::Color = value.parse().ok()?;
    let [r, g, b, _] = parsed.to_rgba8();
    let channel = |v: u8| f64::from(v) / 255.0;
    Some(Rgba::new(
        channel(r),
        channel(g),
        channel(b),
        (parsed.a as f64).clamp(0.0, 1.0),
    ))
}

fn named_color(name: &str) -> Option<Rgba> {
    let color = match name {
        "white" => Rgba::new(1.0, 1.0, 1.0, 1.0),
        "black" => Rgba::new(0.0, 0.0, 0.0, 1.0),
        "red" => Rgba::new(1.0, 0.0, 0.0, 1.0),
        "green" => Rgba::new(0.0, 0.8, 0.0, 1.0),
        "blue" => Rgba::new(0.0, 0.0, 1.0, 1.0),
        "yellow" => Rgba::new(1.0, 1.0, 0.0, 1.0),
        "gray" | "grey" => Rgba::new(0.5, 0.5, 0.5, 1.0),
        "transparent" => Rgba::new(0.0, 0.0, 0.0, 0.0),
        _ => return None,
    };
    Some(color)
}
