//! Color values and CSS-style color parsing.

use serde::{Deserialize, Serialize};

use crate::error::{HeatmapError, HeatmapResult};

/// Color value in RGBA format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba::new(255, 255, 255, 255);
    pub const BLACK: Rgba = Rgba::new(0, 0, 0, 255);
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Parse a CSS-style color.
    ///
    /// Accepts `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa` (leading `#` optional
    /// for the 6 and 8 digit forms) and a handful of named colors.
    pub fn parse(s: &str) -> HeatmapResult<Self> {
        let trimmed = s.trim();
        if let Some(color) = named_color(trimmed) {
            return Ok(color);
        }
        parse_hex_color(trimmed).ok_or_else(|| HeatmapError::InvalidColor(s.to_string()))
    }
}

impl std::fmt::Display for Rgba {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
    }
}

/// Color as written in configuration files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorSpec {
    /// Hex string or named color
    Text(String),

    /// RGB array: [r, g, b] or [r, g, b, a]
    Array(Vec<u8>),

    /// Explicit RGBA
    Rgba { r: u8, g: u8, b: u8, a: u8 },
}

impl ColorSpec {
    /// Resolve to a concrete color, failing on anything unparseable.
    pub fn resolve(&self) -> HeatmapResult<Rgba> {
        match self {
            ColorSpec::Text(s) => Rgba::parse(s),
            ColorSpec::Array(arr) => match arr.as_slice() {
                [r, g, b] => Ok(Rgba::opaque(*r, *g, *b)),
                [r, g, b, a] => Ok(Rgba::new(*r, *g, *b, *a)),
                _ => Err(HeatmapError::InvalidColor(format!(
                    "expected 3 or 4 components, got {}",
                    arr.len()
                ))),
            },
            ColorSpec::Rgba { r, g, b, a } => Ok(Rgba::new(*r, *g, *b, *a)),
        }
    }
}

impl From<&str> for ColorSpec {
    fn from(s: &str) -> Self {
        ColorSpec::Text(s.to_string())
    }
}

fn parse_hex_color(s: &str) -> Option<Rgba> {
    let hex = match s.strip_prefix('#') {
        Some(rest) => rest,
        // Short forms are ambiguous without the '#'
        None if s.len() == 6 || s.len() == 8 => s,
        None => return None,
    };

    // from_str_radix alone would accept a leading '+'
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }

    let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();

    match hex.len() {
        3 => Some(Rgba::opaque(nibble(0)?, nibble(1)?, nibble(2)?)),
        4 => Some(Rgba::new(nibble(0)?, nibble(1)?, nibble(2)?, nibble(3)?)),
        6 => Some(Rgba::opaque(byte(0)?, byte(2)?, byte(4)?)),
        8 => Some(Rgba::new(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
        _ => None,
    }
}

fn named_color(name: &str) -> Option<Rgba> {
    let color = match name.to_lowercase().as_str() {
        "transparent" => Rgba::TRANSPARENT,
        "black" => Rgba::BLACK,
        "white" => Rgba::WHITE,
        "red" => Rgba::opaque(255, 0, 0),
        "green" => Rgba::opaque(0, 128, 0),
        "lime" => Rgba::opaque(0, 255, 0),
        "blue" => Rgba::opaque(0, 0, 255),
        "yellow" => Rgba::opaque(255, 255, 0),
        "cyan" | "aqua" => Rgba::opaque(0, 255, 255),
        "magenta" | "fuchsia" => Rgba::opaque(255, 0, 255),
        "orange" => Rgba::opaque(255, 165, 0),
        "purple" => Rgba::opaque(128, 0, 128),
        "gray" | "grey" => Rgba::opaque(128, 128, 128),
        _ => return None,
    };
    Some(color)
}
