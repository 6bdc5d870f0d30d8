//! Colors and the fixed coloring palette.

use peniko::Color;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Color parsing errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    #[error("Invalid hex color: {0:?}")]
    InvalidHex(String),
}

/// An opaque 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a `#RRGGBB` string. The leading `#` is optional and the digits
    /// are case-insensitive.
    pub fn from_hex(hex: &str) -> Result<Self, ColorError> {
        let invalid = || ColorError::InvalidHex(hex.to_string());
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| invalid());
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Format as `#RRGGBB` with upper-case digits.
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Fully opaque RGBA quadruple.
    pub fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, 255]
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Rgb {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl From<Rgb> for Color {
    fn from(color: Rgb) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, 255)
    }
}

impl From<Color> for Rgb {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self::new(rgba.r, rgba.g, rgba.b)
    }
}

/// A named palette swatch. The name is what gets spoken when it is picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteEntry {
    pub color: Rgb,
    pub name: &'static str,
}

impl PaletteEntry {
    const fn new(r: u8, g: u8, b: u8, name: &'static str) -> Self {
        Self {
            color: Rgb::new(r, g, b),
            name,
        }
    }
}

/// The fixed twelve-color palette.
pub const PALETTE: [PaletteEntry; 12] = [
    PaletteEntry::new(0xFF, 0x00, 0x00, "Vermelho"),
    PaletteEntry::new(0x00, 0x00, 0xFF, "Azul"),
    PaletteEntry::new(0xFF, 0xFF, 0x00, "Amarelo"),
    PaletteEntry::new(0x00, 0xFF, 0x00, "Verde"),
    PaletteEntry::new(0xFF, 0xA5, 0x00, "Laranja"),
    PaletteEntry::new(0x80, 0x00, 0x80, "Roxo"),
    PaletteEntry::new(0xFF, 0x69, 0xB4, "Rosa"),
    PaletteEntry::new(0x00, 0xFF, 0xFF, "Ciano"),
    PaletteEntry::new(0x8B, 0x45, 0x13, "Marrom"),
    PaletteEntry::new(0x00, 0x00, 0x00, "Preto"),
    PaletteEntry::new(0xFF, 0xFF, 0xFF, "Branco"),
    PaletteEntry::new(0x80, 0x80, 0x80, "Cinza"),
];

/// Find the palette entry for a color, if it is one of the swatches.
pub fn palette_entry(color: Rgb) -> Option<&'static PaletteEntry> {
    PALETTE.iter().find(|entry| entry.color == color)
}

/// Find a palette entry by its (case-insensitive) name.
pub fn palette_entry_by_name(name: &str) -> Option<&'static PaletteEntry> {
    PALETTE
        .iter()
        .find(|entry| entry.name.eq_ignore_ascii_case(name))
}

/// Stroke thickness presets offered next to the palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Thickness {
    Thin,
    #[default]
    Medium,
    Thick,
}

impl Thickness {
    pub fn width(self) -> u32 {
        match self {
            Thickness::Thin => 3,
            Thickness::Medium => 5,
            Thickness::Thick => 8,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Thickness::Thin => "Fino",
            Thickness::Medium => "Médio",
            Thickness::Thick => "Grosso",
        }
    }

    pub fn all() -> [Thickness; 3] {
        [Thickness::Thin, Thickness::Medium, Thickness::Thick]
    }
}
