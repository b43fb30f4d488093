//! Colors and the cyclic chart palette
//!
//! Slices are colored by position: slice `i` takes `palette[i % len]`. The
//! color is not derived from the slice label, so reordering equal data sets
//! recolors them.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// A color in RGBA format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red component (0-255)
    pub r: u8,
    /// Green component (0-255)
    pub g: u8,
    /// Blue component (0-255)
    pub b: u8,
    /// Alpha component (0-255, 255 = opaque)
    pub a: u8,
}

impl Color {
    /// Create a new color from RGBA values
    #[must_use]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create a new color from RGB values (alpha = 255)
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parse `#RRGGBB` or `#RRGGBBAA` (the leading `#` is optional)
    pub fn from_hex(hex: &str) -> ChartResult<Self> {
        let digits = hex.trim().trim_start_matches('#');
        if !digits.is_ascii() {
            return Err(ChartError::InvalidColor(hex.to_string()));
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map_err(|_| ChartError::InvalidColor(hex.to_string()))
        };

        match digits.len() {
            6 => Ok(Self::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
            8 => Ok(Self::rgba(
                channel(0..2)?,
                channel(2..4)?,
                channel(4..6)?,
                channel(6..8)?,
            )),
            _ => Err(ChartError::InvalidColor(hex.to_string())),
        }
    }

    /// Hex encoding; alpha is included only when the color is not opaque
    #[must_use]
    pub fn to_hex(self) -> String {
        if self.a == 255 {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }

    /// Convert to iced Color
    #[must_use]
    pub fn to_iced(self) -> iced::Color {
        iced::Color::from_rgba8(self.r, self.g, self.b, f32::from(self.a) / 255.0)
    }

    /// Same color with a different alpha
    #[must_use]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Black color
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// White color
    pub const WHITE: Self = Self::rgb(255, 255, 255);
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for Color {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::from_hex(&raw).map_err(serde::de::Error::custom)
    }
}

/// The four ring chart colors, in cycling order
pub const RING_COLORS: [Color; 4] = [
    Color::rgb(0x00, 0x88, 0xFE), // Blue
    Color::rgb(0x00, 0xC4, 0x9F), // Teal
    Color::rgb(0xFF, 0xBB, 0x28), // Amber
    Color::rgb(0xFF, 0x80, 0x42), // Orange
];

/// A fixed, non-empty, ordered list of colors
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Color>,
}

impl Palette {
    /// Build a palette; fails when `colors` is empty
    pub fn new(colors: Vec<Color>) -> ChartResult<Self> {
        if colors.is_empty() {
            return Err(ChartError::EmptyPalette);
        }
        Ok(Self { colors })
    }

    /// The ring chart palette
    #[must_use]
    pub fn ring() -> Self {
        Self {
            colors: RING_COLORS.to_vec(),
        }
    }

    /// Color for the element at `index`, cycling through the palette
    #[must_use]
    pub fn color_at(&self, index: usize) -> Color {
        self.colors[index % self.colors.len()]
    }

    /// Number of colors before the cycle repeats
    #[must_use]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Whether the palette has no colors; `new` rejects that case
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// The colors in cycle order
    #[must_use]
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::ring()
    }
}
