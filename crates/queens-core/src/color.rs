use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// An 8-bit RGB color.
///
/// The interchange form is the 6-hex-digit string `#rrggbb` used by the board
/// editor payloads; `Display`, `FromStr`, and the serde impls all speak that
/// form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// Create a color from its red, green, and blue channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Squared Euclidean distance in RGB space, the metric clustering
    /// minimizes.
    pub fn distance_sq(self, other: Color) -> f64 {
        let dr = f64::from(self.r) - f64::from(other.r);
        let dg = f64::from(self.g) - f64::from(other.g);
        let db = f64::from(self.b) - f64::from(other.b);
        dr * dr + dg * dg + db * db
    }

    /// Format as the `#rrggbb` interchange string.
    pub fn to_hex(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Rejected inputs when parsing a `#rrggbb` color string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseColorError {
    /// Wrong shape: missing `#` prefix or not exactly six digits after it.
    #[error("color must look like #rrggbb, got {0:?}")]
    BadFormat(String),
    /// Right shape, but a channel is not valid hexadecimal.
    #[error("invalid hex digits in color {0:?}")]
    BadDigit(String),
}

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s
            .strip_prefix('#')
            .ok_or_else(|| ParseColorError::BadFormat(s.to_string()))?;
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(ParseColorError::BadFormat(s.to_string()));
        }
        let channel = |digits: &str| {
            u8::from_str_radix(digits, 16).map_err(|_| ParseColorError::BadDigit(s.to_string()))
        };
        Ok(Self::new(
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
        ))
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

impl TryFrom<String> for Color {
    type Error = ParseColorError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}
