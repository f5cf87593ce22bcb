//! RGB color values for scheme palettes.
//!
//! Scheme files encode each palette slot as six hex digits with no leading
//! marker:
//!
//! ```yaml
//! base00: "1d1f21"
//! base08: "CC6666"
//! ```
//!
//! Digits may be upper or lower case on input. All textual output produced by
//! [`Color`] is lowercase.
//!
//! # Example
//!
//! ```rust
//! use base16_schemes::Color;
//!
//! let color: Color = "ff8000".parse().unwrap();
//! assert_eq!(color.hex(), "ff8000");
//! assert_eq!(color.hex_bgr(), "0080ff");
//! assert_eq!(color.dec().0, 1.0);
//! ```

use std::fmt;
use std::str::FromStr;

/// Error returned when a color string is not six hex digits.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColorError {
    /// The string does not have exactly six characters.
    #[error("invalid color '{value}': expected 6 hex digits, got {len} characters")]
    Length { value: String, len: usize },

    /// The string contains a character that is not a hex digit.
    #[error("invalid color '{value}': '{digit}' is not a hex digit")]
    Digit { value: String, digit: char },
}

/// An 8-bit RGB triple. No alpha channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    r: u8,
    g: u8,
    b: u8,
}

impl Color {
    /// Creates a color from its channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses a `RRGGBB` hex string.
    pub fn parse_hex(value: &str) -> Result<Self, ColorError> {
        // Counting chars rather than bytes keeps the slicing below on
        // ASCII boundaries once the digit check passes.
        let len = value.chars().count();
        if len != 6 {
            return Err(ColorError::Length {
                value: value.to_string(),
                len,
            });
        }

        if let Some(digit) = value.chars().find(|c| !c.is_ascii_hexdigit()) {
            return Err(ColorError::Digit {
                value: value.to_string(),
                digit,
            });
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&value[range], 16).map_err(|_| ColorError::Digit {
                value: value.to_string(),
                digit: '?',
            })
        };

        Ok(Self {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }

    pub const fn r(&self) -> u8 {
        self.r
    }

    pub const fn g(&self) -> u8 {
        self.g
    }

    pub const fn b(&self) -> u8 {
        self.b
    }

    /// Lowercase hex in R, G, B order.
    pub fn hex(&self) -> String {
        format!("{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Lowercase hex with the byte order reversed (B, G, R).
    ///
    /// Some applications store colors as little-endian integers; this is a
    /// byte-order accommodation, not a color-space conversion.
    pub fn hex_bgr(&self) -> String {
        format!("{:02x}{:02x}{:02x}", self.b, self.g, self.r)
    }

    /// Each channel scaled to `0.0..=1.0`.
    pub fn dec(&self) -> (f64, f64, f64) {
        (
            f64::from(self.r) / 255.0,
            f64::from(self.g) / 255.0,
            f64::from(self.b) / 255.0,
        )
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_hex(s)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}
