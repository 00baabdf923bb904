//! # Color Derivation
//!
//! Every tint of a document (accent, soft fills, stripes, card layers) is
//! derived from the single configured primary color by moving each channel
//! toward white.
//!
//! ```text
//!   #1d4ed8 ──lighten 0.90──► #e8edfb   (soft fill)
//!           ──lighten 0.96──► #f5f7fd   (stripe)
//! ```

use std::fmt;
use std::str::FromStr;

/// A 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }

    /// Parses `#rgb` or `#rrggbb` (the leading `#` is optional).
    pub fn parse_hex(s: &str) -> Result<Rgb, String> {
        let s = s.trim();
        let hex = s.strip_prefix('#').unwrap_or(s);
        if !hex.is_ascii() {
            return Err(format!("Invalid hex color: {}", s));
        }

        let channel = |digits: &str, name: &str| {
            u8::from_str_radix(digits, 16).map_err(|e| format!("Invalid {} component: {}", name, e))
        };

        match hex.len() {
            3 => Ok(Rgb {
                r: channel(&hex[0..1].repeat(2), "red")?,
                g: channel(&hex[1..2].repeat(2), "green")?,
                b: channel(&hex[2..3].repeat(2), "blue")?,
            }),
            6 => Ok(Rgb {
                r: channel(&hex[0..2], "red")?,
                g: channel(&hex[2..4], "green")?,
                b: channel(&hex[4..6], "blue")?,
            }),
            n => Err(format!("Invalid hex color length: expected 3 or 6, got {}", n)),
        }
    }

    /// Moves every channel `amount` of the way toward white.
    ///
    /// `c + (255 − c) × amount`, clamped to `[0, 255]` then floored.
    /// Negative amounts darken; a non-finite amount leaves the color as is.
    pub fn lighten(&self, amount: f64) -> Rgb {
        if !amount.is_finite() {
            return *self;
        }
        let shift = |c: u8| {
            let c = c as f64;
            (c + (255.0 - c) * amount).clamp(0.0, 255.0).floor() as u8
        };
        Rgb {
            r: shift(self.r),
            g: shift(self.g),
            b: shift(self.b),
        }
    }

    /// Lowercase `#rrggbb`.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Rgb::parse_hex(s)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Lightens a hex color by `percent` (a fraction, `0.9` = 90 % toward white).
///
/// An undecodable color is returned unchanged.
///
/// ## Example
/// ```rust
/// use ardoise_core::color::lighten;
///
/// assert_eq!(lighten("#000000", 0.5), "#7f7f7f");
/// assert_eq!(lighten("#fff", 0.3), "#ffffff");
/// assert_eq!(lighten("teal", 0.3), "teal");
/// ```
pub fn lighten(hex: &str, percent: f64) -> String {
    match Rgb::parse_hex(hex) {
        Ok(rgb) => rgb.lighten(percent).to_hex(),
        Err(_) => hex.to_string(),
    }
}

/// Checks if `hex` decodes as a color.
pub fn is_valid_hex(hex: &str) -> bool {
    Rgb::parse_hex(hex).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_forms() {
        assert_eq!(Rgb::parse_hex("#0f766e").unwrap(), Rgb::new(0x0f, 0x76, 0x6e));
        assert_eq!(Rgb::parse_hex("#abc").unwrap(), Rgb::new(0xaa, 0xbb, 0xcc));
        assert_eq!(Rgb::parse_hex("1D4ED8").unwrap(), Rgb::new(0x1d, 0x4e, 0xd8));
        assert!(Rgb::parse_hex("#12345").is_err());
        assert!(Rgb::parse_hex("#gggggg").is_err());
        assert!(Rgb::parse_hex("#éé").is_err());
    }

    #[test]
    fn test_lighten_channels_floor() {
        // 0x1d = 29 → 29 + 226 × 0.5 = 142 ; 0x4e = 78 → 166.5 → 166 ; 0xd8 = 216 → 235.5 → 235
        assert_eq!(lighten("#1d4ed8", 0.5), "#8ea6eb");
        assert_eq!(lighten("#1d4ed8", 0.0), "#1d4ed8");
        assert_eq!(lighten("#1d4ed8", 1.0), "#ffffff");
    }

    #[test]
    fn test_lighten_clamps() {
        assert_eq!(lighten("#808080", 2.0), "#ffffff");
        assert_eq!(lighten("#808080", -5.0), "#000000");
    }

    #[test]
    fn test_invalid_input_unchanged() {
        assert_eq!(lighten("", 0.5), "");
        assert_eq!(lighten("rgb(0,0,0)", 0.5), "rgb(0,0,0)");
        assert_eq!(lighten("#000", f64::NAN), "#000000");
    }

    #[test]
    fn test_valid_hex() {
        assert!(is_valid_hex("#fff"));
        assert!(!is_valid_hex("blue"));
    }
}
