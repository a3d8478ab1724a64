//! Opaque RGB colors with hex parsing and interpolation.

use std::fmt;
use std::str::FromStr;

/// RGB color (opaque).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(into = "String", try_from = "String"))]
pub struct Rgb {
    /// Red channel (0–255).
    pub r: u8,
    /// Green channel (0–255).
    pub g: u8,
    /// Blue channel (0–255).
    pub b: u8,
}

impl Rgb {
    /// CSS `red`.
    pub const RED: Self = Self::new(255, 0, 0);
    /// CSS `green` (half-intensity, not `lime`).
    pub const GREEN: Self = Self::new(0, 128, 0);
    /// Neutral gray used at the center of every scale (`#ECECEC`).
    pub const NEUTRAL: Self = Self::new(0xEC, 0xEC, 0xEC);
    /// Subjective end of the subjectivity scale (`#4467C4`).
    pub const BLUE: Self = Self::new(0x44, 0x67, 0xC4);
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);
    /// Label text (`#333333`).
    pub const LABEL: Self = Self::new(0x33, 0x33, 0x33);

    /// Create a new RGB color.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB` or `#RGB` (the leading `#` is optional).
    #[must_use]
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.trim().strip_prefix('#').unwrap_or(hex.trim());
        if !digits.is_ascii() {
            return None;
        }
        match digits.len() {
            6 => {
                let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
                Some(Self::new(channel(0)?, channel(2)?, channel(4)?))
            }
            3 => {
                let channel = |i: usize| {
                    u8::from_str_radix(&digits[i..=i], 16)
                        .ok()
                        .map(|v| v * 17)
                };
                Some(Self::new(channel(0)?, channel(1)?, channel(2)?))
            }
            _ => None,
        }
    }

    /// Uppercase `#RRGGBB`.
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Linearly interpolate between two colors, channel by channel.
    ///
    /// `t` is clamped to `[0, 1]`; NaN is treated as 0.
    #[must_use]
    pub fn lerp(a: Self, b: Self, t: f64) -> Self {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let mix = |x: u8, y: u8| (f64::from(x) + (f64::from(y) - f64::from(x)) * t).round() as u8;
        Self::new(mix(a.r, b.r), mix(a.g, b.g), mix(a.b, b.b))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Error returned when a string is not a hex color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseRgbError(pub String);

impl fmt::Display for ParseRgbError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "not a hex color: {:?}", self.0)
    }
}

impl std::error::Error for ParseRgbError {}

impl FromStr for Rgb {
    type Err = ParseRgbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s).ok_or_else(|| ParseRgbError(s.to_string()))
    }
}

impl From<Rgb> for String {
    fn from(color: Rgb) -> Self {
        color.to_hex()
    }
}

impl TryFrom<String> for Rgb {
    type Error = ParseRgbError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_round_trip() {
        assert_eq!(Rgb::from_hex("#ECECEC"), Some(Rgb::NEUTRAL));
        assert_eq!(Rgb::from_hex("4467c4"), Some(Rgb::BLUE));
        assert_eq!(Rgb::BLUE.to_hex(), "#4467C4");
        assert_eq!(Rgb::NEUTRAL.to_string(), "#ECECEC");
    }

    #[test]
    fn short_hex_expands() {
        assert_eq!(Rgb::from_hex("#333"), Some(Rgb::LABEL));
        assert_eq!(Rgb::from_hex("#f00"), Some(Rgb::RED));
    }

    #[test]
    fn bad_hex_is_rejected() {
        assert_eq!(Rgb::from_hex("#12345"), None);
        assert_eq!(Rgb::from_hex("#GGGGGG"), None);
        assert_eq!(Rgb::from_hex("#ÉÉÉ"), None);
        assert!("nope".parse::<Rgb>().is_err());
    }

    #[test]
    fn lerp_endpoints_and_midpoint() {
        let a = Rgb::new(0, 0, 0);
        let b = Rgb::new(254, 254, 254);
        assert_eq!(Rgb::lerp(a, b, 0.0), a);
        assert_eq!(Rgb::lerp(a, b, 1.0), b);
        assert_eq!(Rgb::lerp(a, b, 0.5), Rgb::new(127, 127, 127));
    }

    #[test]
    fn lerp_clamps_and_ignores_nan() {
        let a = Rgb::new(100, 100, 100);
        let b = Rgb::new(200, 200, 200);
        assert_eq!(Rgb::lerp(a, b, -1.0), a);
        assert_eq!(Rgb::lerp(a, b, 2.0), b);
        assert_eq!(Rgb::lerp(a, b, f64::NAN), a);
    }
}
