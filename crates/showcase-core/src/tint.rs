#![forbid(unsafe_code)]

//! Backdrop tint colour.
//!
//! Theme lookups happen outside the tour: the host resolves its colour
//! resource once and hands the tour an opaque [`Tint`]. The textual form is
//! `#RRGGBB` or `#RRGGBBAA` (straight alpha).

use std::fmt;
use std::str::FromStr;

/// Straight-alpha RGBA colour packed as `0xRRGGBBAA`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tint(u32);

impl Tint {
    /// 20% black, the default backdrop.
    pub const BLACK_20: Self = Self::rgba(0, 0, 0, 0x33);

    /// Create a tint from components.
    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self(((r as u32) << 24) | ((g as u32) << 16) | ((b as u32) << 8) | a as u32)
    }

    /// Create an opaque tint.
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 0xFF)
    }

    #[inline]
    pub const fn r(self) -> u8 {
        (self.0 >> 24) as u8
    }

    #[inline]
    pub const fn g(self) -> u8 {
        (self.0 >> 16) as u8
    }

    #[inline]
    pub const fn b(self) -> u8 {
        (self.0 >> 8) as u8
    }

    #[inline]
    pub const fn a(self) -> u8 {
        self.0 as u8
    }

    /// Packed `0xRRGGBBAA` value.
    #[inline]
    pub const fn packed(self) -> u32 {
        self.0
    }
}

impl Default for Tint {
    fn default() -> Self {
        Self::BLACK_20
    }
}

impl fmt::Display for Tint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:08X}", self.0)
    }
}

/// Failure to parse a `#RRGGBB[AA]` string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TintParseError {
    /// Missing the leading `#`.
    MissingHash,
    /// Digit count other than 6 or 8.
    InvalidLength(usize),
    /// Non-hex digit.
    InvalidDigit(String),
}

impl fmt::Display for TintParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingHash => write!(f, "tint must start with '#'"),
            Self::InvalidLength(len) => {
                write!(f, "tint must have 6 or 8 hex digits, got {len}")
            }
            Self::InvalidDigit(raw) => write!(f, "tint contains a non-hex digit: {raw}"),
        }
    }
}

impl std::error::Error for TintParseError {}

impl FromStr for Tint {
    type Err = TintParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.trim().strip_prefix('#').ok_or(TintParseError::MissingHash)?;
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(TintParseError::InvalidDigit(s.to_string()));
        }
        let len = digits.len();
        if len != 6 && len != 8 {
            return Err(TintParseError::InvalidLength(len));
        }
        let value = u32::from_str_radix(digits, 16)
            .map_err(|_| TintParseError::InvalidDigit(s.to_string()))?;
        if len == 6 {
            Ok(Self((value << 8) | 0xFF))
        } else {
            Ok(Self(value))
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Tint {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Tint {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_translucent_black() {
        let tint = Tint::default();
        assert_eq!((tint.r(), tint.g(), tint.b()), (0, 0, 0));
        assert_eq!(tint.a(), 0x33);
        assert_eq!(tint.to_string(), "#00000033");
    }

    #[test]
    fn parse_six_digits_is_opaque() {
        let tint: Tint = "#61AFEF".parse().unwrap();
        assert_eq!(tint, Tint::rgb(0x61, 0xAF, 0xEF));
        assert_eq!(tint.a(), 0xFF);
    }

    #[test]
    fn parse_eight_digits_keeps_alpha() {
        let tint: Tint = "#1e1e1e80".parse().unwrap();
        assert_eq!(tint, Tint::rgba(0x1E, 0x1E, 0x1E, 0x80));
    }

    #[test]
    fn parse_rejects_malformed() {
        assert_eq!("000000".parse::<Tint>(), Err(TintParseError::MissingHash));
        assert_eq!(
            "#12345".parse::<Tint>(),
            Err(TintParseError::InvalidLength(5))
        );
        assert!(matches!(
            "#12345G".parse::<Tint>(),
            Err(TintParseError::InvalidDigit(_))
        ));
        assert!(matches!(
            "#+1234567".parse::<Tint>(),
            Err(TintParseError::InvalidDigit(_))
        ));
    }

    #[test]
    fn display_parses_back() {
        let tint = Tint::rgba(1, 2, 3, 4);
        assert_eq!(tint.to_string().parse::<Tint>(), Ok(tint));
    }
}
