//! Decoding of `&H`-prefixed designer colors
//!
//! The designer stores colors as `&HAARRGGBB` (or `&HRRGGBB`, fully opaque).
//! The runtime expects the packed ARGB value as a signed 32-bit integer.

use thiserror::Error;

/// Sentinel marking a packed color literal
pub const COLOR_PREFIX: &str = "&H";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ColorError {
    #[error("color literal must start with '&H': {literal}")]
    MissingPrefix { literal: String },

    #[error("color literal must have 6 or 8 hex digits, found {digits}: {literal}")]
    InvalidLength { literal: String, digits: usize },

    #[error("color literal contains a non-hex digit: {literal}")]
    InvalidDigit { literal: String },
}

/// Whether a property value should be decoded as a color
///
/// Only the prefix and the overall length are checked here; the digits are
/// validated by [`decode_color`].
pub fn looks_like_color(value: &str) -> bool {
    value.starts_with(COLOR_PREFIX) && matches!(value.len(), 8 | 10)
}

/// Decode `&H[AA]RRGGBB` into a signed ARGB integer
pub fn decode_color(literal: &str) -> Result<i32, ColorError> {
    let digits = literal
        .strip_prefix(COLOR_PREFIX)
        .ok_or_else(|| ColorError::MissingPrefix {
            literal: literal.to_string(),
        })?;

    if digits.len() != 6 && digits.len() != 8 {
        return Err(ColorError::InvalidLength {
            literal: literal.to_string(),
            digits: digits.len(),
        });
    }
    // from_str_radix alone would accept a leading '+'
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(ColorError::InvalidDigit {
            literal: literal.to_string(),
        });
    }

    let packed = u32::from_str_radix(digits, 16).map_err(|_| ColorError::InvalidDigit {
        literal: literal.to_string(),
    })?;
    let argb = if digits.len() == 6 {
        0xFF00_0000 | packed
    } else {
        packed
    };

    Ok(argb as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_eight_digits() {
        assert_eq!(decode_color("&HFF112233"), Ok(-15584205));
    }

    #[test]
    fn test_decode_six_digits_defaults_to_opaque() {
        assert_eq!(decode_color("&H112233"), Ok(-15584205));
    }

    #[test]
    fn test_decode_lowercase_digits() {
        assert_eq!(decode_color("&Hff112233"), Ok(-15584205));
    }

    #[test]
    fn test_decode_translucent_stays_positive() {
        assert_eq!(decode_color("&H7F000000"), Ok(0x7F00_0000));
        assert_eq!(decode_color("&H00FFFFFF"), Ok(0x00FF_FFFF));
    }

    #[test]
    fn test_decode_extremes() {
        assert_eq!(decode_color("&HFFFFFFFF"), Ok(-1));
        assert_eq!(decode_color("&H80000000"), Ok(i32::MIN));
        assert_eq!(decode_color("&H000000"), Ok(-16777216));
    }

    #[test]
    fn test_decode_invalid_digit() {
        assert!(matches!(
            decode_color("&HFF11223G"),
            Err(ColorError::InvalidDigit { .. })
        ));
        assert!(matches!(
            decode_color("&H+1122334"),
            Err(ColorError::InvalidDigit { .. })
        ));
    }

    #[test]
    fn test_decode_invalid_length() {
        assert_eq!(
            decode_color("&H1234"),
            Err(ColorError::InvalidLength {
                literal: "&H1234".to_string(),
                digits: 4
            })
        );
    }

    #[test]
    fn test_decode_missing_prefix() {
        assert!(matches!(
            decode_color("FF112233"),
            Err(ColorError::MissingPrefix { .. })
        ));
    }

    #[test]
    fn test_looks_like_color() {
        assert!(looks_like_color("&HFF112233"));
        assert!(looks_like_color("&H112233"));
        assert!(!looks_like_color("&H1234"));
        assert!(!looks_like_color("#112233"));
    }
}
