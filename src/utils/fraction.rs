//! Parsing of rational-number text such as `"3/2"` or `"2.5"`

use crate::error::{KernelError, Result};
use num_rational::{BigRational, Ratio};
use num_traits::ToPrimitive;

/// Interpret `text` as a fraction and return its float value.
///
/// Accepted forms are an optionally signed integer ratio of any size
/// (`"3/2"`, `"-1/2"`) or an optionally signed decimal with optional
/// exponent (`"1.5"`, `".5"`, `"25e-1"`). Whitespace is allowed around the
/// whole literal only. Special float spellings such as `"inf"` or `"nan"`
/// are not fractions and are rejected.
pub fn parse_fraction(text: &str) -> Result<f64> {
    let invalid = || {
        KernelError::InvalidInput(format!(
            "The provided input '{text}' could not be interpreted as a fraction."
        ))
    };

    let trimmed = text.trim();
    if let Some((_, denom)) = trimmed.split_once('/') {
        // The denominator is an unsigned digit string
        if !denom.starts_with(|c: char| c.is_ascii_digit()) {
            return Err(invalid());
        }
        let ratio: BigRational = trimmed.parse().map_err(|_| invalid())?;
        return ratio.to_f64().ok_or_else(invalid);
    }

    // Same leading-character rule as a decimal literal: a digit, or a dot followed by one
    let body = trimmed.strip_prefix(|c: char| c == '+' || c == '-').unwrap_or(trimmed);
    let mut chars = body.chars();
    let starts_numeric = match chars.next() {
        Some(c) if c.is_ascii_digit() => true,
        Some('.') => chars.next().map_or(false, |c| c.is_ascii_digit()),
        _ => false,
    };
    if !starts_numeric {
        return Err(invalid());
    }
    // Overflowing exponents parse to infinity and are left for range checks
    trimmed.parse::<f64>().map_err(|_| invalid())
}

/// Float value of an integer ratio.
pub fn ratio_to_f64(ratio: &Ratio<i64>) -> f64 {
    ratio.to_f64().unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_parse_ratio() {
        assert_relative_eq!(parse_fraction("3/2").unwrap(), 1.5);
        assert_relative_eq!(parse_fraction(" 5/2 ").unwrap(), 2.5);
        assert_relative_eq!(parse_fraction("-1/2").unwrap(), -0.5);
        assert_relative_eq!(parse_fraction("2/4").unwrap(), 0.5);
    }

    #[test]
    fn test_parse_ratio_beyond_i64() {
        let nu = parse_fraction("50000000000000000000/20000000000000000000").unwrap();
        assert_relative_eq!(nu, 2.5);
    }

    #[test]
    fn test_inner_whitespace_rejected() {
        for text in ["5 / 2", "5/ 2", "5 /2"] {
            assert!(
                matches!(parse_fraction(text), Err(KernelError::InvalidInput(_))),
                "{text:?} should not parse"
            );
        }
    }

    #[test]
    fn test_parse_decimal() {
        assert_relative_eq!(parse_fraction("1.5").unwrap(), 1.5);
        assert_relative_eq!(parse_fraction(".5").unwrap(), 0.5);
        assert_relative_eq!(parse_fraction("+25e-1").unwrap(), 2.5);
        assert_relative_eq!(parse_fraction("3").unwrap(), 3.0);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for text in ["abc", "", "   ", "3/0", "3/-2", "1.5/2", "inf", "-nan", "1/", "/2", "."] {
            let err = parse_fraction(text).unwrap_err();
            assert!(
                matches!(err, KernelError::InvalidInput(_)),
                "expected InvalidInput for {text:?}, got {err:?}"
            );
        }
    }

    #[test]
    fn test_overflowing_exponent_is_infinite() {
        assert!(parse_fraction("1e400").unwrap().is_infinite());
    }
}
