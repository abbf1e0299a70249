use crate::error::CarbonError;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Parse a units-sold cell.
///
/// Handles formats like:
/// - "100" -> 100
/// - "12.5" -> 12.5
/// - "1e3" -> 1000
/// - "-50" -> -50 (negative values are kept)
///
/// Returns `Ok(None)` for empty or non-numeric cells; the caller counts those
/// as zero. A finite number that a `Decimal` cannot hold is an error.
pub fn parse_units(s: &str) -> Result<Option<Decimal>, CarbonError> {
    let s = s.trim();
    if s.is_empty() {
        return Ok(None);
    }

    if let Ok(d) = Decimal::from_str(s) {
        return Ok(Some(d));
    }

    // Scientific notation and other float spellings
    let Some(f) = s.parse::<f64>().ok().filter(|f| f.is_finite()) else {
        return Ok(None);
    };
    f64_to_decimal(f)
        .map(Some)
        .ok_or_else(|| CarbonError::OutOfRange(format!("Units_Sold {s}")))
}

/// Convert f64 to Decimal via its shortest string form, so that 0.1_f64 stays 0.1.
fn f64_to_decimal(f: f64) -> Option<Decimal> {
    let s = format!("{f}");
    s.parse::<Decimal>().ok().or_else(|| Decimal::try_from(f).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_integer() {
        assert_eq!(parse_units("100").unwrap(), Some(dec!(100)));
    }

    #[test]
    fn test_decimal() {
        assert_eq!(parse_units("12.5").unwrap(), Some(dec!(12.5)));
    }

    #[test]
    fn test_negative_kept() {
        assert_eq!(parse_units("-50").unwrap(), Some(dec!(-50)));
    }

    #[test]
    fn test_whitespace_trimming() {
        assert_eq!(parse_units("  68  ").unwrap(), Some(dec!(68)));
    }

    #[test]
    fn test_scientific_notation() {
        assert_eq!(parse_units("1e3").unwrap(), Some(dec!(1000)));
    }

    #[test]
    fn test_empty_returns_none() {
        assert_eq!(parse_units("").unwrap(), None);
        assert_eq!(parse_units("   ").unwrap(), None);
    }

    #[test]
    fn test_text_returns_none() {
        assert_eq!(parse_units("abc").unwrap(), None);
    }

    #[test]
    fn test_non_finite_returns_none() {
        assert_eq!(parse_units("NaN").unwrap(), None);
        assert_eq!(parse_units("inf").unwrap(), None);
    }

    #[test]
    fn test_finite_but_too_large_is_an_error() {
        assert!(matches!(parse_units("1e30"), Err(CarbonError::OutOfRange(_))));
        assert!(matches!(
            parse_units("-123456789012345678901234567890123"),
            Err(CarbonError::OutOfRange(_))
        ));
    }
}
