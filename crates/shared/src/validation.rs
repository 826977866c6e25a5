//! Common validation utilities.

use validator::ValidationError;

/// Parses a query string value as an integer >= 1.
///
/// Returns `None` for missing, non-numeric, or sub-1 input so callers can
/// substitute their own default.
pub fn parse_positive_int(raw: Option<&str>) -> Option<i64> {
    raw?.parse::<i64>().ok().filter(|value| *value >= 1)
}

/// Validates that a discount fraction is within [0, 1).
pub fn validate_discount_fraction(fraction: f64) -> Result<(), ValidationError> {
    if (0.0..1.0).contains(&fraction) {
        Ok(())
    } else {
        let mut err = ValidationError::new("discount_range");
        err.message = Some("Discount must be at least 0 and less than 1".into());
        Err(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_positive_int() {
        assert_eq!(parse_positive_int(Some("1")), Some(1));
        assert_eq!(parse_positive_int(Some("89000")), Some(89000));
        assert_eq!(parse_positive_int(Some("+7")), Some(7));
    }

    #[test]
    fn test_parse_positive_int_rejects_garbage() {
        assert_eq!(parse_positive_int(None), None);
        assert_eq!(parse_positive_int(Some("")), None);
        assert_eq!(parse_positive_int(Some("ten")), None);
        assert_eq!(parse_positive_int(Some("1.5")), None);
        assert_eq!(parse_positive_int(Some(" 3")), None);
        assert_eq!(parse_positive_int(Some("99999999999999999999")), None);
    }

    #[test]
    fn test_parse_positive_int_rejects_sub_one() {
        assert_eq!(parse_positive_int(Some("0")), None);
        assert_eq!(parse_positive_int(Some("-1")), None);
    }

    #[test]
    fn test_validate_discount_fraction() {
        assert!(validate_discount_fraction(0.0).is_ok());
        assert!(validate_discount_fraction(0.15).is_ok());
        assert!(validate_discount_fraction(0.999).is_ok());
        assert!(validate_discount_fraction(1.0).is_err());
        assert!(validate_discount_fraction(-0.1).is_err());
        assert!(validate_discount_fraction(f64::NAN).is_err());
    }

    #[test]
    fn test_validate_discount_fraction_error_message() {
        let err = validate_discount_fraction(1.5).unwrap_err();
        assert_eq!(err.code, "discount_range");
        assert!(err.message.unwrap().contains("less than 1"));
    }
}
