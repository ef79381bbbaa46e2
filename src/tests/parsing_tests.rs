//! tests/parsing_tests.rs

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use bigdecimal::BigDecimal;
    use chrono::{TimeZone, Utc};

    use crate::parsing::{is_valid_phone, parse_datetime, parse_decimal, round_money};

    #[test]
    fn decimals_parse_exactly() {
        assert_eq!(parse_decimal("1000"), BigDecimal::from_str("1000").ok());
        assert_eq!(parse_decimal(" 12.345 "), BigDecimal::from_str("12.345").ok());
        assert_eq!(
            parse_decimal("0.1").map(|d| d * BigDecimal::from(3)),
            BigDecimal::from_str("0.3").ok()
        );
    }

    #[test]
    fn non_numeric_decimals_are_rejected() {
        for raw in ["", "   ", "abc", "$1,000"] {
            assert!(parse_decimal(raw).is_none(), "{raw:?}");
        }
    }

    #[test]
    fn decimals_must_fit_a_money_column() {
        assert_eq!(parse_decimal("99999999.99"), BigDecimal::from_str("99999999.99").ok());
        assert_eq!(parse_decimal("-12345678"), BigDecimal::from_str("-12345678").ok());
        assert_eq!(parse_decimal("1.5e3"), BigDecimal::from_str("1500").ok());

        for raw in [
            "100000000",
            "1e9",
            "1e10000000",
            "1e1000000000",
            "1e-1000000000",
            "1e99999999999999999999",
            "-1E1000000000",
        ] {
            assert!(parse_decimal(raw).is_none(), "{raw:?}");
        }
    }

    #[test]
    fn datetimes_in_common_formats() {
        let expected = Utc.with_ymd_and_hms(2024, 5, 1, 10, 30, 0).unwrap();

        for raw in [
            "2024-05-01T10:30:00Z",
            "2024-05-01T10:30:00+00:00",
            "2024-05-01T12:30:00+02:00",
            "2024-05-01 10:30:00",
            "2024-05-01T10:30:00.000",
            "2024-05-01 10:30:00+0000",
            "2024-05-01 10:30",
        ] {
            assert_eq!(parse_datetime(raw), Some(expected), "{raw}");
        }
    }

    #[test]
    fn invalid_datetimes_are_rejected() {
        for raw in ["", "yesterday", "2024-13-01T00:00:00Z", "01/05/2024"] {
            assert!(parse_datetime(raw).is_none(), "{raw}");
        }
    }

    #[test]
    fn phone_pattern() {
        assert!(is_valid_phone("+15551234567"));
        assert!(is_valid_phone("555123456"));
        assert!(!is_valid_phone("555-123-4567"));
        assert!(!is_valid_phone("12345"));
        assert!(!is_valid_phone("+1234567890123456789"));
    }

    #[test]
    fn money_rounds_half_even_to_cents() {
        let round = |s: &str| round_money(&BigDecimal::from_str(s).unwrap()).to_string();
        assert_eq!(round("11.666666"), "11.67");
        assert_eq!(round("0.125"), "0.12");
        assert_eq!(round("0.135"), "0.14");
        assert_eq!(round("150"), "150.00");
    }
}
