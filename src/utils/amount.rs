use rust_decimal::Decimal;

/// Formats a provider amount given with a decimal-exponent. The provider
/// reports integer base-unit values plus `pow`, e.g. `("1500000", 8)` is
/// 0.015. Falls back to the raw string when either part does not parse,
/// so a note can always be written.
pub fn format_amount(raw: &str, pow: &str) -> String {
    let (Ok(value), Ok(exponent)) = (raw.parse::<Decimal>(), pow.parse::<u32>()) else {
        return raw.to_string();
    };

    if exponent > Decimal::MAX_SCALE {
        return raw.to_string();
    }

    let scaled = value * Decimal::new(1, exponent);
    scaled.normalize().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scales_by_decimal_exponent() {
        assert_eq!(format_amount("1500000", "8"), "0.015");
        assert_eq!(format_amount("250", "2"), "2.5");
        assert_eq!(format_amount("42", "0"), "42");
    }

    #[test]
    fn falls_back_to_raw_on_bad_input() {
        assert_eq!(format_amount("not-a-number", "8"), "not-a-number");
        assert_eq!(format_amount("100", "lots"), "100");
        assert_eq!(format_amount("100", "99"), "100");
    }
}
