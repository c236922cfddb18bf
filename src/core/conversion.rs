//! Conversion arithmetic between the source currency (USD) and the target
//! currency (VES) using a published rate.
//!
//! All functions are pure. Amounts are validated before the rate so that a
//! bad entry is always reported as an input problem, whatever the rate state.

use super::error::ConversionError;

/// Which way a conversion goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Source currency to target currency (USD to VES).
    ToTarget,
    /// Target currency to source currency (VES to USD).
    ToSource,
}

/// Rejects amounts that are negative or not finite.
pub fn validate_amount(amount: f64) -> Result<f64, ConversionError> {
    if !amount.is_finite() {
        return Err(ConversionError::InvalidUserInput(format!(
            "amount must be a number, got {amount}"
        )));
    }
    if amount < 0.0 {
        return Err(ConversionError::InvalidUserInput(format!(
            "amount must not be negative, got {amount}"
        )));
    }
    Ok(amount)
}

fn check_rate(rate: f64) -> Result<f64, ConversionError> {
    if rate.is_finite() && rate > 0.0 {
        Ok(rate)
    } else {
        Err(ConversionError::RateUnavailable)
    }
}

/// Converts an amount of source currency into target currency.
pub fn to_target(amount_source: f64, rate: f64) -> Result<f64, ConversionError> {
    let amount = validate_amount(amount_source)?;
    let rate = check_rate(rate)?;
    Ok(amount * rate)
}

/// Converts an amount of target currency back into source currency.
pub fn to_source(amount_target: f64, rate: f64) -> Result<f64, ConversionError> {
    let amount = validate_amount(amount_target)?;
    let rate = check_rate(rate)?;
    Ok(amount / rate)
}

/// Value of one unit of source currency, i.e. "today's rate".
pub fn rate_snapshot(rate: f64) -> Result<f64, ConversionError> {
    to_target(1.0, rate)
}

pub fn convert(direction: Direction, amount: f64, rate: f64) -> Result<f64, ConversionError> {
    match direction {
        Direction::ToTarget => to_target(amount, rate),
        Direction::ToSource => to_source(amount, rate),
    }
}

/// Parses a user-entered amount.
///
/// Surrounding whitespace is ignored. Anything that is not a finite,
/// non-negative decimal number is rejected as invalid input.
pub fn parse_amount(input: &str) -> Result<f64, ConversionError> {
    let trimmed = input.trim();
    let amount: f64 = trimmed
        .parse()
        .map_err(|_| ConversionError::InvalidUserInput(format!("'{trimmed}' is not a number")))?;
    validate_amount(amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        let scale = a.abs().max(b.abs()).max(1.0);
        (a - b).abs() <= 1e-9 * scale
    }

    #[test]
    fn test_to_target() {
        assert!(approx_eq(to_target(10.0, 36.5).unwrap(), 365.0));
        assert_eq!(to_target(0.0, 36.5), Ok(0.0));
    }

    #[test]
    fn test_to_target_is_linear() {
        let rate = 1070.62;
        for a in [0.0, 0.01, 1.0, 12.5, 999.99, 123456.789] {
            let single = to_target(a, rate).unwrap();
            let double = to_target(2.0 * a, rate).unwrap();
            assert!(approx_eq(double, 2.0 * single), "a = {a}");
        }
    }

    #[test]
    fn test_round_trip() {
        for rate in [0.0001, 1.0, 36.5, 1070.62, 1e6] {
            for amount in [0.0, 0.5, 10.0, 365.0, 98765.4321] {
                let there = to_target(amount, rate).unwrap();
                let back = to_source(there, rate).unwrap();
                assert!(approx_eq(back, amount), "rate = {rate}, amount = {amount}");
            }
        }
    }

    #[test]
    fn test_zero_rate_is_unavailable() {
        assert_eq!(to_target(10.0, 0.0), Err(ConversionError::RateUnavailable));
        assert_eq!(to_source(10.0, 0.0), Err(ConversionError::RateUnavailable));
        assert_eq!(rate_snapshot(0.0), Err(ConversionError::RateUnavailable));
        assert_eq!(to_target(10.0, -1.0), Err(ConversionError::RateUnavailable));
        assert_eq!(
            to_source(10.0, f64::NAN),
            Err(ConversionError::RateUnavailable)
        );
    }

    #[test]
    fn test_negative_amount_is_input_error() {
        assert!(matches!(
            to_source(-50.0, 36.5),
            Err(ConversionError::InvalidUserInput(_))
        ));
        // Input problems win over an unavailable rate
        assert!(matches!(
            to_source(-50.0, 0.0),
            Err(ConversionError::InvalidUserInput(_))
        ));
    }

    #[test]
    fn test_rate_snapshot() {
        assert_eq!(rate_snapshot(1070.62), Ok(1070.62));
    }

    #[test]
    fn test_convert_dispatch() {
        assert_eq!(convert(Direction::ToTarget, 2.0, 4.0), Ok(8.0));
        assert_eq!(convert(Direction::ToSource, 8.0, 4.0), Ok(2.0));
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount(" 10 "), Ok(10.0));
        assert_eq!(parse_amount("0.25"), Ok(0.25));
        assert!(matches!(
            parse_amount("-50"),
            Err(ConversionError::InvalidUserInput(_))
        ));
        assert!(matches!(
            parse_amount("diez"),
            Err(ConversionError::InvalidUserInput(_))
        ));
        assert!(matches!(
            parse_amount(""),
            Err(ConversionError::InvalidUserInput(_))
        ));
        assert!(matches!(
            parse_amount("inf"),
            Err(ConversionError::InvalidUserInput(_))
        ));
    }
}
