//! Cleanup of ambiguous textual prices into floating point values.
//!
//! The upstream rate service has been seen emitting prices such as `"36,50"`
//! (comma as decimal separator) and `"1.070.62"` (a stray grouping dot).
//! The heuristic below treats the last dot as the decimal separator when the
//! segment after it is purely numeric. It must stay exactly as is: changing it
//! would alter converted amounts for price shapes already observed.

use super::error::FetchError;
use super::outcome::FetchOutcome;

fn is_all_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Rewrites separators so that at most the final dot survives when it
/// looks like a decimal point.
pub fn clean_separators(raw: &str) -> String {
    let replaced = raw.replace(',', ".");
    if replaced.matches('.').count() <= 1 {
        return replaced;
    }

    let parts: Vec<&str> = replaced.split('.').collect();
    match parts.split_last() {
        Some((last, head)) if is_all_digits(last) => format!("{}.{}", head.concat(), last),
        _ => replaced.replacen('.', "", 1),
    }
}

/// `digits? '.'? digits?` with at least one digit.
fn is_plain_decimal(s: &str) -> bool {
    let (int_part, frac_part) = s.split_once('.').unwrap_or((s, ""));
    let digits_only = |p: &str| p.bytes().all(|b| b.is_ascii_digit());
    digits_only(int_part) && digits_only(frac_part) && (int_part.len() + frac_part.len()) > 0
}

/// Cleans and parses a raw price, reporting why it was rejected.
pub fn parse_price(raw: &str) -> Result<f64, FetchError> {
    let cleaned = clean_separators(raw);
    if !is_plain_decimal(&cleaned) {
        return Err(FetchError::InvalidNumericFormat(raw.to_string()));
    }

    let value: f64 = cleaned
        .parse()
        .map_err(|_| FetchError::InvalidNumericFormat(raw.to_string()))?;
    if !value.is_finite() {
        return Err(FetchError::InvalidNumericFormat(raw.to_string()));
    }
    if value <= 0.0 {
        return Err(FetchError::NonPositiveRate(value));
    }
    Ok(value)
}

/// Normalizes a raw price token into a strictly positive, finite rate.
pub fn normalize(raw: &str) -> FetchOutcome<f64> {
    FetchOutcome::from_result(parse_price(raw), "normalize")
}
