//! Error taxonomy for the fetch path and for conversions.

use thiserror::Error;

/// Failures that can occur while acquiring data from an upstream service.
///
/// These never leave a fetcher: they are logged and collapsed into
/// [`FetchOutcome::Unavailable`](crate::core::FetchOutcome::Unavailable).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FetchError {
    #[error("network failure: {0}")]
    NetworkFailure(String),

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("missing field `{0}` in response")]
    MissingField(&'static str),

    #[error("invalid numeric format: '{0}'")]
    InvalidNumericFormat(String),

    #[error("non-positive rate: {0}")]
    NonPositiveRate(f64),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::NetworkFailure(err.to_string())
    }
}

/// Failures reported back to the presentation layer by the conversion engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConversionError {
    /// The published rate is zero (no data), so no conversion is possible.
    #[error("rate unavailable")]
    RateUnavailable,

    /// The user typed something that is not a non-negative number.
    #[error("invalid input: {0}")]
    InvalidUserInput(String),
}
