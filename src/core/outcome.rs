use super::error::FetchError;
use tracing::warn;

/// Result of a single fetch attempt as seen outside the fetch boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome<T> {
    Success(T),
    Unavailable,
}

impl<T> FetchOutcome<T> {
    /// Collapses a fetch result, logging the cause of any failure.
    pub fn from_result(result: Result<T, FetchError>, source: &str) -> Self {
        match result {
            Ok(value) => FetchOutcome::Success(value),
            Err(e) => {
                warn!(source, error = %e, "Fetch failed, value unavailable");
                FetchOutcome::Unavailable
            }
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, FetchOutcome::Success(_))
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            FetchOutcome::Success(v) => Some(v),
            FetchOutcome::Unavailable => None,
        }
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            FetchOutcome::Success(v) => Some(v),
            FetchOutcome::Unavailable => None,
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> FetchOutcome<U> {
        match self {
            FetchOutcome::Success(v) => FetchOutcome::Success(f(v)),
            FetchOutcome::Unavailable => FetchOutcome::Unavailable,
        }
    }
}

impl<T> From<Option<T>> for FetchOutcome<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(FetchOutcome::Unavailable, FetchOutcome::Success)
    }
}
