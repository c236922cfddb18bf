use super::util::{HttpSettings, get_json};
use crate::core::normalize::parse_price;
use crate::core::{FetchError, FetchOutcome, RateFetcher};
use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, instrument};

/// Official exchange rate from the pydolarve API, selected by monitor name.
pub struct PyDolarProvider {
    base_url: String,
    monitor: String,
    http: HttpSettings,
}

impl PyDolarProvider {
    pub fn new(base_url: &str, monitor: &str, http: HttpSettings) -> Self {
        PyDolarProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            monitor: monitor.to_string(),
            http,
        }
    }

    #[instrument(
        name = "PyDolarRateFetch",
        skip(self),
        fields(monitor = %self.monitor)
    )]
    pub async fn request_rate(&self) -> Result<f64, FetchError> {
        let url = format!("{}/api/v2/dollar", self.base_url);
        debug!("Requesting rate from {}", url);

        let data = get_json(&url, &[("monitor", self.monitor.as_str())], &self.http).await?;
        let raw = price_text(&data)?;
        debug!(raw = %raw, "Raw price");

        let rate = parse_price(&raw)?;
        debug!(rate, "Normalized price");
        Ok(rate)
    }
}

/// The `price` field as text, whether the API sent a string or a number.
fn price_text(data: &Value) -> Result<String, FetchError> {
    let object = data
        .as_object()
        .ok_or_else(|| FetchError::MalformedResponse("expected a JSON object".to_string()))?;

    match object.get("price") {
        None | Some(Value::Null) => Err(FetchError::MissingField("price")),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Ok(other.to_string()),
    }
}

#[async_trait]
impl RateFetcher for PyDolarProvider {
    async fn fetch_rate(&self) -> FetchOutcome<f64> {
        FetchOutcome::from_result(self.request_rate().await, "rate")
    }
}
