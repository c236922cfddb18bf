use crate::core::FetchError;
use crate::core::config::HttpConfig;
use anyhow::Error;
use serde_json::Value;
use std::future::Future;
use std::time::Duration;
use tracing::debug;

const USER_AGENT: &str = concat!("tasa/", env!("CARGO_PKG_VERSION"));

/// Transport settings shared by the HTTP fetchers.
#[derive(Debug, Clone)]
pub struct HttpSettings {
    pub timeout: Duration,
    pub retries: usize,
    pub retry_delay_ms: u64,
}

impl Default for HttpSettings {
    fn default() -> Self {
        HttpSettings::from(&HttpConfig::default())
    }
}

impl From<&HttpConfig> for HttpSettings {
    fn from(config: &HttpConfig) -> Self {
        HttpSettings {
            timeout: config.timeout(),
            retries: config.retries,
            retry_delay_ms: config.retry_delay_ms,
        }
    }
}

impl HttpSettings {
    pub fn client(&self) -> reqwest::Result<reqwest::Client> {
        reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(self.timeout)
            .build()
    }
}

/// Retries an async operation with configurable attempts and delays
///
/// # Parameters
/// - `operation`: Closure returning a future
/// - `retries`: Number of retry attempts (total runs = 1 initial + retries)
/// - `delay_ms`: Milliseconds between retry attempts
///
/// # Returns
/// Either the successful result or the error after all attempts
pub async fn with_retry<F, Fut, T>(
    mut operation: F,
    retries: usize,
    delay_ms: u64,
) -> Result<T, Error>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, reqwest::Error>>,
{
    let mut attempt = 1;
    loop {
        match operation().await.map_err(anyhow::Error::from) {
            Ok(val) => return Ok(val),
            Err(err) => {
                if attempt > retries {
                    return Err(err);
                }
                debug!(
                    "Attempt {}/{} failed: {}. Retrying...",
                    attempt, retries, err
                );
                attempt += 1;
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }
        }
    }
}

/// GETs `url` with `query` appended (percent-encoded) and parses the body
/// as JSON.
///
/// Transport failures and non-2xx statuses are network failures; a body
/// that is not JSON is a malformed response.
pub async fn get_json(
    url: &str,
    query: &[(&str, &str)],
    settings: &HttpSettings,
) -> Result<Value, FetchError> {
    let mut url = reqwest::Url::parse(url)
        .map_err(|e| FetchError::NetworkFailure(format!("Invalid URL {url}: {e}")))?;
    if !query.is_empty() {
        url.query_pairs_mut().extend_pairs(query);
    }
    let client = settings.client()?;
    let response = with_retry(
        || async { client.get(url.as_str()).send().await },
        settings.retries,
        settings.retry_delay_ms,
    )
    .await
    .map_err(|e| FetchError::NetworkFailure(format!("Request error: {e} URL: {url}")))?;

    debug!(status = %response.status(), "Received response");
    if !response.status().is_success() {
        return Err(FetchError::NetworkFailure(format!(
            "HTTP error: {} URL: {}",
            response.status(),
            url
        )));
    }

    let text = response.text().await?;
    serde_json::from_str(&text).map_err(|e| {
        FetchError::MalformedResponse(format!("Failed to parse JSON from {url}: {e}"))
    })
}
