use super::util::{HttpSettings, get_json};
use crate::core::{FetchError, FetchOutcome, QuoteFetcher};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Motivational phrase of the day.
pub struct FraseProvider {
    base_url: String,
    http: HttpSettings,
}

impl FraseProvider {
    pub fn new(base_url: &str, http: HttpSettings) -> Self {
        FraseProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        }
    }

    #[instrument(name = "FraseQuoteFetch", skip(self))]
    pub async fn request_quote(&self) -> Result<String, FetchError> {
        let url = format!("{}/api/phrase", self.base_url);
        debug!("Requesting quote from {}", url);

        let data = get_json(&url, &[], &self.http).await?;
        let phrase = data
            .get("phrase")
            .and_then(|p| p.as_str())
            .map(str::trim)
            .ok_or(FetchError::MissingField("phrase"))?;

        if phrase.is_empty() {
            return Err(FetchError::MalformedResponse("blank phrase".to_string()));
        }
        Ok(phrase.to_string())
    }
}

#[async_trait]
impl QuoteFetcher for FraseProvider {
    async fn fetch_quote(&self) -> FetchOutcome<String> {
        FetchOutcome::from_result(self.request_quote().await, "quote")
    }
}
