//! Fetcher abstractions for the two upstream data sources

use super::outcome::FetchOutcome;
use async_trait::async_trait;

#[async_trait]
pub trait RateFetcher: Send + Sync {
    async fn fetch_rate(&self) -> FetchOutcome<f64>;
}

#[async_trait]
pub trait QuoteFetcher: Send + Sync {
    async fn fetch_quote(&self) -> FetchOutcome<String>;
}
