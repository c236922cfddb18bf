//! Launches the rate and quote fetches and publishes their results.
//!
//! Each call to [`SyncOrchestrator::start`] spawns a fresh, independent pair
//! of tasks. There is no in-flight tracking: overlapping calls may race and
//! the last completion to publish a field wins for that field.

use super::fetch::{QuoteFetcher, RateFetcher};
use super::outcome::FetchOutcome;
use super::state::PublishedState;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Quote published when the quote service cannot provide one.
pub const FALLBACK_QUOTE: &str =
    "Si hoy no fue un buen día, eso está bien porque entonces mañana tal vez lo será.";

/// Handles to the tasks spawned by a single [`SyncOrchestrator::start`].
///
/// Dropping them detaches the tasks; they still publish when done.
pub struct SyncHandles {
    pub rate: JoinHandle<()>,
    pub quote: JoinHandle<()>,
}

impl SyncHandles {
    /// Waits until both tasks have published.
    pub async fn wait(self) {
        let (rate, quote) = futures::future::join(self.rate, self.quote).await;
        if let Err(e) = rate {
            debug!(error = %e, "Rate task did not complete");
        }
        if let Err(e) = quote {
            debug!(error = %e, "Quote task did not complete");
        }
    }
}

#[derive(Clone)]
pub struct SyncOrchestrator {
    rate_fetcher: Arc<dyn RateFetcher>,
    quote_fetcher: Arc<dyn QuoteFetcher>,
    state: Arc<PublishedState>,
    fallback_quote: String,
}

impl SyncOrchestrator {
    pub fn new(
        rate_fetcher: Arc<dyn RateFetcher>,
        quote_fetcher: Arc<dyn QuoteFetcher>,
        state: Arc<PublishedState>,
        fallback_quote: &str,
    ) -> Self {
        let fallback_quote = if fallback_quote.trim().is_empty() {
            FALLBACK_QUOTE
        } else {
            fallback_quote
        };
        Self {
            rate_fetcher,
            quote_fetcher,
            state,
            fallback_quote: fallback_quote.to_string(),
        }
    }

    pub fn state(&self) -> &Arc<PublishedState> {
        &self.state
    }

    /// Spawns both fetches and returns without waiting for either.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn start(&self) -> SyncHandles {
        info!("Starting rate and quote sync");
        SyncHandles {
            rate: self.spawn_rate(),
            quote: self.spawn_quote(),
        }
    }

    /// Spawns a quote-only fetch when the quote still shows its placeholder.
    ///
    /// A published fallback is final and is not retried.
    pub fn refresh_quote_if_pending(&self) -> Option<JoinHandle<()>> {
        if self.state.quote_is_placeholder() {
            debug!("Quote still pending, fetching again");
            Some(self.spawn_quote())
        } else {
            None
        }
    }

    fn spawn_rate(&self) -> JoinHandle<()> {
        let fetcher = Arc::clone(&self.rate_fetcher);
        let state = Arc::clone(&self.state);
        tokio::spawn(async move {
            let rate = match fetcher.fetch_rate().await {
                FetchOutcome::Success(rate) => rate,
                FetchOutcome::Unavailable => 0.0,
            };
            state.publish_rate(rate);
        })
    }

    fn spawn_quote(&self) -> JoinHandle<()> {
        let fetcher = Arc::clone(&self.quote_fetcher);
        let state = Arc::clone(&self.state);
        let fallback = self.fallback_quote.clone();
        tokio::spawn(async move {
            let quote = match fetcher.fetch_quote().await {
                FetchOutcome::Success(quote) => quote,
                FetchOutcome::Unavailable => fallback,
            };
            state.publish_quote(quote);
        })
    }
}
