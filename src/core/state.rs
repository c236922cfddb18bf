//! Observable state shared between the fetchers and the presentation layer.
//!
//! Every field lives in its own `watch` channel, so a publish is a single
//! whole-value replacement and readers never observe a partially written
//! value. Readers tolerate staleness: there is no multi-field snapshot
//! consistency, only per-field.

use super::conversion;
use super::error::ConversionError;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use tokio::sync::watch;
use tracing::debug;

/// Text shown until the first quote has been published.
pub const QUOTE_PLACEHOLDER: &str = "Cargando frase motivacional...";

/// Identifies which field a publish touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateField {
    Rate,
    Quote,
    Amount,
    ConversionRate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer = Arc<dyn Fn(StateField) + Send + Sync>;

/// Point-in-time copy of all fields, read one by one.
#[derive(Debug, Clone, PartialEq)]
pub struct StateSnapshot {
    pub rate: f64,
    pub quote: String,
    pub amount: f64,
    pub conversion_rate: f64,
}

pub struct PublishedState {
    rate: watch::Sender<f64>,
    quote: watch::Sender<String>,
    amount: watch::Sender<f64>,
    conversion_rate: watch::Sender<f64>,
    conversion_active: AtomicBool,
    observers: RwLock<Vec<(SubscriptionId, Observer)>>,
    next_id: AtomicU64,
}

impl PublishedState {
    pub fn new() -> Self {
        Self {
            rate: watch::Sender::new(0.0),
            quote: watch::Sender::new(QUOTE_PLACEHOLDER.to_string()),
            amount: watch::Sender::new(0.0),
            conversion_rate: watch::Sender::new(0.0),
            conversion_active: AtomicBool::new(false),
            observers: RwLock::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }

    pub fn rate(&self) -> f64 {
        *self.rate.borrow()
    }

    pub fn quote(&self) -> String {
        self.quote.borrow().clone()
    }

    pub fn amount(&self) -> f64 {
        *self.amount.borrow()
    }

    pub fn conversion_rate(&self) -> f64 {
        *self.conversion_rate.borrow()
    }

    pub fn quote_is_placeholder(&self) -> bool {
        *self.quote.borrow() == QUOTE_PLACEHOLDER
    }

    pub fn snapshot(&self) -> StateSnapshot {
        StateSnapshot {
            rate: self.rate(),
            quote: self.quote(),
            amount: self.amount(),
            conversion_rate: self.conversion_rate(),
        }
    }

    pub fn watch_rate(&self) -> watch::Receiver<f64> {
        self.rate.subscribe()
    }

    /// Registers a callback invoked once after every publish.
    ///
    /// Callbacks run on the publishing task and must not block.
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(StateField) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let mut observers = match self.observers.write() {
            Ok(g) => g,
            Err(poisoned) => poisoned.into_inner(),
        };
        observers.push((id, Arc::new(callback)));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut observers = match self.observers.write() {
            Ok(g) => g,
            Err(poisoned) => poisoned.into_inner(),
        };
        let before = observers.len();
        observers.retain(|(oid, _)| *oid != id);
        observers.len() != before
    }

    fn notify(&self, field: StateField) {
        // Snapshot so callbacks may (un)subscribe without deadlocking
        let observers: Vec<Observer> = {
            let guard = match self.observers.read() {
                Ok(g) => g,
                Err(poisoned) => poisoned.into_inner(),
            };
            guard.iter().map(|(_, cb)| Arc::clone(cb)).collect()
        };
        for callback in observers {
            callback(field);
        }
    }

    /// Publishes a new rate. Anything negative or not finite is stored as 0,
    /// the "no data" sentinel.
    pub fn publish_rate(&self, value: f64) {
        let rate = if value.is_finite() && value > 0.0 {
            value
        } else {
            0.0
        };
        self.rate.send_replace(rate);
        debug!(rate, "Published rate");
        self.notify(StateField::Rate);

        if self.conversion_active.load(Ordering::SeqCst) {
            self.publish_conversion_rate(rate);
        }
    }

    pub fn publish_quote(&self, text: impl Into<String>) {
        let text = text.into();
        debug!(quote = %text, "Published quote");
        self.quote.send_replace(text);
        self.notify(StateField::Quote);
    }

    fn publish_amount(&self, amount: f64) {
        self.amount.send_replace(amount);
        debug!(amount, "Published amount");
        self.notify(StateField::Amount);
    }

    fn publish_conversion_rate(&self, rate: f64) {
        self.conversion_rate.send_replace(rate);
        debug!(rate, "Published conversion rate");
        self.notify(StateField::ConversionRate);
    }

    /// Starts a conversion for `amount` units of source currency and selects
    /// the current rate for it. While the conversion is active, later rate
    /// publishes are mirrored into the conversion rate.
    pub fn begin_conversion(&self, amount: f64) -> Result<(), ConversionError> {
        let amount = conversion::validate_amount(amount)?;
        self.publish_amount(amount);

        // Select before activating, then catch up with any rate published
        // in between so the session never keeps a stale rate.
        let selected = self.rate();
        self.publish_conversion_rate(selected);
        self.conversion_active.store(true, Ordering::SeqCst);
        let latest = self.rate();
        if latest.to_bits() != selected.to_bits() {
            self.publish_conversion_rate(latest);
        }
        Ok(())
    }

    pub fn end_conversion(&self) {
        self.conversion_active.store(false, Ordering::SeqCst);
    }

    pub fn conversion_in_progress(&self) -> bool {
        self.conversion_active.load(Ordering::SeqCst)
    }

    /// Target-currency value of the active conversion.
    pub fn current_conversion(&self) -> Result<f64, ConversionError> {
        conversion::to_target(self.amount(), self.conversion_rate())
    }
}

impl Default for PublishedState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn recorder(state: &PublishedState) -> Arc<Mutex<Vec<StateField>>> {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        state.subscribe(move |field| sink.lock().unwrap().push(field));
        seen
    }

    #[test]
    fn test_initial_state() {
        let state = PublishedState::new();
        assert_eq!(state.rate(), 0.0);
        assert!(state.quote_is_placeholder());
        assert_eq!(state.amount(), 0.0);
        assert_eq!(state.conversion_rate(), 0.0);
        assert!(!state.conversion_in_progress());
    }

    #[test]
    fn test_publish_notifies_once_per_write() {
        let state = PublishedState::new();
        let seen = recorder(&state);

        state.publish_rate(36.5);
        state.publish_quote("Hoy es un buen día");
        state.publish_rate(36.5);

        assert_eq!(state.rate(), 36.5);
        assert_eq!(state.quote(), "Hoy es un buen día");
        assert!(!state.quote_is_placeholder());
        assert_eq!(
            *seen.lock().unwrap(),
            vec![StateField::Rate, StateField::Quote, StateField::Rate]
        );
    }

    #[test]
    fn test_rate_is_never_negative() {
        let state = PublishedState::new();
        state.publish_rate(-3.0);
        assert_eq!(state.rate(), 0.0);
        state.publish_rate(f64::NAN);
        assert_eq!(state.rate(), 0.0);
        state.publish_rate(f64::INFINITY);
        assert_eq!(state.rate(), 0.0);
    }

    #[test]
    fn test_unsubscribe() {
        let state = PublishedState::new();
        let seen = Arc::new(Mutex::new(0usize));
        let sink = Arc::clone(&seen);
        let id = state.subscribe(move |_| *sink.lock().unwrap() += 1);

        state.publish_rate(1.0);
        assert!(state.unsubscribe(id));
        assert!(!state.unsubscribe(id));
        state.publish_rate(2.0);

        assert_eq!(*seen.lock().unwrap(), 1);
    }

    #[test]
    fn test_conversion_session_tracks_rate() {
        let state = PublishedState::new();
        state.begin_conversion(10.0).unwrap();
        assert_eq!(state.conversion_rate(), 0.0);
        assert_eq!(
            state.current_conversion(),
            Err(ConversionError::RateUnavailable)
        );

        let seen = recorder(&state);
        state.publish_rate(36.5);
        assert_eq!(state.conversion_rate(), 36.5);
        assert_eq!(state.current_conversion(), Ok(365.0));
        assert_eq!(
            *seen.lock().unwrap(),
            vec![StateField::Rate, StateField::ConversionRate]
        );

        state.end_conversion();
        state.publish_rate(40.0);
        assert_eq!(state.conversion_rate(), 36.5);
    }

    #[test]
    fn test_begin_conversion_rejects_negative_amount() {
        let state = PublishedState::new();
        state.publish_rate(36.5);
        let result = state.begin_conversion(-50.0);
        assert!(matches!(result, Err(ConversionError::InvalidUserInput(_))));
        assert_eq!(state.amount(), 0.0);
        assert!(!state.conversion_in_progress());
        assert_eq!(state.rate(), 36.5);
    }

    #[test]
    fn test_begin_conversion_races_with_rate_publish() {
        for _ in 0..200 {
            let state = Arc::new(PublishedState::new());
            let writer = Arc::clone(&state);
            let publisher = std::thread::spawn(move || writer.publish_rate(36.5));

            state.begin_conversion(1.0).unwrap();
            publisher.join().unwrap();

            assert_eq!(state.rate(), 36.5);
            assert_eq!(state.conversion_rate(), 36.5);
        }
    }

    #[tokio::test]
    async fn test_watch_rate_sees_publish() {
        let state = Arc::new(PublishedState::new());
        let mut rx = state.watch_rate();

        let writer = Arc::clone(&state);
        tokio::spawn(async move { writer.publish_rate(1070.62) });

        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow(), 1070.62);
    }
}
