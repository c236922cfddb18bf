//! Core data synchronization and conversion logic

pub mod config;
pub mod conversion;
pub mod error;
pub mod fetch;
pub mod log;
pub mod normalize;
pub mod outcome;
pub mod state;
pub mod sync;

// Re-export main types for cleaner imports
pub use error::{ConversionError, FetchError};
pub use fetch::{QuoteFetcher, RateFetcher};
pub use outcome::FetchOutcome;
pub use state::{PublishedState, StateField, StateSnapshot};
pub use sync::{SyncHandles, SyncOrchestrator};
