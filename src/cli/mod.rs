//! Terminal presentation of the published state.

pub mod convert;
pub mod setup;
pub mod status;
pub mod ui;

use crate::core::{PublishedState, StateField};
use std::future::Future;

/// Drives `task` to completion behind a spinner that follows state publishes.
pub(crate) async fn with_spinner<T>(
    message: &str,
    state: &PublishedState,
    task: impl Future<Output = T>,
) -> T {
    let pb = ui::new_spinner(message);
    let pb_clone = pb.clone();
    let subscription = state.subscribe(move |field| {
        let label = match field {
            StateField::Rate => "Tasa recibida",
            StateField::Quote => "Frase recibida",
            StateField::Amount | StateField::ConversionRate => return,
        };
        pb_clone.set_message(label);
    });

    let result = task.await;

    state.unsubscribe(subscription);
    pb.finish_and_clear();
    result
}
