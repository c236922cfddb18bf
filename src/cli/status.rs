use super::{ui, with_spinner};
use crate::core::{StateSnapshot, SyncHandles, SyncOrchestrator};
use anyhow::Result;
use tracing::{debug, warn};

pub fn display_status(snapshot: &StateSnapshot) -> String {
    format!(
        "\n{}\n\n{}\n",
        ui::style_text(&snapshot.quote, ui::StyleType::Quote),
        ui::style_text(&ui::format_rate_line(snapshot.rate), ui::StyleType::Value)
    )
}

/// Waits for the quote, fetching it again once if its task died before
/// publishing anything.
async fn settle_quote(sync: &SyncOrchestrator, quote_task: tokio::task::JoinHandle<()>) {
    if let Err(e) = quote_task.await {
        warn!(error = %e, "Quote task did not complete");
        if let Some(retry) = sync.refresh_quote_if_pending() {
            if let Err(e) = retry.await {
                debug!(error = %e, "Quote retry did not complete");
            }
        }
    }
}

/// Quote of the day plus today's rate.
pub async fn run(sync: &SyncOrchestrator, handles: SyncHandles) -> Result<()> {
    let SyncHandles { rate, quote } = handles;
    with_spinner("Sincronizando...", sync.state(), async {
        if let Err(e) = rate.await {
            debug!(error = %e, "Rate task did not complete");
        }
        settle_quote(sync, quote).await;
    })
    .await;

    println!("{}", display_status(&sync.state().snapshot()));
    Ok(())
}

pub async fn run_quote(sync: &SyncOrchestrator, handles: SyncHandles) -> Result<()> {
    with_spinner(
        "Cargando frase motivacional...",
        sync.state(),
        settle_quote(sync, handles.quote),
    )
    .await;

    println!(
        "\n{}\n",
        ui::style_text(&sync.state().quote(), ui::StyleType::Quote)
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_status() {
        let snapshot = StateSnapshot {
            rate: 1070.62,
            quote: "Nunca te rindas.".to_string(),
            amount: 0.0,
            conversion_rate: 0.0,
        };
        let text = display_status(&snapshot);
        assert!(text.contains("Nunca te rindas."));
        assert!(text.contains("Tasa BCV hoy: 1070.62 Bs"));
    }
}
