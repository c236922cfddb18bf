use super::{ui, with_spinner};
use crate::core::conversion::{self, Direction};
use crate::core::{ConversionError, SyncHandles, SyncOrchestrator};
use anyhow::Result;
use comfy_table::Cell;
use tracing::debug;

/// Outcome of one conversion, ready for display.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionView {
    pub direction: Direction,
    pub amount: f64,
    pub rate: f64,
    pub result: Result<f64, ConversionError>,
}

impl ConversionView {
    pub fn display_as_table(&self) -> String {
        let mut table = ui::new_styled_table();
        let (usd, ves) = match self.direction {
            Direction::ToTarget => (
                ui::format_usd(self.amount),
                ui::format_bolivares(&self.result),
            ),
            Direction::ToSource => (
                self.result
                    .as_ref()
                    .map_or_else(|_| "Error de tasa".to_string(), |v| ui::format_usd(*v)),
                ui::format_bolivares(&Ok(self.amount)),
            ),
        };

        table.set_header(vec![ui::header_cell("USD"), ui::header_cell("Bs")]);
        table.add_row(vec![ui::amount_cell(&usd), ui::amount_cell(&ves)]);
        table.add_row(vec![
            Cell::new(ui::style_text(
                &ui::format_rate_line(self.rate),
                ui::StyleType::Subtle,
            )),
            Cell::new(""),
        ]);
        table.to_string()
    }
}

/// USD to VES for the session amount, following rate publishes while the
/// conversion is open.
async fn convert_to_target(
    sync: &SyncOrchestrator,
    handles: SyncHandles,
    amount: f64,
) -> Result<ConversionView> {
    let state = sync.state();
    state.begin_conversion(amount)?;

    with_spinner("Consultando tasa BCV...", state, async {
        if let Err(e) = handles.rate.await {
            debug!(error = %e, "Rate task did not complete");
        }
    })
    .await;

    let view = ConversionView {
        direction: Direction::ToTarget,
        amount: state.amount(),
        rate: state.rate(),
        result: state.current_conversion(),
    };
    state.end_conversion();
    Ok(view)
}

async fn convert_to_source(
    sync: &SyncOrchestrator,
    handles: SyncHandles,
    amount: f64,
) -> Result<ConversionView> {
    let state = sync.state();
    with_spinner("Consultando tasa BCV...", state, async {
        if let Err(e) = handles.rate.await {
            debug!(error = %e, "Rate task did not complete");
        }
    })
    .await;

    let rate = state.rate();
    Ok(ConversionView {
        direction: Direction::ToSource,
        amount,
        rate,
        result: conversion::convert(Direction::ToSource, amount, rate),
    })
}

/// Converts a user-entered amount in the given direction.
///
/// Input is validated before anything is awaited; a rejected amount leaves
/// the published state untouched.
pub async fn convert(
    sync: &SyncOrchestrator,
    handles: SyncHandles,
    input: &str,
    direction: Direction,
) -> Result<ConversionView> {
    let amount = conversion::parse_amount(input)?;
    match direction {
        Direction::ToTarget => convert_to_target(sync, handles, amount).await,
        Direction::ToSource => convert_to_source(sync, handles, amount).await,
    }
}

pub async fn run(
    sync: &SyncOrchestrator,
    handles: SyncHandles,
    input: &str,
    direction: Direction,
) -> Result<()> {
    match convert(sync, handles, input, direction).await {
        Ok(view) => println!("{}", view.display_as_table()),
        Err(e) => match e.downcast_ref::<ConversionError>() {
            Some(ConversionError::InvalidUserInput(reason)) => {
                debug!(input, reason = %reason, "Rejected amount");
                println!("{}", display_rejected(reason));
            }
            _ => return Err(e),
        },
    }
    Ok(())
}

/// Line shown instead of a table when the amount cannot be converted.
pub fn display_rejected(reason: &str) -> String {
    format!(
        "\n{}\n",
        ui::style_text(&format!("Monto inválido: {reason}"), ui::StyleType::Error)
    )
}

/// Today's rate: the value of one USD in bolívares.
pub async fn run_snapshot(sync: &SyncOrchestrator, handles: SyncHandles) -> Result<()> {
    let view = convert_to_target(sync, handles, 1.0).await?;
    println!(
        "\n{}\n",
        ui::style_text(&ui::format_rate_line(view.rate), ui::StyleType::Value)
    );
    println!("{}", view.display_as_table());
    Ok(())
}
