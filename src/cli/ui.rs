use crate::core::ConversionError;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Defines different styles for text elements.
pub enum StyleType {
    Quote,
    Value,
    Error,
    Subtle,
}

/// Applies a consistent style to a string.
pub fn style_text(text: &str, style_type: StyleType) -> String {
    let styled = match style_type {
        StyleType::Quote => style(text).italic(),
        StyleType::Value => style(text).green().bold(),
        StyleType::Error => style(text).red(),
        StyleType::Subtle => style(text).dim(),
    };
    styled.to_string()
}

/// Creates a new `comfy_table::Table` with standard styling.
pub fn new_styled_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Creates a styled header cell for a table.
pub fn header_cell(text: &str) -> Cell {
    Cell::new(text)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

/// Right aligned, bold amount cell.
pub fn amount_cell(text: &str) -> Cell {
    Cell::new(text)
        .add_attribute(Attribute::Bold)
        .set_alignment(CellAlignment::Right)
}

/// "Today's rate" line. A zero rate means no data and is never shown as 0.00.
pub fn format_rate_line(rate: f64) -> String {
    if rate > 0.0 {
        format!("Tasa BCV hoy: {rate:.2} Bs")
    } else {
        "Tasa BCV hoy: No disponible".to_string()
    }
}

pub fn format_usd(amount: f64) -> String {
    format!("${amount:.2}")
}

/// Bolívar side of a conversion; an unavailable rate renders as an error.
pub fn format_bolivares(result: &Result<f64, ConversionError>) -> String {
    match result {
        Ok(v) => format!("Bs {v:.2}"),
        Err(_) => "Error de tasa".to_string(),
    }
}

/// Creates a spinner shown while fetches are in flight.
pub fn new_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
