pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value, dp: u32) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value, dp),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value, dp),
    }
}

/// Round decimal strings carrying more than `dp` places; anything else is
/// returned unchanged.
pub fn round_for_display(s: &str, dp: u32) -> String {
    match Decimal::from_str(s) {
        Ok(d) if d.scale() > dp => d.round_dp(dp).to_string(),
        _ => s.to_string(),
    }
}
