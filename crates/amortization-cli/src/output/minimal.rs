use serde_json::Value;

use super::round_for_display;

/// Print just the headline figure of the output.
///
/// Looks for well-known result fields in priority order, then falls back to
/// the first field of the result object.
pub fn print_minimal(value: &Value, dp: u32) {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    let priority_keys = ["interest_saved", "standard_installment"];

    if let Value::Object(map) = result_obj {
        for key in &priority_keys {
            if let Some(val) = map.get(*key) {
                if !val.is_null() {
                    println!("{}", format_minimal(val, dp));
                    return;
                }
            }
        }

        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, format_minimal(val, dp));
            return;
        }
    }

    println!("{}", format_minimal(result_obj, dp));
}

fn format_minimal(value: &Value, dp: u32) -> String {
    match value {
        Value::String(s) => round_for_display(s, dp),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
