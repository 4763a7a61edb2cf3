use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::round_for_display;

/// Format output as tables using the tabled crate.
///
/// Scalar result fields go into a Field/Value table (nested summaries
/// flattened to dotted names); each array of rows gets a table of its own.
pub fn print_table(value: &Value, dp: u32) {
    match value {
        Value::Object(map) => {
            if let Some(Value::Object(result)) = map.get("result") {
                print_result_tables(result, dp);
                print_envelope_notes(map);
            } else {
                print_fields_table(map, dp);
            }
        }
        Value::Array(arr) => print_array_table(arr, dp),
        _ => println!("{}", value),
    }
}

fn print_result_tables(result: &Map<String, Value>, dp: u32) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    push_fields(&mut builder, "", result, dp);
    println!("{}", Table::from(builder));

    for (key, val) in result {
        if let Value::Array(rows) = val {
            println!("\n{}:", key);
            print_array_table(rows, dp);
        }
    }
}

fn push_fields(builder: &mut Builder, prefix: &str, map: &Map<String, Value>, dp: u32) {
    for (key, val) in map {
        let name = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match val {
            Value::Object(inner) => push_fields(builder, &name, inner, dp),
            Value::Array(_) => {}
            _ => builder.push_record([name, format_value(val, dp)]),
        }
    }
}

fn print_envelope_notes(envelope: &Map<String, Value>) {
    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings.iter().filter_map(|w| w.as_str()) {
                println!("  - {}", w);
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

fn print_fields_table(map: &Map<String, Value>, dp: u32) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    push_fields(&mut builder, "", map, dp);
    println!("{}", Table::from(builder));
}

fn print_array_table(arr: &[Value], dp: u32) {
    if arr.is_empty() {
        println!("(empty)");
        return;
    }

    if let Some(Value::Object(first)) = arr.first() {
        let headers: Vec<String> = first.keys().cloned().collect();
        let mut builder = Builder::default();
        builder.push_record(&headers);

        for item in arr {
            if let Value::Object(map) = item {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| {
                        map.get(h.as_str())
                            .map(|v| format_value(v, dp))
                            .unwrap_or_default()
                    })
                    .collect();
                builder.push_record(row);
            }
        }

        println!("{}", Table::from(builder));
    } else {
        for item in arr {
            println!("{}", format_value(item, dp));
        }
    }
}

fn format_value(value: &Value, dp: u32) -> String {
    match value {
        Value::String(s) => round_for_display(s, dp),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(|v| format_value(v, dp)).collect();
            items.join(", ")
        }
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}
