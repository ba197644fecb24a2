pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::{Map, Value};

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// Flatten nested objects into dotted keys (`features.debt_ratio`) so the
/// feature vector shows up as rows rather than a JSON blob.
pub(crate) fn flatten_fields<'a>(map: &'a Map<String, Value>) -> Vec<(String, &'a Value)> {
    let mut out = Vec::with_capacity(map.len());
    flatten_into("", map, &mut out);
    out
}

fn flatten_into<'a>(prefix: &str, map: &'a Map<String, Value>, out: &mut Vec<(String, &'a Value)>) {
    for (key, val) in map {
        let name = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };
        match val {
            Value::Object(inner) => flatten_into(&name, inner, out),
            _ => out.push((name, val)),
        }
    }
}
