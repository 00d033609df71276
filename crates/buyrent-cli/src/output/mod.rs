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

/// The computation result inside an envelope, or the value itself.
pub(crate) fn result_of(value: &Value) -> &Value {
    value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value)
}

/// Split a result object into scalar fields and series
/// (arrays of objects such as `yearly_comparison`, `schedule` or `points`).
/// Nested objects are flattened one level with a dotted key.
pub(crate) fn split_result(map: &Map<String, Value>) -> (Vec<(String, Value)>, Vec<(&str, &[Value])>) {
    let mut fields = Vec::new();
    let mut series = Vec::new();
    for (key, val) in map {
        match val {
            Value::Array(items) if items.iter().all(Value::is_object) && !items.is_empty() => {
                series.push((key.as_str(), items.as_slice()));
            }
            Value::Object(inner) => {
                for (sub, sub_val) in inner {
                    fields.push((format!("{}.{}", key, sub), sub_val.clone()));
                }
            }
            _ => fields.push((key.clone(), val.clone())),
        }
    }
    (fields, series)
}

pub(crate) fn format_scalar(value: &Value, null: &str) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => null.to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
