use serde_json::Value;
use tabled::{builder::Builder, Table};

use super::{format_scalar, result_of, split_result};

/// Print the result fields as a two-column table, then each series
/// (yearly comparison, amortization schedule, sweep points) as its own table.
pub fn print_table(value: &Value) {
    let result = result_of(value);
    match result {
        Value::Object(map) => {
            let (fields, series) = split_result(map);

            let mut builder = Builder::default();
            builder.push_record(["Field", "Value"]);
            for (key, val) in &fields {
                builder.push_record([key.as_str(), &format_scalar(val, "-")]);
            }
            println!("{}", Table::from(builder));

            for (name, rows) in series {
                println!("\n{}:", name);
                print_rows(rows);
            }
        }
        Value::Array(rows) => print_rows(rows),
        _ => println!("{}", format_scalar(result, "-")),
    }

    if let Some(envelope) = value.as_object() {
        if let Some(Value::Array(warnings)) = envelope.get("warnings") {
            if !warnings.is_empty() {
                println!("\nWarnings:");
                for w in warnings.iter().filter_map(Value::as_str) {
                    println!("  - {}", w);
                }
            }
        }
        if let Some(Value::String(meth)) = envelope.get("methodology") {
            println!("\nMethodology: {}", meth);
        }
    }
}

fn print_rows(rows: &[Value]) {
    let Some(Value::Object(first)) = rows.first() else {
        println!("(empty)");
        return;
    };

    let headers: Vec<String> = first.keys().cloned().collect();
    let mut builder = Builder::default();
    builder.push_record(&headers);
    for row in rows.iter().filter_map(Value::as_object) {
        builder.push_record(
            headers
                .iter()
                .map(|h| row.get(h).map(|v| format_scalar(v, "-")).unwrap_or_default()),
        );
    }
    println!("{}", Table::from(builder));
}
