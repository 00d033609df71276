use serde_json::Value;
use std::io;

use super::{format_scalar, result_of, split_result};

/// Write output as CSV to stdout.
///
/// When the result carries a series (yearly comparison, schedule, sweep
/// points) the series is written as the CSV body; otherwise the result
/// fields are written as `field,value` pairs.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    let result = result_of(value);
    match result {
        Value::Object(map) => {
            let (fields, series) = split_result(map);
            match series.first() {
                Some((_, rows)) => write_rows(&mut wtr, rows),
                None => {
                    let _ = wtr.write_record(["field", "value"]);
                    for (key, val) in &fields {
                        let _ = wtr.write_record([key.as_str(), &format_scalar(val, "")]);
                    }
                }
            }
        }
        Value::Array(rows) => write_rows(&mut wtr, rows),
        _ => {
            let _ = wtr.write_record([&format_scalar(result, "")]);
        }
    }

    let _ = wtr.flush();
}

fn write_rows(wtr: &mut csv::Writer<io::StdoutLock<'_>>, rows: &[Value]) {
    let Some(Value::Object(first)) = rows.first() else {
        return;
    };

    let headers: Vec<&str> = first.keys().map(String::as_str).collect();
    let _ = wtr.write_record(&headers);
    for row in rows.iter().filter_map(Value::as_object) {
        let record: Vec<String> = headers
            .iter()
            .map(|h| row.get(*h).map(|v| format_scalar(v, "")).unwrap_or_default())
            .collect();
        let _ = wtr.write_record(&record);
    }
}
