use serde_json::Value;

use super::{format_scalar, result_of};

/// Key answer per command, in priority order.
const PRIORITY_KEYS: [&str; 4] = [
    "recommendation",
    "base_verdict",
    "monthly_mortgage",
    "monthly_payment",
];

/// Print just the headline answer: the verdict for an analysis or sweep,
/// the payment for an amortization.
pub fn print_minimal(value: &Value) {
    let result = result_of(value);

    if let Value::Object(map) = result {
        for key in PRIORITY_KEYS {
            match map.get(key) {
                Some(Value::Object(rec)) => {
                    if let Some(verdict) = rec.get("verdict") {
                        println!("{}", format_scalar(verdict, "null"));
                        return;
                    }
                }
                Some(val) if !val.is_null() => {
                    println!("{}", format_scalar(val, "null"));
                    return;
                }
                _ => {}
            }
        }

        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, format_scalar(val, "null"));
            return;
        }
    }

    println!("{}", format_scalar(result, "null"));
}
