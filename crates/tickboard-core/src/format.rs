//! Display helpers shared by the actions.

use serde_json::{Number, Value};

/// Marker shown wherever a field is absent from the provider response.
pub const NOT_AVAILABLE: &str = "N/A";

/// `3000000000000` → `3,000,000,000,000`.
pub fn group_thousands(value: u64) -> String {
    group_digits(&value.to_string())
}

/// Metric text for a statement value.
///
/// Statement entries shaped like `{"value": n, "unit": ..}` show their
/// `value`. Integral numbers are comma-grouped.
pub fn metric_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::from(NOT_AVAILABLE),
        Some(Value::Object(map)) if map.contains_key("value") => metric_text(map.get("value")),
        Some(Value::Number(number)) => grouped_number(number),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}

fn grouped_number(number: &Number) -> String {
    if let Some(value) = number.as_u64() {
        return group_thousands(value);
    }
    if let Some(value) = number.as_i64() {
        return format!("-{}", group_thousands(value.unsigned_abs()));
    }
    match number.as_f64() {
        Some(value) if value.fract() == 0.0 && value.abs() < 1e15 => {
            let grouped = group_thousands(value.abs() as u64);
            if value < 0.0 {
                format!("-{grouped}")
            } else {
                grouped
            }
        }
        _ => number.to_string(),
    }
}

fn group_digits(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
