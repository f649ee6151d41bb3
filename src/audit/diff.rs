//! Diff generation for audit logging
//!
//! Summarizes which fields of an expense changed between two snapshots.

use serde_json::Value;

use crate::models::{Expense, Money};

const MAX_STRING_CHARS: usize = 50;
const AMOUNT_FIELD: &str = "amount";

/// Generate a human-readable diff between two snapshots of an expense
///
/// Returns `None` when nothing changed. Fields are reported in key order as
/// `field: old -> new`, joined by ", ". Amounts are shown as money.
pub fn diff_expenses(before: &Expense, after: &Expense, currency_symbol: &str) -> Option<String> {
    let before = serde_json::to_value(before).ok()?;
    let after = serde_json::to_value(after).ok()?;
    generate_diff(&before, &after, currency_symbol)
}

/// Generate a human-readable diff between two JSON values
///
/// Only top-level fields are compared.
fn generate_diff(before: &Value, after: &Value, currency_symbol: &str) -> Option<String> {
    let changes = match (before, after) {
        (Value::Object(before_obj), Value::Object(after_obj)) => {
            let mut changes = Vec::new();

            for (key, before_val) in before_obj {
                match after_obj.get(key) {
                    Some(after_val) if after_val != before_val => changes.push(format!(
                        "{}: {} -> {}",
                        key,
                        format_field(key, before_val, currency_symbol),
                        format_field(key, after_val, currency_symbol)
                    )),
                    Some(_) => {}
                    None => changes.push(format!(
                        "{}: {} -> (removed)",
                        key,
                        format_field(key, before_val, currency_symbol)
                    )),
                }
            }

            for (key, after_val) in after_obj {
                if !before_obj.contains_key(key) {
                    changes.push(format!("{}: (added) -> {}", key, format_field(key, after_val, currency_symbol)));
                }
            }

            changes
        }
        _ if before != after => vec![format!(
            "{} -> {}",
            format_value(before),
            format_value(after)
        )],
        _ => Vec::new(),
    };

    if changes.is_empty() {
        None
    } else {
        Some(changes.join(", "))
    }
}

fn format_field(key: &str, value: &Value, currency_symbol: &str) -> String {
    if key == AMOUNT_FIELD {
        if let Some(amount) = value.as_f64().and_then(Money::from_decimal) {
            return amount.format_with_symbol(currency_symbol);
        }
    }
    format_value(value)
}

/// Format a JSON value for human-readable display
fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => {
            if s.chars().count() > MAX_STRING_CHARS {
                let head: String = s.chars().take(MAX_STRING_CHARS - 3).collect();
                format!("\"{}...\"", head)
            } else {
                format!("\"{}\"", s)
            }
        }
        Value::Array(arr) => format!("[{} items]", arr.len()),
        Value::Object(obj) => format!("{{{} fields}}", obj.len()),
    }
}
