//! Cell values and the loose coercions applied when records are laid out.
//!
//! Cells are JSON scalars stored exactly as the client sent them. An empty
//! cell is the empty string.

use serde_json::{Number, Value};

pub type Cell = Value;

/// The empty cell.
pub fn blank() -> Cell {
    Value::String(String::new())
}

/// Whether a value counts as present for default substitution.
///
/// `null`, `false`, `0`, `NaN` and `""` all fall back to the default.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Field value as sent, or an empty cell when absent.
pub fn raw(value: Option<&Value>) -> Cell {
    match value {
        Some(Value::Null) | None => blank(),
        Some(v) => v.clone(),
    }
}

/// Field value, or `default` when absent or falsy.
pub fn or_default(value: Option<&Value>, default: impl Into<Value>) -> Cell {
    match value {
        Some(v) if is_truthy(v) => v.clone(),
        _ => default.into(),
    }
}

/// Numeric reading of a value, the way loose comparisons see it.
///
/// Numeric strings parse, the empty string and `null` read as zero, booleans
/// read as 0/1. Returns `None` for anything without a numeric reading.
pub fn to_number(value: &Value) -> Option<f64> {
    match value {
        Value::Null => Some(0.0),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                Some(0.0)
            } else {
                trimmed.parse::<f64>().ok()
            }
        }
        Value::Array(_) | Value::Object(_) => None,
    }
}

/// Numeric reading of an optional field, zero when absent or unreadable.
pub fn number_or_zero(value: Option<&Value>) -> f64 {
    value
        .filter(|v| is_truthy(v))
        .and_then(to_number)
        .unwrap_or(0.0)
}

/// Number cell; integral values are stored as integers.
pub fn number(n: f64) -> Cell {
    if n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
        Value::Number(Number::from(n as i64))
    } else {
        Number::from_f64(n).map(Value::Number).unwrap_or_else(blank)
    }
}

/// Text shown for a cell.
pub fn text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(true) => "TRUE".to_string(),
        Value::Bool(false) => "FALSE".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_truthiness() {
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!("")));
        assert!(!is_truthy(&json!(false)));
        assert!(is_truthy(&json!("0")));
        assert!(is_truthy(&json!(12.5)));
    }

    #[test]
    fn test_or_default_replaces_falsy() {
        assert_eq!(or_default(None, "Admin"), json!("Admin"));
        assert_eq!(or_default(Some(&json!("")), "Admin"), json!("Admin"));
        assert_eq!(or_default(Some(&json!("Owner")), "Admin"), json!("Owner"));
        assert_eq!(or_default(Some(&json!(0)), 0), json!(0));
    }

    #[test]
    fn test_raw_blanks_null() {
        assert_eq!(raw(None), json!(""));
        assert_eq!(raw(Some(&json!(null))), json!(""));
        assert_eq!(raw(Some(&json!(42))), json!(42));
    }

    #[test]
    fn test_to_number() {
        assert_eq!(to_number(&json!("6000")), Some(6000.0));
        assert_eq!(to_number(&json!("")), Some(0.0));
        assert_eq!(to_number(&json!("abc")), None);
        assert_eq!(to_number(&json!(true)), Some(1.0));
    }

    #[test]
    fn test_number_keeps_integers_integral() {
        assert_eq!(number(5000.0), json!(5000));
        assert_eq!(number(12.5), json!(12.5));
    }

    #[test]
    fn test_text() {
        assert_eq!(text(&json!(123456789)), "123456789");
        assert_eq!(text(&json!("RCP1")), "RCP1");
        assert_eq!(text(&json!(null)), "");
    }
}
