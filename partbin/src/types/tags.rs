//! Tag mappings and the value coercions search and sort rely on.

use crate::error::{InventoryError, Result};
use chrono::Utc;
use serde_json::Value;
use std::collections::BTreeMap;

/// Free-form string-keyed metadata carried by every item.
pub type Tags = BTreeMap<String, Value>;

/// Keys recomputed after every structural mutation. A user tag with one of
/// these names is overwritten.
pub mod keys {
    pub const NAME: &str = "name";
    pub const TYPE: &str = "type";
    pub const COUNT: &str = "count";
    pub const COMPARTMENT: &str = "compartment";
    pub const ROW: &str = "row";
    pub const COLUMN: &str = "column";
    pub const ROWS: &str = "rows";
    pub const COLUMNS: &str = "columns";
    pub const COMPARTMENTS: &str = "compartments";
    pub const CHILDREN: &str = "children";
    pub const HAS_FREE_SPACE: &str = "has_free_space";
    pub const UPDATED_AT: &str = "updated_at";
}

/// Current time as an RFC 3339 tag value
pub fn timestamp() -> Value {
    Value::String(Utc::now().to_rfc3339())
}

/// Turn a raw string into a tag value; digit-only strings become integers.
pub fn normalize_value(raw: &str) -> Value {
    if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) {
        if let Ok(n) = raw.parse::<u64>() {
            return Value::from(n);
        }
    }
    Value::String(raw.to_string())
}

/// Parse a `key=value` assignment as given on the command line.
pub fn parse_assignment(raw: &str) -> Result<(String, Value)> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| InventoryError::invalid_tag(raw, "expected key=value"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(InventoryError::invalid_tag(raw, "tag key is empty"));
    }
    Ok((key.to_string(), normalize_value(value.trim())))
}

/// Value as a user would type it: strings without quotes.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Numeric reading of a tag value, if it has one.
pub fn numeric_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        _ => None,
    }
}

/// Equality used by keyword matching: numeric when both sides are numbers,
/// textual otherwise.
pub fn values_match(left: &Value, right: &Value) -> bool {
    match (numeric_value(left), numeric_value(right)) {
        (Some(a), Some(b)) => a == b,
        _ => display_value(left) == display_value(right),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_digits() {
        assert_eq!(normalize_value("5"), json!(5));
        assert_eq!(normalize_value("resistor"), json!("resistor"));
        assert_eq!(normalize_value("4.7"), json!("4.7"));
        assert_eq!(normalize_value(""), json!(""));
    }

    #[test]
    fn test_parse_assignment() {
        let (key, value) = parse_assignment("package = 0805").unwrap();
        assert_eq!(key, "package");
        assert_eq!(value, json!(805));

        let (key, value) = parse_assignment("color=red=ish").unwrap();
        assert_eq!(key, "color");
        assert_eq!(value, json!("red=ish"));

        assert!(matches!(
            parse_assignment("nokey"),
            Err(InventoryError::InvalidTag { .. })
        ));
        assert!(matches!(
            parse_assignment("=value"),
            Err(InventoryError::InvalidTag { .. })
        ));
    }

    #[test]
    fn test_values_match() {
        assert!(values_match(&json!(5), &json!("5")));
        assert!(values_match(&json!("0805"), &json!(805)));
        assert!(values_match(&json!("red"), &json!("red")));
        assert!(!values_match(&json!("red"), &json!("blue")));
        assert!(!values_match(&json!(true), &json!("yes")));
    }

    #[test]
    fn test_numeric_value_rejects_non_finite() {
        assert_eq!(numeric_value(&json!("inf")), None);
        assert_eq!(numeric_value(&json!("12.5")), Some(12.5));
        assert_eq!(numeric_value(&json!(null)), None);
    }
}
