//! Destination row values and record field extraction.

use serde_json::Value;

use crate::parser::Record;

/// A scalar value bound into a destination column.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Boolean(bool),
}

impl SqlValue {
    /// Lossless conversion from a decoded JSON scalar. Nested values are
    /// stored as their JSON text, matching how unstructured blobs are kept.
    pub fn from_json(value: &Value) -> SqlValue {
        match value {
            Value::Null => SqlValue::Null,
            Value::Bool(b) => SqlValue::Boolean(*b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => SqlValue::Integer(i),
                None => n.as_f64().map(SqlValue::Real).unwrap_or(SqlValue::Null),
            },
            Value::String(s) => SqlValue::Text(s.clone()),
            other => SqlValue::Text(other.to_string()),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, SqlValue::Null)
    }
}

/// One destination row: an ordered list of (column, value) pairs.
///
/// Rows for a given destination table always carry that table's full column
/// set, with `Null` for unset columns, so several source files feeding one
/// merged table agree on a common superset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    columns: Vec<(String, SqlValue)>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, column: &str, value: SqlValue) -> Self {
        self.columns.push((column.to_string(), value));
        self
    }

    pub fn set(&mut self, column: &str, value: SqlValue) {
        self.columns.push((column.to_string(), value));
    }

    pub fn get(&self, column: &str) -> Option<&SqlValue> {
        self.columns
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    pub fn columns(&self) -> impl Iterator<Item = &(String, SqlValue)> {
        self.columns.iter()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// The record key, `_key`, converted to its scalar value.
pub fn key(record: &Record) -> SqlValue {
    record.get("_key").map(SqlValue::from_json).unwrap_or(SqlValue::Null)
}

pub fn int(record: &Record, field: &str) -> SqlValue {
    record
        .get(field)
        .and_then(Value::as_i64)
        .map(SqlValue::Integer)
        .unwrap_or(SqlValue::Null)
}

pub fn int_or(record: &Record, field: &str, default: i64) -> SqlValue {
    record
        .get(field)
        .and_then(Value::as_i64)
        .map(SqlValue::Integer)
        .unwrap_or(SqlValue::Integer(default))
}

pub fn real(record: &Record, field: &str) -> SqlValue {
    record
        .get(field)
        .and_then(Value::as_f64)
        .map(SqlValue::Real)
        .unwrap_or(SqlValue::Null)
}

pub fn text(record: &Record, field: &str) -> SqlValue {
    record
        .get(field)
        .and_then(Value::as_str)
        .map(|s| SqlValue::Text(s.to_string()))
        .unwrap_or(SqlValue::Null)
}

pub fn boolean_or(record: &Record, field: &str, default: bool) -> SqlValue {
    record
        .get(field)
        .and_then(Value::as_bool)
        .map(SqlValue::Boolean)
        .unwrap_or(SqlValue::Boolean(default))
}

/// A coordinate from the nested `position` object. `default` applies when the
/// record carries no position at all; `None` keeps the column null.
pub fn position(record: &Record, axis: &str, default: Option<f64>) -> SqlValue {
    let coord = record
        .get("position")
        .and_then(|p| p.get(axis))
        .and_then(Value::as_f64);

    match (coord, default) {
        (Some(v), _) => SqlValue::Real(v),
        (None, Some(d)) => SqlValue::Real(d),
        (None, None) => SqlValue::Null,
    }
}

/// Resolve a multilingual field: prefer `en`, fall back to `de`, then `fr`.
/// Plain strings pass through; anything else is absent. Total, never errors.
pub fn localized(record: &Record, field: &str) -> SqlValue {
    localized_value(record.get(field))
}

pub fn localized_value(value: Option<&Value>) -> SqlValue {
    match value {
        Some(Value::String(s)) => SqlValue::Text(s.clone()),
        Some(Value::Object(map)) => ["en", "de", "fr"]
            .iter()
            .find_map(|lang| map.get(*lang).and_then(Value::as_str))
            .map(|s| SqlValue::Text(s.to_string()))
            .unwrap_or(SqlValue::Null),
        _ => SqlValue::Null,
    }
}

/// Split a numeric attribute value across the integer/float column pair.
///
/// Integral values within the signed 32-bit range land in the integer column;
/// everything else (fractional, out of range, or non-numeric null) lands in
/// the float column. Returns `(value_int, value_float)`.
pub fn split_attribute_value(value: Option<&Value>) -> (SqlValue, SqlValue) {
    const INT_MIN: i64 = i32::MIN as i64;
    const INT_MAX: i64 = i32::MAX as i64;

    match value {
        Some(Value::Number(n)) => {
            if let Some(i) = n.as_i64() {
                if (INT_MIN..=INT_MAX).contains(&i) {
                    return (SqlValue::Integer(i), SqlValue::Null);
                }
                return (SqlValue::Null, SqlValue::Real(i as f64));
            }

            match n.as_f64() {
                Some(f) if f.fract() == 0.0 && f >= INT_MIN as f64 && f <= INT_MAX as f64 => {
                    (SqlValue::Integer(f as i64), SqlValue::Null)
                }
                Some(f) => (SqlValue::Null, SqlValue::Real(f)),
                None => (SqlValue::Null, SqlValue::Null),
            }
        }
        _ => (SqlValue::Null, SqlValue::Null),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Record {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn test_localized_prefers_english() {
        let r = record(json!({"name": {"en": "Tritanium", "de": "Tritanium-de"}}));
        assert_eq!(
            localized(&r, "name"),
            SqlValue::Text("Tritanium".to_string())
        );
    }

    #[test]
    fn test_localized_falls_back_to_de_then_fr() {
        let r = record(json!({"name": {"de": "Stein", "fr": "Pierre"}}));
        assert_eq!(localized(&r, "name"), SqlValue::Text("Stein".to_string()));

        let r = record(json!({"name": {"fr": "Pierre"}}));
        assert_eq!(localized(&r, "name"), SqlValue::Text("Pierre".to_string()));
    }

    #[test]
    fn test_localized_absent_is_null() {
        let r = record(json!({"name": {}}));
        assert_eq!(localized(&r, "name"), SqlValue::Null);

        let r = record(json!({"other": 1}));
        assert_eq!(localized(&r, "name"), SqlValue::Null);
    }

    #[test]
    fn test_localized_plain_string_passes_through() {
        let r = record(json!({"name": "Jita"}));
        assert_eq!(localized(&r, "name"), SqlValue::Text("Jita".to_string()));
    }

    #[test]
    fn test_split_attribute_value_boundaries() {
        let v = json!(2147483647);
        assert_eq!(
            split_attribute_value(Some(&v)),
            (SqlValue::Integer(2147483647), SqlValue::Null)
        );

        let v = json!(2147483648i64);
        assert_eq!(
            split_attribute_value(Some(&v)),
            (SqlValue::Null, SqlValue::Real(2147483648.0))
        );

        let v = json!(1.5);
        assert_eq!(
            split_attribute_value(Some(&v)),
            (SqlValue::Null, SqlValue::Real(1.5))
        );

        let v = json!(-2147483648i64);
        assert_eq!(
            split_attribute_value(Some(&v)),
            (SqlValue::Integer(-2147483648), SqlValue::Null)
        );

        // A whole-valued float still counts as integral.
        let v = json!(100.0);
        assert_eq!(
            split_attribute_value(Some(&v)),
            (SqlValue::Integer(100), SqlValue::Null)
        );

        assert_eq!(
            split_attribute_value(None),
            (SqlValue::Null, SqlValue::Null)
        );
    }

    #[test]
    fn test_position_defaults() {
        let r = record(json!({"position": {"x": 1.5, "y": 2.0, "z": -3.0}}));
        assert_eq!(position(&r, "x", Some(0.0)), SqlValue::Real(1.5));

        let r = record(json!({"_key": 1}));
        assert_eq!(position(&r, "x", Some(0.0)), SqlValue::Real(0.0));
        assert_eq!(position(&r, "x", None), SqlValue::Null);
    }

    #[test]
    fn test_int_or_default() {
        let r = record(json!({"portionSize": 5}));
        assert_eq!(int_or(&r, "portionSize", 1), SqlValue::Integer(5));

        let r = record(json!({}));
        assert_eq!(int_or(&r, "portionSize", 1), SqlValue::Integer(1));
    }
}
