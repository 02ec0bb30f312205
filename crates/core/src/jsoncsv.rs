//! Structural JSON <-> CSV conversion.
//!
//! Nested objects flatten into separator-joined column names; arrays expand
//! by Cartesian-style duplication, one output row per leaf combination. The
//! reverse direction rebuilds nested objects from the column names. Array
//! structure is not reconstructed on the way back - that is the documented
//! lossy point of this converter, not a bug.

use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::error::Error;

/// One flattened row: column name (separator-joined key path) to scalar text.
pub type FlatRecord = HashMap<String, String>;

/// Flatten a JSON object, or array of objects, into flat records plus the
/// union of all column names in first-seen order.
///
/// Every path to a scalar appears as a column. A record that never saw a
/// given column renders it as the empty string.
pub fn flatten(value: &Value, sep: &str) -> Result<(Vec<FlatRecord>, Vec<String>), Error> {
    if sep.is_empty() {
        return Err(Error::Validation("separator must not be empty".to_string()));
    }

    let mut headers: Vec<String> = Vec::new();
    let mut records: Vec<FlatRecord> = Vec::new();

    match value {
        Value::Object(_) => {
            records.extend(flatten_value(value, "", sep, vec![FlatRecord::new()], &mut headers));
        }
        Value::Array(items) => {
            for item in items {
                if !item.is_object() {
                    return Err(Error::invalid(
                        "JSON",
                        "a top-level array must contain only objects",
                    ));
                }
                records.extend(flatten_value(item, "", sep, vec![FlatRecord::new()], &mut headers));
            }
        }
        _ => {
            return Err(Error::invalid(
                "JSON",
                "top-level value must be an object or an array of objects",
            ));
        }
    }

    Ok((records, headers))
}

/// Walk one value, threading the current record set through.
///
/// Scalars write into every record in the set; arrays multiply the set, one
/// clone per element. An empty array contributes no column at all.
fn flatten_value(
    value: &Value,
    prefix: &str,
    sep: &str,
    records: Vec<FlatRecord>,
    headers: &mut Vec<String>,
) -> Vec<FlatRecord> {
    match value {
        Value::Object(map) => {
            let mut current = records;
            for (key, child) in map {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}{sep}{key}")
                };
                current = flatten_value(child, &path, sep, current, headers);
            }
            current
        }
        Value::Array(items) => {
            if items.is_empty() {
                return records;
            }
            let mut expanded = Vec::new();
            for item in items {
                expanded.extend(flatten_value(item, prefix, sep, records.clone(), headers));
            }
            expanded
        }
        scalar => {
            if !headers.iter().any(|h| h == prefix) {
                headers.push(prefix.to_string());
            }
            let text = scalar_text(scalar);
            let mut current = records;
            for record in &mut current {
                record.insert(prefix.to_string(), text.clone());
            }
            current
        }
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Rebuild a nested object from flattened (path, value) pairs.
///
/// Splits each path on the separator. When a prefix collides with a scalar
/// already placed at that position the scalar wins and the deeper keys are
/// dropped; arrays are never reconstructed.
pub fn unflatten(fields: &[(String, Value)], sep: &str) -> Value {
    let mut root = Map::new();
    for (path, value) in fields {
        let parts: Vec<&str> = path.split(sep).collect();
        insert_path(&mut root, &parts, value.clone());
    }
    Value::Object(root)
}

fn insert_path(object: &mut Map<String, Value>, parts: &[&str], value: Value) {
    if parts.len() == 1 {
        object.insert(parts[0].to_string(), value);
        return;
    }
    let entry = object
        .entry(parts[0].to_string())
        .or_insert_with(|| Value::Object(Map::new()));
    if let Value::Object(child) = entry {
        insert_path(child, &parts[1..], value);
    }
}

/// Convert JSON text to CSV text.
///
/// A field is quoted when it contains a comma, a newline or a double quote;
/// embedded quotes are doubled (the csv crate's RFC 4180 behavior).
pub fn json_to_csv(input: &str, sep: &str) -> Result<String, Error> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(Error::EmptyInput);
    }

    let value: Value =
        serde_json::from_str(trimmed).map_err(|e| Error::invalid("JSON", e.to_string()))?;
    let (records, headers) = flatten(&value, sep)?;

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(&headers)
        .map_err(|e| Error::Conversion(e.to_string()))?;
    for record in &records {
        let row: Vec<&str> = headers
            .iter()
            .map(|header| record.get(header).map(String::as_str).unwrap_or(""))
            .collect();
        writer
            .write_record(&row)
            .map_err(|e| Error::Conversion(e.to_string()))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| Error::Conversion(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| Error::Conversion(e.to_string()))
}

/// Convert CSV text back to an array of nested JSON objects.
///
/// Quoted fields may span commas and newlines; doubled quotes unescape. Empty
/// cells are omitted from the rebuilt object. Cells that look numeric or
/// boolean are revived to JSON numbers and booleans.
pub fn csv_to_json(input: &str, sep: &str) -> Result<Value, Error> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(Error::EmptyInput);
    }
    if sep.is_empty() {
        return Err(Error::Validation("separator must not be empty".to_string()));
    }

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(trimmed.as_bytes());
    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| Error::invalid("CSV", e.to_string()))?
        .iter()
        .map(str::to_string)
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| Error::invalid("CSV", e.to_string()))?;
        let mut fields: Vec<(String, Value)> = Vec::new();
        for (index, header) in headers.iter().enumerate() {
            let cell = record.get(index).unwrap_or("");
            if cell.is_empty() {
                continue;
            }
            fields.push((header.clone(), revive_scalar(cell)));
        }
        rows.push(unflatten(&fields, sep));
    }

    Ok(Value::Array(rows))
}

/// Best-effort scalar revival: integer, then float, then boolean, else string.
fn revive_scalar(text: &str) -> Value {
    if let Ok(n) = text.parse::<i64>() {
        return Value::from(n);
    }
    if let Ok(f) = text.parse::<f64>() {
        if f.is_finite() {
            return Value::from(f);
        }
    }
    match text {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        _ => Value::String(text.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flatten_nested_object() {
        let value = json!({"name": "Ann", "address": {"city": "Oslo", "zip": "0150"}});
        let (records, headers) = flatten(&value, "_").unwrap();

        assert_eq!(headers, vec!["name", "address_city", "address_zip"]);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get("address_city").unwrap(), "Oslo");
    }

    #[test]
    fn test_flatten_custom_separator() {
        let value = json!({"a": {"b": 1}});
        let (_, headers) = flatten(&value, ".").unwrap();
        assert_eq!(headers, vec!["a.b"]);
    }

    #[test]
    fn test_flatten_scalar_array_duplicates_rows() {
        let value = json!({"x": [1, 2]});
        let (records, headers) = flatten(&value, "_").unwrap();

        assert_eq!(headers, vec!["x"]);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("x").unwrap(), "1");
        assert_eq!(records[1].get("x").unwrap(), "2");
    }

    #[test]
    fn test_flatten_two_arrays_cartesian() {
        let value = json!({"a": [1, 2], "b": ["x", "y"]});
        let (records, _) = flatten(&value, "_").unwrap();

        assert_eq!(records.len(), 4);
        let pairs: Vec<(String, String)> = records
            .iter()
            .map(|r| (r.get("a").unwrap().clone(), r.get("b").unwrap().clone()))
            .collect();
        assert!(pairs.contains(&("1".to_string(), "x".to_string())));
        assert!(pairs.contains(&("2".to_string(), "y".to_string())));
    }

    #[test]
    fn test_flatten_array_of_objects_input() {
        let value = json!([{"a": 1}, {"b": 2}]);
        let (records, headers) = flatten(&value, "_").unwrap();

        assert_eq!(headers, vec!["a", "b"]);
        assert_eq!(records.len(), 2);
        assert!(records[1].get("a").is_none());
    }

    #[test]
    fn test_flatten_empty_array_contributes_nothing() {
        let value = json!({"a": 1, "tags": []});
        let (records, headers) = flatten(&value, "_").unwrap();

        assert_eq!(headers, vec!["a"]);
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_flatten_rejects_top_level_scalar() {
        let result = flatten(&json!(42), "_");
        assert!(matches!(result, Err(Error::InvalidFormat { .. })));
    }

    #[test]
    fn test_flatten_rejects_mixed_top_level_array() {
        let result = flatten(&json!([{"a": 1}, 2]), "_");
        assert!(matches!(result, Err(Error::InvalidFormat { .. })));
    }

    #[test]
    fn test_unflatten_rebuilds_nested_object() {
        let fields = vec![
            ("a_b".to_string(), json!(1)),
            ("a_c".to_string(), json!("x")),
            ("d".to_string(), json!(true)),
        ];
        let value = unflatten(&fields, "_");
        assert_eq!(value, json!({"a": {"b": 1, "c": "x"}, "d": true}));
    }

    #[test]
    fn test_unflatten_scalar_wins_over_deeper_keys() {
        let fields = vec![
            ("a".to_string(), json!(1)),
            ("a_b".to_string(), json!(2)),
        ];
        let value = unflatten(&fields, "_");
        assert_eq!(value, json!({"a": 1}));
    }

    #[test]
    fn test_json_to_csv_quotes_only_when_needed() {
        let csv_text = json_to_csv(r#"{"v": "a,b\"c", "w": "plain"}"#, "_").unwrap();
        let mut lines = csv_text.lines();
        assert_eq!(lines.next().unwrap(), "v,w");
        assert_eq!(lines.next().unwrap(), r#""a,b""c",plain"#);
    }

    #[test]
    fn test_csv_to_json_unescapes_doubled_quotes() {
        let value = csv_to_json("v\n\"a,b\"\"c\"\n", "_").unwrap();
        assert_eq!(value, json!([{"v": "a,b\"c"}]));
    }

    #[test]
    fn test_csv_to_json_quoted_field_spans_newline() {
        let value = csv_to_json("v\n\"line one\nline two\"\n", "_").unwrap();
        assert_eq!(value, json!([{"v": "line one\nline two"}]));
    }

    #[test]
    fn test_csv_to_json_revives_scalars() {
        let value = csv_to_json("a,b,c,d\n1,1.5,true,text\n", "_").unwrap();
        assert_eq!(value, json!([{"a": 1, "b": 1.5, "c": true, "d": "text"}]));
    }

    #[test]
    fn test_csv_to_json_omits_empty_cells() {
        let value = csv_to_json("a,b\n1,\n", "_").unwrap();
        assert_eq!(value, json!([{"a": 1}]));
    }

    #[test]
    fn test_round_trip_rebuilds_flat_key_view() {
        let original = json!({
            "name": "gadget",
            "info": {"weight": 2.5, "active": true},
            "tags": [1, 2]
        });
        let csv_text = json_to_csv(&original.to_string(), "_").unwrap();
        let value = csv_to_json(&csv_text, "_").unwrap();

        // Scalar arrays collapse to duplicated rows, the documented lossy point.
        assert_eq!(
            value,
            json!([
                {"name": "gadget", "info": {"weight": 2.5, "active": true}, "tags": 1},
                {"name": "gadget", "info": {"weight": 2.5, "active": true}, "tags": 2}
            ])
        );
    }

    #[test]
    fn test_json_to_csv_empty_input() {
        assert!(matches!(json_to_csv("   ", "_"), Err(Error::EmptyInput)));
    }

    #[test]
    fn test_json_to_csv_invalid_json_names_stage() {
        let err = json_to_csv("{not json", "_").unwrap_err();
        assert!(err.to_string().starts_with("invalid JSON"));
    }

    #[test]
    fn test_csv_to_json_empty_input() {
        assert!(matches!(csv_to_json("", "_"), Err(Error::EmptyInput)));
    }

    #[test]
    fn test_csv_to_json_ignores_extra_cells() {
        let value = csv_to_json("a,b\n1,2,3\n", "_").unwrap();
        assert_eq!(value, json!([{"a": 1, "b": 2}]));
    }

    #[test]
    fn test_missing_column_renders_empty_and_drops_on_return() {
        let csv_text = json_to_csv(r#"[{"a": 1, "b": 2}, {"a": 3}]"#, "_").unwrap();
        let mut lines = csv_text.lines();
        assert_eq!(lines.next().unwrap(), "a,b");
        assert_eq!(lines.next().unwrap(), "1,2");
        assert_eq!(lines.next().unwrap(), "3,");

        let value = csv_to_json(&csv_text, "_").unwrap();
        assert_eq!(value, json!([{"a": 1, "b": 2}, {"a": 3}]));
    }
}
