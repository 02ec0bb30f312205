//! TypeScript interface generation.

use serde_json::{Map, Value};

use super::{child_type_name, validate_type_name, Declarations};
use crate::error::Error;

/// Generate `export interface` declarations for the example value.
pub fn generate(value: &Value, root_name: &str) -> Result<String, Error> {
    validate_type_name(root_name)?;
    let object = value
        .as_object()
        .ok_or_else(|| Error::invalid("JSON", "top-level JSON must be an object"))?;

    let mut decls = Declarations::new();
    emit_interface(object, root_name, &mut decls);
    Ok(decls.into_output())
}

fn emit_interface(object: &Map<String, Value>, name: &str, decls: &mut Declarations) {
    if !decls.claim(name) {
        return;
    }
    let mut fields = Vec::new();
    for (key, value) in object {
        let ty = field_type(value, name, key, decls);
        fields.push(format!("  {key}: {ty};"));
    }
    decls.push(format!(
        "export interface {name} {{\n{}\n}}",
        fields.join("\n")
    ));
}

fn field_type(value: &Value, parent: &str, key: &str, decls: &mut Declarations) -> String {
    match value {
        Value::Null => "any".to_string(),
        Value::Bool(_) => "boolean".to_string(),
        Value::Number(_) => "number".to_string(),
        Value::String(_) => "string".to_string(),
        Value::Object(map) => {
            let child = child_type_name(parent, key);
            emit_interface(map, &child, decls);
            child
        }
        Value::Array(items) => array_type(items, parent, key, decls),
    }
}

/// Empty arrays fall back to `any[]`; element types union in first-seen
/// order. Arrays of objects take the first element's shape as the template
/// (later elements reuse the name the registry already claimed).
fn array_type(items: &[Value], parent: &str, key: &str, decls: &mut Declarations) -> String {
    if items.is_empty() {
        return "any[]".to_string();
    }
    let mut element_types: Vec<String> = Vec::new();
    for item in items {
        let ty = field_type(item, parent, key, decls);
        if !element_types.contains(&ty) {
            element_types.push(ty);
        }
    }
    if element_types.len() == 1 {
        format!("{}[]", element_types[0])
    } else {
        format!("({})[]", element_types.join(" | "))
    }
}
