//! Python dataclass and Pydantic model generation.
//!
//! Both flavors share the same inference; they differ only in the class
//! header and the import preamble.

use std::collections::BTreeSet;

use serde_json::{Map, Value};

use super::{child_type_name, is_date_literal, is_datetime_literal, validate_type_name, Declarations};
use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flavor {
    Dataclass,
    Pydantic,
}

#[derive(Default)]
struct Imports {
    typing: BTreeSet<&'static str>,
    datetime: BTreeSet<&'static str>,
}

/// Generate `@dataclass` declarations for the example value.
pub fn generate_dataclass(value: &Value, root_name: &str) -> Result<String, Error> {
    render(value, root_name, Flavor::Dataclass)
}

/// Generate Pydantic `BaseModel` declarations for the example value.
pub fn generate_pydantic(value: &Value, root_name: &str) -> Result<String, Error> {
    render(value, root_name, Flavor::Pydantic)
}

fn render(value: &Value, root_name: &str, flavor: Flavor) -> Result<String, Error> {
    validate_type_name(root_name)?;
    let object = value
        .as_object()
        .ok_or_else(|| Error::invalid("JSON", "top-level JSON must be an object"))?;

    let mut decls = Declarations::new();
    let mut imports = Imports::default();
    emit_class(object, root_name, flavor, &mut decls, &mut imports);

    let mut out = String::new();
    match flavor {
        Flavor::Dataclass => out.push_str("from dataclasses import dataclass\n"),
        Flavor::Pydantic => out.push_str("from pydantic import BaseModel\n"),
    }
    if !imports.datetime.is_empty() {
        let names: Vec<&str> = imports.datetime.iter().copied().collect();
        out.push_str(&format!("from datetime import {}\n", names.join(", ")));
    }
    if !imports.typing.is_empty() {
        let names: Vec<&str> = imports.typing.iter().copied().collect();
        out.push_str(&format!("from typing import {}\n", names.join(", ")));
    }
    out.push('\n');
    out.push_str(&decls.into_output());
    Ok(out)
}

fn emit_class(
    object: &Map<String, Value>,
    name: &str,
    flavor: Flavor,
    decls: &mut Declarations,
    imports: &mut Imports,
) {
    if !decls.claim(name) {
        return;
    }
    let mut fields = Vec::new();
    for (key, value) in object {
        let ty = field_type(value, name, key, flavor, decls, imports);
        fields.push(format!("    {key}: {ty}"));
    }
    if fields.is_empty() {
        fields.push("    pass".to_string());
    }
    let decl = match flavor {
        Flavor::Dataclass => format!("@dataclass\nclass {name}:\n{}", fields.join("\n")),
        Flavor::Pydantic => format!("class {name}(BaseModel):\n{}", fields.join("\n")),
    };
    decls.push(decl);
}

fn field_type(
    value: &Value,
    parent: &str,
    key: &str,
    flavor: Flavor,
    decls: &mut Declarations,
    imports: &mut Imports,
) -> String {
    match value {
        Value::Null => {
            imports.typing.insert("Any");
            imports.typing.insert("Optional");
            "Optional[Any]".to_string()
        }
        Value::Bool(_) => "bool".to_string(),
        Value::Number(n) => {
            if n.is_i64() || n.is_u64() {
                "int".to_string()
            } else {
                "float".to_string()
            }
        }
        Value::String(s) => {
            if is_datetime_literal(s) {
                imports.datetime.insert("datetime");
                "datetime".to_string()
            } else if is_date_literal(s) {
                imports.datetime.insert("date");
                "date".to_string()
            } else {
                "str".to_string()
            }
        }
        Value::Object(map) => {
            let child = child_type_name(parent, key);
            emit_class(map, &child, flavor, decls, imports);
            child
        }
        Value::Array(items) => array_type(items, parent, key, flavor, decls, imports),
    }
}

/// Element types union in first-seen order; an int/float pair collapses to
/// float only.
fn array_type(
    items: &[Value],
    parent: &str,
    key: &str,
    flavor: Flavor,
    decls: &mut Declarations,
    imports: &mut Imports,
) -> String {
    imports.typing.insert("List");
    if items.is_empty() {
        imports.typing.insert("Any");
        return "List[Any]".to_string();
    }
    let mut element_types: Vec<String> = Vec::new();
    for item in items {
        let ty = field_type(item, parent, key, flavor, decls, imports);
        if !element_types.contains(&ty) {
            element_types.push(ty);
        }
    }
    if element_types.iter().any(|t| t == "int") && element_types.iter().any(|t| t == "float") {
        element_types.retain(|t| t != "int");
    }
    if element_types.len() == 1 {
        format!("List[{}]", element_types[0])
    } else {
        imports.typing.insert("Union");
        format!("List[Union[{}]]", element_types.join(", "))
    }
}
