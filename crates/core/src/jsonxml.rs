//! Structural JSON <-> XML conversion.
//!
//! Attributes live under an `@attributes` key, bare text next to child
//! elements under `#text`. Repeated child tag names at one level group into
//! an array; single occurrences do not. Serialization escapes the XML
//! special characters in both text and attribute values.

use quick_xml::escape::escape;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde_json::{Map, Value};

use crate::error::Error;

/// Parse an XML document into the JSON shape described above.
///
/// An element with no child elements and no attributes yields its trimmed
/// text content as a plain string.
pub fn xml_to_json(input: &str) -> Result<Value, Error> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(Error::EmptyInput);
    }

    let mut reader = Reader::from_str(trimmed);
    reader.config_mut().trim_text(true);

    loop {
        match reader.read_event().map_err(xml_err)? {
            Event::Decl(_) | Event::Comment(_) | Event::PI(_) | Event::DocType(_) => continue,
            Event::Start(start) => {
                let name = element_name(&start);
                let attrs = read_attributes(&start)?;
                let node = parse_element(&mut reader, &name, attrs)?;
                finish_document(&mut reader)?;
                let mut root = Map::new();
                root.insert(name, node);
                return Ok(Value::Object(root));
            }
            Event::Empty(start) => {
                let name = element_name(&start);
                let attrs = read_attributes(&start)?;
                finish_document(&mut reader)?;
                let mut root = Map::new();
                root.insert(name, element_value(attrs, String::new(), Map::new()));
                return Ok(Value::Object(root));
            }
            Event::Text(_) | Event::CData(_) => {
                return Err(Error::invalid("XML", "text content outside the root element"));
            }
            Event::Eof => {
                return Err(Error::invalid("XML", "document has no root element"));
            }
            _ => continue,
        }
    }
}

/// Recursive descent over the event stream for one element's subtree.
fn parse_element(
    reader: &mut Reader<&[u8]>,
    name: &str,
    attrs: Map<String, Value>,
) -> Result<Value, Error> {
    let mut children: Map<String, Value> = Map::new();
    let mut text = String::new();

    loop {
        match reader.read_event().map_err(xml_err)? {
            Event::Start(start) => {
                let child_name = element_name(&start);
                let child_attrs = read_attributes(&start)?;
                let child = parse_element(reader, &child_name, child_attrs)?;
                insert_child(&mut children, child_name, child);
            }
            Event::Empty(start) => {
                let child_name = element_name(&start);
                let child_attrs = read_attributes(&start)?;
                let child = element_value(child_attrs, String::new(), Map::new());
                insert_child(&mut children, child_name, child);
            }
            Event::Text(t) => {
                let piece = t.unescape().map_err(xml_err)?;
                if !text.is_empty() {
                    text.push(' ');
                }
                text.push_str(piece.trim());
            }
            Event::CData(c) => {
                text.push_str(&String::from_utf8_lossy(&c.into_inner()));
            }
            Event::End(_) => return Ok(element_value(attrs, text, children)),
            Event::Eof => {
                return Err(Error::invalid(
                    "XML",
                    format!("unexpected end of document inside <{name}>"),
                ));
            }
            _ => continue,
        }
    }
}

/// Repeated tag names at the same level group into an array.
fn insert_child(children: &mut Map<String, Value>, name: String, child: Value) {
    match children.get_mut(&name) {
        Some(Value::Array(items)) => items.push(child),
        Some(existing) => {
            let first = existing.take();
            *existing = Value::Array(vec![first, child]);
        }
        None => {
            children.insert(name, child);
        }
    }
}

fn element_value(attrs: Map<String, Value>, text: String, children: Map<String, Value>) -> Value {
    if attrs.is_empty() && children.is_empty() {
        return Value::String(text);
    }
    let mut node = Map::new();
    if !attrs.is_empty() {
        node.insert("@attributes".to_string(), Value::Object(attrs));
    }
    for (key, value) in children {
        node.insert(key, value);
    }
    if !text.is_empty() {
        node.insert("#text".to_string(), Value::String(text));
    }
    Value::Object(node)
}

fn element_name(start: &BytesStart) -> String {
    String::from_utf8_lossy(start.name().as_ref()).into_owned()
}

fn read_attributes(start: &BytesStart) -> Result<Map<String, Value>, Error> {
    let mut attrs = Map::new();
    for attr in start.attributes() {
        let attr = attr.map_err(|e| Error::invalid("XML", e.to_string()))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr.unescape_value().map_err(xml_err)?.into_owned();
        attrs.insert(key, Value::String(value));
    }
    Ok(attrs)
}

/// Consume trailing trivia after the root element; a second element is an error.
fn finish_document(reader: &mut Reader<&[u8]>) -> Result<(), Error> {
    loop {
        match reader.read_event().map_err(xml_err)? {
            Event::Eof => return Ok(()),
            Event::Comment(_) | Event::PI(_) | Event::Decl(_) | Event::DocType(_) => continue,
            Event::Start(_) | Event::Empty(_) => {
                return Err(Error::invalid("XML", "multiple root elements"));
            }
            Event::Text(_) | Event::CData(_) => {
                return Err(Error::invalid("XML", "text content after the root element"));
            }
            _ => continue,
        }
    }
}

fn xml_err(e: quick_xml::Error) -> Error {
    Error::invalid("XML", e.to_string())
}

/// Serialize a JSON object with exactly one root key to indented XML.
///
/// `@attributes` becomes attributes, `#text` or a scalar value becomes text
/// content, nested objects become child elements and arrays of scalars become
/// repeated sibling elements.
pub fn json_to_xml(value: &Value) -> Result<String, Error> {
    let object = value.as_object().ok_or_else(|| {
        Error::invalid("JSON", "top-level value must be an object with one root key")
    })?;
    if object.is_empty() {
        return Err(Error::invalid("JSON", "object has no root key"));
    }
    if object.len() > 1 {
        return Err(Error::invalid(
            "JSON",
            format!("expected exactly one root key, found {}", object.len()),
        ));
    }
    let (name, body) = object
        .iter()
        .next()
        .ok_or_else(|| Error::Conversion("missing root entry".to_string()))?;
    if body.is_array() {
        return Err(Error::invalid("JSON", "the root element cannot be an array"));
    }

    let mut out = String::new();
    write_element(&mut out, name, body, 0)?;
    Ok(out)
}

fn write_element(out: &mut String, name: &str, value: &Value, depth: usize) -> Result<(), Error> {
    check_element_name(name)?;
    let pad = "  ".repeat(depth);

    match value {
        Value::Array(items) => {
            for item in items {
                write_element(out, name, item, depth)?;
            }
            Ok(())
        }
        Value::Object(map) => {
            let attr_text = render_attributes(name, map)?;
            let text = match map.get("#text") {
                Some(t) => Some(text_content(t).ok_or_else(|| {
                    Error::invalid("JSON", format!("#text of <{name}> must be a scalar"))
                })?),
                None => None,
            };
            let children: Vec<(&String, &Value)> = map
                .iter()
                .filter(|(key, _)| *key != "@attributes" && *key != "#text")
                .collect();

            if children.is_empty() {
                match text {
                    Some(t) => out.push_str(&format!("{pad}<{name}{attr_text}>{}</{name}>\n", escape(&t))),
                    None => out.push_str(&format!("{pad}<{name}{attr_text}/>\n")),
                }
                return Ok(());
            }

            out.push_str(&format!("{pad}<{name}{attr_text}>\n"));
            if let Some(t) = text {
                out.push_str(&format!("{}{}\n", "  ".repeat(depth + 1), escape(&t)));
            }
            for (key, child) in children {
                write_element(out, key, child, depth + 1)?;
            }
            out.push_str(&format!("{pad}</{name}>\n"));
            Ok(())
        }
        scalar => {
            let t = text_content(scalar).ok_or_else(|| {
                Error::invalid("JSON", format!("<{name}> holds a value that is not a scalar"))
            })?;
            out.push_str(&format!("{pad}<{name}>{}</{name}>\n", escape(&t)));
            Ok(())
        }
    }
}

fn render_attributes(name: &str, map: &Map<String, Value>) -> Result<String, Error> {
    let Some(attrs) = map.get("@attributes") else {
        return Ok(String::new());
    };
    let attrs = attrs.as_object().ok_or_else(|| {
        Error::invalid("JSON", format!("@attributes of <{name}> must be an object"))
    })?;
    let mut rendered = String::new();
    for (key, value) in attrs {
        let text = text_content(value).ok_or_else(|| {
            Error::invalid(
                "JSON",
                format!("attribute {key:?} of <{name}> must be a scalar"),
            )
        })?;
        rendered.push_str(&format!(" {key}=\"{}\"", escape(&text)));
    }
    Ok(rendered)
}

fn text_content(value: &Value) -> Option<String> {
    match value {
        Value::Null => Some(String::new()),
        Value::String(s) => Some(s.clone()),
        Value::Bool(_) | Value::Number(_) => Some(value.to_string()),
        Value::Array(_) | Value::Object(_) => None,
    }
}

fn check_element_name(name: &str) -> Result<(), Error> {
    let valid_start = name
        .chars()
        .next()
        .map(|c| c.is_ascii_alphabetic() || c == '_')
        .unwrap_or(false);
    let valid_rest = name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | ':'));
    if valid_start && valid_rest {
        Ok(())
    } else {
        Err(Error::invalid(
            "JSON",
            format!("{name:?} is not a valid XML element name"),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_xml_to_json_leaf_is_trimmed_text() {
        let value = xml_to_json("<name>  Ann  </name>").unwrap();
        assert_eq!(value, json!({"name": "Ann"}));
    }

    #[test]
    fn test_xml_to_json_attributes_key() {
        let value = xml_to_json(r#"<person id="7"><name>Ann</name></person>"#).unwrap();
        assert_eq!(
            value,
            json!({"person": {"@attributes": {"id": "7"}, "name": "Ann"}})
        );
    }

    #[test]
    fn test_xml_to_json_groups_repeated_children() {
        let value = xml_to_json("<list><item>1</item><item>2</item><only>x</only></list>").unwrap();
        assert_eq!(
            value,
            json!({"list": {"item": ["1", "2"], "only": "x"}})
        );
    }

    #[test]
    fn test_xml_to_json_text_beside_children() {
        let value = xml_to_json("<note>hello<to>Bob</to></note>").unwrap();
        assert_eq!(value, json!({"note": {"#text": "hello", "to": "Bob"}}));
    }

    #[test]
    fn test_xml_to_json_empty_element() {
        let value = xml_to_json(r#"<flag enabled="yes"/>"#).unwrap();
        assert_eq!(value, json!({"flag": {"@attributes": {"enabled": "yes"}}}));
    }

    #[test]
    fn test_xml_to_json_unescapes_entities() {
        let value = xml_to_json("<msg>&lt;a &amp; &quot;b&quot;&gt;</msg>").unwrap();
        assert_eq!(value, json!({"msg": "<a & \"b\">"}));
    }

    #[test]
    fn test_xml_to_json_malformed_fails() {
        let result = xml_to_json("<a><b></a>");
        assert!(matches!(result, Err(Error::InvalidFormat { stage: "XML", .. })));
    }

    #[test]
    fn test_xml_to_json_empty_input() {
        assert!(matches!(xml_to_json("  "), Err(Error::EmptyInput)));
    }

    #[test]
    fn test_xml_to_json_multiple_roots_fail() {
        let result = xml_to_json("<a>1</a><b>2</b>");
        assert!(result.is_err());
    }

    #[test]
    fn test_json_to_xml_escapes_special_characters() {
        let xml = json_to_xml(&json!({"msg": "<a & \"b\">"})).unwrap();
        assert_eq!(xml, "<msg>&lt;a &amp; &quot;b&quot;&gt;</msg>\n");
    }

    #[test]
    fn test_json_to_xml_attributes_and_children() {
        let xml = json_to_xml(&json!({
            "person": {"@attributes": {"id": "7"}, "name": "Ann"}
        }))
        .unwrap();
        assert_eq!(xml, "<person id=\"7\">\n  <name>Ann</name>\n</person>\n");
    }

    #[test]
    fn test_json_to_xml_scalar_array_repeats_siblings() {
        let xml = json_to_xml(&json!({"list": {"item": [1, 2]}})).unwrap();
        assert_eq!(xml, "<list>\n  <item>1</item>\n  <item>2</item>\n</list>\n");
    }

    #[test]
    fn test_json_to_xml_multiple_roots_fail() {
        let err = json_to_xml(&json!({"a": 1, "b": 2})).unwrap_err();
        assert!(err.to_string().contains("exactly one root key"));
    }

    #[test]
    fn test_json_to_xml_non_object_fails() {
        assert!(json_to_xml(&json!([1, 2])).is_err());
        assert!(json_to_xml(&json!("text")).is_err());
    }

    #[test]
    fn test_json_to_xml_invalid_element_name_fails() {
        let err = json_to_xml(&json!({"bad name": 1})).unwrap_err();
        assert!(err.to_string().contains("not a valid XML element name"));
    }

    #[test]
    fn test_round_trip_single_root_scalar_leaves() {
        let original = json!({
            "person": {
                "@attributes": {"id": "7"},
                "name": "Ann",
                "city": "Oslo"
            }
        });
        let xml = json_to_xml(&original).unwrap();
        let back = xml_to_json(&xml).unwrap();
        assert_eq!(back, original);
    }

    #[test]
    fn test_round_trip_escaped_text() {
        let original = json!({"msg": "<a & \"b\">"});
        let xml = json_to_xml(&original).unwrap();
        assert_eq!(xml_to_json(&xml).unwrap(), original);
    }
}
