//! Typed-class generation from example JSON.
//!
//! All three generators share the same contract: walk the value once, infer a
//! type for every object encountered, and emit one named declaration per
//! distinct shape. Nested shapes are named by concatenating the parent type
//! name with the capitalized key. Emission goes through an explicit registry
//! so a shape emits exactly once no matter how many paths reach it, and
//! children always land in the output before the parent that references them.

pub mod python;
pub mod typescript;

use chrono::NaiveDate;
use regex::Regex;

use crate::error::Error;

/// Ordered declaration registry: name-deduplicated, discovery order preserved.
pub(crate) struct Declarations {
    seen: std::collections::HashSet<String>,
    decls: Vec<String>,
}

impl Declarations {
    pub(crate) fn new() -> Self {
        Declarations {
            seen: std::collections::HashSet::new(),
            decls: Vec::new(),
        }
    }

    /// Claim a name. Returns false when the shape was already emitted (or is
    /// currently being emitted), in which case the caller skips generation.
    pub(crate) fn claim(&mut self, name: &str) -> bool {
        self.seen.insert(name.to_string())
    }

    pub(crate) fn push(&mut self, decl: String) {
        self.decls.push(decl);
    }

    pub(crate) fn into_output(self) -> String {
        self.decls.join("\n\n")
    }
}

/// Validate a root type name before any generation happens.
///
/// Fails fast with a message naming the violated rule.
pub fn validate_type_name(name: &str) -> Result<(), Error> {
    let Some(first) = name.chars().next() else {
        return Err(Error::InvalidTypeName("name must not be empty".to_string()));
    };
    if first.is_ascii_digit() {
        return Err(Error::InvalidTypeName(
            "name cannot start with a digit".to_string(),
        ));
    }
    if !first.is_ascii_alphabetic() && first != '_' {
        return Err(Error::InvalidTypeName(
            "name must start with a letter or underscore".to_string(),
        ));
    }
    for c in name.chars() {
        if c == ' ' {
            return Err(Error::InvalidTypeName(
                "name cannot contain spaces".to_string(),
            ));
        }
        if !c.is_ascii_alphanumeric() && c != '_' {
            return Err(Error::InvalidTypeName(format!(
                "name contains an invalid character: {c:?}"
            )));
        }
    }
    Ok(())
}

/// Child type name: parent name plus the capitalized key.
pub(crate) fn child_type_name(parent: &str, key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => format!("{parent}{}{}", first.to_ascii_uppercase(), chars.as_str()),
        None => parent.to_string(),
    }
}

/// `YYYY-MM-DD` strings infer as dates for the Python generators.
pub(crate) fn is_date_literal(text: &str) -> bool {
    Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap().is_match(text)
        && NaiveDate::parse_from_str(text, "%Y-%m-%d").is_ok()
}

/// ISO-8601 timestamps infer as datetimes for the Python generators.
pub(crate) fn is_datetime_literal(text: &str) -> bool {
    let pattern = Regex::new(r"^\d{4}-\d{2}-\d{2}[T ]\d{2}:\d{2}:\d{2}(\.\d+)?(Z|[+-]\d{2}:?\d{2})?$")
        .unwrap();
    pattern.is_match(text) && NaiveDate::parse_from_str(&text[..10], "%Y-%m-%d").is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_type_name_accepts_identifiers() {
        assert!(validate_type_name("User").is_ok());
        assert!(validate_type_name("_private").is_ok());
        assert!(validate_type_name("Order2").is_ok());
    }

    #[test]
    fn test_validate_type_name_empty() {
        let err = validate_type_name("").unwrap_err();
        assert!(err.to_string().contains("must not be empty"));
    }

    #[test]
    fn test_validate_type_name_leading_digit() {
        let err = validate_type_name("1Bad Name").unwrap_err();
        assert!(err.to_string().contains("cannot start with a digit"));
    }

    #[test]
    fn test_validate_type_name_space() {
        let err = validate_type_name("Bad Name").unwrap_err();
        assert!(err.to_string().contains("cannot contain spaces"));
    }

    #[test]
    fn test_validate_type_name_punctuation() {
        let err = validate_type_name("Bad-Name").unwrap_err();
        assert!(err.to_string().contains("invalid character"));
    }

    #[test]
    fn test_child_type_name_capitalizes_key() {
        assert_eq!(child_type_name("User", "address"), "UserAddress");
        assert_eq!(child_type_name("User", "id"), "UserId");
    }

    #[test]
    fn test_date_literal_detection() {
        assert!(is_date_literal("2024-02-29"));
        assert!(!is_date_literal("2023-02-29"));
        assert!(!is_date_literal("2024-2-9"));
        assert!(!is_date_literal("not a date"));
    }

    #[test]
    fn test_datetime_literal_detection() {
        assert!(is_datetime_literal("2024-01-15T10:30:00"));
        assert!(is_datetime_literal("2024-01-15 10:30:00"));
        assert!(is_datetime_literal("2024-01-15T10:30:00.250Z"));
        assert!(is_datetime_literal("2024-01-15T10:30:00+02:00"));
        assert!(!is_datetime_literal("2024-01-15"));
        assert!(!is_datetime_literal("10:30:00"));
    }

    #[test]
    fn test_declarations_dedupe_by_name() {
        let mut decls = Declarations::new();
        assert!(decls.claim("A"));
        decls.push("decl A".to_string());
        assert!(!decls.claim("A"));
        assert!(decls.claim("B"));
        decls.push("decl B".to_string());
        assert_eq!(decls.into_output(), "decl A\n\ndecl B");
    }
}
