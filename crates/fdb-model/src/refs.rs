//! Cross-reference resolution.
//!
//! Upstream reference lists are irregular in two independent ways: a list
//! field may hold one entry or many, and each entry may be a bare id string or
//! an object carrying the id in an element, an attribute, or inline text.
//! This module is the single resolution point used on both sides of the join
//! (printer->driver and driver->printer) and by ingest normalization.

use serde_json::Value;

/// Candidate fields for an object-shaped reference, in priority order.
const ID_FIELDS: [&str; 3] = ["id", "@id", "#text"];

/// Extracts the referenced id from a single reference entry.
///
/// A bare string is the id itself; an object is probed for `id`, `@id`, then
/// `#text`. Returns `None` for anything else.
pub fn reference_id(value: &Value) -> Option<&str> {
    match value {
        Value::String(id) => Some(id),
        Value::Object(fields) => ID_FIELDS
            .iter()
            .find_map(|key| fields.get(*key).and_then(Value::as_str)),
        _ => None,
    }
}

/// Returns the per-pairing comments attached to an object-shaped reference.
pub fn reference_comments(value: &Value) -> Option<&Value> {
    value.as_object().and_then(|fields| fields.get("comments"))
}

/// Unwraps a `{ key: one-or-many }` container into a slice of entries.
///
/// The upstream export writes a single reference as a scalar and multiple
/// references as an array; an absent container means no references.
pub fn reference_entries<'a>(container: Option<&'a Value>, key: &str) -> Vec<&'a Value> {
    let Some(Value::Object(fields)) = container else {
        return Vec::new();
    };
    match fields.get(key) {
        None => Vec::new(),
        Some(Value::Array(entries)) => entries.iter().collect(),
        Some(single) => vec![single],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bare_string_reference() {
        assert_eq!(reference_id(&json!("printer/HP-DeskJet_500")), Some("printer/HP-DeskJet_500"));
    }

    #[test]
    fn test_id_field_priority() {
        let reference = json!({
            "id": "printer/first",
            "@id": "printer/second",
            "#text": "printer/third",
        });
        assert_eq!(reference_id(&reference), Some("printer/first"));

        let reference = json!({ "@id": "printer/second", "#text": "printer/third" });
        assert_eq!(reference_id(&reference), Some("printer/second"));

        let reference = json!({ "#text": "printer/third" });
        assert_eq!(reference_id(&reference), Some("printer/third"));
    }

    #[test]
    fn test_unresolvable_reference() {
        assert_eq!(reference_id(&json!({ "comments": "no id here" })), None);
        assert_eq!(reference_id(&json!(42)), None);
        assert_eq!(reference_id(&json!(["printer/a"])), None);
    }

    #[test]
    fn test_reference_comments() {
        let reference = json!({ "id": "printer/a", "comments": { "en": "works" } });
        assert_eq!(reference_comments(&reference), Some(&json!({ "en": "works" })));
        assert_eq!(reference_comments(&json!("printer/a")), None);
    }

    #[test]
    fn test_reference_entries_shapes() {
        let many = json!({ "printer": ["printer/a", { "id": "printer/b" }] });
        assert_eq!(reference_entries(Some(&many), "printer").len(), 2);

        let single = json!({ "printer": "printer/a" });
        assert_eq!(reference_entries(Some(&single), "printer").len(), 1);

        let empty = json!({});
        assert!(reference_entries(Some(&empty), "printer").is_empty());
        assert!(reference_entries(None, "printer").is_empty());
    }
}
