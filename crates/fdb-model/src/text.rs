//! Localized comment flattening.

use serde_json::Value;

/// Flattens a possibly-localized comment block to plain text.
///
/// Upstream comments appear as a bare string, as `{ "en": ... }`, or as
/// `{ "#text": ... }`, probed in that priority order. A localized entry may
/// itself be an attributed text node. Anything unrecognized flattens to an
/// empty string.
pub fn comment_text(comments: Option<&Value>) -> String {
    let Some(comments) = comments else {
        return String::new();
    };
    match comments {
        Value::String(text) => text.clone(),
        Value::Object(fields) => {
            if let Some(english) = fields.get("en") {
                if let Some(text) = text_content(english) {
                    return text.to_string();
                }
            }
            fields
                .get("#text")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        }
        _ => String::new(),
    }
}

/// Text content of a value that is either a string or an attributed text node.
fn text_content(value: &Value) -> Option<&str> {
    match value {
        Value::String(text) => Some(text),
        Value::Object(fields) => fields.get("#text").and_then(Value::as_str),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_plain_string() {
        assert_eq!(comment_text(Some(&json!("simple note"))), "simple note");
    }

    #[test]
    fn test_localized_english() {
        assert_eq!(comment_text(Some(&json!({ "en": "english note" }))), "english note");
    }

    #[test]
    fn test_localized_attributed_text_node() {
        let comments = json!({ "en": { "@lang": "en", "#text": "attributed note" } });
        assert_eq!(comment_text(Some(&comments)), "attributed note");
    }

    #[test]
    fn test_text_node_fallback() {
        assert_eq!(comment_text(Some(&json!({ "#text": "raw text" }))), "raw text");
    }

    #[test]
    fn test_english_takes_priority_over_text_node() {
        let comments = json!({ "en": "english", "#text": "raw" });
        assert_eq!(comment_text(Some(&comments)), "english");
    }

    #[test]
    fn test_unrecognized_shapes() {
        assert_eq!(comment_text(None), "");
        assert_eq!(comment_text(Some(&json!(17))), "");
        assert_eq!(comment_text(Some(&json!({ "de": "nur deutsch" }))), "");
    }
}
