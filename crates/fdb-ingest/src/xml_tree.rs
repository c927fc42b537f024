//! XML to JSON tree conversion.
//!
//! Converts one upstream XML document into a `serde_json::Value` tree with a
//! fixed shape convention: attributes keyed with an `@` prefix, inline text
//! under `#text`, repeated sibling elements collected into arrays, and empty
//! elements as `""`. Text is never coerced to numbers; the downstream join
//! expects strings.

use quick_xml::Reader;
use quick_xml::events::Event;
use serde_json::{Map, Value};

/// Prefix distinguishing attribute keys from child-element keys.
pub const ATTRIBUTE_PREFIX: &str = "@";

/// Key holding inline text when an element also has attributes or children.
pub const TEXT_KEY: &str = "#text";

struct ElementFrame {
    name: String,
    children: Map<String, Value>,
    text: String,
}

impl ElementFrame {
    fn new(name: String) -> Self {
        Self {
            name,
            children: Map::new(),
            text: String::new(),
        }
    }

    /// Collapses a closed element into its JSON value.
    fn into_value(self) -> Value {
        if self.children.is_empty() {
            return Value::String(self.text);
        }
        let mut children = self.children;
        if !self.text.is_empty() {
            children.insert(TEXT_KEY.to_string(), Value::String(self.text));
        }
        Value::Object(children)
    }
}

/// Parses an XML document into its JSON tree.
pub fn parse_xml_tree(xml: &str) -> Result<Value, quick_xml::Error> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);
    let decoder = reader.decoder();

    // Bottom frame represents the document itself and collects the root.
    let mut stack = vec![ElementFrame::new(String::new())];

    loop {
        match reader.read_event()? {
            Event::Start(start) => {
                let mut frame = ElementFrame::new(decoder.decode(start.name().as_ref())?.into_owned());
                for attribute in start.attributes() {
                    let attribute = attribute.map_err(quick_xml::Error::InvalidAttr)?;
                    let key = format!(
                        "{ATTRIBUTE_PREFIX}{}",
                        decoder.decode(attribute.key.as_ref())?
                    );
                    let value = attribute.unescape_value()?.into_owned();
                    frame.children.insert(key, Value::String(value));
                }
                stack.push(frame);
            }
            Event::Empty(empty) => {
                let mut frame = ElementFrame::new(decoder.decode(empty.name().as_ref())?.into_owned());
                for attribute in empty.attributes() {
                    let attribute = attribute.map_err(quick_xml::Error::InvalidAttr)?;
                    let key = format!(
                        "{ATTRIBUTE_PREFIX}{}",
                        decoder.decode(attribute.key.as_ref())?
                    );
                    let value = attribute.unescape_value()?.into_owned();
                    frame.children.insert(key, Value::String(value));
                }
                close_element(&mut stack, frame);
            }
            Event::End(_) => {
                if let Some(frame) = stack.pop() {
                    close_element(&mut stack, frame);
                }
            }
            Event::Text(text) => {
                let decoded = decoder.decode(&text)?;
                let unescaped = quick_xml::escape::unescape(&decoded)?;
                if let Some(frame) = stack.last_mut() {
                    frame.text.push_str(&unescaped);
                }
            }
            Event::CData(cdata) => {
                let decoded = decoder.decode(&cdata)?;
                if let Some(frame) = stack.last_mut() {
                    frame.text.push_str(&decoded);
                }
            }
            Event::GeneralRef(reference) => {
                let resolved = match reference.resolve_char_ref()? {
                    Some(ch) => ch.to_string(),
                    None => {
                        let name = decoder.decode(&reference)?;
                        match name.as_ref() {
                            "amp" => "&".to_string(),
                            "lt" => "<".to_string(),
                            "gt" => ">".to_string(),
                            "apos" => "'".to_string(),
                            "quot" => "\"".to_string(),
                            // Unknown entity: keep the reference verbatim.
                            other => format!("&{other};"),
                        }
                    }
                };
                if let Some(frame) = stack.last_mut() {
                    frame.text.push_str(&resolved);
                }
            }
            Event::Eof => break,
            // Declarations, comments, PIs, and doctypes carry no record data.
            _ => {}
        }
    }

    let document = stack
        .pop()
        .map(|frame| Value::Object(frame.children))
        .unwrap_or(Value::Null);
    Ok(document)
}

/// Inserts a closed element into its parent, folding repeats into an array.
fn close_element(stack: &mut Vec<ElementFrame>, frame: ElementFrame) {
    let name = frame.name.clone();
    let value = frame.into_value();
    let Some(parent) = stack.last_mut() else {
        return;
    };
    match parent.children.remove(&name) {
        None => {
            parent.children.insert(name, value);
        }
        Some(Value::Array(mut siblings)) => {
            siblings.push(value);
            parent.children.insert(name, Value::Array(siblings));
        }
        Some(first) => {
            parent.children.insert(name, Value::Array(vec![first, value]));
        }
    }
}
