use std::path::Path;

use roxmltree::{Document, Node, ParsingOptions};
use serde_json::Value;

use crate::error::Result;
use crate::readers::{read_structured, Context, ParseResult};
use crate::registry::DataReader;

/// Prefix applied to attribute names inside an element mapping.
pub const ATTRIBUTE_PREFIX: &str = "@";
/// Key holding an element's text when it also has attributes or children.
pub const TEXT_KEY: &str = "#text";

/// Reads `.xml` input files.
#[derive(Debug, Default, Clone, Copy)]
pub struct XmlReader;

/// Parses XML text into `{root_tag: element}`.
///
/// An element without attributes or child elements becomes its trimmed text.
/// Otherwise it becomes a mapping: attributes under `@name`, children under
/// their tag name (repeated tags collected into a sequence, in document
/// order), and any non-blank text under `#text`.
pub fn parse_xml(contents: &str) -> ParseResult {
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    let document = Document::parse_with_options(contents, options)?;
    let root = document.root_element();

    let mut context = Context::new();
    context.insert(root.tag_name().name().to_string(), element_to_value(root));
    Ok(context)
}

fn element_to_value(element: Node) -> Value {
    let mut map = Context::new();
    for attribute in element.attributes() {
        map.insert(
            format!("{ATTRIBUTE_PREFIX}{}", attribute.name()),
            Value::String(attribute.value().to_string()),
        );
    }

    let mut text = String::new();
    for child in element.children() {
        if child.is_element() {
            let key = child.tag_name().name().to_string();
            let value = element_to_value(child);
            match map.get_mut(&key) {
                // Element values are never sequences, so an existing sequence
                // means the tag was already repeated.
                Some(Value::Array(items)) => items.push(value),
                Some(existing) => {
                    let first = existing.take();
                    *existing = Value::Array(vec![first, value]);
                }
                None => {
                    map.insert(key, value);
                }
            }
        } else if child.is_text() {
            text.push_str(child.text().unwrap_or_default());
        }
    }

    let text = text.trim();
    if map.is_empty() {
        return Value::String(text.to_string());
    }
    if !text.is_empty() {
        map.insert(TEXT_KEY.to_string(), Value::String(text.to_string()));
    }
    Value::Object(map)
}

impl DataReader for XmlReader {
    fn name(&self) -> &str {
        "xml"
    }

    fn read(&self, path: &Path) -> Result<Context> {
        read_structured(path, parse_xml)
    }
}
