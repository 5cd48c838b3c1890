//! Built-in structured data readers.
//!
//! Every reader follows the same contract: read the whole file as text, yield
//! an empty [`Context`] when the file is blank, otherwise parse it into a
//! mapping of string keys to arbitrary values.

use std::fs;
use std::io;
use std::path::Path;

use log::debug;
use serde_json::Value;

use crate::error::{Error, Result};

pub mod ini;
pub mod json;
pub mod xml;
pub mod yaml;

pub use self::ini::IniReader;
pub use self::json::JsonReader;
pub use self::xml::XmlReader;
pub use self::yaml::YamlReader;

/// The parsed data of one input file, used as template bindings.
pub type Context = serde_json::Map<String, Value>;

/// Outcome of parsing file contents, before the file path is attached.
pub type ParseResult = std::result::Result<Context, Box<dyn std::error::Error + Send + Sync>>;

/// Reads `path` and hands non-blank contents to `parse`.
pub(crate) fn read_structured<F>(path: &Path, parse: F) -> Result<Context>
where
    F: FnOnce(&str) -> ParseResult,
{
    let contents = fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::InvalidData => Error::parse(path, e),
        _ => Error::IoError(e),
    })?;
    if contents.trim().is_empty() {
        debug!("'{}' is empty, using an empty context", path.display());
        return Ok(Context::new());
    }

    parse(&contents).map_err(|e| Error::parse(path, e))
}

/// Accepts a mapping as the top-level value. A null document counts as empty.
pub(crate) fn into_context(value: Value) -> ParseResult {
    match value {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Context::new()),
        other => Err(format!(
            "expected a mapping at the top level, found {}",
            value_kind(&other)
        )
        .into()),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}
