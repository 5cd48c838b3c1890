use std::path::Path;

use crate::error::Result;
use crate::readers::{into_context, read_structured, Context, ParseResult};
use crate::registry::DataReader;

/// Reads `.json` input files.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonReader;

pub fn parse_json(contents: &str) -> ParseResult {
    into_context(serde_json::from_str(contents)?)
}

impl DataReader for JsonReader {
    fn name(&self) -> &str {
        "json"
    }

    fn read(&self, path: &Path) -> Result<Context> {
        read_structured(path, parse_json)
    }
}
