use std::path::Path;

use ::ini::{Ini, ParseOption, Properties};
use serde_json::Value;

use crate::error::Result;
use crate::readers::{read_structured, Context, ParseResult};
use crate::registry::DataReader;

/// Name of the section whose values every other section inherits.
pub const DEFAULT_SECTION: &str = "DEFAULT";

/// Reads `.ini` input files into one sub-mapping per section.
#[derive(Debug, Default, Clone, Copy)]
pub struct IniReader;

/// Parses INI text.
///
/// The result always holds a `DEFAULT` section. Keys in `[DEFAULT]`, and any
/// keys that appear before the first section header, are inherited by every
/// named section unless the section overrides them. Keys are lowercased and
/// values are kept verbatim.
pub fn parse_ini(contents: &str) -> ParseResult {
    let options = ParseOption {
        enabled_quote: false,
        enabled_escape: false,
        ..ParseOption::default()
    };
    let document = Ini::load_from_str_opt(contents, options)?;

    let mut defaults = Context::new();
    let mut sections: Vec<(String, Context)> = Vec::new();

    for (section, properties) in document.iter() {
        match section {
            None | Some(DEFAULT_SECTION) => insert_properties(&mut defaults, properties),
            Some(name) => {
                let index = match sections.iter().position(|(n, _)| n == name) {
                    Some(index) => index,
                    None => {
                        sections.push((name.to_string(), Context::new()));
                        sections.len() - 1
                    }
                };
                insert_properties(&mut sections[index].1, properties);
            }
        }
    }

    let mut context = Context::new();
    context.insert(
        DEFAULT_SECTION.to_string(),
        Value::Object(defaults.clone()),
    );
    for (name, own) in sections {
        let mut merged = defaults.clone();
        merged.extend(own);
        context.insert(name, Value::Object(merged));
    }

    Ok(context)
}

fn insert_properties(target: &mut Context, properties: &Properties) {
    for (key, value) in properties.iter() {
        target.insert(key.trim().to_lowercase(), Value::String(value.to_string()));
    }
}

impl DataReader for IniReader {
    fn name(&self) -> &str {
        "ini"
    }

    fn read(&self, path: &Path) -> Result<Context> {
        read_structured(path, parse_ini)
    }
}
