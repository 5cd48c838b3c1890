use std::path::Path;

use serde_json::Value;
use serde_yaml::Value as YamlValue;

use crate::error::Result;
use crate::readers::{into_context, read_structured, Context, ParseResult};
use crate::registry::DataReader;

/// Reads `.yaml` and `.yml` input files.
#[derive(Debug, Default, Clone, Copy)]
pub struct YamlReader;

pub fn parse_yaml(contents: &str) -> ParseResult {
    let document: YamlValue = serde_yaml::from_str(contents)?;
    into_context(yaml_to_json(document))
}

/// Converts a YAML value into the context representation. Non-string mapping
/// keys are stringified; tags are dropped.
fn yaml_to_json(value: YamlValue) -> Value {
    match value {
        YamlValue::Null => Value::Null,
        YamlValue::Bool(b) => Value::Bool(b),
        YamlValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::from(i)
            } else if let Some(u) = n.as_u64() {
                Value::from(u)
            } else {
                n.as_f64()
                    .and_then(serde_json::Number::from_f64)
                    .map_or_else(|| Value::String(n.to_string()), Value::Number)
            }
        }
        YamlValue::String(s) => Value::String(s),
        YamlValue::Sequence(items) => {
            Value::Array(items.into_iter().map(yaml_to_json).collect())
        }
        YamlValue::Mapping(mapping) => Value::Object(
            mapping
                .into_iter()
                .map(|(k, v)| (yaml_key(k), yaml_to_json(v)))
                .collect(),
        ),
        YamlValue::Tagged(tagged) => yaml_to_json(tagged.value),
    }
}

fn yaml_key(key: YamlValue) -> String {
    match key {
        YamlValue::String(s) => s,
        YamlValue::Null => "null".to_string(),
        YamlValue::Bool(b) => b.to_string(),
        YamlValue::Number(n) => n.to_string(),
        other => serde_yaml::to_string(&other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}

impl DataReader for YamlReader {
    fn name(&self) -> &str {
        "yaml"
    }

    fn read(&self, path: &Path) -> Result<Context> {
        read_structured(path, parse_yaml)
    }
}
