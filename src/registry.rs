//! Extension registry: maps an input file's extension to the reader that
//! turns it into a template context.

use std::collections::HashMap;
use std::path::Path;

use log::debug;

use crate::error::{Error, Result};
use crate::path_context::PathContext;
use crate::readers::{Context, IniReader, JsonReader, XmlReader, YamlReader};

/// A capability that produces a [`Context`] from a file.
pub trait DataReader {
    /// Short format name, used in diagnostics.
    fn name(&self) -> &str;

    /// Reads and parses the file at `path`.
    fn read(&self, path: &Path) -> Result<Context>;
}

/// Owns the extension to reader associations.
///
/// Extensions are case-sensitive and carry no leading dot.
#[derive(Default)]
pub struct ExtensionRegistry {
    readers: HashMap<String, Box<dyn DataReader>>,
}

impl ExtensionRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with the JSON, YAML, INI and XML readers.
    pub fn with_builtin_readers() -> Self {
        let mut registry = Self::new();
        registry.register("json", JsonReader);
        registry.register("yaml", YamlReader);
        registry.register("yml", YamlReader);
        registry.register("ini", IniReader);
        registry.register("xml", XmlReader);
        registry
    }

    /// Associates `extension` with `reader`, replacing any previous reader.
    pub fn register<S, R>(&mut self, extension: S, reader: R)
    where
        S: Into<String>,
        R: DataReader + 'static,
    {
        let extension = extension.into();
        let previous = self.readers.insert(extension.clone(), Box::new(reader));
        if previous.is_some() {
            debug!("Replaced reader for extension '{extension}'");
        }
    }

    /// Returns the reader for the extension of `path`'s base filename.
    ///
    /// # Errors
    /// * `Error::UnsupportedExtensionError` if the filename has no `.` or the
    ///   extension has no registered reader
    pub fn resolve(&self, path: &str) -> Result<&dyn DataReader> {
        let unsupported = || Error::UnsupportedExtensionError {
            path: path.to_string(),
        };

        let basename = PathContext::from_path(path).file;
        let (_, extension) = basename.rsplit_once('.').ok_or_else(unsupported)?;

        self.readers
            .get(extension)
            .map(|reader| &**reader)
            .ok_or_else(unsupported)
    }

    /// Resolves the reader for `path` and reads the file with it.
    pub fn read(&self, path: &str) -> Result<Context> {
        let reader = self.resolve(path)?;
        debug!("Reading '{path}' as {}", reader.name());
        reader.read(Path::new(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct FixedReader(&'static str);

    impl DataReader for FixedReader {
        fn name(&self) -> &str {
            self.0
        }

        fn read(&self, _path: &Path) -> Result<Context> {
            let mut context = Context::new();
            context.insert("reader".to_string(), json!(self.0));
            Ok(context)
        }
    }

    #[test]
    fn test_resolve_builtin() {
        let registry = ExtensionRegistry::with_builtin_readers();

        assert_eq!(registry.resolve("a.json").unwrap().name(), "json");
        assert_eq!(registry.resolve("dir/a.yml").unwrap().name(), "yaml");
        assert_eq!(registry.resolve("a.yaml").unwrap().name(), "yaml");
        assert_eq!(registry.resolve("a.ini").unwrap().name(), "ini");
        assert_eq!(registry.resolve("config.d/a.xml").unwrap().name(), "xml");
    }

    #[test]
    fn test_resolve_unsupported() {
        let registry = ExtensionRegistry::with_builtin_readers();

        for path in ["noext", "a.unknown", "a.JSON", "a.", "dir.json/noext"] {
            match registry.resolve(path) {
                Err(Error::UnsupportedExtensionError { path: p }) => assert_eq!(p, path),
                Err(other) => panic!("Expected UnsupportedExtensionError, got {other:?}"),
                Ok(reader) => panic!("{path} resolved to the {} reader", reader.name()),
            }
        }
    }

    #[test]
    fn test_empty_registry_resolves_nothing() {
        let registry = ExtensionRegistry::new();
        assert!(registry.resolve("a.json").is_err());
    }

    #[test]
    fn test_last_registration_wins() {
        let mut registry = ExtensionRegistry::new();
        registry.register("data", FixedReader("first"));
        registry.register("data", FixedReader("second"));

        assert_eq!(registry.resolve("x.data").unwrap().name(), "second");
        assert_eq!(registry.read("x.data").unwrap()["reader"], json!("second"));
    }
}
