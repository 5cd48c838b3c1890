//! Synthetic naming variables derived from an input path.
//!
//! The values are computed from the path string alone; the file system is
//! never consulted.

use serde_json::Value;

use crate::readers::Context;

/// Base filename of the input path, extension included.
pub const FILE_KEY: &str = "__file__";
/// Base filename without its final dot-delimited segment.
pub const NAME_KEY: &str = "__name__";
/// Final dot-delimited segment of the base filename.
pub const EXT_KEY: &str = "__ext__";
/// Directory portion of the input path.
pub const DIR_KEY: &str = "__dir__";
/// The unmodified input path.
pub const PATH_KEY: &str = "__path__";
/// Zero-based position of the input among all processed inputs.
pub const INDEX_KEY: &str = "__index__";

/// The five path-derived variables injected before output-path resolution.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PathContext {
    pub file: String,
    pub name: String,
    pub ext: String,
    pub dir: String,
    pub path: String,
}

impl PathContext {
    pub fn from_path(path: &str) -> Self {
        let split_at = path.rfind('/').map_or(0, |i| i + 1);
        let (head, basename) = path.split_at(split_at);

        // Trailing separators are dropped from the directory unless it
        // consists of nothing but separators (e.g. the root).
        let dir = if head.is_empty() || head.chars().all(|c| c == '/') {
            head
        } else {
            head.trim_end_matches('/')
        };

        let (name, ext) = match basename.rsplit_once('.') {
            Some((name, ext)) => (name, ext),
            None => (basename, ""),
        };

        Self {
            file: basename.to_string(),
            name: name.to_string(),
            ext: ext.to_string(),
            dir: dir.to_string(),
            path: path.to_string(),
        }
    }

    /// Writes the variables into `context`, replacing same-named keys.
    pub fn apply(&self, context: &mut Context) {
        context.insert(FILE_KEY.to_string(), Value::String(self.file.clone()));
        context.insert(NAME_KEY.to_string(), Value::String(self.name.clone()));
        context.insert(EXT_KEY.to_string(), Value::String(self.ext.clone()));
        context.insert(DIR_KEY.to_string(), Value::String(self.dir.clone()));
        context.insert(PATH_KEY.to_string(), Value::String(self.path.clone()));
    }
}

/// Builds the context used to render an output path: the parsed data, then
/// the path variables, then the index. Later writes win.
pub fn output_context(data: &Context, input_path: &str, index: usize) -> Context {
    let mut context = data.clone();
    PathContext::from_path(input_path).apply(&mut context);
    context.insert(INDEX_KEY.to_string(), Value::from(index));
    context
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ctx(file: &str, name: &str, ext: &str, dir: &str, path: &str) -> PathContext {
        PathContext {
            file: file.to_string(),
            name: name.to_string(),
            ext: ext.to_string(),
            dir: dir.to_string(),
            path: path.to_string(),
        }
    }

    #[test]
    fn test_from_path_table() {
        let cases = [
            ("", ctx("", "", "", "", "")),
            ("/", ctx("", "", "", "/", "/")),
            ("/dir/file", ctx("file", "file", "", "/dir", "/dir/file")),
            ("/dir1/dir2/", ctx("", "", "", "/dir1/dir2", "/dir1/dir2/")),
            ("/dir/file.ext", ctx("file.ext", "file", "ext", "/dir", "/dir/file.ext")),
            (
                "/dir/file.ext1.ext2",
                ctx(
                    "file.ext1.ext2",
                    "file.ext1",
                    "ext2",
                    "/dir",
                    "/dir/file.ext1.ext2",
                ),
            ),
        ];

        for (input, expected) in cases {
            assert_eq!(PathContext::from_path(input), expected, "path {input:?}");
        }
    }

    #[test]
    fn test_relative_paths() {
        assert_eq!(
            PathContext::from_path("input.json"),
            ctx("input.json", "input", "json", "", "input.json")
        );
        assert_eq!(
            PathContext::from_path("data/models/user.yaml"),
            ctx(
                "user.yaml",
                "user",
                "yaml",
                "data/models",
                "data/models/user.yaml"
            )
        );
        assert_eq!(PathContext::from_path("/file.txt").dir, "/");
    }

    #[test]
    fn test_path_is_preserved() {
        for path in ["", "/", "a//b", "./x.y", "trailing/", ".hidden"] {
            assert_eq!(PathContext::from_path(path).path, path);
        }
    }

    #[test]
    fn test_synthetic_keys_override_data() {
        let data = json!({
            "__index__": "bogus",
            "__file__": 42,
            "__name__": null,
            "type_name": "User",
        });
        let data = data.as_object().unwrap();

        let context = output_context(data, "models/user.json", 3);

        assert_eq!(context["__index__"], json!(3));
        assert_eq!(context["__file__"], json!("user.json"));
        assert_eq!(context["__name__"], json!("user"));
        assert_eq!(context["__ext__"], json!("json"));
        assert_eq!(context["__dir__"], json!("models"));
        assert_eq!(context["__path__"], json!("models/user.json"));
        assert_eq!(context["type_name"], json!("User"));
    }
}
