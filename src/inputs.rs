//! Input pattern expansion for batch generation.
//! Patterns follow shell glob rules: `**` spans directories, braces are
//! literal, and hidden entries only match a component that starts with `.`.

use std::path::PathBuf;

use glob::{glob_with, MatchOptions};
use log::{debug, warn};

use crate::error::{Error, Result};

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: true,
};

/// Expands every pattern, in order, into the files it matches.
///
/// Matches of one pattern are sorted by path. Results are concatenated in
/// pattern order and never deduplicated, so a file matched by two patterns
/// appears twice. A pattern without matches contributes nothing.
pub fn expand_patterns<S: AsRef<str>>(patterns: &[S]) -> Result<Vec<PathBuf>> {
    let mut inputs = Vec::new();

    for pattern in patterns {
        let pattern = pattern.as_ref();
        let matches = expand_pattern(pattern)?;
        if matches.is_empty() {
            warn!("No files matched pattern '{pattern}'");
        } else {
            debug!("Pattern '{pattern}' matched {} file(s)", matches.len());
        }
        inputs.extend(matches);
    }

    Ok(inputs)
}

/// Expands a single pattern into the regular files it matches, sorted.
/// A literal pattern yields itself if it names a file.
pub fn expand_pattern(pattern: &str) -> Result<Vec<PathBuf>> {
    let paths = glob_with(pattern, MATCH_OPTIONS).map_err(|e| Error::GlobPatternError {
        pattern: pattern.to_string(),
        reason: e.msg.to_string(),
    })?;

    let mut matches = Vec::new();
    for path in paths {
        match path {
            Ok(path) if path.is_file() => matches.push(path),
            Ok(_) => {}
            Err(e) => debug!("Skipping unreadable entry while expanding '{pattern}': {e}"),
        }
    }

    matches.sort();
    Ok(matches)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "{}").unwrap();
    }

    fn names(root: &Path, paths: &[PathBuf]) -> Vec<String> {
        paths
            .iter()
            .map(|p| p.strip_prefix(root).unwrap().display().to_string())
            .collect()
    }

    fn expand_in(root: &Path, relative: &str) -> Vec<String> {
        let pattern = format!("{}/{relative}", root.display());
        names(root, &expand_pattern(&pattern).unwrap())
    }

    #[test]
    fn test_star_does_not_recurse() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "b.json");
        touch(dir.path(), "a.json");
        touch(dir.path(), "nested/c.json");
        touch(dir.path(), "notes.txt");

        assert_eq!(expand_in(dir.path(), "*.json"), ["a.json", "b.json"]);
    }

    #[test]
    fn test_double_star_recurses() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "top.yaml");
        touch(dir.path(), "one/mid.yaml");
        touch(dir.path(), "one/two/deep.yaml");
        touch(dir.path(), "one/two/deep.json");

        assert_eq!(
            expand_in(dir.path(), "**/*.yaml"),
            ["one/mid.yaml", "one/two/deep.yaml", "top.yaml"]
        );
    }

    #[test]
    fn test_hidden_entries_need_a_literal_dot() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "a.json");
        touch(dir.path(), ".hidden.json");
        touch(dir.path(), ".cache/c.json");
        touch(dir.path(), "sub/b.json");

        assert_eq!(expand_in(dir.path(), "*.json"), ["a.json"]);
        assert_eq!(expand_in(dir.path(), "**/*.json"), ["a.json", "sub/b.json"]);
        assert_eq!(expand_in(dir.path(), ".*.json"), [".hidden.json"]);
        assert_eq!(expand_in(dir.path(), ".cache/*.json"), [".cache/c.json"]);
    }

    #[test]
    fn test_braces_are_literal() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "a.json");
        touch(dir.path(), "{x}.json");

        assert_eq!(expand_in(dir.path(), "{x}.json"), ["{x}.json"]);
        assert!(expand_in(dir.path(), "{x,a}.json").is_empty());
        assert_eq!(expand_in(dir.path(), "*.json"), ["a.json", "{x}.json"]);
    }

    #[test]
    fn test_overlapping_patterns_keep_duplicates() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "a.json");
        touch(dir.path(), "b.yaml");

        let root = dir.path().display();
        let patterns = [
            format!("{root}/*.json"),
            format!("{root}/*"),
            format!("{root}/a.json"),
        ];
        let found = expand_patterns(&patterns).unwrap();

        assert_eq!(
            names(dir.path(), &found),
            ["a.json", "a.json", "b.yaml", "a.json"]
        );
    }

    #[test]
    fn test_literal_and_missing_patterns() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "a.json");

        assert_eq!(expand_in(dir.path(), "a.json"), ["a.json"]);
        assert!(expand_in(dir.path(), "missing.json").is_empty());
        assert!(expand_in(dir.path(), "*.xml").is_empty());

        let directory = dir.path().display().to_string();
        assert!(expand_pattern(&directory).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(matches!(
            expand_pattern("data/[unclosed.json"),
            Err(Error::GlobPatternError { .. })
        ));
    }
}
