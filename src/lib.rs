//! Beaver is a code generator driven by templates and structured data.
//! It reads a JSON, YAML, INI or XML file, renders a template against it,
//! optionally pipes the result through external commands, and writes the
//! output to stdout or to files named by a path pattern.

/// Command-line interface module for the Beaver application
pub mod cli;

/// Error types and handling for the Beaver application
pub mod error;

/// Single-file and batch generation pipelines
pub mod generator;

/// Glob expansion of batch input patterns
pub mod inputs;

/// Logger initialisation
pub mod logger;

/// Synthetic variables derived from input paths
/// (`__file__`, `__name__`, `__ext__`, `__dir__`, `__path__`, `__index__`)
pub mod path_context;

/// Chaining of external post-processing commands
pub mod postprocess;

/// Built-in JSON, YAML, INI and XML readers
pub mod readers;

/// Mapping of file extensions to readers
pub mod registry;

/// Template parsing and rendering functionality
pub mod renderer;
