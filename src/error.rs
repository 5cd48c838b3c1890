//! Error handling for the Beaver application.
//! Defines the error taxonomy and the result alias used throughout the crate.

use thiserror::Error;

/// Custom error types for Beaver operations.
///
/// Every failure is fatal to the current invocation: errors propagate up to
/// `main`, where [`default_error_handler`] reports them and exits non-zero.
#[derive(Error, Debug)]
pub enum Error {
    /// A template or input argument does not name an existing regular file.
    #[error("Invalid {argument} file path: '{path}'.")]
    InvalidPathError { argument: String, path: String },

    /// The input file has no extension, or no reader is registered for it.
    #[error("Extension not supported: '{path}'.")]
    UnsupportedExtensionError { path: String },

    /// The input file exists but its contents could not be parsed.
    #[error("Failed to parse '{path}': {source}.")]
    StructuredDataParseError {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A post-processing command exited with a non-zero status.
    #[error("Post-processor '{command}' failed with {}.", describe_exit(.code))]
    PostProcessorFailedError { command: String, code: Option<i32> },

    /// A post-processing command could not be started.
    #[error("Post-processor '{command}' could not be started: {source}.")]
    PostProcessorSpawnError {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Required arguments are missing or malformed.
    #[error("Invalid arguments: {0}.")]
    InvalidArgumentsError(String),

    /// The requested subcommand does not exist.
    #[error("Invalid command: '{command}'.")]
    InvalidCommandError { command: String },

    /// An input pattern could not be compiled into a glob.
    #[error("Invalid input pattern '{pattern}': {reason}.")]
    GlobPatternError { pattern: String, reason: String },

    /// Represents errors that occur during file system operations.
    #[error("IO error: {0}.")]
    IoError(#[from] std::io::Error),

    /// Represents errors that occur while parsing or rendering a template.
    #[error("Template error: {0}.")]
    MinijinjaError(#[from] minijinja::Error),
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {code}"),
        None => "termination by signal".to_string(),
    }
}

impl Error {
    /// Wraps a parser error for the given input file.
    pub fn parse<P, E>(path: P, source: E) -> Self
    where
        P: AsRef<std::path::Path>,
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Error::StructuredDataParseError {
            path: path.as_ref().display().to_string(),
            source: source.into(),
        }
    }
}

/// Convenience type alias for Results with Beaver's [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Arguments
/// * `err` - The Error to handle
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{err}");
    std::process::exit(1);
}
