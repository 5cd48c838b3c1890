//! Command-line interface implementation for Beaver.
//! Provides argument parsing and help text formatting using clap.

use clap::{CommandFactory, Parser, Subcommand};

use crate::error::{Error, Result};
use crate::generator::{ManyOptions, OneOptions};

const PLACEHOLDERS_HELP: &str = r#"Output patterns are templates themselves. Besides every key of the
input's data, they can use:

    {{__file__}}   base filename of the input file        my_input.yaml
    {{__name__}}   base filename without its extension    my_input
    {{__ext__}}    extension of the input file            yaml
    {{__dir__}}    directory of the input file            models
    {{__path__}}   the input path as given                models/my_input.yaml
    {{__index__}}  position of the input in the batch     0

Each --post command receives the generated code on stdin; its stdout is
passed on to the next command. Commands run in the order given and are
split on whitespace, so quoting is not supported."#;

const ONE_HELP: &str = r#"Without -o the generated code is printed to stdout. With -o the file is
created, or truncated if it already exists, after rendering OUTPUT as a
pattern with __index__ set to 0.

Example:

    $ echo 'type {{type_name}} struct{}' > template.j2
    $ echo '{"type_name": "User"}' > input.json
    $ beaver one -o '{{__name__}}.go' --post gofmt template.j2 input.json"#;

const MANY_HELP: &str = r#"INPUT patterns are expanded in the order given; ** matches any number of
directories. A file matched by several patterns is generated once per
match. If OUTPUT renders to the same path for several inputs, the last one
wins.

Example:

    $ beaver many model.j2 'gen/{{__name__}}.go' 'models/**/*.yaml' --post gofmt"#;

/// Command-line arguments structure for Beaver.
#[derive(Parser, Debug)]
#[command(author, version, about = "Beaver: code generation from templates and structured data", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose logging output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate code for one file.
    #[command(after_long_help = format!("{ONE_HELP}\n\n{PLACEHOLDERS_HELP}"))]
    One {
        /// Path to the template file
        #[arg(value_name = "TEMPLATE")]
        template: String,

        /// Path to the input file (JSON, YAML, INI or XML)
        #[arg(value_name = "INPUT")]
        input: String,

        /// Path pattern of the output file, instead of stdout
        #[arg(short = 'o', value_name = "OUTPUT")]
        output: Option<String>,

        /// Command which receives the generated code after it is rendered
        #[arg(long = "post", value_name = "CMD", allow_hyphen_values = true)]
        post: Vec<String>,
    },

    /// Generate code for multiple files.
    #[command(after_long_help = format!("{MANY_HELP}\n\n{PLACEHOLDERS_HELP}"))]
    Many {
        /// Path to the template file
        #[arg(value_name = "TEMPLATE")]
        template: String,

        /// Path pattern for creating the output files
        #[arg(value_name = "OUTPUT")]
        output: String,

        /// Input file patterns
        #[arg(value_name = "INPUT", required = true, num_args = 1..)]
        inputs: Vec<String>,

        /// Command which receives the generated code after it is rendered
        #[arg(long = "post", value_name = "CMD", allow_hyphen_values = true)]
        post: Vec<String>,
    },

    #[command(external_subcommand)]
    External(Vec<String>),
}

/// A subcommand resolved into generator options.
#[derive(Debug)]
pub enum Invocation {
    Help,
    One(OneOptions),
    Many(ManyOptions),
}

impl Args {
    /// Maps the parsed subcommand to what should run.
    ///
    /// # Errors
    /// * `Error::InvalidCommandError` for an unknown subcommand
    pub fn invocation(self) -> Result<Invocation> {
        match self.command {
            None => Ok(Invocation::Help),
            Some(Commands::One {
                template,
                input,
                output,
                post,
            }) => Ok(Invocation::One(OneOptions {
                template,
                input,
                output,
                post,
            })),
            Some(Commands::Many {
                template,
                output,
                inputs,
                post,
            }) => Ok(Invocation::Many(ManyOptions {
                template,
                output,
                inputs,
                post,
            })),
            Some(Commands::External(args)) => Err(Error::InvalidCommandError {
                command: args.into_iter().next().unwrap_or_default(),
            }),
        }
    }
}

/// Prints the top-level help to stdout.
pub fn print_help() -> Result<()> {
    Args::command().print_help()?;
    Ok(())
}

/// Parses command line arguments and returns the Args structure.
///
/// # Exits
/// * With clap's default error handling for malformed arguments
pub fn get_args() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(e) => e.exit(),
    }
}
