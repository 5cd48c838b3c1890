//! Beaver's main application entry point.
//! Parses the command line, wires the reader registry and template engine
//! together and runs the requested generation.

use beaver::{
    cli::{get_args, print_help, Args, Invocation},
    error::{default_error_handler, Result},
    generator::{Generated, Generator},
    logger::init_logger,
    registry::ExtensionRegistry,
    renderer::MiniJinjaRenderer,
};

/// Main application entry point.
fn main() {
    let args = get_args();
    init_logger(args.verbose);

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

/// Main application logic execution.
///
/// # Flow
/// 1. Resolves the subcommand; no subcommand prints the help
/// 2. Builds the extension registry with the built-in readers
/// 3. Runs single-file or batch generation
fn run(args: Args) -> Result<()> {
    let invocation = args.invocation()?;

    let registry = ExtensionRegistry::with_builtin_readers();
    let engine = MiniJinjaRenderer::new();
    let generator = Generator::new(&registry, &engine);

    match invocation {
        Invocation::Help => print_help(),
        Invocation::One(options) => {
            match generator.generate_one(&options)? {
                Generated::Rendered(text) => println!("{text}"),
                Generated::Written(path) => log::debug!("Wrote '{}'", path.display()),
            }
            Ok(())
        }
        Invocation::Many(options) => {
            let written = generator.generate_many(&options)?;
            log::debug!("Generated {} file(s)", written.len());
            Ok(())
        }
    }
}
