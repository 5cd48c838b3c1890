/// Initialises `env_logger` for the process.
///
/// Beaver writes generated code to stdout, so only warnings and errors are
/// shown unless `verbose` is set.
pub fn init_logger(verbose: bool) {
    env_logger::Builder::new()
        .filter_level(if verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Warn
        })
        .init();
}
