//! Set up logging to the terminal.

use slog::{Drain, Level};

/// Build the root logger.
///
/// Logs go to stderr. `verbose` is the number of times `-v` was passed:
///
///   * 0: info and above
///   * 1: debug and above
///   * 2 or more: everything
pub fn init(verbose: u8) -> slog::Logger {
    let decorator = slog_term::TermDecorator::new().stderr().build();
    let drain = slog_term::FullFormat::new(decorator).build().fuse();
    let drain = slog_async::Async::new(drain).build().fuse();
    let drain = slog::LevelFilter::new(drain, level(verbose)).fuse();
    slog::Logger::root(drain, slog::o!("version" => env!("GIT_VERSION")))
}

/// Minimum level to log.
const fn level(verbose: u8) -> Level {
    match verbose {
        0 => Level::Info,
        1 => Level::Debug,
        _ => Level::Trace,
    }
}
