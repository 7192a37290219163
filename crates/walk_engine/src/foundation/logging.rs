//! Logging utilities and structured logging support

pub use log::{debug, info, warn, error, trace};

/// Initialize the logging system from `RUST_LOG`, defaulting to `info`
pub fn init() -> Result<(), log::SetLoggerError> {
    init_with_level("info")
}

/// Initialize the logging system with a default filter such as `"debug"` or
/// `"walk_engine=trace"`. `RUST_LOG` still takes precedence when set.
///
/// Calling this twice returns the logger error instead of panicking, so tests
/// and embedding applications can both call it.
pub fn init_with_level(default_filter: &str) -> Result<(), log::SetLoggerError> {
    let env = env_logger::Env::default().default_filter_or(default_filter);
    env_logger::Builder::from_env(env).try_init()
}
