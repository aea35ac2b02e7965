//! Tracing subscriber setup for the `saveit` binary.
//!
//! Diagnostics always go to stderr so that `--json` output on stdout stays
//! machine-readable.

use std::io;
use std::sync::Once;

use tracing::Level;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

/// Map `-v` count and `-q` to a default level.
///
/// `RUST_LOG`, when set, still wins for the targets it names.
#[must_use]
pub const fn level_for(verbose: u8, quiet: bool) -> Level {
    if quiet {
        return Level::ERROR;
    }
    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Install the global subscriber.
///
/// `json` switches the fmt layer to JSON lines so that `--json` runs emit
/// machine-readable diagnostics too.
///
/// # Errors
///
/// Returns an error if a global subscriber has already been installed.
pub fn init_logging(
    verbose: u8,
    quiet: bool,
    json: Option<bool>,
) -> Result<(), tracing_subscriber::util::TryInitError> {
    let level = level_for(verbose, quiet);
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    let registry = tracing_subscriber::registry().with(filter);
    if json.unwrap_or(false) {
        registry
            .with(fmt::layer().json().with_writer(io::stderr))
            .try_init()
    } else {
        registry
            .with(
                fmt::layer()
                    .with_writer(io::stderr)
                    .with_target(verbose > 1)
                    .without_time(),
            )
            .try_init()
    }
}

/// Default filter for tests when `RUST_LOG` is unset.
pub const TEST_LOG_FILTER: &str = "saveit=debug,saveit_core=debug";

static TEST_LOGGING: Once = Once::new();

/// Install a test-friendly subscriber once per process.
///
/// Output is captured by the test harness and shown only for failing tests.
pub fn init_test_logging() {
    TEST_LOGGING.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(TEST_LOG_FILTER));
        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_test_writer())
            .try_init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_mapping() {
        assert_eq!(level_for(0, false), Level::WARN);
        assert_eq!(level_for(1, false), Level::INFO);
        assert_eq!(level_for(2, false), Level::DEBUG);
        assert_eq!(level_for(7, false), Level::TRACE);
        assert_eq!(level_for(3, true), Level::ERROR);
    }

    #[test]
    fn test_default_test_filter_covers_core_crate() {
        let filter = EnvFilter::new(TEST_LOG_FILTER).to_string();
        assert!(filter.contains("saveit=debug"), "{filter}");
        assert!(filter.contains("saveit_core=debug"), "{filter}");
    }

    #[test]
    fn test_init_test_logging_is_idempotent() {
        init_test_logging();
        init_test_logging();
        tracing::debug!("still alive");
    }
}
