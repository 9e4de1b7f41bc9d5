//! Tracing setup. Logs go to stderr; command output goes to stdout.

use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, registry, EnvFilter};

/// Level picked from the global flags. `--quiet` wins over the others.
pub fn log_level(verbose: bool, debug: bool, quiet: bool) -> Level {
    if quiet {
        Level::ERROR
    } else if debug {
        Level::DEBUG
    } else if verbose {
        Level::INFO
    } else {
        Level::WARN
    }
}

/// Install the global subscriber. `RUST_LOG` overrides the flag-derived level.
pub fn configure_logging(verbose: bool, debug: bool, quiet: bool) {
    let level = log_level(verbose, debug, quiet);
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("partbin={level},partbin_cli={level},warn")));

    registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_precedence() {
        assert_eq!(log_level(false, false, false), Level::WARN);
        assert_eq!(log_level(true, false, false), Level::INFO);
        assert_eq!(log_level(true, true, false), Level::DEBUG);
        assert_eq!(log_level(true, true, true), Level::ERROR);
    }
}
