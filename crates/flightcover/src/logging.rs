//! Logging setup for the `flightcover` binary.
//!
//! Library code only emits events through the `tracing` macros; the binary
//! installs one subscriber at startup with [`init_logging`]. Output goes to
//! stderr so shell replies and JSON on stdout stay clean.

use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Crate target used in the default filter directive.
const LOG_TARGET: &str = "flightcover";

/// How much the binary logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Verbosity {
    /// Errors only (`-q`).
    Quiet,
    /// Accepted submissions, wallet changes and warnings.
    #[default]
    Normal,
    /// Adds modal and configuration events (`-v`).
    Verbose,
    /// Adds intake state transitions and tag edits (`-vv`).
    Trace,
}

impl Verbosity {
    /// Map the CLI's `-v` count and `-q` flag to a level. `-q` wins.
    #[must_use]
    pub fn from_flags(verbose: u8, quiet: bool) -> Self {
        match (quiet, verbose) {
            (true, _) => Self::Quiet,
            (false, 0) => Self::Normal,
            (false, 1) => Self::Verbose,
            (false, _) => Self::Trace,
        }
    }

    /// The most detailed level that is shown.
    #[must_use]
    pub fn level(self) -> Level {
        match self {
            Self::Quiet => Level::ERROR,
            Self::Normal => Level::INFO,
            Self::Verbose => Level::DEBUG,
            Self::Trace => Level::TRACE,
        }
    }

    /// Filter directive used when `RUST_LOG` is unset, e.g. `flightcover=debug`.
    #[must_use]
    pub fn directive(self) -> String {
        format!("{LOG_TARGET}={}", self.level().as_str().to_ascii_lowercase())
    }
}

fn env_filter(verbosity: Verbosity) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(verbosity.directive()))
}

/// Install the global subscriber.
///
/// `RUST_LOG` takes precedence over `verbosity`. Calling this again after a
/// subscriber is installed does nothing.
///
/// ```no_run
/// use flightcover::{init_logging, logging::Verbosity};
///
/// init_logging(Verbosity::from_flags(1, false));
/// ```
pub fn init_logging(verbosity: Verbosity) {
    let installed = tracing_subscriber::registry()
        .with(env_filter(verbosity))
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(verbosity >= Verbosity::Verbose)
                .without_time(),
        )
        .try_init();

    if installed.is_err() {
        tracing::debug!("subscriber already installed");
    }
}

/// Route events to the test harness's captured output.
#[cfg(test)]
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(Verbosity::Trace.directive())
        .with_test_writer()
        .try_init();
}
