use std::io;

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Logging settings carried by every operation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoggingOptions {
    /// Name of the running command, attached to diagnostics
    pub command: String,
    /// Number of `-v` flags
    pub verbose: u8,
}

impl LoggingOptions {
    pub fn new(command: impl Into<String>, verbose: u8) -> Self {
        LoggingOptions {
            command: command.into(),
            verbose,
        }
    }

    /// Log level for the verbosity count
    pub fn level(&self) -> Level {
        match self.verbose {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    }

    /// Filter used by [init]; `RUST_LOG` wins when set
    pub fn env_filter(&self) -> EnvFilter {
        let level = self.level().to_string().to_lowercase();
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(format!("warn,bump_version={}", level)))
    }
}

/// Install the global subscriber writing to stderr
///
/// Calling this more than once is harmless; later calls are ignored.
pub fn init(options: &LoggingOptions) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(options.env_filter())
        .with_writer(io::stderr)
        .without_time()
        .with_target(false)
        .try_init();
}
