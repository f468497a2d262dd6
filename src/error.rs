use std::path::PathBuf;

use thiserror::Error;

/// Unified error type for bump-version operations
#[derive(Error, Debug)]
pub enum BumpVersionError {
    #[error("Configuration file not found")]
    ConfigurationNotFound,

    #[error("Invalid configuration directory: {}", path.display())]
    InvalidConfigurationDirectory { path: PathBuf },

    #[error("Unsupported configuration file format: {} (expected .json or .toml)", path.display())]
    UnsupportedConfigurationFormat { path: PathBuf },

    #[error("Target not found: set a target path or module")]
    TargetNotFound,

    #[error("Target path or module name is empty")]
    PathOrModuleNotSet,

    #[error("Version strategy not found: configure either a branch or semvar strategy")]
    VersionStrategyNotFound,

    #[error("Version file does not exist: {}", path.display())]
    FileDoesNotExist { path: PathBuf },

    #[error("Semantic version not found in version file or version strategy")]
    SemVarNotFound,

    #[error("Failed to parse version file: {}", path.display())]
    FailedToParseVersionFile { path: PathBuf },

    #[error("Cannot bump {kind} of {version}: version component overflows")]
    VersionOverflow { version: String, kind: String },

    #[error("Pre-release parsing error: {0}")]
    PreReleaseParsingError(String),

    #[error("Extra options are empty, a custom command requires arguments after '--'")]
    ExtraOptionsEmpty,

    #[error("Git directory not found: {}", path.display())]
    GitDirectoryNotFound { path: PathBuf },

    #[error("No tag found")]
    NoTagFound,

    #[error("Command `{command}` failed: {message}")]
    CommandFailed { command: String, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("TOML encode error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

/// Convenience type alias for Results in bump-version
pub type Result<T> = std::result::Result<T, BumpVersionError>;

impl BumpVersionError {
    /// Create a command failure with the rendered command line
    pub fn command_failed(program: &str, args: &[String], message: impl Into<String>) -> Self {
        let mut command = program.to_string();
        for arg in args {
            command.push(' ');
            command.push_str(arg);
        }
        BumpVersionError::CommandFailed {
            command,
            message: message.into(),
        }
    }

    /// Create a pre-release parsing error with context
    pub fn pre_release(msg: impl Into<String>) -> Self {
        BumpVersionError::PreReleaseParsingError(msg.into())
    }
}
