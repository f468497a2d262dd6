pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod files;
pub mod git;
pub mod logging;
pub mod resolver;
pub mod ui;
pub mod warning;

pub use cli::{BumpVersionClient, LiveClient, OperationOutcome, SharedOptions, WriteStatus};
pub use config::Configuration;
pub use domain::{BumpKind, SemanticVersion, VersionFile};
pub use error::{BumpVersionError, Result};
pub use warning::ResolutionWarning;
