//! Command-line layer: clap arguments, shared options and orchestration.

pub mod args;
pub mod options;
pub mod orchestration;

pub use args::{Cli, Command, ConfigCommand, ConfigStyle, GlobalArgs};
pub use options::SharedOptions;
pub use orchestration::{BumpVersionClient, LiveClient, OperationOutcome, WriteStatus};
