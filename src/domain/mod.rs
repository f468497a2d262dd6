//! Domain logic - pure version rules independent of git and the file system

pub mod template;
pub mod version;

pub use template::VersionFile;
pub use version::{BumpKind, SemanticVersion};
