//! Version resolution - combines the target file, git and custom commands

pub mod prerelease;
pub mod strategy;

pub use prerelease::{PreReleaseOutcome, PreReleaseResolver};
pub use strategy::{ResolutionState, ResolvedValue, ResolvedVersion, VersionResolver};
