//! File system abstraction layer
//!
//! Everything the resolver reads or writes goes through the [FileSystem]
//! trait so the pipeline can run against disk or an in-memory tree.
//!
//! - [local::LocalFileSystem]: backed by `std::fs`
//! - [mock::MemoryFileSystem]: in-memory implementation for tests

pub mod local;
pub mod mock;

pub use local::LocalFileSystem;
pub use mock::MemoryFileSystem;

use crate::error::Result;
use std::path::{Path, PathBuf};

/// File operations used by configuration loading and version file handling
///
/// All implementors must be `Send + Sync` so a single instance can be shared
/// by the orchestration layer.
pub trait FileSystem: Send + Sync {
    /// Whether a file or directory exists at `path`
    fn exists(&self, path: &Path) -> bool;

    /// Read the file at `path` as UTF-8
    fn read(&self, path: &Path) -> Result<String>;

    /// Replace the file at `path` with `contents`
    ///
    /// Implementations write the whole content at once; readers never see a
    /// partially written file.
    fn write(&self, contents: &[u8], path: &Path) -> Result<()>;

    /// Whether `path` exists and is a directory
    fn is_directory(&self, path: &Path) -> bool;

    /// The process working directory
    fn current_directory(&self) -> Result<PathBuf>;

    /// Canonical form of `path`, or `path` unchanged when it cannot be resolved
    fn canonicalize(&self, path: &Path) -> PathBuf;
}
