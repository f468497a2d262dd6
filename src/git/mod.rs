//! Git query abstraction layer
//!
//! Version resolution needs exactly three read-only facts from git: the
//! nearest tag, the current branch name and the short commit sha. They are
//! exposed through the [VersionSource] trait so the resolver can run against
//! a real repository or a mock.
//!
//! - [repository::GitCli]: runs the `git` binary through a [ShellClient]
//! - [mock::MockVersionSource]: fixed answers for testing
//! - [mock::CapturingShell]: records commands instead of running them
//!
//! ```rust
//! # use bump_version::git::{MockVersionSource, VersionSource};
//! let source = MockVersionSource::new().with_branch("main").with_commit_sha("abc123");
//! assert_eq!(source.branch_version(true).unwrap(), "main-abc123");
//! ```

pub mod mock;
pub mod repository;
pub mod shell;

pub use mock::{CapturingShell, MockVersionSource};
pub use repository::GitCli;
pub use shell::{ShellClient, SystemShell};

use crate::error::Result;

/// Read-only git queries used to derive versions
///
/// Every query is side-effect free and runs at most one external command.
/// Failures are surfaced unchanged; callers decide on any fallback.
pub trait VersionSource: Send + Sync {
    /// Describe the nearest tag (`git describe --tags [--exact-match]`)
    ///
    /// # Returns
    /// * `Ok(String)` - e.g. `"1.0.0"` or `"1.0.0-4-g59bc977"`
    /// * `Err(NoTagFound)` - when describe fails
    fn describe_tag(&self, exact_match: bool) -> Result<String>;

    /// Current branch name (`git symbolic-ref --quiet --short HEAD`)
    fn branch_name(&self) -> Result<String>;

    /// Short sha of HEAD (`git rev-parse --short HEAD`)
    fn commit_sha(&self) -> Result<String>;

    /// Branch name, optionally joined with the commit sha by `-`
    fn branch_version(&self, include_commit_sha: bool) -> Result<String> {
        let branch = self.branch_name()?;
        if include_commit_sha {
            Ok(format!("{}-{}", branch, self.commit_sha()?))
        } else {
            Ok(branch)
        }
    }
}
