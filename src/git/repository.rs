use crate::error::{BumpVersionError, Result};
use crate::git::{ShellClient, VersionSource};
use git2::Repository as Git2Repo;
use std::path::PathBuf;
use tracing::debug;

/// Version source that shells out to the `git` binary
pub struct GitCli<S: ShellClient> {
    shell: S,
    directory: Option<PathBuf>,
    verify_repository: bool,
}

impl<S: ShellClient> GitCli<S> {
    /// Create a source for `directory` (the process cwd when `None`)
    ///
    /// Each query first checks, via `git2`, that the directory is inside a
    /// git work tree.
    pub fn new(shell: S, directory: Option<PathBuf>) -> Self {
        GitCli {
            shell,
            directory,
            verify_repository: true,
        }
    }

    /// Create a source that skips the repository check
    pub fn unchecked(shell: S, directory: Option<PathBuf>) -> Self {
        GitCli {
            shell,
            directory,
            verify_repository: false,
        }
    }

    /// The shell used to run git
    pub fn shell(&self) -> &S {
        &self.shell
    }

    fn ensure_repository(&self) -> Result<()> {
        if !self.verify_repository {
            return Ok(());
        }
        let dir = self
            .directory
            .clone()
            .unwrap_or_else(|| PathBuf::from("."));
        Git2Repo::discover(&dir)
            .map(|_| ())
            .map_err(|_| BumpVersionError::GitDirectoryNotFound { path: dir })
    }

    fn git(&self, args: &[&str]) -> Result<String> {
        self.ensure_repository()?;
        let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
        self.shell
            .run("git", &args, self.directory.as_deref())
    }
}

impl<S: ShellClient> VersionSource for GitCli<S> {
    fn describe_tag(&self, exact_match: bool) -> Result<String> {
        let mut args = vec!["describe", "--tags"];
        if exact_match {
            args.push("--exact-match");
        }
        match self.git(&args) {
            Ok(tag) => Ok(tag),
            Err(BumpVersionError::GitDirectoryNotFound { path }) => {
                Err(BumpVersionError::GitDirectoryNotFound { path })
            }
            Err(e) => {
                debug!("git describe failed: {}", e);
                Err(BumpVersionError::NoTagFound)
            }
        }
    }

    fn branch_name(&self) -> Result<String> {
        self.git(&["symbolic-ref", "--quiet", "--short", "HEAD"])
    }

    fn commit_sha(&self) -> Result<String> {
        self.git(&["rev-parse", "--short", "HEAD"])
    }
}
