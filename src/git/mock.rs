use crate::error::{BumpVersionError, Result};
use crate::git::{ShellClient, VersionSource};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Mock version source for testing without a git repository
#[derive(Debug, Clone, Default)]
pub struct MockVersionSource {
    tag: Option<String>,
    exact_tag: Option<String>,
    branch: Option<String>,
    commit_sha: Option<String>,
}

impl MockVersionSource {
    /// Create a source with no tag, branch or commit
    pub fn new() -> Self {
        MockVersionSource::default()
    }

    /// Tag returned by describe (exact and non-exact unless overridden)
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Tag returned only for exact-match describes
    pub fn with_exact_tag(mut self, tag: impl Into<String>) -> Self {
        self.exact_tag = Some(tag.into());
        self
    }

    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = Some(branch.into());
        self
    }

    pub fn with_commit_sha(mut self, sha: impl Into<String>) -> Self {
        self.commit_sha = Some(sha.into());
        self
    }
}

impl VersionSource for MockVersionSource {
    fn describe_tag(&self, exact_match: bool) -> Result<String> {
        let tag = if exact_match {
            self.exact_tag.as_ref().or(self.tag.as_ref())
        } else {
            self.tag.as_ref()
        };
        tag.cloned().ok_or(BumpVersionError::NoTagFound)
    }

    fn branch_name(&self) -> Result<String> {
        self.branch.clone().ok_or_else(|| {
            BumpVersionError::command_failed("git", &["symbolic-ref".to_string()], "no branch")
        })
    }

    fn commit_sha(&self) -> Result<String> {
        self.commit_sha.clone().ok_or_else(|| {
            BumpVersionError::command_failed("git", &["rev-parse".to_string()], "no commit")
        })
    }
}

/// Shell client that records every command and returns canned output
///
/// A response registered with [CapturingShell::with_response] is used when
/// its key equals the program or any argument; otherwise the default output
/// is returned.
pub struct CapturingShell {
    default_output: Option<String>,
    responses: Vec<(String, Option<String>)>,
    commands: Mutex<Vec<Vec<String>>>,
    directories: Mutex<Vec<Option<PathBuf>>>,
}

impl CapturingShell {
    /// Every command succeeds with `output` unless a keyed response matches
    pub fn new(output: impl Into<String>) -> Self {
        CapturingShell {
            default_output: Some(output.into()),
            responses: Vec::new(),
            commands: Mutex::new(Vec::new()),
            directories: Mutex::new(Vec::new()),
        }
    }

    /// Every command fails unless a keyed response matches
    pub fn failing() -> Self {
        CapturingShell {
            default_output: None,
            ..CapturingShell::new("")
        }
    }

    /// Return `output` for commands containing `key`
    pub fn with_response(mut self, key: impl Into<String>, output: impl Into<String>) -> Self {
        self.responses.push((key.into(), Some(output.into())));
        self
    }

    /// Fail commands containing `key`
    pub fn with_failure(mut self, key: impl Into<String>) -> Self {
        self.responses.push((key.into(), None));
        self
    }

    /// Captured commands, program first
    pub fn commands(&self) -> Vec<Vec<String>> {
        self.commands
            .lock()
            .map(|c| c.clone())
            .unwrap_or_default()
    }

    /// Working directories of captured commands, in order
    pub fn directories(&self) -> Vec<Option<PathBuf>> {
        self.directories
            .lock()
            .map(|d| d.clone())
            .unwrap_or_default()
    }
}

impl ShellClient for CapturingShell {
    fn run(
        &self,
        program: &str,
        args: &[String],
        working_directory: Option<&Path>,
    ) -> Result<String> {
        let mut command = vec![program.to_string()];
        command.extend(args.iter().cloned());

        if let Ok(mut commands) = self.commands.lock() {
            commands.push(command.clone());
        }
        if let Ok(mut dirs) = self.directories.lock() {
            dirs.push(working_directory.map(Path::to_path_buf));
        }

        let response = self
            .responses
            .iter()
            .find(|(key, _)| command.iter().any(|part| part == key))
            .map(|(_, output)| output.clone())
            .unwrap_or_else(|| self.default_output.clone());

        response.ok_or_else(|| BumpVersionError::command_failed(program, args, "mock failure"))
    }
}
