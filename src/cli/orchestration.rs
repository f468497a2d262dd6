//! Operation orchestration
//!
//! Each operation loads the configuration, merges the flag-derived overrides,
//! resolves the version and writes the rendered version file. The client is
//! generic over its collaborators so the whole pipeline runs against
//! in-memory mocks in tests.

use std::path::{Path, PathBuf};

use tracing::{debug, info_span, trace};

use crate::cli::options::SharedOptions;
use crate::config::{self, Configuration};
use crate::domain::{BumpKind, VersionFile};
use crate::error::Result;
use crate::files::{FileSystem, LocalFileSystem};
use crate::git::{GitCli, ShellClient, SystemShell, VersionSource};
use crate::resolver::{ResolvedValue, ResolvedVersion, VersionResolver};
use crate::warning::ResolutionWarning;

/// What happened to the target file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteStatus {
    Written,
    /// Dry run; nothing was written
    DryRun,
    /// The bumped version matched the file; nothing was written
    Unchanged,
}

/// Result of a version-writing operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationOutcome {
    /// Canonical path of the target file
    pub path: PathBuf,
    pub version: String,
    /// Rendered file content
    pub contents: String,
    pub status: WriteStatus,
    pub warnings: Vec<ResolutionWarning>,
}

/// Runs bump-version operations against a file system, a git source and a shell
pub struct BumpVersionClient<F: FileSystem, V: VersionSource, S: ShellClient> {
    files: F,
    source: V,
    shell: S,
}

/// Client wired to the local disk and the `git` binary
pub type LiveClient = BumpVersionClient<LocalFileSystem, GitCli<SystemShell>, SystemShell>;

impl LiveClient {
    /// Create a client running git in `project_directory` (or the cwd)
    pub fn live(project_directory: Option<PathBuf>) -> Self {
        BumpVersionClient::new(
            LocalFileSystem::new(),
            GitCli::new(SystemShell::new(), project_directory),
            SystemShell::new(),
        )
    }
}

impl<F: FileSystem, V: VersionSource, S: ShellClient> BumpVersionClient<F, V, S> {
    pub fn new(files: F, source: V, shell: S) -> Self {
        BumpVersionClient {
            files,
            source,
            shell,
        }
    }

    pub fn files(&self) -> &F {
        &self.files
    }

    pub fn shell(&self) -> &S {
        &self.shell
    }

    /// Load the configuration file (or defaults) and merge the flag overrides
    pub fn parsed_configuration(&self, options: &SharedOptions) -> Result<Configuration> {
        let loaded = config::find_and_load(
            &self.files,
            options.configuration_file.as_deref(),
            options.project_directory.as_deref(),
            options.require_configuration_file,
        )?;
        let merged = loaded.merging(options.configuration_to_merge.as_ref());
        trace!(configuration = ?merged, "Merged configuration");
        Ok(merged)
    }

    /// Write the version derived from the configured strategy
    pub fn build(&self, options: &SharedOptions) -> Result<OperationOutcome> {
        let _span = info_span!("build", command = %options.logging.command).entered();
        let resolved = self.resolve(options)?;
        let version = resolved.version_string(options.allow_pre_release_tag);
        self.write(options, &resolved, version)
    }

    /// Generate the version file; same pipeline as [BumpVersionClient::build]
    pub fn generate(&self, options: &SharedOptions) -> Result<OperationOutcome> {
        let _span = info_span!("generate", command = %options.logging.command).entered();
        let resolved = self.resolve(options)?;
        let version = resolved.version_string(options.allow_pre_release_tag);
        self.write(options, &resolved, version)
    }

    /// Bump the resolved version
    ///
    /// Without a kind this behaves as [BumpVersionClient::generate]. Branch
    /// strategies have no semantic version and write the branch value as is.
    /// Nothing is written when the bumped version equals the loaded one and
    /// the resolution reports no changes.
    pub fn bump(&self, kind: Option<BumpKind>, options: &SharedOptions) -> Result<OperationOutcome> {
        let Some(kind) = kind else {
            return self.generate(options);
        };
        let _span = info_span!("bump", command = %options.logging.command, %kind).entered();

        let resolved = self.resolve(options)?;
        let (loaded, base, pre_release) = match &resolved.value {
            ResolvedValue::Branch { .. } => {
                debug!("Branch strategy has no semantic version, writing branch value");
                let version = resolved.version_string(options.allow_pre_release_tag);
                return self.write(options, &resolved, version);
            }
            ResolvedValue::SemVer {
                loaded,
                resolved,
                pre_release,
                ..
            } => (loaded, resolved, pre_release),
        };

        debug!("Version prior to bumping: {}", base);
        let bumped = base.bump_with_pre_release(kind, pre_release.clone())?;
        let version = bumped.render(options.allow_pre_release_tag);

        if loaded.as_ref() == Some(&bumped) && !resolved.has_changes() {
            debug!("No change, skipping");
            let contents = VersionFile::new(Some(version.clone()), resolved.uses_optional_type)
                .render();
            return Ok(OperationOutcome {
                path: self.files.canonicalize(&resolved.target),
                version,
                contents,
                status: WriteStatus::Unchanged,
                warnings: resolved.warnings,
            });
        }

        debug!("Bumped version: {}", version);
        self.write(options, &resolved, version)
    }

    /// Write `configuration` to `path`, returning the canonical path
    pub fn write_configuration(&self, configuration: &Configuration, path: &Path) -> Result<PathBuf> {
        config::write_configuration(&self.files, configuration, path)?;
        Ok(self.files.canonicalize(path))
    }

    fn resolve(&self, options: &SharedOptions) -> Result<ResolvedVersion> {
        let configuration = self.parsed_configuration(options)?;
        let strategy = configuration.require_strategy()?;
        let target = configuration.target_path(options.project_directory.as_deref())?;
        debug!("Target: {}", target.display());

        let mut resolver = VersionResolver::new(
            &self.files,
            &self.source,
            &self.shell,
            options.project_directory.as_deref(),
        );
        let resolved = resolver.resolve(strategy, &target)?;
        trace!(state = ?resolver.state(), "Resolution finished");
        Ok(resolved)
    }

    fn write(
        &self,
        options: &SharedOptions,
        resolved: &ResolvedVersion,
        version: String,
    ) -> Result<OperationOutcome> {
        let contents = VersionFile::new(Some(version.clone()), resolved.uses_optional_type).render();
        trace!("Rendered version file:\n{}", contents);

        let status = if options.dry_run {
            debug!("Dry run, skipping write to {}", resolved.target.display());
            debug!("\n{}", contents);
            WriteStatus::DryRun
        } else {
            self.files.write(contents.as_bytes(), &resolved.target)?;
            debug!("Wrote version {} to {}", version, resolved.target.display());
            WriteStatus::Written
        };

        Ok(OperationOutcome {
            path: self.files.canonicalize(&resolved.target),
            version,
            contents,
            status,
            warnings: resolved.warnings.clone(),
        })
    }
}
