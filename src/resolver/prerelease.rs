use crate::config::{PreRelease, PreReleaseStrategy};
use crate::domain::SemanticVersion;
use crate::error::{BumpVersionError, Result};
use crate::git::{ShellClient, VersionSource};
use crate::warning::ResolutionWarning;
use std::path::Path;
use tracing::{debug, trace};

/// Result of resolving a pre-release strategy
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreReleaseOutcome {
    /// Appended as the pre-release of an existing version
    Suffix(String),
    /// A full version (from `git describe`) that replaces the existing one
    Replacement {
        version: String,
        prefix: Option<String>,
    },
}

impl PreReleaseOutcome {
    /// Pre-release text this outcome contributes
    ///
    /// For a replacement this is the tag's own pre-release, with the prefix
    /// in front when one was configured.
    pub fn pre_release(&self) -> Result<Option<String>> {
        match self {
            PreReleaseOutcome::Suffix(suffix) => Ok(Some(suffix.clone())),
            PreReleaseOutcome::Replacement { .. } => Ok(self.replacement()?.pre_release),
        }
    }

    /// Apply the outcome to `base`
    ///
    /// # Returns
    /// * `Err(PreReleaseParsingError)` - A replacement tag is not a semantic version
    pub fn apply(&self, base: &SemanticVersion) -> Result<SemanticVersion> {
        match self {
            PreReleaseOutcome::Suffix(suffix) => Ok(base.with_pre_release(Some(suffix.clone()))),
            PreReleaseOutcome::Replacement { .. } => self.replacement(),
        }
    }

    fn replacement(&self) -> Result<SemanticVersion> {
        let PreReleaseOutcome::Replacement { version, prefix } = self else {
            return Err(BumpVersionError::pre_release("not a replacement outcome"));
        };
        let parsed = SemanticVersion::parse(version).ok_or_else(|| {
            BumpVersionError::pre_release(format!("'{}' is not a semantic version", version))
        })?;
        if let (Some(prefix), Some(pre)) = (prefix, parsed.pre_release.clone()) {
            return Ok(parsed.with_pre_release(Some(format!("{}-{}", prefix, pre))));
        }
        Ok(parsed)
    }
}

/// Computes pre-release suffixes from git or a custom command
pub struct PreReleaseResolver<'a> {
    source: &'a dyn VersionSource,
    shell: &'a dyn ShellClient,
    directory: Option<&'a Path>,
}

impl<'a> PreReleaseResolver<'a> {
    /// Create a resolver
    ///
    /// # Arguments
    /// * `source` - Git queries for branch and tag strategies
    /// * `shell` - Runs custom command strategies
    /// * `directory` - Working directory for custom commands
    pub fn new(
        source: &'a dyn VersionSource,
        shell: &'a dyn ShellClient,
        directory: Option<&'a Path>,
    ) -> Self {
        PreReleaseResolver {
            source,
            shell,
            directory,
        }
    }

    /// Resolve a pre-release configuration
    ///
    /// # Returns
    /// * `Ok(None)` - No strategy configured
    /// * `Ok(Some(outcome))` - Resolved suffix or replacement
    pub fn resolve_configuration(
        &self,
        pre_release: &PreRelease,
        warnings: &mut Vec<ResolutionWarning>,
    ) -> Result<Option<PreReleaseOutcome>> {
        match &pre_release.strategy {
            Some(strategy) => self
                .resolve(strategy, pre_release.prefix.as_deref(), warnings)
                .map(Some),
            None => Ok(None),
        }
    }

    /// Resolve one strategy
    ///
    /// Branch and command values are joined to the prefix as `prefix-value`.
    /// Command strategies use the prefix only when `allowPrefix` is set. The
    /// git-tag strategy yields a [PreReleaseOutcome::Replacement] and records
    /// a warning when a prefix was configured.
    pub fn resolve(
        &self,
        strategy: &PreReleaseStrategy,
        prefix: Option<&str>,
        warnings: &mut Vec<ResolutionWarning>,
    ) -> Result<PreReleaseOutcome> {
        let (value, allows_prefix) = match strategy {
            PreReleaseStrategy::Branch { include_commit_sha } => {
                trace!("Loading pre-release branch strategy");
                (self.source.branch_version(*include_commit_sha)?, true)
            }
            PreReleaseStrategy::Command {
                arguments,
                allow_prefix,
            } => {
                trace!(?arguments, "Loading pre-release command strategy");
                let output = self.shell.run_arguments(arguments, self.directory)?;
                (output, allow_prefix.unwrap_or(false))
            }
            PreReleaseStrategy::GitTag {} => {
                trace!("Loading pre-release git tag strategy");
                let version = self.source.describe_tag(false)?;
                if let Some(prefix) = prefix {
                    let warning = ResolutionWarning::PreReleasePrefixIgnored {
                        prefix: prefix.to_string(),
                    };
                    debug!("{}", warning);
                    warnings.push(warning);
                }
                return Ok(PreReleaseOutcome::Replacement {
                    version,
                    prefix: prefix.map(str::to_string),
                });
            }
        };

        let suffix = match prefix {
            Some(prefix) if allows_prefix => format!("{}-{}", prefix, value),
            _ => value,
        };
        trace!("Pre-release string: {}", suffix);
        Ok(PreReleaseOutcome::Suffix(suffix))
    }
}
