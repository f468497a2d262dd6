use crate::config::{Branch, Precedence, SemVar, SemVarSource, VersionStrategy};
use crate::domain::{SemanticVersion, VersionFile};
use crate::error::{BumpVersionError, Result};
use crate::files::FileSystem;
use crate::git::{ShellClient, VersionSource};
use crate::resolver::prerelease::{PreReleaseOutcome, PreReleaseResolver};
use crate::warning::ResolutionWarning;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Stage reached by a resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionState {
    NotStarted,
    /// The target file was read (or found missing)
    FileChecked,
    /// The strategy version was computed
    StrategyChecked,
    Resolved,
    /// Terminal; carries the error message
    Failed(String),
}

/// Versions found for one strategy
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedValue {
    Branch {
        loaded: Option<String>,
        strategy: String,
    },
    SemVer {
        /// Version from the target file, pre-release applied
        loaded: Option<SemanticVersion>,
        /// Version from git or the custom command, pre-release applied
        strategy: Option<SemanticVersion>,
        /// Version chosen by precedence, `0.0.0` when neither exists
        resolved: SemanticVersion,
        /// Pre-release text that was applied, if any
        pre_release: Option<String>,
    },
}

/// Outcome of resolving a version strategy against a target file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedVersion {
    pub target: PathBuf,
    /// Whether the target declares `String?`; true for new files
    pub uses_optional_type: bool,
    pub value: ResolvedValue,
    pub warnings: Vec<ResolutionWarning>,
}

impl ResolvedVersion {
    /// Whether the loaded and strategy values differ in presence, or are equal
    ///
    /// Two present values compare for equality, so identical versions report
    /// `true`. Callers rely on this exact behavior.
    pub fn has_changes(&self) -> bool {
        match &self.value {
            ResolvedValue::Branch { loaded, strategy } => match loaded {
                None => true,
                Some(loaded) => loaded == strategy,
            },
            ResolvedValue::SemVer {
                loaded, strategy, ..
            } => match (loaded, strategy) {
                (None, None) => false,
                (Some(_), None) | (None, Some(_)) => true,
                (Some(loaded), Some(strategy)) => loaded == strategy,
            },
        }
    }

    /// Version string to write
    pub fn version_string(&self, include_pre_release: bool) -> String {
        match &self.value {
            ResolvedValue::Branch { strategy, .. } => strategy.clone(),
            ResolvedValue::SemVer { resolved, .. } => resolved.render(include_pre_release),
        }
    }

    /// Resolved semantic version, `None` for branch strategies
    pub fn semantic_version(&self) -> Option<&SemanticVersion> {
        match &self.value {
            ResolvedValue::SemVer { resolved, .. } => Some(resolved),
            ResolvedValue::Branch { .. } => None,
        }
    }
}

/// Resolves a [VersionStrategy] against a target file
///
/// Reads the current version from the file, computes a version from the
/// strategy and combines them per the configured precedence.
pub struct VersionResolver<'a> {
    files: &'a dyn FileSystem,
    source: &'a dyn VersionSource,
    shell: &'a dyn ShellClient,
    project_directory: Option<&'a Path>,
    state: ResolutionState,
}

impl<'a> VersionResolver<'a> {
    pub fn new(
        files: &'a dyn FileSystem,
        source: &'a dyn VersionSource,
        shell: &'a dyn ShellClient,
        project_directory: Option<&'a Path>,
    ) -> Self {
        VersionResolver {
            files,
            source,
            shell,
            project_directory,
            state: ResolutionState::NotStarted,
        }
    }

    /// Stage reached by the last call to [VersionResolver::resolve]
    pub fn state(&self) -> &ResolutionState {
        &self.state
    }

    /// Resolve `strategy` for the file at `target`
    pub fn resolve(&mut self, strategy: &VersionStrategy, target: &Path) -> Result<ResolvedVersion> {
        self.state = ResolutionState::NotStarted;
        let result = match strategy {
            VersionStrategy::Branch(branch) => self.resolve_branch(branch, target),
            VersionStrategy::Semvar(semvar) => self.resolve_semvar(semvar, target),
        };
        match &result {
            Ok(_) => self.state = ResolutionState::Resolved,
            Err(e) => self.state = ResolutionState::Failed(e.to_string()),
        }
        result
    }

    fn load_file(&self, target: &Path) -> Result<Option<VersionFile>> {
        if !self.files.exists(target) {
            debug!("Version file not found: {}", target.display());
            return Ok(None);
        }
        let contents = self.files.read(target)?;
        let file = VersionFile::parse(&contents, target)?;
        debug!(value = ?file.value, optional = file.uses_optional_type, "Loaded version file");
        Ok(Some(file))
    }

    fn resolve_branch(&mut self, branch: &Branch, target: &Path) -> Result<ResolvedVersion> {
        let file = self.load_file(target)?;
        self.state = ResolutionState::FileChecked;

        let strategy = self.source.branch_version(branch.include_commit_sha)?;
        self.state = ResolutionState::StrategyChecked;
        trace!("Branch version: {}", strategy);

        Ok(ResolvedVersion {
            target: target.to_path_buf(),
            uses_optional_type: file.as_ref().map_or(true, |f| f.uses_optional_type),
            value: ResolvedValue::Branch {
                loaded: file.and_then(|f| f.value),
                strategy,
            },
            warnings: Vec::new(),
        })
    }

    fn resolve_semvar(&mut self, semvar: &SemVar, target: &Path) -> Result<ResolvedVersion> {
        let mut warnings = Vec::new();

        let file = self.load_file(target)?;
        let uses_optional_type = file.as_ref().map_or(true, |f| f.uses_optional_type);
        let loaded = file
            .and_then(|f| f.value)
            .and_then(|value| parse_or_warn(&value, "the version file", &mut warnings));
        self.state = ResolutionState::FileChecked;

        if semvar.require_existing_file == Some(true) && loaded.is_none() {
            return Err(BumpVersionError::FileDoesNotExist {
                path: target.to_path_buf(),
            });
        }

        let outcome = self.pre_release(semvar, &mut warnings)?;
        let loaded = apply(outcome.as_ref(), loaded)?;

        let strategy = self.strategy_version(semvar, &mut warnings)?;
        let strategy = apply(outcome.as_ref(), strategy)?;
        self.state = ResolutionState::StrategyChecked;

        if semvar.require_existing_semvar == Some(true) && loaded.is_none() && strategy.is_none() {
            return Err(BumpVersionError::SemVarNotFound);
        }

        let chosen = match semvar.precedence.unwrap_or_default() {
            Precedence::File => loaded.clone().or_else(|| strategy.clone()),
            Precedence::Strategy => strategy.clone().or_else(|| loaded.clone()),
        };
        let resolved = match chosen {
            Some(version) => version,
            None => {
                debug!("No version found, starting from 0.0.0");
                apply(outcome.as_ref(), Some(SemanticVersion::default()))?.unwrap_or_default()
            }
        };

        let pre_release = match &outcome {
            Some(outcome) => outcome.pre_release()?,
            None => None,
        };

        Ok(ResolvedVersion {
            target: target.to_path_buf(),
            uses_optional_type,
            value: ResolvedValue::SemVer {
                loaded,
                strategy,
                resolved,
                pre_release,
            },
            warnings,
        })
    }

    fn pre_release(
        &self,
        semvar: &SemVar,
        warnings: &mut Vec<ResolutionWarning>,
    ) -> Result<Option<PreReleaseOutcome>> {
        if semvar.allow_pre_release == Some(false) {
            trace!("Pre-release disabled");
            return Ok(None);
        }
        let Some(pre_release) = &semvar.pre_release else {
            return Ok(None);
        };
        PreReleaseResolver::new(self.source, self.shell, self.project_directory)
            .resolve_configuration(pre_release, warnings)
    }

    fn strategy_version(
        &self,
        semvar: &SemVar,
        warnings: &mut Vec<ResolutionWarning>,
    ) -> Result<Option<SemanticVersion>> {
        match &semvar.strategy {
            None => Ok(None),
            Some(SemVarSource::GitTag { exact_match }) => {
                trace!("Loading semvar git tag strategy");
                match self.source.describe_tag(exact_match.unwrap_or(false)) {
                    Ok(tag) => Ok(parse_or_warn(&tag, "git describe", warnings)),
                    Err(BumpVersionError::NoTagFound) => {
                        debug!("{}", ResolutionWarning::TagNotFound);
                        warnings.push(ResolutionWarning::TagNotFound);
                        Ok(None)
                    }
                    Err(e) => Err(e),
                }
            }
            Some(SemVarSource::Command { arguments }) => {
                trace!(?arguments, "Loading semvar command strategy");
                let output = self.shell.run_arguments(arguments, self.project_directory)?;
                Ok(parse_or_warn(&output, "the custom command", warnings))
            }
        }
    }
}

fn parse_or_warn(
    value: &str,
    source: &str,
    warnings: &mut Vec<ResolutionWarning>,
) -> Option<SemanticVersion> {
    let parsed = SemanticVersion::parse(value);
    if parsed.is_none() {
        let warning = ResolutionWarning::UnparsableVersion {
            source: source.to_string(),
            output: value.to_string(),
        };
        debug!("{}", warning);
        warnings.push(warning);
    }
    parsed
}

fn apply(
    outcome: Option<&PreReleaseOutcome>,
    version: Option<SemanticVersion>,
) -> Result<Option<SemanticVersion>> {
    match (outcome, version) {
        (Some(outcome), Some(version)) => outcome.apply(&version).map(Some),
        (_, version) => Ok(version),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{PreRelease, PreReleaseStrategy};
    use crate::files::MemoryFileSystem;
    use crate::git::{CapturingShell, MockVersionSource};

    const TARGET: &str = "/baz/Sources/bar/Version.swift";

    fn git_tag() -> SemVar {
        SemVar {
            strategy: Some(SemVarSource::GitTag { exact_match: None }),
            ..SemVar::default()
        }
    }

    fn run(
        files: &MemoryFileSystem,
        source: &MockVersionSource,
        strategy: VersionStrategy,
    ) -> (Result<ResolvedVersion>, ResolutionState) {
        let shell = CapturingShell::new("2.0.0");
        let mut resolver = VersionResolver::new(files, source, &shell, None);
        let result = resolver.resolve(&strategy, Path::new(TARGET));
        let state = resolver.state().clone();
        (result, state)
    }

    #[test]
    fn test_semvar_without_file_uses_tag() {
        let files = MemoryFileSystem::new();
        let source = MockVersionSource::new().with_tag("1.0.0");

        let (result, state) = run(&files, &source, VersionStrategy::Semvar(git_tag()));
        let resolved = result.unwrap();

        assert_eq!(state, ResolutionState::Resolved);
        assert!(resolved.uses_optional_type);
        assert_eq!(resolved.version_string(true), "1.0.0");
        assert!(resolved.has_changes());
    }

    #[test]
    fn test_semvar_file_wins_by_default() {
        let files = MemoryFileSystem::new();
        files.add_file(TARGET, "let VERSION: String = \"1.0.0\"\n");
        let source = MockVersionSource::new().with_tag("2.0.0");

        let (result, _) = run(&files, &source, VersionStrategy::Semvar(git_tag()));
        let resolved = result.unwrap();

        assert!(!resolved.uses_optional_type);
        assert_eq!(resolved.version_string(true), "1.0.0");
        assert!(!resolved.has_changes());
    }

    #[test]
    fn test_semvar_strategy_precedence() {
        let files = MemoryFileSystem::new();
        files.add_file(TARGET, "let VERSION: String = \"1.0.0\"\n");
        let source = MockVersionSource::new().with_tag("2.0.0");
        let semvar = SemVar {
            precedence: Some(Precedence::Strategy),
            ..git_tag()
        };

        let (result, _) = run(&files, &source, VersionStrategy::Semvar(semvar));
        assert_eq!(result.unwrap().version_string(true), "2.0.0");
    }

    #[test]
    fn test_has_changes_equal_values_quirk() {
        let files = MemoryFileSystem::new();
        files.add_file(TARGET, "let VERSION: String? = \"1.0.0\"\n");
        let source = MockVersionSource::new().with_tag("1.0.0");

        let (result, _) = run(&files, &source, VersionStrategy::Semvar(git_tag()));
        assert!(result.unwrap().has_changes());
    }

    #[test]
    fn test_semvar_nothing_found_starts_at_zero() {
        let files = MemoryFileSystem::new();
        let source = MockVersionSource::new()
            .with_branch("dev")
            .with_commit_sha("g59bc977");
        let semvar = SemVar {
            pre_release: Some(PreRelease {
                prefix: None,
                strategy: Some(PreReleaseStrategy::Branch {
                    include_commit_sha: true,
                }),
            }),
            ..git_tag()
        };

        let (result, _) = run(&files, &source, VersionStrategy::Semvar(semvar));
        let resolved = result.unwrap();

        assert_eq!(resolved.version_string(true), "0.0.0-dev-g59bc977");
        assert_eq!(resolved.version_string(false), "0.0.0");
        assert!(!resolved.has_changes());
        assert_eq!(resolved.warnings, vec![ResolutionWarning::TagNotFound]);
    }

    #[test]
    fn test_semvar_unparsable_tag_warns() {
        let files = MemoryFileSystem::new();
        let source = MockVersionSource::new().with_tag("dev-g59bc977");

        let (result, _) = run(&files, &source, VersionStrategy::Semvar(git_tag()));
        let resolved = result.unwrap();

        assert_eq!(resolved.version_string(true), "0.0.0");
        assert!(matches!(
            resolved.warnings.as_slice(),
            [ResolutionWarning::UnparsableVersion { .. }]
        ));
    }

    #[test]
    fn test_require_existing_file() {
        let files = MemoryFileSystem::new();
        let source = MockVersionSource::new().with_tag("1.0.0");
        let semvar = SemVar {
            require_existing_file: Some(true),
            ..git_tag()
        };

        let (result, state) = run(&files, &source, VersionStrategy::Semvar(semvar));
        assert!(matches!(
            result,
            Err(BumpVersionError::FileDoesNotExist { .. })
        ));
        assert!(matches!(state, ResolutionState::Failed(_)));
    }

    #[test]
    fn test_require_existing_semvar() {
        let files = MemoryFileSystem::new();
        let source = MockVersionSource::new();
        let semvar = SemVar {
            require_existing_semvar: Some(true),
            ..git_tag()
        };

        let (result, _) = run(&files, &source, VersionStrategy::Semvar(semvar));
        assert!(matches!(result, Err(BumpVersionError::SemVarNotFound)));
    }

    #[test]
    fn test_malformed_file_fails() {
        let files = MemoryFileSystem::new();
        files.add_file(TARGET, "// nothing here\n");
        let source = MockVersionSource::new().with_tag("1.0.0");

        let (result, state) = run(&files, &source, VersionStrategy::Semvar(git_tag()));
        assert!(matches!(
            result,
            Err(BumpVersionError::FailedToParseVersionFile { .. })
        ));
        assert!(matches!(state, ResolutionState::Failed(_)));
    }

    #[test]
    fn test_command_strategy() {
        let files = MemoryFileSystem::new();
        let source = MockVersionSource::new();
        let semvar = SemVar {
            strategy: Some(SemVarSource::Command {
                arguments: vec!["echo".into(), "2.0.0".into()],
            }),
            ..SemVar::default()
        };

        let (result, _) = run(&files, &source, VersionStrategy::Semvar(semvar));
        assert_eq!(result.unwrap().version_string(true), "2.0.0");
    }

    #[test]
    fn test_command_strategy_without_arguments() {
        let files = MemoryFileSystem::new();
        let source = MockVersionSource::new();
        let semvar = SemVar {
            strategy: Some(SemVarSource::Command { arguments: vec![] }),
            ..SemVar::default()
        };

        let (result, _) = run(&files, &source, VersionStrategy::Semvar(semvar));
        assert!(matches!(result, Err(BumpVersionError::ExtraOptionsEmpty)));
    }

    #[test]
    fn test_pre_release_disabled() {
        let files = MemoryFileSystem::new();
        let source = MockVersionSource::new().with_tag("1.0.0");
        let semvar = SemVar {
            allow_pre_release: Some(false),
            pre_release: Some(PreRelease {
                prefix: Some("rc".into()),
                strategy: Some(PreReleaseStrategy::Command {
                    arguments: vec!["false".into()],
                    allow_prefix: None,
                }),
            }),
            ..git_tag()
        };

        let (result, _) = run(&files, &source, VersionStrategy::Semvar(semvar));
        assert_eq!(result.unwrap().version_string(true), "1.0.0");
    }

    #[test]
    fn test_branch_strategy() {
        let files = MemoryFileSystem::new();
        let source = MockVersionSource::new()
            .with_branch("main")
            .with_commit_sha("abc123");

        let (result, state) = run(
            &files,
            &source,
            VersionStrategy::Branch(Branch {
                include_commit_sha: true,
            }),
        );
        let resolved = result.unwrap();

        assert_eq!(state, ResolutionState::Resolved);
        assert_eq!(resolved.version_string(true), "main-abc123");
        assert!(resolved.semantic_version().is_none());
        assert!(resolved.has_changes());
    }

    #[test]
    fn test_branch_strategy_keeps_file_type() {
        let files = MemoryFileSystem::new();
        files.add_file(TARGET, "let VERSION: String = \"main-000000\"\n");
        let source = MockVersionSource::new()
            .with_branch("main")
            .with_commit_sha("abc123");

        let (result, _) = run(
            &files,
            &source,
            VersionStrategy::Branch(Branch {
                include_commit_sha: true,
            }),
        );
        let resolved = result.unwrap();

        assert!(!resolved.uses_optional_type);
        assert_eq!(resolved.version_string(false), "main-abc123");
        assert!(!resolved.has_changes());
    }

    #[test]
    fn test_branch_strategy_git_failure() {
        let files = MemoryFileSystem::new();
        let source = MockVersionSource::new();

        let (result, state) = run(
            &files,
            &source,
            VersionStrategy::Branch(Branch::default()),
        );
        assert!(result.is_err());
        assert!(matches!(state, ResolutionState::Failed(_)));
    }
}
