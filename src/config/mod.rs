//! Configuration schema, merging and file handling
//!
//! The persisted shape mirrors the types below with camelCase keys and
//! externally tagged variants:
//!
//! ```json
//! {
//!   "target": { "module": { "name": "bar" } },
//!   "strategy": { "semvar": { "strategy": { "gitTag": { "exactMatch": false } } } }
//! }
//! ```

pub mod file;
pub mod merge;

pub use file::{
    find_configuration, find_and_load, load_configuration, write_configuration, ConfigFormat,
    JSON_FILE_NAME, TOML_FILE_NAME,
};

use crate::error::{BumpVersionError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name used for module targets without an explicit file name
pub const DEFAULT_VERSION_FILE_NAME: &str = "Version.swift";

/// Complete configuration for bump-version
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<Target>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategy: Option<VersionStrategy>,
}

impl Configuration {
    /// Configuration used when no file is found: no target and a git-tag
    /// semantic version strategy
    pub fn fallback() -> Self {
        Configuration {
            target: None,
            strategy: Some(VersionStrategy::Semvar(SemVar {
                strategy: Some(SemVarSource::GitTag {
                    exact_match: Some(false),
                }),
                ..SemVar::default()
            })),
        }
    }

    /// Resolve the target file path
    ///
    /// # Arguments
    /// * `project_directory` - Prefix for the target when given
    ///
    /// # Returns
    /// * `Err(TargetNotFound)` - No target configured
    /// * `Err(PathOrModuleNotSet)` - Target path or module name is empty
    pub fn target_path(&self, project_directory: Option<&Path>) -> Result<PathBuf> {
        let target = self
            .target
            .as_ref()
            .ok_or(BumpVersionError::TargetNotFound)?;
        target.path(project_directory)
    }

    /// The configured strategy, or `VersionStrategyNotFound`
    pub fn require_strategy(&self) -> Result<&VersionStrategy> {
        self.strategy
            .as_ref()
            .ok_or(BumpVersionError::VersionStrategyNotFound)
    }
}

/// Where the version file lives
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Target {
    /// Explicit path to the version file
    Path(String),
    /// Module directory containing the version file
    Module(Module),
}

impl Target {
    pub fn module(name: impl Into<String>) -> Self {
        Target::Module(Module {
            name: name.into(),
            file_name: None,
        })
    }

    /// File path for this target
    ///
    /// Module names are placed under `Sources/` unless they already start
    /// with it; a leading `./` is dropped first.
    pub fn path(&self, project_directory: Option<&Path>) -> Result<PathBuf> {
        let relative = match self {
            Target::Path(path) => {
                if path.trim().is_empty() {
                    return Err(BumpVersionError::PathOrModuleNotSet);
                }
                PathBuf::from(path)
            }
            Target::Module(module) => {
                let name = module.name.trim();
                let name = name.strip_prefix("./").unwrap_or(name);
                if name.is_empty() {
                    return Err(BumpVersionError::PathOrModuleNotSet);
                }
                let dir = if name.starts_with("Sources") {
                    PathBuf::from(name)
                } else {
                    Path::new("Sources").join(name)
                };
                dir.join(module.file_name_or_default())
            }
        };

        Ok(match project_directory {
            Some(dir) => dir.join(relative),
            None => relative,
        })
    }
}

/// Module target: `Sources/<name>/<fileName>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Module {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
}

impl Module {
    pub fn file_name_or_default(&self) -> &str {
        self.file_name
            .as_deref()
            .filter(|n| !n.is_empty())
            .unwrap_or(DEFAULT_VERSION_FILE_NAME)
    }
}

/// Strategy used to derive the version
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VersionStrategy {
    /// Branch name, optionally with the short commit sha
    Branch(Branch),
    /// Semantic version
    Semvar(SemVar),
}

impl VersionStrategy {
    pub fn branch(&self) -> Option<&Branch> {
        match self {
            VersionStrategy::Branch(branch) => Some(branch),
            VersionStrategy::Semvar(_) => None,
        }
    }

    pub fn semvar(&self) -> Option<&SemVar> {
        match self {
            VersionStrategy::Semvar(semvar) => Some(semvar),
            VersionStrategy::Branch(_) => None,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Branch-derived version or pre-release
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Branch {
    #[serde(default = "default_true")]
    pub include_commit_sha: bool,
}

impl Default for Branch {
    fn default() -> Self {
        Branch {
            include_commit_sha: true,
        }
    }
}

/// Semantic version strategy
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SemVar {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_pre_release: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pre_release: Option<PreRelease>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub require_existing_file: Option<bool>,
    #[serde(
        default,
        rename = "requireExistingSemVar",
        skip_serializing_if = "Option::is_none"
    )]
    pub require_existing_semvar: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategy: Option<SemVarSource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precedence: Option<Precedence>,
}

/// Where a semantic version comes from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SemVarSource {
    /// `git describe --tags`
    #[serde(rename_all = "camelCase")]
    GitTag {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        exact_match: Option<bool>,
    },
    /// Custom command whose stdout is the version
    Command { arguments: Vec<String> },
}

/// Which version wins when both the file and the strategy produce one
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "camelCase")]
pub enum Precedence {
    #[default]
    File,
    Strategy,
}

/// Pre-release suffix configuration
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreRelease {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategy: Option<PreReleaseStrategy>,
}

/// Where the pre-release suffix comes from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PreReleaseStrategy {
    #[serde(rename_all = "camelCase")]
    Branch {
        #[serde(default = "default_true")]
        include_commit_sha: bool,
    },
    #[serde(rename_all = "camelCase")]
    Command {
        arguments: Vec<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        allow_prefix: Option<bool>,
    },
    /// Replaces the whole version with `git describe --tags`
    GitTag {},
}
