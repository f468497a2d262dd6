use std::fmt;

/// Non-fatal issues found while resolving a version.
/// These are reported to the user but do not abort the operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionWarning {
    /// A pre-release prefix was configured for the git-tag pre-release strategy
    PreReleasePrefixIgnored { prefix: String },
    /// `git describe` found no tag
    TagNotFound,
    /// A strategy produced output that is not a semantic version
    UnparsableVersion { source: String, output: String },
    /// A custom pre-release was given together with a custom command strategy
    CustomPreReleaseIgnored,
}

impl fmt::Display for ResolutionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolutionWarning::PreReleasePrefixIgnored { prefix } => write!(
                f,
                "Pre-release prefix '{}' is not applied to the git tag version",
                prefix
            ),
            ResolutionWarning::TagNotFound => {
                write!(f, "No git tag found")
            }
            ResolutionWarning::UnparsableVersion { source, output } => write!(
                f,
                "Output of {} is not a semantic version: '{}'",
                source, output
            ),
            ResolutionWarning::CustomPreReleaseIgnored => write!(
                f,
                "Custom pre-release is ignored when a custom command strategy is used"
            ),
        }
    }
}
