use std::fmt;

use crate::error::{BumpVersionError, Result};

/// Semantic version with an optional pre-release tail
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SemanticVersion {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub pre_release: Option<String>,
}

impl SemanticVersion {
    /// Create a new version without a pre-release
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        SemanticVersion {
            major,
            minor,
            patch,
            pre_release: None,
        }
    }

    /// Parse a version leniently (e.g., "v1.2.3-4-gabc" -> 1.2.3 with pre-release "4-gabc")
    ///
    /// Quote characters are stripped and a single leading `v`/`V` is ignored.
    /// Numeric segments that fail to parse default to `0`.
    ///
    /// # Returns
    /// `None` when the input has fewer than three dot-separated segments
    pub fn parse(input: &str) -> Option<Self> {
        let cleaned: String = input.trim().chars().filter(|c| *c != '"').collect();

        let parts: Vec<&str> = cleaned.split('.').filter(|p| !p.is_empty()).collect();
        if parts.len() < 3 {
            return None;
        }

        let major_segment = parts[0]
            .strip_prefix('v')
            .or_else(|| parts[0].strip_prefix('V'))
            .unwrap_or(parts[0]);

        // Everything from the third segment on belongs to patch + pre-release,
        // so "3-rc.1" keeps its dotted tail.
        let rest = parts[2..].join(".");
        let (patch_segment, pre_release) = match rest.split_once('-') {
            Some((core, tail)) => (core.to_string(), Some(tail.to_string())),
            None => (rest.clone(), None),
        };
        let patch_segment = patch_segment.split('.').next().unwrap_or_default();

        Some(SemanticVersion {
            major: parse_segment(major_segment),
            minor: parse_segment(parts[1]),
            patch: parse_segment(patch_segment),
            pre_release: pre_release.filter(|p| !p.is_empty()),
        })
    }

    /// Render as `major.minor.patch`, with the pre-release appended when requested
    pub fn render(&self, include_pre_release: bool) -> String {
        let core = format!("{}.{}.{}", self.major, self.minor, self.patch);
        match self.pre_release.as_deref() {
            Some(pre) if include_pre_release && !pre.is_empty() => {
                if pre.starts_with('-') {
                    format!("{}{}", core, pre)
                } else {
                    format!("{}-{}", core, pre)
                }
            }
            _ => core,
        }
    }

    /// Bump the version according to `kind`
    ///
    /// Major, minor and patch bumps reset lower components and drop the
    /// pre-release. A pre-release bump returns the version unchanged; the
    /// caller re-applies the resolved pre-release afterwards.
    ///
    /// # Returns
    /// `Err(VersionOverflow)` when the incremented component exceeds `u64::MAX`
    pub fn bump(&self, kind: BumpKind) -> Result<Self> {
        let overflow = || BumpVersionError::VersionOverflow {
            version: self.render(true),
            kind: kind.to_string(),
        };
        match kind {
            BumpKind::Major => {
                let major = self.major.checked_add(1).ok_or_else(overflow)?;
                Ok(SemanticVersion::new(major, 0, 0))
            }
            BumpKind::Minor => {
                let minor = self.minor.checked_add(1).ok_or_else(overflow)?;
                Ok(SemanticVersion::new(self.major, minor, 0))
            }
            BumpKind::Patch => {
                let patch = self.patch.checked_add(1).ok_or_else(overflow)?;
                Ok(SemanticVersion::new(self.major, self.minor, patch))
            }
            BumpKind::PreRelease => Ok(self.clone()),
        }
    }

    /// Bump, then apply the resolved pre-release
    ///
    /// A pre-release bump without a resolved pre-release keeps the existing
    /// one, so the version comes back unchanged.
    pub fn bump_with_pre_release(&self, kind: BumpKind, pre_release: Option<String>) -> Result<Self> {
        let bumped = self.bump(kind)?;
        match (kind, pre_release) {
            (BumpKind::PreRelease, None) => Ok(bumped),
            (_, pre_release) => Ok(bumped.with_pre_release(pre_release)),
        }
    }

    /// Return a copy with the pre-release replaced
    pub fn with_pre_release(&self, pre_release: Option<String>) -> Self {
        SemanticVersion {
            pre_release: pre_release.filter(|p| !p.is_empty()),
            ..self.clone()
        }
    }
}

fn parse_segment(segment: &str) -> u64 {
    segment.trim().parse::<u64>().unwrap_or(0)
}

impl fmt::Display for SemanticVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render(true))
    }
}

/// Which component a bump increments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BumpKind {
    Major,
    Minor,
    Patch,
    PreRelease,
}

impl fmt::Display for BumpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BumpKind::Major => "major",
            BumpKind::Minor => "minor",
            BumpKind::Patch => "patch",
            BumpKind::PreRelease => "pre-release",
        };
        write!(f, "{}", name)
    }
}
