//! Directional configuration merging
//!
//! `base.merging(Some(&other))` lets `other` win wherever it sets a value and
//! keeps `base` everywhere else. Strategies merge field by field only when
//! both sides use the same variant; otherwise `other` replaces `base`.

use crate::config::{Branch, Configuration, PreRelease, SemVar, VersionStrategy};

impl Configuration {
    /// Merge `other` over `self`
    pub fn merging(&self, other: Option<&Configuration>) -> Configuration {
        let Some(other) = other else {
            return self.clone();
        };

        let strategy = match &self.strategy {
            Some(strategy) => Some(strategy.merging(other.strategy.as_ref())),
            None => other.strategy.clone(),
        };

        Configuration {
            target: other.target.clone().or_else(|| self.target.clone()),
            strategy,
        }
    }
}

impl VersionStrategy {
    /// Merge `other` over `self`, replacing outright on variant mismatch
    pub fn merging(&self, other: Option<&VersionStrategy>) -> VersionStrategy {
        match (self, other) {
            (_, None) => self.clone(),
            (VersionStrategy::Branch(base), Some(VersionStrategy::Branch(other))) => {
                VersionStrategy::Branch(base.merging(Some(other)))
            }
            (VersionStrategy::Semvar(base), Some(VersionStrategy::Semvar(other))) => {
                VersionStrategy::Semvar(base.merging(Some(other)))
            }
            (_, Some(other)) => other.clone(),
        }
    }
}

impl Branch {
    pub fn merging(&self, other: Option<&Branch>) -> Branch {
        Branch {
            include_commit_sha: other
                .map(|o| o.include_commit_sha)
                .unwrap_or(self.include_commit_sha),
        }
    }
}

impl SemVar {
    pub fn merging(&self, other: Option<&SemVar>) -> SemVar {
        let Some(other) = other else {
            return self.clone();
        };

        let pre_release = match &self.pre_release {
            Some(pre_release) => Some(pre_release.merging(other.pre_release.as_ref())),
            None => other.pre_release.clone(),
        };

        SemVar {
            allow_pre_release: other.allow_pre_release.or(self.allow_pre_release),
            pre_release,
            require_existing_file: other.require_existing_file.or(self.require_existing_file),
            require_existing_semvar: other
                .require_existing_semvar
                .or(self.require_existing_semvar),
            strategy: other.strategy.clone().or_else(|| self.strategy.clone()),
            precedence: other.precedence.or(self.precedence),
        }
    }
}

impl PreRelease {
    pub fn merging(&self, other: Option<&PreRelease>) -> PreRelease {
        let Some(other) = other else {
            return self.clone();
        };
        PreRelease {
            prefix: other.prefix.clone().or_else(|| self.prefix.clone()),
            strategy: other.strategy.clone().or_else(|| self.strategy.clone()),
        }
    }
}
