use crate::config::Configuration;
use crate::logging::LoggingOptions;
use std::path::PathBuf;

/// Options shared by every operation
///
/// Mirrors the command-line flags in a form the orchestration layer can use
/// without depending on clap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharedOptions {
    /// Render versions with their pre-release tail
    pub allow_pre_release_tag: bool,

    /// Log the rendered file instead of writing it
    pub dry_run: bool,

    /// Project root; prefixes the target path and runs git there
    pub project_directory: Option<PathBuf>,

    pub logging: LoggingOptions,

    /// Flag-derived configuration merged over the loaded one
    pub configuration_to_merge: Option<Configuration>,

    /// Configuration file or directory to load
    pub configuration_file: Option<PathBuf>,

    /// Fail when no configuration file is found
    pub require_configuration_file: bool,
}

impl SharedOptions {
    pub fn new(logging: LoggingOptions) -> Self {
        SharedOptions {
            allow_pre_release_tag: true,
            dry_run: false,
            project_directory: None,
            logging,
            configuration_to_merge: None,
            configuration_file: None,
            require_configuration_file: false,
        }
    }

    pub fn with_project_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.project_directory = Some(dir.into());
        self
    }

    pub fn with_configuration(mut self, configuration: Configuration) -> Self {
        self.configuration_to_merge = Some(configuration);
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

impl Default for SharedOptions {
    fn default() -> Self {
        SharedOptions::new(LoggingOptions::default())
    }
}
