//! Command-line arguments
//!
//! Flags only produce configuration values when they are given, so merging
//! the result over a configuration file never resets file settings to flag
//! defaults.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::warn;

use crate::cli::options::SharedOptions;
use crate::config::{
    Branch, Configuration, Module, Precedence, PreRelease, PreReleaseStrategy, SemVar,
    SemVarSource, Target, VersionStrategy,
};
use crate::domain::BumpKind;
use crate::error::{BumpVersionError, Result};
use crate::logging::LoggingOptions;
use crate::warning::ResolutionWarning;

#[derive(Debug, Parser)]
#[command(
    name = "bump-version",
    version,
    about = "Derive a version from git or a custom command and write it into a source file"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Write the version derived from the configured strategy
    Build(GlobalArgs),

    /// Bump the semantic version in the version file
    Bump {
        #[command(flatten)]
        bump: BumpArgs,

        #[command(flatten)]
        globals: GlobalArgs,
    },

    /// Generate the version file
    Generate(GlobalArgs),

    /// Configuration commands
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Command {
    /// Subcommand name used in logging
    pub fn name(&self) -> &'static str {
        match self {
            Command::Build(_) => "build",
            Command::Bump { .. } => "bump",
            Command::Generate(_) => "generate",
            Command::Config(ConfigCommand::Dump { .. }) => "dump",
            Command::Config(ConfigCommand::Generate { .. }) => "config-generate",
        }
    }

    pub fn globals(&self) -> &GlobalArgs {
        match self {
            Command::Build(globals) | Command::Generate(globals) => globals,
            Command::Bump { globals, .. } => globals,
            Command::Config(ConfigCommand::Dump { globals, .. }) => globals,
            Command::Config(ConfigCommand::Generate { globals, .. }) => globals,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the merged configuration
    #[command(alias = "d")]
    Dump {
        /// Print as TOML instead of JSON
        #[arg(long)]
        toml: bool,

        #[command(flatten)]
        globals: GlobalArgs,
    },

    /// Write a configuration file built from the flags
    #[command(alias = "g")]
    Generate {
        /// Strategy style of the generated configuration
        #[arg(long, value_enum, default_value_t = ConfigStyle::Semvar)]
        style: ConfigStyle,

        /// Print to stdout instead of writing a file
        #[arg(long)]
        print: bool,

        #[command(flatten)]
        globals: GlobalArgs,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ConfigStyle {
    Branch,
    Semvar,
}

#[derive(Debug, Clone, Default, Args)]
#[group(multiple = false)]
pub struct BumpArgs {
    /// Bump the major version
    #[arg(long)]
    pub major: bool,

    /// Bump the minor version
    #[arg(long)]
    pub minor: bool,

    /// Bump the patch version (default)
    #[arg(long)]
    pub patch: bool,

    /// Keep the version and refresh the pre-release
    #[arg(long)]
    pub pre_release: bool,
}

impl BumpArgs {
    pub fn kind(&self) -> BumpKind {
        if self.major {
            BumpKind::Major
        } else if self.minor {
            BumpKind::Minor
        } else if self.pre_release {
            BumpKind::PreRelease
        } else {
            BumpKind::Patch
        }
    }
}

#[derive(Debug, Clone, Default, Args)]
pub struct GlobalArgs {
    /// Configuration file, or a directory containing one
    #[arg(short = 'f', long)]
    pub configuration_file: Option<PathBuf>,

    /// Fail if no configuration file is found
    #[arg(long)]
    pub require_configuration: bool,

    /// Project directory (default: current directory)
    #[arg(long)]
    pub project_directory: Option<PathBuf>,

    /// Print what would be written instead of writing it
    #[arg(long)]
    pub dry_run: bool,

    /// Increase logging level, can be passed multiple times (example: -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(flatten)]
    pub target: TargetArgs,

    #[command(flatten)]
    pub strategy: StrategyArgs,

    #[command(flatten)]
    pub pre_release: PreReleaseArgs,

    /// Arguments for custom command strategies, given after '--'
    #[arg(last = true)]
    pub extra_options: Vec<String>,
}

#[derive(Debug, Clone, Default, Args)]
pub struct TargetArgs {
    /// Path to the version file, not required if a module is set
    #[arg(long)]
    pub target_file_path: Option<String>,

    /// Module name or directory containing the version file
    #[arg(long)]
    pub target_module: Option<String>,

    /// File name inside the target module
    #[arg(long)]
    pub target_file_name: Option<String>,
}

#[derive(Debug, Clone, Default, Args)]
pub struct StrategyArgs {
    /// Use the branch name (and commit sha) as the version
    #[arg(long)]
    pub branch: bool,

    /// Leave the commit sha out of branch style output
    #[arg(long)]
    pub no_commit_sha: bool,

    /// Use `git describe --tags` for the semantic version
    #[arg(long)]
    pub git_tag: bool,

    /// Only accept a tag on the current commit
    #[arg(long)]
    pub require_exact_match: bool,

    /// Use the extra options as a command that prints the version
    #[arg(long)]
    pub custom_command: bool,

    /// Fail if the version file does not exist
    #[arg(long)]
    pub require_existing_file: bool,

    /// Fail if no semantic version is found in the file or strategy
    #[arg(long)]
    pub require_existing_semvar: bool,

    /// Which version wins when both the file and the strategy have one
    #[arg(long, value_enum)]
    pub precedence: Option<Precedence>,
}

#[derive(Debug, Clone, Default, Args)]
pub struct PreReleaseArgs {
    /// Render versions without a pre-release
    #[arg(long)]
    pub disable_pre_release: bool,

    /// Use the branch name and commit sha as the pre-release
    #[arg(long)]
    pub pre_release_branch_style: bool,

    /// Use `git describe --tags` for the pre-release
    #[arg(long)]
    pub pre_release_git_tag_style: bool,

    /// Prefix for the pre-release
    #[arg(long)]
    pub pre_release_prefix: Option<String>,

    /// Use the extra options as a command that prints the pre-release
    #[arg(long)]
    pub custom_pre_release: bool,
}

impl TargetArgs {
    pub fn target(&self) -> Option<Target> {
        if let Some(path) = &self.target_file_path {
            return Some(Target::Path(path.clone()));
        }
        self.target_module.as_ref().map(|name| {
            Target::Module(Module {
                name: name.clone(),
                file_name: self.target_file_name.clone(),
            })
        })
    }
}

impl PreReleaseArgs {
    fn pre_release(&self, include_commit_sha: bool, extra_options: &[String]) -> Result<Option<PreRelease>> {
        let prefix = self.pre_release_prefix.clone();
        let strategy = if self.pre_release_branch_style {
            Some(PreReleaseStrategy::Branch { include_commit_sha })
        } else if self.pre_release_git_tag_style {
            Some(PreReleaseStrategy::GitTag {})
        } else if self.custom_pre_release {
            if extra_options.is_empty() {
                return Err(BumpVersionError::ExtraOptionsEmpty);
            }
            Some(PreReleaseStrategy::Command {
                arguments: extra_options.to_vec(),
                allow_prefix: None,
            })
        } else {
            None
        };

        if prefix.is_none() && strategy.is_none() {
            return Ok(None);
        }
        Ok(Some(PreRelease { prefix, strategy }))
    }
}

impl GlobalArgs {
    fn include_commit_sha(&self) -> bool {
        !self.strategy.no_commit_sha
    }

    fn semvar_source(&self) -> Result<Option<SemVarSource>> {
        let strategy = &self.strategy;
        if strategy.custom_command {
            if self.extra_options.is_empty() {
                return Err(BumpVersionError::ExtraOptionsEmpty);
            }
            return Ok(Some(SemVarSource::Command {
                arguments: self.extra_options.clone(),
            }));
        }
        if strategy.git_tag || strategy.require_exact_match {
            return Ok(Some(SemVarSource::GitTag {
                exact_match: strategy.require_exact_match.then_some(true),
            }));
        }
        Ok(None)
    }

    /// Semantic version settings from the flags
    pub fn semvar(&self) -> Result<SemVar> {
        let custom_command = self.strategy.custom_command;
        if custom_command && self.pre_release.custom_pre_release {
            warn!("{}", ResolutionWarning::CustomPreReleaseIgnored);
        }

        let pre_release = if custom_command {
            None
        } else {
            self.pre_release
                .pre_release(self.include_commit_sha(), &self.extra_options)?
        };

        Ok(SemVar {
            allow_pre_release: self.pre_release.disable_pre_release.then_some(false),
            pre_release,
            require_existing_file: self.strategy.require_existing_file.then_some(true),
            require_existing_semvar: self.strategy.require_existing_semvar.then_some(true),
            strategy: self.semvar_source()?,
            precedence: self.strategy.precedence,
        })
    }

    /// Configuration to merge over the loaded configuration
    ///
    /// Only flags that were given are set; without strategy flags the
    /// strategy is left to the configuration file.
    pub fn configuration_to_merge(&self) -> Result<Configuration> {
        let strategy = if self.strategy.branch {
            Some(VersionStrategy::Branch(Branch {
                include_commit_sha: self.include_commit_sha(),
            }))
        } else {
            let semvar = self.semvar()?;
            (semvar != SemVar::default()).then_some(VersionStrategy::Semvar(semvar))
        };

        Ok(Configuration {
            target: self.target.target(),
            strategy,
        })
    }

    /// Configuration written by `config generate`
    pub fn generated_configuration(&self, style: ConfigStyle) -> Result<Configuration> {
        let strategy = match style {
            ConfigStyle::Branch => VersionStrategy::Branch(Branch {
                include_commit_sha: self.include_commit_sha(),
            }),
            ConfigStyle::Semvar => VersionStrategy::Semvar(self.semvar()?),
        };
        Ok(Configuration {
            target: self.target.target(),
            strategy: Some(strategy),
        })
    }

    /// Options for an operation run as `command`
    pub fn shared_options(&self, command: &str) -> Result<SharedOptions> {
        Ok(SharedOptions {
            allow_pre_release_tag: !self.pre_release.disable_pre_release,
            dry_run: self.dry_run,
            project_directory: self.project_directory.clone(),
            logging: LoggingOptions::new(command, self.verbose),
            configuration_to_merge: Some(self.configuration_to_merge()?),
            configuration_file: self.configuration_file.clone(),
            require_configuration_file: self.require_configuration,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        let mut argv = vec!["bump-version"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_cli_is_well_formed() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_flags_leave_strategy_unset() {
        let cli = parse(&["build"]);
        let config = cli.command.globals().configuration_to_merge().unwrap();
        assert_eq!(config, Configuration::default());
    }

    #[test]
    fn test_target_module_flags() {
        let cli = parse(&["generate", "--target-module", "bar", "--target-file-name", "V.swift"]);
        let target = cli.command.globals().target.target();
        assert_eq!(
            target,
            Some(Target::Module(Module {
                name: "bar".into(),
                file_name: Some("V.swift".into())
            }))
        );
    }

    #[test]
    fn test_target_path_wins_over_module() {
        let cli = parse(&["build", "--target-module", "bar", "--target-file-path", "v.swift"]);
        assert_eq!(
            cli.command.globals().target.target(),
            Some(Target::Path("v.swift".into()))
        );
    }

    #[test]
    fn test_branch_flag() {
        let cli = parse(&["build", "--branch", "--no-commit-sha"]);
        let config = cli.command.globals().configuration_to_merge().unwrap();
        assert_eq!(
            config.strategy,
            Some(VersionStrategy::Branch(Branch {
                include_commit_sha: false
            }))
        );
    }

    #[test]
    fn test_semvar_flags() {
        let cli = parse(&[
            "build",
            "--git-tag",
            "--require-exact-match",
            "--require-existing-file",
            "--precedence",
            "strategy",
            "--pre-release-branch-style",
            "--pre-release-prefix",
            "rc",
        ]);
        let semvar = cli.command.globals().semvar().unwrap();

        assert_eq!(
            semvar.strategy,
            Some(SemVarSource::GitTag {
                exact_match: Some(true)
            })
        );
        assert_eq!(semvar.require_existing_file, Some(true));
        assert_eq!(semvar.require_existing_semvar, None);
        assert_eq!(semvar.precedence, Some(Precedence::Strategy));
        assert_eq!(
            semvar.pre_release,
            Some(PreRelease {
                prefix: Some("rc".into()),
                strategy: Some(PreReleaseStrategy::Branch {
                    include_commit_sha: true
                }),
            })
        );
    }

    #[test]
    fn test_custom_command_uses_extra_options() {
        let cli = parse(&["build", "--custom-command", "--", "echo", "1.2.3"]);
        let semvar = cli.command.globals().semvar().unwrap();
        assert_eq!(
            semvar.strategy,
            Some(SemVarSource::Command {
                arguments: vec!["echo".into(), "1.2.3".into()]
            })
        );
    }

    #[test]
    fn test_custom_command_without_extra_options() {
        let cli = parse(&["build", "--custom-command"]);
        assert!(matches!(
            cli.command.globals().semvar(),
            Err(BumpVersionError::ExtraOptionsEmpty)
        ));
    }

    #[test]
    fn test_custom_command_ignores_custom_pre_release() {
        let cli = parse(&[
            "build",
            "--custom-command",
            "--custom-pre-release",
            "--",
            "echo",
            "1.2.3",
        ]);
        let semvar = cli.command.globals().semvar().unwrap();
        assert_eq!(semvar.pre_release, None);
    }

    #[test]
    fn test_custom_pre_release_without_extra_options() {
        let cli = parse(&["build", "--custom-pre-release"]);
        assert!(matches!(
            cli.command.globals().semvar(),
            Err(BumpVersionError::ExtraOptionsEmpty)
        ));
    }

    #[test]
    fn test_disable_pre_release() {
        let cli = parse(&["build", "--disable-pre-release"]);
        let options = cli.command.globals().shared_options("build").unwrap();
        assert!(!options.allow_pre_release_tag);

        let semvar = options
            .configuration_to_merge
            .and_then(|c| c.strategy)
            .and_then(|s| s.semvar().cloned())
            .unwrap();
        assert_eq!(semvar.allow_pre_release, Some(false));
    }

    #[test]
    fn test_bump_kinds() {
        let cli = parse(&["bump", "--minor"]);
        match cli.command {
            Command::Bump { bump, .. } => assert_eq!(bump.kind(), BumpKind::Minor),
            other => panic!("unexpected command {:?}", other),
        }

        let cli = parse(&["bump"]);
        match cli.command {
            Command::Bump { bump, .. } => assert_eq!(bump.kind(), BumpKind::Patch),
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_bump_kinds_are_exclusive() {
        assert!(Cli::try_parse_from(["bump-version", "bump", "--major", "--minor"]).is_err());
    }

    #[test]
    fn test_config_generate_style() {
        let cli = parse(&["config", "generate", "--style", "branch", "--print"]);
        match &cli.command {
            Command::Config(ConfigCommand::Generate {
                style,
                print,
                globals,
            }) => {
                assert_eq!(*style, ConfigStyle::Branch);
                assert!(*print);
                let config = globals.generated_configuration(*style).unwrap();
                assert_eq!(
                    config.strategy,
                    Some(VersionStrategy::Branch(Branch::default()))
                );
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_shared_options() {
        let cli = parse(&[
            "generate",
            "--dry-run",
            "-vv",
            "--project-directory",
            "/baz",
            "-f",
            "/baz/config.toml",
            "--require-configuration",
        ]);
        let options = cli.command.globals().shared_options("generate").unwrap();

        assert!(options.dry_run);
        assert_eq!(options.logging.verbose, 2);
        assert_eq!(options.logging.command, "generate");
        assert_eq!(options.project_directory, Some(PathBuf::from("/baz")));
        assert_eq!(
            options.configuration_file,
            Some(PathBuf::from("/baz/config.toml"))
        );
        assert!(options.require_configuration_file);
    }
}
