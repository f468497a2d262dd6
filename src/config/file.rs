use crate::config::Configuration;
use crate::error::{BumpVersionError, Result};
use crate::files::FileSystem;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Default JSON configuration file name
pub const JSON_FILE_NAME: &str = ".bump-version.json";

/// Default TOML configuration file name
pub const TOML_FILE_NAME: &str = ".bump-version.toml";

/// Configuration file encoding, chosen by extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Toml,
}

impl ConfigFormat {
    /// Format for `path`, or `UnsupportedConfigurationFormat`
    pub fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(ConfigFormat::Json),
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Ok(ConfigFormat::Toml),
            _ => Err(BumpVersionError::UnsupportedConfigurationFormat {
                path: path.to_path_buf(),
            }),
        }
    }

    pub fn decode(self, contents: &str) -> Result<Configuration> {
        match self {
            ConfigFormat::Json => Ok(serde_json::from_str(contents)?),
            ConfigFormat::Toml => Ok(toml::from_str(contents)?),
        }
    }

    /// Encode `config`; JSON output is pretty printed with sorted keys
    pub fn encode(self, config: &Configuration) -> Result<String> {
        match self {
            ConfigFormat::Json => {
                let value = serde_json::to_value(config)?;
                let mut out = serde_json::to_string_pretty(&value)?;
                out.push('\n');
                Ok(out)
            }
            ConfigFormat::Toml => Ok(toml::to_string_pretty(config)?),
        }
    }
}

fn find_in_directory(fs: &dyn FileSystem, dir: &Path) -> Option<PathBuf> {
    [JSON_FILE_NAME, TOML_FILE_NAME]
        .iter()
        .map(|name| dir.join(name))
        .find(|candidate| fs.exists(candidate) && !fs.is_directory(candidate))
}

/// Locate a configuration file
///
/// Search order:
/// 1. `path`, when given (a file, or a directory to search)
/// 2. `project_directory`
/// 3. The current working directory
///
/// In a directory, `.bump-version.json` is tried before `.bump-version.toml`.
///
/// # Returns
/// * `Ok(Some(path))` - Configuration file found
/// * `Ok(None)` - Nothing found
pub fn find_configuration(
    fs: &dyn FileSystem,
    path: Option<&Path>,
    project_directory: Option<&Path>,
) -> Result<Option<PathBuf>> {
    if let Some(path) = path {
        trace!("Searching for configuration at {}", path.display());
        if fs.is_directory(path) {
            return Ok(find_in_directory(fs, path));
        }
        return Ok(fs.exists(path).then(|| path.to_path_buf()));
    }

    if let Some(dir) = project_directory {
        if let Some(found) = find_in_directory(fs, dir) {
            return Ok(Some(found));
        }
    }

    let cwd = fs.current_directory()?;
    Ok(find_in_directory(fs, &cwd))
}

/// Load and decode a configuration file
pub fn load_configuration(fs: &dyn FileSystem, path: &Path) -> Result<Configuration> {
    let format = ConfigFormat::from_path(path)?;
    let contents = fs.read(path)?;
    let config = format.decode(&contents)?;
    debug!("Loaded configuration from {}", path.display());
    Ok(config)
}

/// Find and load a configuration file
///
/// # Arguments
/// * `strict` - Fail with `ConfigurationNotFound` instead of using
///   [Configuration::fallback] when no file is found
///
/// # Returns
/// * `Err` - A file was found but could not be decoded, or `strict` and none found
pub fn find_and_load(
    fs: &dyn FileSystem,
    path: Option<&Path>,
    project_directory: Option<&Path>,
    strict: bool,
) -> Result<Configuration> {
    match find_configuration(fs, path, project_directory)? {
        Some(found) => load_configuration(fs, &found),
        None if strict => Err(BumpVersionError::ConfigurationNotFound),
        None => {
            debug!("No configuration file found, using defaults");
            Ok(Configuration::fallback())
        }
    }
}

/// Encode `config` and write it to `path`
///
/// # Returns
/// * `Err(InvalidConfigurationDirectory)` - The parent directory does not exist
pub fn write_configuration(fs: &dyn FileSystem, config: &Configuration, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !fs.is_directory(parent) {
            return Err(BumpVersionError::InvalidConfigurationDirectory {
                path: parent.to_path_buf(),
            });
        }
    }

    let format = ConfigFormat::from_path(path)?;
    let contents = format.encode(config)?;
    fs.write(contents.as_bytes(), path)?;
    debug!("Wrote configuration to {}", path.display());
    Ok(())
}
