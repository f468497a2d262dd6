use std::path::Path;

use regex::Regex;

use crate::error::{BumpVersionError, Result};

const HEADER: &str = "// Do not set this variable, it is set during the build process.";
const VERSION_LINE: &str = r#"(?m)^\s*let\s+VERSION\s*:\s*String(\?)?\s*=\s*(.*?)\s*$"#;

/// Version declaration read from (or written to) a target file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionFile {
    /// Declared value, `None` when the file declares `nil`
    pub value: Option<String>,
    /// Whether the declaration uses `String?`
    pub uses_optional_type: bool,
}

impl VersionFile {
    /// Create a declaration
    pub fn new(value: Option<String>, uses_optional_type: bool) -> Self {
        VersionFile {
            value,
            uses_optional_type,
        }
    }

    /// Parse the first `let VERSION: String[?] = ...` line of `content`
    ///
    /// # Arguments
    /// * `content` - Full text of the target file
    /// * `path` - Path used for error reporting
    ///
    /// # Returns
    /// `FailedToParseVersionFile` when no version line exists or the value is malformed
    pub fn parse(content: &str, path: &Path) -> Result<Self> {
        let failed = || BumpVersionError::FailedToParseVersionFile {
            path: path.to_path_buf(),
        };

        let re = Regex::new(VERSION_LINE).map_err(|_| failed())?;
        let captures = re.captures(content).ok_or_else(failed)?;

        let uses_optional_type = captures.get(1).is_some();
        let raw = captures.get(2).map(|m| m.as_str()).unwrap_or_default();

        let value = if raw == "nil" {
            None
        } else if raw.len() >= 2 && raw.starts_with('"') && raw.ends_with('"') {
            Some(raw[1..raw.len() - 1].to_string())
        } else {
            return Err(failed());
        };

        Ok(VersionFile {
            value,
            uses_optional_type,
        })
    }

    /// Render the complete file content
    pub fn render(&self) -> String {
        let type_name = if self.uses_optional_type {
            "String?"
        } else {
            "String"
        };
        let value = match &self.value {
            Some(v) => format!("\"{}\"", v),
            None => "nil".to_string(),
        };
        format!("{}\nlet VERSION: {} = {}\n", HEADER, type_name, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> Result<VersionFile> {
        VersionFile::parse(content, Path::new("Version.swift"))
    }

    #[test]
    fn test_parse_optional() {
        let file = parse("let VERSION: String? = \"1.0.0\"").unwrap();
        assert_eq!(file, VersionFile::new(Some("1.0.0".into()), true));
    }

    #[test]
    fn test_parse_non_optional() {
        let file = parse("// header\nlet VERSION: String = \"1.0.0\"\n").unwrap();
        assert_eq!(file, VersionFile::new(Some("1.0.0".into()), false));
    }

    #[test]
    fn test_parse_nil() {
        let file = parse("let VERSION: String? = nil\n").unwrap();
        assert_eq!(file, VersionFile::new(None, true));
    }

    #[test]
    fn test_parse_first_line_wins() {
        let content = "let VERSION: String = \"1.0.0\"\nlet VERSION: String? = \"2.0.0\"\n";
        let file = parse(content).unwrap();
        assert_eq!(file.value.as_deref(), Some("1.0.0"));
        assert!(!file.uses_optional_type);
    }

    #[test]
    fn test_parse_missing_line() {
        let err = parse("let OTHER = 1\n").unwrap_err();
        assert!(matches!(err, BumpVersionError::FailedToParseVersionFile { .. }));
    }

    #[test]
    fn test_parse_unquoted_value() {
        let err = parse("let VERSION: String = 1.0.0\n").unwrap_err();
        assert!(matches!(err, BumpVersionError::FailedToParseVersionFile { .. }));
    }

    #[test]
    fn test_render_optional() {
        let file = VersionFile::new(Some("1.0.0".into()), true);
        assert_eq!(
            file.render(),
            "// Do not set this variable, it is set during the build process.\nlet VERSION: String? = \"1.0.0\"\n"
        );
    }

    #[test]
    fn test_render_nil() {
        let file = VersionFile::new(None, true);
        assert!(file.render().ends_with("let VERSION: String? = nil\n"));
    }

    #[test]
    fn test_render_then_parse_preserves_type() {
        let file = VersionFile::new(Some("1.1.0".into()), false);
        assert_eq!(parse(&file.render()).unwrap(), file);
    }
}
