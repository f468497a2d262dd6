//! Pure formatting functions for UI output.
//!
//! Status lines go to stdout, warnings and errors to stderr.

use console::style;
use std::path::Path;

use crate::warning::ResolutionWarning;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Display a resolution warning to the user.
///
/// Shows a yellow warning icon followed by the warning message.
pub fn display_warning(warning: &ResolutionWarning) {
    eprintln!("{} {}", style("⚠").yellow(), warning);
}

/// Print the rendered file content a dry run would have written.
///
/// # Arguments
/// * `path` - Target file that was not written
/// * `contents` - Rendered file content
pub fn display_dry_run(path: &Path, contents: &str) {
    println!(
        "{} {}",
        style("Dry run, not writing:").cyan().bold(),
        path.display()
    );
    for line in contents.lines() {
        println!("  {}", style(line).dim());
    }
}

/// Build the message shown after a version file is written.
pub fn format_written(path: &Path, version: Option<&str>) -> String {
    match version {
        Some(v) => format!("Wrote version {} to {}", v, path.display()),
        None => format!("Wrote version file {}", path.display()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_written_with_version() {
        assert_eq!(
            format_written(Path::new("Sources/bar/Version.swift"), Some("1.0.0")),
            "Wrote version 1.0.0 to Sources/bar/Version.swift"
        );
    }

    #[test]
    fn test_format_written_without_version() {
        assert_eq!(
            format_written(Path::new("Version.swift"), None),
            "Wrote version file Version.swift"
        );
    }
}
