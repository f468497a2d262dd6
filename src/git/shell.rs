use crate::error::{BumpVersionError, Result};
use std::path::Path;
use std::process::Command;
use tracing::trace;

/// Runs external processes and captures their output
pub trait ShellClient: Send + Sync {
    /// Run `program` with `args`
    ///
    /// # Arguments
    /// * `program` - Executable name or path
    /// * `args` - Arguments passed verbatim
    /// * `working_directory` - Directory to run in, or the process cwd when `None`
    ///
    /// # Returns
    /// * `Ok(String)` - Trimmed stdout when the process exits with code 0
    /// * `Err` - `CommandFailed` when the process cannot start or exits non-zero
    fn run(&self, program: &str, args: &[String], working_directory: Option<&Path>)
        -> Result<String>;

    /// Run an argument vector where the first element is the program
    ///
    /// # Returns
    /// `ExtraOptionsEmpty` when `arguments` is empty
    fn run_arguments(&self, arguments: &[String], working_directory: Option<&Path>) -> Result<String> {
        let (program, args) = arguments
            .split_first()
            .ok_or(BumpVersionError::ExtraOptionsEmpty)?;
        self.run(program, args, working_directory)
    }
}

/// Shell client backed by `std::process::Command`
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemShell;

impl SystemShell {
    pub fn new() -> Self {
        SystemShell
    }
}

impl ShellClient for SystemShell {
    fn run(
        &self,
        program: &str,
        args: &[String],
        working_directory: Option<&Path>,
    ) -> Result<String> {
        trace!(program, ?args, ?working_directory, "running command");

        let mut cmd = Command::new(program);
        cmd.args(args);
        if let Some(dir) = working_directory {
            cmd.current_dir(dir);
        }

        let output = cmd
            .output()
            .map_err(|e| BumpVersionError::command_failed(program, args, e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(BumpVersionError::command_failed(
                program,
                args,
                format!(
                    "exit code {}: {}",
                    output.status.code().unwrap_or(-1),
                    stderr.trim()
                ),
            ));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}
