//! External formatter invocation.
//!
//! Formatting a single file is behind the [`FileFormatter`] trait so the driver can
//! run against a fake in tests. [`ClangFormat`] is the real implementation: one
//! blocking child process per file, rewriting the file in place.

use crate::config::FormatterConfig;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Error from formatting one file.
#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    /// Formatter binary could not be started (usually not found in PATH)
    #[error("Failed to run '{program}' on {}: {source}", .file.display())]
    Spawn {
        program: String,
        file: PathBuf,
        source: io::Error,
    },

    /// Formatter ran but did not exit successfully
    #[error("'{program}' failed on {}: {}", .file.display(), describe_exit(.code))]
    Failed {
        program: String,
        file: PathBuf,
        code: Option<i32>,
    },
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {code}"),
        None => "terminated by signal".to_string(),
    }
}

/// Rewrites one file in place.
pub trait FileFormatter {
    fn format_file(&self, path: &Path) -> Result<(), FormatError>;
}

impl<F> FileFormatter for F
where
    F: Fn(&Path) -> Result<(), FormatError>,
{
    fn format_file(&self, path: &Path) -> Result<(), FormatError> {
        self(path)
    }
}

/// Runs `<command> <args...> <file>` and waits for it to finish.
///
/// Stdio is inherited, and there is no timeout: a formatter that hangs blocks the run.
#[derive(Debug, Clone)]
pub struct ClangFormat {
    command: String,
    args: Vec<String>,
}

impl ClangFormat {
    pub fn new(command: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            command: command.into(),
            args,
        }
    }

    pub fn from_config(config: &FormatterConfig) -> Self {
        Self::new(config.command.clone(), config.args.clone())
    }

    /// The process that formats `path`; the file is always the last argument.
    pub fn command(&self, path: &Path) -> Command {
        let mut cmd = Command::new(&self.command);
        cmd.args(&self.args).arg(path);
        cmd
    }
}

impl Default for ClangFormat {
    fn default() -> Self {
        Self::from_config(&FormatterConfig::default())
    }
}

impl FileFormatter for ClangFormat {
    fn format_file(&self, path: &Path) -> Result<(), FormatError> {
        let status = self.command(path).status().map_err(|source| FormatError::Spawn {
            program: self.command.clone(),
            file: path.to_path_buf(),
            source,
        })?;

        if status.success() {
            Ok(())
        } else {
            Err(FormatError::Failed {
                program: self.command.clone(),
                file: path.to_path_buf(),
                code: status.code(),
            })
        }
    }
}
