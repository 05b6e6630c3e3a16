//! Command runner port for external process execution.
//!
//! The launcher service drives the Python toolchain through this trait so the
//! install-and-launch sequence can be tested without spawning anything.

use std::fmt;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::error::CoreError;

/// Exit status of a finished command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandStatus {
    /// Exit code, `None` when the process was terminated by a signal.
    pub code: Option<i32>,
}

impl CommandStatus {
    pub const fn from_code(code: i32) -> Self {
        Self { code: Some(code) }
    }

    pub const fn success(self) -> bool {
        matches!(self.code, Some(0))
    }
}

impl fmt::Display for CommandStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "exit code {code}"),
            None => f.write_str("terminated by signal"),
        }
    }
}

/// Captured output of a finished command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub status: CommandStatus,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    /// First non-empty line of stdout, falling back to stderr.
    ///
    /// Older interpreters print `--version` to stderr.
    pub fn first_line(&self) -> Option<&str> {
        let text = if self.stdout.trim().is_empty() {
            &self.stderr
        } else {
            &self.stdout
        };
        text.lines().map(str::trim).find(|l| !l.is_empty())
    }
}

/// Port for locating and running external programs.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Resolve a program name on the search path.
    fn locate(&self, program: &str) -> Option<PathBuf>;

    /// Run a program to completion, capturing its output.
    async fn capture(&self, program: &Path, args: &[String]) -> Result<CommandOutput, CoreError>;

    /// Run a program to completion with inherited stdio.
    async fn run(&self, program: &Path, args: &[String]) -> Result<CommandStatus, CoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_success() {
        assert!(CommandStatus::from_code(0).success());
        assert!(!CommandStatus::from_code(2).success());
        assert!(!CommandStatus { code: None }.success());
    }

    #[test]
    fn test_status_display() {
        assert_eq!(CommandStatus::from_code(3).to_string(), "exit code 3");
        assert_eq!(CommandStatus { code: None }.to_string(), "terminated by signal");
    }

    #[test]
    fn test_first_line_prefers_stdout() {
        let output = CommandOutput {
            status: CommandStatus::from_code(0),
            stdout: "\nPython 3.12.1\n".to_string(),
            stderr: "ignored".to_string(),
        };
        assert_eq!(output.first_line(), Some("Python 3.12.1"));

        let output = CommandOutput {
            stdout: "  ".to_string(),
            stderr: "Python 2.7.18".to_string(),
            ..output
        };
        assert_eq!(output.first_line(), Some("Python 2.7.18"));
    }
}
