//! `CommandRunner` implementation over `tokio::process`.

use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};

use async_trait::async_trait;
use pedal_core::{CommandOutput, CommandRunner, CommandStatus, CoreError};
use tokio::process::Command;

/// Runs external programs as child processes.
///
/// `run` inherits stdin/stdout/stderr so pip progress and the launched
/// program talk to the user's terminal directly.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioCommandRunner;

impl TokioCommandRunner {
    pub const fn new() -> Self {
        Self
    }
}

fn to_status(status: ExitStatus) -> CommandStatus {
    CommandStatus {
        code: status.code(),
    }
}

fn spawn_error(program: &Path, err: &std::io::Error) -> CoreError {
    CoreError::Process(format!("{}: {err}", program.display()))
}

#[async_trait]
impl CommandRunner for TokioCommandRunner {
    fn locate(&self, program: &str) -> Option<PathBuf> {
        which::which(program).ok()
    }

    async fn capture(&self, program: &Path, args: &[String]) -> Result<CommandOutput, CoreError> {
        tracing::debug!(program = %program.display(), ?args, "Capturing command");
        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| spawn_error(program, &e))?;

        Ok(CommandOutput {
            status: to_status(output.status),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }

    async fn run(&self, program: &Path, args: &[String]) -> Result<CommandStatus, CoreError> {
        tracing::debug!(program = %program.display(), ?args, "Running command");
        let status = Command::new(program)
            .args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|e| spawn_error(program, &e))?;
        Ok(to_status(status))
    }
}
