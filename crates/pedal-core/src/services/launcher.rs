//! Install-and-launch procedure for the Python edition.
//!
//! Sequential and blocking on each external command:
//!
//! 1. Locate a Python interpreter (verified with `--version`)
//! 2. Optionally upgrade pip (failure is only a warning)
//! 3. Install the requirements manifest
//! 4. Run the entry-point script with inherited stdio
//!
//! A failed step aborts the procedure; later steps are never attempted.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::ports::{CommandRunner, CommandStatus};
use crate::settings::Settings;

/// One step of the launch procedure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchStep {
    LocateInterpreter,
    UpgradeInstaller,
    InstallDependencies,
    RunProgram,
}

impl fmt::Display for LaunchStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::LocateInterpreter => "interpreter check",
            Self::UpgradeInstaller => "installer upgrade",
            Self::InstallDependencies => "dependency installation",
            Self::RunProgram => "program",
        })
    }
}

/// What to install and run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchPlan {
    /// Interpreter names tried in order.
    pub interpreter_candidates: Vec<String>,
    pub manifest: PathBuf,
    pub entry_script: PathBuf,
    /// Extra arguments passed to the entry script.
    pub script_args: Vec<String>,
    pub upgrade_installer: bool,
}

impl LaunchPlan {
    /// Build a plan from settings, resolving relative paths against `base_dir`.
    pub fn from_settings(settings: &Settings, base_dir: &Path) -> Self {
        Self {
            interpreter_candidates: settings.effective_python_candidates(),
            manifest: base_dir.join(settings.effective_manifest_path()),
            entry_script: base_dir.join(settings.effective_entry_script()),
            script_args: Vec::new(),
            upgrade_installer: settings.effective_upgrade_installer(),
        }
    }
}

/// Progress notifications emitted while the procedure runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchEvent {
    InterpreterFound {
        path: PathBuf,
        version: Option<String>,
    },
    UpgradingInstaller,
    InstallerUpgradeFailed {
        reason: String,
    },
    InstallingDependencies {
        manifest: PathBuf,
    },
    DependenciesInstalled,
    LaunchingProgram {
        script: PathBuf,
    },
}

/// Result of the optional installer upgrade.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpgradeOutcome {
    Skipped,
    Upgraded,
    Failed(String),
}

/// Summary of a successful launch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchReport {
    pub interpreter: PathBuf,
    pub version: Option<String>,
    pub upgrade: UpgradeOutcome,
    pub status: CommandStatus,
}

/// Why the procedure stopped.
#[derive(Debug, thiserror::Error)]
pub enum LaunchError {
    #[error("Python was not found (tried: {tried}). Install Python 3 and make sure it is on PATH.")]
    InterpreterNotFound { tried: String },

    #[error("Dependency manifest {} does not exist", .0.display())]
    ManifestNotFound(PathBuf),

    #[error("Installing dependencies from {} failed ({status})", manifest.display())]
    InstallFailed {
        manifest: PathBuf,
        status: CommandStatus,
    },

    #[error("{} exited with an error ({status})", script.display())]
    ProgramFailed {
        script: PathBuf,
        status: CommandStatus,
    },

    #[error("Failed to start {step}: {reason}")]
    Spawn { step: LaunchStep, reason: String },
}

impl LaunchError {
    /// Process exit code for this failure.
    ///
    /// A failing program passes its own code through; everything else is `1`.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ProgramFailed { status, .. } => status.code.filter(|c| *c != 0).unwrap_or(1),
            _ => 1,
        }
    }

    pub const fn step(&self) -> LaunchStep {
        match self {
            Self::InterpreterNotFound { .. } => LaunchStep::LocateInterpreter,
            Self::ManifestNotFound(_) | Self::InstallFailed { .. } => {
                LaunchStep::InstallDependencies
            }
            Self::ProgramFailed { .. } => LaunchStep::RunProgram,
            Self::Spawn { step, .. } => *step,
        }
    }
}

/// Run the whole procedure.
pub async fn launch(
    runner: &dyn CommandRunner,
    plan: &LaunchPlan,
    on_event: &(dyn Fn(&LaunchEvent) + Send + Sync),
) -> Result<LaunchReport, LaunchError> {
    let (interpreter, version) = locate_interpreter(runner, &plan.interpreter_candidates).await?;
    tracing::info!(interpreter = %interpreter.display(), ?version, "Python interpreter found");
    on_event(&LaunchEvent::InterpreterFound {
        path: interpreter.clone(),
        version: version.clone(),
    });

    let upgrade = if plan.upgrade_installer {
        on_event(&LaunchEvent::UpgradingInstaller);
        let outcome = upgrade_installer(runner, &interpreter).await;
        if let UpgradeOutcome::Failed(reason) = &outcome {
            tracing::warn!(%reason, "pip upgrade failed, continuing");
            on_event(&LaunchEvent::InstallerUpgradeFailed {
                reason: reason.clone(),
            });
        }
        outcome
    } else {
        UpgradeOutcome::Skipped
    };

    if !plan.manifest.is_file() {
        return Err(LaunchError::ManifestNotFound(plan.manifest.clone()));
    }

    on_event(&LaunchEvent::InstallingDependencies {
        manifest: plan.manifest.clone(),
    });
    let install_args = vec![
        "-m".to_string(),
        "pip".to_string(),
        "install".to_string(),
        "-r".to_string(),
        plan.manifest.to_string_lossy().into_owned(),
    ];
    let status = runner
        .run(&interpreter, &install_args)
        .await
        .map_err(|e| LaunchError::Spawn {
            step: LaunchStep::InstallDependencies,
            reason: e.to_string(),
        })?;
    if !status.success() {
        return Err(LaunchError::InstallFailed {
            manifest: plan.manifest.clone(),
            status,
        });
    }
    on_event(&LaunchEvent::DependenciesInstalled);

    on_event(&LaunchEvent::LaunchingProgram {
        script: plan.entry_script.clone(),
    });
    let mut program_args = vec![plan.entry_script.to_string_lossy().into_owned()];
    program_args.extend(plan.script_args.iter().cloned());
    let status = runner
        .run(&interpreter, &program_args)
        .await
        .map_err(|e| LaunchError::Spawn {
            step: LaunchStep::RunProgram,
            reason: e.to_string(),
        })?;
    tracing::info!(%status, "Program exited");
    if !status.success() {
        return Err(LaunchError::ProgramFailed {
            script: plan.entry_script.clone(),
            status,
        });
    }

    Ok(LaunchReport {
        interpreter,
        version,
        upgrade,
        status,
    })
}

/// Find the first candidate that resolves on PATH and answers `--version`.
///
/// Candidates that resolve but fail to run (e.g. store aliases) are skipped.
async fn locate_interpreter(
    runner: &dyn CommandRunner,
    candidates: &[String],
) -> Result<(PathBuf, Option<String>), LaunchError> {
    for candidate in candidates {
        let Some(path) = runner.locate(candidate) else {
            tracing::debug!(%candidate, "Not on PATH");
            continue;
        };

        match runner.capture(&path, &["--version".to_string()]).await {
            Ok(output) if output.status.success() => {
                let version = output.first_line().map(parse_python_version);
                return Ok((path, version));
            }
            Ok(output) => {
                tracing::debug!(%candidate, status = %output.status, "Version check failed");
            }
            Err(e) => {
                tracing::debug!(%candidate, error = %e, "Version check could not run");
            }
        }
    }

    Err(LaunchError::InterpreterNotFound {
        tried: candidates.join(", "),
    })
}

async fn upgrade_installer(runner: &dyn CommandRunner, interpreter: &Path) -> UpgradeOutcome {
    let args: Vec<String> = ["-m", "pip", "install", "--upgrade", "pip"]
        .iter()
        .map(|s| (*s).to_string())
        .collect();

    match runner.run(interpreter, &args).await {
        Ok(status) if status.success() => UpgradeOutcome::Upgraded,
        Ok(status) => UpgradeOutcome::Failed(status.to_string()),
        Err(e) => UpgradeOutcome::Failed(e.to_string()),
    }
}

/// `"Python 3.12.1"` -> `"3.12.1"`; anything else is returned trimmed.
fn parse_python_version(line: &str) -> String {
    let line = line.trim();
    line.strip_prefix("Python ").unwrap_or(line).trim().to_string()
}
