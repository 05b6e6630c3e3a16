//! Launch command handler: install requirements and start the Python edition.
//!
//! Progress and failures are printed here; the caller only receives the exit
//! code to use.

use std::path::Path;

use anyhow::{Context, Result};
use pedal_core::services::{LaunchEvent, LaunchPlan, launch};
use pedal_core::{CommandRunner, PauseMode, Settings};
use pedal_runtime::TokioCommandRunner;

use crate::bootstrap::bootstrap;
use crate::commands::LaunchArgs;
use crate::utils::input::wait_for_enter;

// ANSI color codes
const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// Run the procedure from the current directory and return the exit code.
pub async fn execute(settings: &Settings, args: LaunchArgs) -> Result<i32> {
    let base_dir = std::env::current_dir().context("Failed to read the current directory")?;
    let (plan, pause) = build_plan(settings, args, &base_dir);
    run_plan(&TokioCommandRunner, &plan, pause).await
}

/// Settings for the argument-less launcher.
///
/// An unreadable or invalid profile is reported and replaced by defaults, so
/// the procedure still runs and exits only with its own codes.
pub fn standalone_settings(data_dir: Option<&str>) -> Settings {
    match bootstrap(data_dir) {
        Ok(ctx) => ctx.profile.settings,
        Err(e) => {
            tracing::warn!(error = %e, "Profile unusable, launching with default settings");
            eprintln!("{YELLOW}! {e}; using default settings{RESET}");
            Settings::default()
        }
    }
}

/// Apply command-line overrides on top of the stored settings.
pub fn build_plan(
    settings: &Settings,
    args: LaunchArgs,
    base_dir: &Path,
) -> (LaunchPlan, PauseMode) {
    let mut plan = LaunchPlan::from_settings(settings, base_dir);
    if let Some(script) = args.script {
        plan.entry_script = base_dir.join(script);
    }
    if let Some(manifest) = args.manifest {
        plan.manifest = base_dir.join(manifest);
    }
    if let Some(python) = args.python {
        plan.interpreter_candidates = vec![python];
    }
    if args.skip_upgrade {
        plan.upgrade_installer = false;
    }
    plan.script_args = args.args;

    let pause = if args.no_pause {
        PauseMode::Never
    } else {
        settings.effective_pause()
    };
    (plan, pause)
}

/// Run a plan, report the outcome and pause if asked to.
pub async fn run_plan(
    runner: &dyn CommandRunner,
    plan: &LaunchPlan,
    pause: PauseMode,
) -> Result<i32> {
    let print = |event: &LaunchEvent| println!("{}", describe_event(event));
    let result = launch(runner, plan, &print).await;

    let code = match &result {
        Ok(report) => {
            tracing::debug!(
                interpreter = %report.interpreter.display(),
                status = %report.status,
                "Launch finished"
            );
            println!("{GREEN}✓ {} finished{RESET}", plan.entry_script.display());
            0
        }
        Err(e) => {
            eprintln!("{RED}{BOLD}✗ {e}{RESET}");
            tracing::debug!(step = %e.step(), "Launch stopped");
            e.exit_code()
        }
    };

    if pause.should_pause(code != 0) {
        wait_for_enter("Press Enter to close...")?;
    }
    Ok(code)
}

/// One progress line per event.
pub fn describe_event(event: &LaunchEvent) -> String {
    match event {
        LaunchEvent::InterpreterFound { path, version } => match version {
            Some(version) => format!("{GREEN}✓{RESET} Python {version} ({})", path.display()),
            None => format!("{GREEN}✓{RESET} Python found ({})", path.display()),
        },
        LaunchEvent::UpgradingInstaller => "Upgrading pip...".to_string(),
        LaunchEvent::InstallerUpgradeFailed { reason } => {
            format!("{YELLOW}! Could not upgrade pip ({reason}), continuing{RESET}")
        }
        LaunchEvent::InstallingDependencies { manifest } => {
            format!("Installing dependencies from {}...", manifest.display())
        }
        LaunchEvent::DependenciesInstalled => format!("{GREEN}✓{RESET} Dependencies installed"),
        LaunchEvent::LaunchingProgram { script } => {
            format!("{BOLD}Starting {}...{RESET}", script.display())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use pedal_core::{CommandOutput, CommandStatus, CoreError};
    use std::path::PathBuf;

    /// Finds `python3` when asked to and exits the entry script with a fixed code.
    struct FixedRunner {
        python: bool,
        program_code: Option<i32>,
    }

    #[async_trait]
    impl CommandRunner for FixedRunner {
        fn locate(&self, program: &str) -> Option<PathBuf> {
            (self.python && program == "python3").then(|| PathBuf::from("/usr/bin/python3"))
        }

        async fn capture(&self, _: &Path, _: &[String]) -> Result<CommandOutput, CoreError> {
            Ok(CommandOutput {
                status: CommandStatus::from_code(0),
                stdout: "Python 3.12.1".to_string(),
                stderr: String::new(),
            })
        }

        async fn run(&self, _: &Path, args: &[String]) -> Result<CommandStatus, CoreError> {
            if args.first().is_some_and(|a| a == "-m") {
                return Ok(CommandStatus::from_code(0));
            }
            Ok(CommandStatus {
                code: self.program_code,
            })
        }
    }

    fn plan_in(dir: &Path) -> LaunchPlan {
        std::fs::write(dir.join("requirements.txt"), "numpy\n").unwrap();
        LaunchPlan {
            interpreter_candidates: vec!["python3".to_string()],
            ..LaunchPlan::from_settings(&Settings::default(), dir)
        }
    }

    #[tokio::test]
    async fn test_run_plan_returns_program_code() {
        let temp = tempfile::tempdir().unwrap();
        let runner = FixedRunner {
            python: true,
            program_code: Some(3),
        };
        let code = run_plan(&runner, &plan_in(temp.path()), PauseMode::Never)
            .await
            .unwrap();
        assert_eq!(code, 3);
    }

    #[tokio::test]
    async fn test_run_plan_success_and_signal() {
        let temp = tempfile::tempdir().unwrap();
        let plan = plan_in(temp.path());

        let ok = FixedRunner {
            python: true,
            program_code: Some(0),
        };
        assert_eq!(run_plan(&ok, &plan, PauseMode::Never).await.unwrap(), 0);

        let killed = FixedRunner {
            python: true,
            program_code: None,
        };
        assert_eq!(run_plan(&killed, &plan, PauseMode::Never).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_run_plan_without_interpreter() {
        let temp = tempfile::tempdir().unwrap();
        let runner = FixedRunner {
            python: false,
            program_code: Some(0),
        };
        let code = run_plan(&runner, &plan_in(temp.path()), PauseMode::Never)
            .await
            .unwrap();
        assert_eq!(code, 1);
    }

    #[test]
    fn test_standalone_settings_falls_back_on_broken_profile() {
        let temp = tempfile::tempdir().unwrap();
        std::fs::write(temp.path().join("profile.json"), "{ nope").unwrap();
        assert_eq!(standalone_settings(temp.path().to_str()), Settings::default());
    }

    #[test]
    fn test_standalone_settings_reads_profile() {
        let temp = tempfile::tempdir().unwrap();
        let mut ctx = bootstrap(temp.path().to_str()).unwrap();
        ctx.profile.settings.pause = Some(PauseMode::Never);
        ctx.save().unwrap();

        assert_eq!(
            standalone_settings(temp.path().to_str()).effective_pause(),
            PauseMode::Never
        );
    }

    #[test]
    fn test_plan_uses_settings() {
        let settings = Settings {
            manifest_path: Some("deps/requirements.txt".into()),
            upgrade_installer: Some(false),
            pause: Some(PauseMode::Always),
            ..Settings::default()
        };
        let (plan, pause) = build_plan(&settings, LaunchArgs::default(), Path::new("/opt/pedal"));

        assert_eq!(plan.manifest, PathBuf::from("/opt/pedal/deps/requirements.txt"));
        assert_eq!(plan.entry_script, PathBuf::from("/opt/pedal/pedal_assistant.py"));
        assert!(!plan.upgrade_installer);
        assert_eq!(pause, PauseMode::Always);
    }

    #[test]
    fn test_flags_override_settings() {
        let args = LaunchArgs {
            script: Some("other.py".into()),
            python: Some("python3.12".into()),
            skip_upgrade: true,
            no_pause: true,
            args: vec!["--demo".into()],
            ..LaunchArgs::default()
        };
        let (plan, pause) = build_plan(&Settings::default(), args, Path::new("/opt/pedal"));

        assert_eq!(plan.entry_script, PathBuf::from("/opt/pedal/other.py"));
        assert_eq!(plan.interpreter_candidates, vec!["python3.12".to_string()]);
        assert_eq!(plan.script_args, vec!["--demo".to_string()]);
        assert!(!plan.upgrade_installer);
        assert_eq!(pause, PauseMode::Never);
    }

    #[test]
    fn test_default_pause_is_on_error() {
        let (_, pause) = build_plan(&Settings::default(), LaunchArgs::default(), Path::new("."));
        assert_eq!(pause, PauseMode::OnError);
    }

    #[test]
    fn test_describe_events() {
        let found = describe_event(&LaunchEvent::InterpreterFound {
            path: PathBuf::from("/usr/bin/python3"),
            version: Some("3.12.1".into()),
        });
        assert!(found.contains("Python 3.12.1 (/usr/bin/python3)"));

        let warned = describe_event(&LaunchEvent::InstallerUpgradeFailed {
            reason: "exit code 1".into(),
        });
        assert!(warned.contains("continuing"));

        let installing = describe_event(&LaunchEvent::InstallingDependencies {
            manifest: PathBuf::from("requirements.txt"),
        });
        assert_eq!(installing, "Installing dependencies from requirements.txt...");
    }
}
