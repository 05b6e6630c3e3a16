//! Behaviour of the install-and-launch procedure against a scripted runner.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;
use pedal_core::services::{LaunchError, LaunchEvent, LaunchPlan, UpgradeOutcome, launch};
use pedal_core::{CommandOutput, CommandRunner, CommandStatus, CoreError};
use tempfile::TempDir;

/// Runner that resolves a fixed set of programs and replays scripted exit codes.
#[derive(Default)]
struct ScriptedRunner {
    on_path: HashMap<String, PathBuf>,
    version_codes: HashMap<PathBuf, i32>,
    upgrade_code: i32,
    install_code: i32,
    program_code: Option<i32>,
    calls: Mutex<Vec<Vec<String>>>,
}

impl ScriptedRunner {
    fn with_python(name: &str) -> Self {
        let path = PathBuf::from(format!("/usr/bin/{name}"));
        let mut runner = Self {
            program_code: Some(0),
            ..Self::default()
        };
        runner.on_path.insert(name.to_string(), path.clone());
        runner.version_codes.insert(path, 0);
        runner
    }

    fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().unwrap().clone()
    }

    fn ran(&self, needle: &str) -> bool {
        self.calls()
            .iter()
            .any(|call| call.iter().any(|arg| arg == needle))
    }
}

#[async_trait]
impl CommandRunner for ScriptedRunner {
    fn locate(&self, program: &str) -> Option<PathBuf> {
        self.on_path.get(program).cloned()
    }

    async fn capture(&self, program: &Path, args: &[String]) -> Result<CommandOutput, CoreError> {
        let mut call = vec![program.display().to_string()];
        call.extend(args.iter().cloned());
        self.calls.lock().unwrap().push(call);

        let code = self.version_codes.get(program).copied().unwrap_or(127);
        Ok(CommandOutput {
            status: CommandStatus::from_code(code),
            stdout: "Python 3.12.1\n".to_string(),
            stderr: String::new(),
        })
    }

    async fn run(&self, program: &Path, args: &[String]) -> Result<CommandStatus, CoreError> {
        let mut call = vec![program.display().to_string()];
        call.extend(args.iter().cloned());
        self.calls.lock().unwrap().push(call);

        let code = if args.iter().any(|a| a == "--upgrade") {
            Some(self.upgrade_code)
        } else if args.iter().any(|a| a == "-r") {
            Some(self.install_code)
        } else {
            self.program_code
        };
        Ok(CommandStatus { code })
    }
}

fn plan_in(dir: &TempDir, candidates: &[&str]) -> LaunchPlan {
    let manifest = dir.path().join("requirements.txt");
    std::fs::write(&manifest, "pygame\nnumpy\n").unwrap();
    LaunchPlan {
        interpreter_candidates: candidates.iter().map(|s| (*s).to_string()).collect(),
        manifest,
        entry_script: dir.path().join("pedal_assistant.py"),
        script_args: Vec::new(),
        upgrade_installer: true,
    }
}

#[tokio::test]
async fn missing_interpreter_attempts_no_installation() {
    let dir = tempfile::tempdir().unwrap();
    let runner = ScriptedRunner::default();
    let plan = plan_in(&dir, &["python3", "python"]);

    let err = launch(&runner, &plan, &|_| {}).await.unwrap_err();

    assert!(matches!(err, LaunchError::InterpreterNotFound { .. }));
    assert_eq!(err.exit_code(), 1);
    assert!(err.to_string().contains("python3, python"));
    assert!(runner.calls().is_empty());
}

#[tokio::test]
async fn broken_candidate_is_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let mut runner = ScriptedRunner::with_python("python");
    runner
        .on_path
        .insert("python3".to_string(), PathBuf::from("/stub/python3"));
    let plan = plan_in(&dir, &["python3", "python"]);

    let report = launch(&runner, &plan, &|_| {}).await.unwrap();

    assert_eq!(report.interpreter, PathBuf::from("/usr/bin/python"));
    assert_eq!(report.version.as_deref(), Some("3.12.1"));
}

#[tokio::test]
async fn failed_install_never_runs_program() {
    let dir = tempfile::tempdir().unwrap();
    let mut runner = ScriptedRunner::with_python("python3");
    runner.install_code = 1;
    let plan = plan_in(&dir, &["python3"]);

    let err = launch(&runner, &plan, &|_| {}).await.unwrap_err();

    assert!(matches!(err, LaunchError::InstallFailed { .. }));
    assert_eq!(err.exit_code(), 1);
    assert!(!runner.ran(&plan.entry_script.display().to_string()));
}

#[tokio::test]
async fn failed_upgrade_is_only_a_warning() {
    let dir = tempfile::tempdir().unwrap();
    let mut runner = ScriptedRunner::with_python("python3");
    runner.upgrade_code = 1;
    let plan = plan_in(&dir, &["python3"]);

    let events = Mutex::new(Vec::new());
    let report = launch(&runner, &plan, &|event| {
        events.lock().unwrap().push(event.clone());
    })
    .await
    .unwrap();

    assert!(matches!(report.upgrade, UpgradeOutcome::Failed(_)));
    assert!(report.status.success());
    let events = events.into_inner().unwrap();
    assert!(
        events
            .iter()
            .any(|e| matches!(e, LaunchEvent::InstallerUpgradeFailed { .. }))
    );
    assert!(matches!(
        events.last(),
        Some(LaunchEvent::LaunchingProgram { .. })
    ));
}

#[tokio::test]
async fn successful_launch_runs_steps_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let runner = ScriptedRunner::with_python("python3");
    let mut plan = plan_in(&dir, &["python3"]);
    plan.script_args = vec!["--device".to_string(), "0".to_string()];

    let report = launch(&runner, &plan, &|_| {}).await.unwrap();
    assert_eq!(report.upgrade, UpgradeOutcome::Upgraded);

    let calls = runner.calls();
    assert_eq!(calls.len(), 4);
    assert_eq!(calls[0][1], "--version");
    assert!(calls[1].contains(&"--upgrade".to_string()));
    assert!(calls[2].contains(&"-r".to_string()));
    assert_eq!(calls[3][1], plan.entry_script.display().to_string());
    assert_eq!(&calls[3][2..], ["--device", "0"]);
}

#[tokio::test]
async fn upgrade_can_be_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let runner = ScriptedRunner::with_python("python3");
    let mut plan = plan_in(&dir, &["python3"]);
    plan.upgrade_installer = false;

    let report = launch(&runner, &plan, &|_| {}).await.unwrap();

    assert_eq!(report.upgrade, UpgradeOutcome::Skipped);
    assert!(!runner.ran("--upgrade"));
}

#[tokio::test]
async fn missing_manifest_stops_before_install() {
    let dir = tempfile::tempdir().unwrap();
    let runner = ScriptedRunner::with_python("python3");
    let mut plan = plan_in(&dir, &["python3"]);
    plan.manifest = dir.path().join("absent.txt");
    plan.upgrade_installer = false;

    let err = launch(&runner, &plan, &|_| {}).await.unwrap_err();

    assert!(matches!(err, LaunchError::ManifestNotFound(_)));
    assert!(!runner.ran("-r"));
}

#[tokio::test]
async fn program_failure_passes_exit_code_through() {
    let dir = tempfile::tempdir().unwrap();
    let mut runner = ScriptedRunner::with_python("python3");
    runner.program_code = Some(4);
    let plan = plan_in(&dir, &["python3"]);

    let err = launch(&runner, &plan, &|_| {}).await.unwrap_err();
    assert!(matches!(err, LaunchError::ProgramFailed { .. }));
    assert_eq!(err.exit_code(), 4);

    runner.program_code = None;
    let err = launch(&runner, &plan, &|_| {}).await.unwrap_err();
    assert_eq!(err.exit_code(), 1);
}
