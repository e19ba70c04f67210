// fetchbuild: dependency fetch-and-build orchestrator
//
// SPDX-FileCopyrightText: 2026 fetchbuild contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::Path;
use std::sync::Arc;

use super::{DependencyOutcome, Orchestrator, OrchestratorState};
use crate::config::{Config, ConfigLoader};
use crate::error::FetchError;
use crate::task::tools::test_utils::{RecordingRunner, run_with_logs};

fn config_in(root: &Path, toml: &str) -> Config {
    ConfigLoader::new()
        .add_toml_str(toml)
        .with_base_dir(root)
        .build()
        .expect("test config is valid")
}

fn relative(lines: Vec<String>, root: &Path) -> Vec<String> {
    let root = root.display().to_string();
    lines
        .into_iter()
        .map(|line| line.replace(&root, "<root>"))
        .collect()
}

#[test]
fn test_new_orchestrator_is_idle() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let orchestrator = Orchestrator::new(&config_in(tmp.path(), "")).expect("resolved config");

    assert_eq!(orchestrator.state(), OrchestratorState::Idle);
    assert!(!orchestrator.state().is_terminal());
    assert!(!orchestrator.is_dry_run());
    assert_eq!(orchestrator.specs().len(), 4);
}

#[test]
fn test_unresolved_config_is_rejected() {
    let err = Orchestrator::new(&Config::default()).unwrap_err();
    assert!(matches!(err, FetchError::Config(_)));
}

#[cfg(not(windows))]
#[tokio::test]
async fn test_first_run_fetches_in_declared_order() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let runner = Arc::new(RecordingRunner::new().creating_clone_dirs());
    let mut orchestrator = Orchestrator::new(&config_in(tmp.path(), ""))
        .expect("resolved config")
        .with_runner(runner.clone());

    let report = orchestrator.run().await.expect("run succeeds");

    assert_eq!(orchestrator.state(), OrchestratorState::Done);
    assert_eq!(report.fetched_count(), 4);
    assert!(report.project_built());
    assert!(tmp.path().join("externallib/install").is_dir());
    assert!(tmp.path().join("build").is_dir());

    let lines = relative(runner.command_lines(), tmp.path());
    insta::assert_snapshot!(lines[..5].join("\n"), @r"
    git clone https://github.com/openssl/openssl.git <root>/externallib/openssl
    git -c advice.detachedHead=false checkout -q OpenSSL_1_1_1t
    ./config --prefix=<root>/externallib/install --openssldir=<root>/externallib/install/ssl no-shared
    make
    make install_sw
    ");
    insta::assert_snapshot!(lines[lines.len() - 2..].join("\n"), @r"
    cmake <root> -DCMAKE_BUILD_TYPE=Release -DCMAKE_PREFIX_PATH=<root>/externallib/install
    cmake --build . --config Release
    ");

    let clones: Vec<_> = lines
        .iter()
        .filter(|l| l.starts_with("git clone"))
        .map(|l| l.rsplit('/').next().unwrap_or_default().to_string())
        .collect();
    assert_eq!(clones, ["openssl", "paho.mqtt.c", "paho.mqtt.cpp", "spdlog"]);
}

#[tokio::test]
async fn test_steps_run_inside_their_directories() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let runner = Arc::new(RecordingRunner::new().creating_clone_dirs());
    let mut orchestrator = Orchestrator::new(&config_in(tmp.path(), ""))
        .expect("resolved config")
        .with_runner(runner.clone());
    orchestrator.run().await.expect("run succeeds");

    let commands = runner.commands();
    let openssl = tmp.path().join("externallib").join("openssl");
    assert_eq!(commands[0].cwd.as_deref(), Some(tmp.path().join("externallib").as_path()));
    for command in &commands[1..5] {
        assert_eq!(command.cwd.as_deref(), Some(openssl.as_path()), "{command:?}");
    }
    let build = tmp.path().join("build");
    for command in &commands[commands.len() - 2..] {
        assert_eq!(command.cwd.as_deref(), Some(build.as_path()), "{command:?}");
    }
}

#[tokio::test]
async fn test_second_run_skips_everything() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let config = config_in(tmp.path(), "");

    let first = Arc::new(RecordingRunner::new().creating_clone_dirs());
    Orchestrator::new(&config)
        .expect("resolved config")
        .with_runner(first.clone())
        .run()
        .await
        .expect("first run succeeds");

    let second = Arc::new(RecordingRunner::new());
    let report = Orchestrator::new(&config)
        .expect("resolved config")
        .with_runner(second.clone())
        .run()
        .await
        .expect("second run succeeds");

    assert_eq!(report.skipped_count(), 4);
    assert_eq!(report.fetched_count(), 0);
    let lines = second.command_lines();
    assert_eq!(lines.len(), 2, "only the project build runs: {lines:?}");
    assert!(lines.iter().all(|l| !l.starts_with("git ")), "{lines:?}");
}

#[tokio::test]
async fn test_empty_directory_is_not_recloned() {
    let tmp = tempfile::tempdir().expect("tempdir");
    std::fs::create_dir_all(tmp.path().join("externallib").join("openssl")).expect("mkdir");

    let runner = Arc::new(RecordingRunner::new().creating_clone_dirs());
    let report = Orchestrator::new(&config_in(tmp.path(), ""))
        .expect("resolved config")
        .with_runner(runner.clone())
        .run()
        .await
        .expect("run succeeds");

    assert_eq!(report.outcome("openssl"), Some(DependencyOutcome::Skipped));
    assert_eq!(report.outcome("spdlog"), Some(DependencyOutcome::Fetched));
    let lines = runner.command_lines();
    assert!(!lines.iter().any(|l| l.contains("openssl.git")), "{lines:?}");
    assert!(!lines.iter().any(|l| l.contains("install_sw")), "{lines:?}");
}

#[tokio::test]
async fn test_failure_stops_remaining_dependencies_and_project() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let runner = Arc::new(RecordingRunner::failing_on("paho.mqtt.c.git").creating_clone_dirs());
    let mut orchestrator = Orchestrator::new(&config_in(tmp.path(), ""))
        .expect("resolved config")
        .with_runner(runner.clone());

    let err = orchestrator.run().await.expect_err("clone of paho.mqtt.c fails");

    assert_eq!(orchestrator.state(), OrchestratorState::Failed);
    assert!(orchestrator.state().is_terminal());
    let command = err.failed_command().expect("command failure");
    assert!(command.contains("paho.mqtt.c.git"), "{command}");

    let lines = runner.command_lines();
    assert!(lines.last().is_some_and(|l| l.contains("paho.mqtt.c.git")));
    assert!(!lines.iter().any(|l| l.contains("paho.mqtt.cpp")), "{lines:?}");
    assert!(!lines.iter().any(|l| l.contains("spdlog")), "{lines:?}");
    assert!(!lines.iter().any(|l| l.contains("--build .")), "{lines:?}");
    assert!(!tmp.path().join("build").exists(), "project build never started");
}

#[tokio::test]
async fn test_build_step_failure_is_fail_fast() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let runner = Arc::new(RecordingRunner::failing_on("install_sw").creating_clone_dirs());
    let mut orchestrator = Orchestrator::new(&config_in(tmp.path(), ""))
        .expect("resolved config")
        .with_runner(runner.clone());

    let err = orchestrator.run().await.expect_err("openssl install fails");
    assert_eq!(err.failed_command(), Some("make install_sw"));
    assert_eq!(runner.command_lines().len(), 5, "nothing after the failed step");
    assert!(
        tmp.path().join("externallib").join("openssl").exists(),
        "partial clone is left in place"
    );
}

#[tokio::test]
async fn test_cwd_is_unchanged_after_run() {
    let before = std::env::current_dir().expect("cwd");
    let tmp = tempfile::tempdir().expect("tempdir");
    Orchestrator::new(&config_in(tmp.path(), ""))
        .expect("resolved config")
        .with_runner(Arc::new(RecordingRunner::new().creating_clone_dirs()))
        .run()
        .await
        .expect("run succeeds");
    assert_eq!(std::env::current_dir().expect("cwd"), before);
}

#[tokio::test]
async fn test_custom_dependencies_and_project_steps() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let toml = r#"
[project]
configure = ["./configure.sh", "--with-deps={install}"]
compile = ["make", "-j4"]

[[dependencies]]
name = "zlib"
repository = "https://github.com/madler/zlib.git"
build_steps = [["make", "PREFIX={install}", "install"]]
"#;
    let runner = Arc::new(RecordingRunner::new().creating_clone_dirs());
    let report = Orchestrator::new(&config_in(tmp.path(), toml))
        .expect("resolved config")
        .with_runner(runner.clone())
        .run()
        .await
        .expect("run succeeds");

    assert_eq!(report.outcomes().len(), 1);
    let lines = relative(runner.command_lines(), tmp.path());
    let lines: Vec<_> = lines.iter().map(|l| l.replace('\\', "/")).collect();
    insta::assert_snapshot!(lines.join("\n"), @r"
    git clone https://github.com/madler/zlib.git <root>/externallib/zlib
    make PREFIX=<root>/externallib/install install
    ./configure.sh --with-deps=<root>/externallib/install
    make -j4
    ");
}

#[tokio::test]
async fn test_dry_run_creates_nothing() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let config = config_in(tmp.path(), "[global]\ndry = true");

    let logs = run_with_logs(|| async {
        let mut orchestrator = Orchestrator::new(&config)?;
        assert!(orchestrator.is_dry_run());
        let report = orchestrator.run().await?;
        assert_eq!(report.fetched_count(), 4);
        Ok::<(), anyhow::Error>(())
    })
    .await
    .expect("dry run succeeds");

    assert!(!tmp.path().join("externallib").exists());
    assert!(!tmp.path().join("build").exists());
    assert!(logs.contains("[dry-run] Would run"), "{logs}");
    assert!(logs.contains("[dry-run] Would create directory"), "{logs}");
    assert!(logs.contains("openssl.git"), "{logs}");
}

#[tokio::test]
async fn test_unwritable_external_root_is_io_failure() {
    let tmp = tempfile::tempdir().expect("tempdir");
    std::fs::write(tmp.path().join("blocker"), "not a directory").expect("write");
    let config = config_in(tmp.path(), "[paths]\nexternal = \"blocker/externallib\"");

    let runner = Arc::new(RecordingRunner::new());
    let mut orchestrator = Orchestrator::new(&config)
        .expect("resolved config")
        .with_runner(runner.clone());
    let err = orchestrator.run().await.expect_err("cannot create under a file");

    assert!(matches!(err, FetchError::Fs(_)), "{err}");
    assert_eq!(orchestrator.state(), OrchestratorState::Failed);
    assert!(runner.command_lines().is_empty());
}

#[tokio::test]
async fn test_nested_directory_parent_is_created_before_clone() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let toml = r#"
[[dependencies]]
name = "demo"
repository = "https://example.com/demo.git"
directory = "vendor/third/demo"
shallow = true
"#;
    let runner = Arc::new(RecordingRunner::new().creating_clone_dirs());
    let report = Orchestrator::new(&config_in(tmp.path(), toml))
        .expect("resolved config")
        .with_runner(runner.clone())
        .run()
        .await
        .expect("run succeeds");

    assert_eq!(report.outcome("demo"), Some(DependencyOutcome::Fetched));
    let parent = tmp.path().join("externallib").join("vendor").join("third");
    let clone = &runner.commands()[0];
    assert_eq!(clone.cwd.as_deref(), Some(parent.as_path()));
    assert!(parent.is_dir());

    let line = clone.command.replace(&tmp.path().display().to_string(), "<root>");
    insta::assert_snapshot!(line.replace('\\', "/"), @"git clone --depth 1 https://example.com/demo.git <root>/externallib/vendor/third/demo");
}

#[cfg(unix)]
#[tokio::test]
async fn test_absolute_directory_parent_is_created_before_clone() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let target = tmp.path().join("elsewhere").join("deps").join("demo");
    let toml = format!(
        "[[dependencies]]\nname = \"demo\"\nrepository = \"https://example.com/demo.git\"\ndirectory = '{}'\n",
        target.display()
    );
    let runner = Arc::new(RecordingRunner::new().creating_clone_dirs());
    Orchestrator::new(&config_in(tmp.path(), &toml))
        .expect("resolved config")
        .with_runner(runner.clone())
        .run()
        .await
        .expect("run succeeds");

    assert!(tmp.path().join("elsewhere").join("deps").is_dir());
    assert!(!runner.command_lines()[0].contains("--depth"));
}
