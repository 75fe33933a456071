//! Acceptance test: runs the application as a subprocess and asserts its
//! output for given argument combinations matches what is expected.

#![forbid(unsafe_code)]

use std::net::SocketAddr;

use anyhow::Result;
use assert_cmd::Command;
use exam_server::config::ExamServerConfig;
use predicates::prelude::predicate;
use rstest::{fixture, rstest};

use crate::_impl::{AssertCmdExt, Fixture};

#[fixture]
fn setup() -> Result<Command> {
    let runner = Command::cargo_bin(env!("CARGO_PKG_NAME").replace('_', "-"))?;

    Ok(runner)
}

#[rstest]
fn test_version_no_args_passes(setup: Result<Command>) -> Result<()> {
    let assert = setup?.arg("--version").assert();

    assert
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")))
        .success();

    Ok(())
}

#[rstest]
fn test_serve_help_lists_storage_options(setup: Result<Command>) -> Result<()> {
    let assert = setup?.args(["serve", "--help"]).assert();

    assert
        .stdout(predicate::str::contains("--listen"))
        .stdout(predicate::str::contains("--exams-dir"))
        .stdout(predicate::str::contains("--answer-keys-dir"))
        .stdout(predicate::str::contains("--disposition"))
        .success();

    Ok(())
}

#[rstest]
fn test_unknown_subcommand_fails(setup: Result<Command>) -> Result<()> {
    setup?.arg("upload").assert().failure();

    Ok(())
}

/// Use command-line argument value
#[rstest]
#[ignore = "binds a local port"]
fn test_serve_with_args_passes(setup: Result<Command>) -> Result<()> {
    let fixture = Fixture::new();

    let assert = setup?
        .test_mode_args()
        .arg("serve")
        .args(["--listen", "127.0.0.1:8091"])
        .fixture_args(&fixture)
        .assert();

    assert
        .stdout(predicate::str::contains("Project root"))
        .stdout(predicate::str::contains("Starting web server ..."))
        .stdout(predicate::str::contains(
            "Listening on: `http://127.0.0.1:8091`",
        ))
        .stdout(predicate::str::contains("Shutting down gracefully ..."))
        .success();

    Ok(())
}

/// Command-line values take precedence over the configuration file
#[rstest]
#[ignore = "binds a local port"]
fn test_serve_with_config_and_args(setup: Result<Command>) -> Result<()> {
    let fixture = Fixture::new();

    let mut config = ExamServerConfig::default();
    config.server.listen = Some(SocketAddr::from(([127, 0, 0, 1], 8092)));
    config.storage.project_root = Some(fixture.path().to_path_buf());
    config.storage.exams_dir = Some("exams".into());
    config.storage.answer_keys_dir = Some("answer_keys".into());
    let config_path = fixture.write_config(&config);

    let assert = setup?
        .test_mode_args()
        .args(["-c", &config_path])
        .arg("serve")
        .args(["--listen", "127.0.0.1:8093"])
        .assert();

    assert
        .stdout(predicate::str::contains("Using configuration file:"))
        .stdout(predicate::str::contains(
            "Listening on: `http://127.0.0.1:8093`",
        ))
        .stdout(predicate::str::contains("Shutting down gracefully ..."))
        .success();

    Ok(())
}
