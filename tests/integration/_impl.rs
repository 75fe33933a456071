use std::{path::Path, time::Duration};

use assert_cmd::Command;
use exam_server::config::ExamServerConfig;
use tempfile::TempDir;

/// Temporary project layout with `exams/` and `answer_keys/` side by side
pub struct Fixture {
    pub root: TempDir,
}

impl Fixture {
    pub fn new() -> Self {
        let root = tempfile::tempdir().expect("create temp dir");
        std::fs::create_dir(root.path().join("exams")).expect("create exams dir");
        std::fs::create_dir(root.path().join("answer_keys")).expect("create answer_keys dir");
        Self { root }
    }

    pub fn path(&self) -> &Path {
        self.root.path()
    }

    /// Serialize `config` next to the directories and return its path
    pub fn write_config(&self, config: &ExamServerConfig) -> String {
        let path = self.path().join("exam_server.toml");
        config.to_file(&path).expect("write config file");
        path.display().to_string()
    }
}

pub trait AssertCmdExt {
    /// Point the server at the fixture directories
    fn fixture_args(&mut self, fixture: &Fixture) -> &mut Self;

    /// Enable test mode
    fn test_mode_args(&mut self) -> &mut Self;
}

impl AssertCmdExt for Command {
    fn fixture_args(&mut self, fixture: &Fixture) -> &mut Self {
        self.args(["--project-root", &fixture.path().display().to_string()])
            .args(["--exams-dir", "exams"])
            .args(["--answer-keys-dir", "answer_keys"])
    }

    fn test_mode_args(&mut self) -> &mut Self {
        self.timeout(Duration::from_secs(10)) // Set a timeout of 10 seconds
            .args(["-v"]) // Enable verbose logging
            .env("CI", "1"); // Stop on its own after a few seconds

        self
    }
}
