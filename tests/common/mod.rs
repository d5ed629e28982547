// Test utility module for statematch integration tests
#![allow(dead_code)]

use assert_cmd::Command;
use statematch::{AnswerMap, Dataset};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated working directory and session store for one CLI test.
pub struct CliEnv {
    pub temp: TempDir,
}

impl CliEnv {
    pub fn new() -> Self {
        Self {
            temp: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    pub fn root(&self) -> &Path {
        self.temp.path()
    }

    pub fn session_dir(&self) -> PathBuf {
        self.root().join("session")
    }

    /// `statematch` running inside the temp dir with plain output.
    #[allow(deprecated)]
    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("statematch").expect("binary should be built");
        cmd.current_dir(self.root())
            .env_remove("STATEMATCH_CONFIG")
            .env_remove("STATEMATCH_DATA_DIR")
            .env_remove("RUST_LOG")
            .env("STATEMATCH_SESSION_DIR", self.session_dir())
            .env("NO_COLOR", "1")
            .arg("--plain");
        cmd
    }

    /// Write `answers` as JSON and return the file path.
    pub fn write_answers(&self, answers: &AnswerMap) -> PathBuf {
        let path = self.root().join("answers.json");
        let json = serde_json::to_string_pretty(answers).expect("answers serialize");
        std::fs::write(&path, json).expect("Failed to write answers file");
        path
    }

    pub fn write_file(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.root().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent dir");
        }
        std::fs::write(&path, contents).expect("Failed to write test file");
        path
    }
}

impl Default for CliEnv {
    fn default() -> Self {
        Self::new()
    }
}

pub fn bundled() -> Dataset {
    Dataset::bundled().expect("bundled dataset is valid")
}

/// Answers that favour the west coast: mild climate, coastal, progressive.
pub fn west_coast_answers() -> AnswerMap {
    [
        ("climate", "climate_mild"),
        ("coast", "coast_must"),
        ("politics", "politics_lib"),
    ]
    .into_iter()
    .collect()
}

/// The first choice of every question.
pub fn first_choice_answers(dataset: &Dataset) -> AnswerMap {
    dataset
        .questions()
        .iter()
        .map(|q| (q.id.clone(), q.choices[0].id.clone()))
        .collect()
}

pub fn stdout_of(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}
