//! Error types for statematch.
//!
//! Each concern gets its own `thiserror` enum so callers can match on the
//! cases they recover from (a missing session redirects to the quiz, a
//! rate-limited chat call becomes a notice). Commands and the binary wrap
//! them in `anyhow` at the edge.

use crate::dataset::DatasetIssue;
use std::path::PathBuf;
use thiserror::Error;

/// Failures while locating, parsing or validating dataset files.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("no {collection} file found in {} (tried .json, .yaml, .yml, .toml)", dir.display())]
    MissingFile {
        collection: &'static str,
        dir: PathBuf,
    },

    #[error("unsupported dataset format: {}", path.display())]
    UnsupportedFormat { path: PathBuf },

    #[error("failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {origin}: {message}")]
    Parse { origin: String, message: String },

    #[error("invalid dataset ({} issue(s)):\n{}", issues.len(), render_issues(issues))]
    Invalid { issues: Vec<DatasetIssue> },
}

fn render_issues(issues: &[DatasetIssue]) -> String {
    issues
        .iter()
        .map(|issue| format!("  - {issue}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Failures around the stored quiz session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Nothing stored under the session key; callers restart the quiz.
    #[error("no saved answers found under '{key}'")]
    Missing { key: &'static str },

    #[error("saved session at {} is unreadable: {message}", path.display())]
    Corrupt { path: PathBuf, message: String },

    #[error("session storage error at {}", path.display())]
    Storage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SessionError {
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing { .. })
    }
}

/// Invalid moves in the quiz flow.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuizError {
    #[error("the dataset has no questions")]
    NoQuestions,

    #[error("'{choice}' is not a choice for question '{question}'")]
    UnknownChoice { question: String, choice: String },

    #[error("question '{question}' has not been answered yet")]
    NotAnswered { question: String },
}

/// Failures reported by external collaborators (checkout, mailer, chat).
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("{0} is not configured")]
    MissingCredential(&'static str),

    #[error("Rate limit exceeded. Please try again later.")]
    RateLimited,

    #[error("Service temporarily unavailable. Please contact support.")]
    Unavailable,

    #[error("upstream service error (HTTP {status}): {body}")]
    Upstream { status: u16, body: String },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("failed to render report: {0}")]
    Render(String),

    #[error("failed to write {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<reqwest::Error> for ServiceError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

/// Configuration file problems.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("invalid configuration: {0}")]
    Invalid(String),

    #[error("failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_dataset_lists_every_issue() {
        let err = DatasetError::Invalid {
            issues: vec![
                DatasetIssue::DuplicateState("CO".into()),
                DatasetIssue::NoChoices("climate".into()),
            ],
        };
        let text = err.to_string();
        assert!(text.contains("2 issue(s)"));
        assert!(text.contains("duplicate state code 'CO'"));
        assert!(text.contains("question 'climate' has no choices"));
    }

    #[test]
    fn missing_session_is_recognized() {
        let err = SessionError::Missing { key: "quiz_answers" };
        assert!(err.is_missing());

        let wrapped = anyhow::Error::from(err);
        let session = wrapped.downcast_ref::<SessionError>().unwrap();
        assert!(session.is_missing());
    }
}
