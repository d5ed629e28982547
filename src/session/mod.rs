//! The hand-off between finishing the quiz and rendering results.
//!
//! A [`SessionContext`] is created when the quiz completes, read whenever
//! results are rendered and cleared on reset. Reading a session that was
//! never created yields [`SessionError::Missing`], which the result commands
//! treat as "send the user back to the quiz".

use crate::core::AnswerMap;
use crate::errors::SessionError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Well-known key the saved answers live under.
pub const QUIZ_ANSWERS_KEY: &str = "quiz_answers";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionContext {
    pub answers: AnswerMap,
    pub created_at: DateTime<Utc>,
    /// Set once the checkout hand-off succeeded.
    #[serde(default)]
    pub unlocked: bool,
    /// Address given at checkout; reused for report delivery.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl SessionContext {
    pub fn new(answers: AnswerMap) -> Self {
        Self {
            answers,
            created_at: Utc::now(),
            unlocked: false,
            email: None,
        }
    }

    pub fn unlock(&mut self, email: impl Into<String>) {
        self.unlocked = true;
        self.email = Some(email.into());
    }
}

pub trait SessionStore {
    /// Read the stored context.
    fn read(&self) -> Result<SessionContext, SessionError>;

    /// Persist `context`, replacing whatever was stored.
    fn write(&self, context: &SessionContext) -> Result<(), SessionError>;

    /// Remove the stored context. Clearing an empty store is not an error.
    fn clear(&self) -> Result<(), SessionError>;

    /// Start a fresh session for newly completed answers.
    fn create(&self, answers: AnswerMap) -> Result<SessionContext, SessionError> {
        let context = SessionContext::new(answers);
        self.write(&context)?;
        Ok(context)
    }
}

/// Stores the session as `<dir>/quiz_answers.json`.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    dir: PathBuf,
}

impl FileSessionStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Per-user data directory, falling back to the system temp dir.
    pub fn default_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join("statematch")
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(format!("{QUIZ_ANSWERS_KEY}.json"))
    }

    fn storage_error(&self, source: std::io::Error) -> SessionError {
        SessionError::Storage {
            path: self.path(),
            source,
        }
    }
}

impl SessionStore for FileSessionStore {
    fn read(&self) -> Result<SessionContext, SessionError> {
        let path = self.path();
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(SessionError::Missing {
                    key: QUIZ_ANSWERS_KEY,
                })
            }
            Err(e) => return Err(self.storage_error(e)),
        };

        serde_json::from_str(&contents).map_err(|e| SessionError::Corrupt {
            path,
            message: e.to_string(),
        })
    }

    fn write(&self, context: &SessionContext) -> Result<(), SessionError> {
        fs::create_dir_all(&self.dir).map_err(|e| self.storage_error(e))?;
        let json = serde_json::to_string_pretty(context).map_err(|e| SessionError::Corrupt {
            path: self.path(),
            message: e.to_string(),
        })?;
        fs::write(self.path(), json).map_err(|e| self.storage_error(e))?;
        tracing::debug!(path = %self.path().display(), "Saved session");
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        match fs::remove_file(self.path()) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.storage_error(e)),
        }
    }
}

/// In-memory store for tests and embedding.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    slot: RefCell<Option<SessionContext>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn read(&self) -> Result<SessionContext, SessionError> {
        self.slot.borrow().clone().ok_or(SessionError::Missing {
            key: QUIZ_ANSWERS_KEY,
        })
    }

    fn write(&self, context: &SessionContext) -> Result<(), SessionError> {
        *self.slot.borrow_mut() = Some(context.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        self.slot.borrow_mut().take();
        Ok(())
    }
}
