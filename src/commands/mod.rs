//! CLI command implementations.
//!
//! Available commands:
//! - **quiz**: answer the questions and save the session
//! - **results**: ranked states, free preview or full report
//! - **checkout**: unlock the full report
//! - **send-report**: email the full report
//! - **share**: share text and social links
//! - **support**: ask the support assistant
//! - **check-data**: validate a dataset directory
//! - **init**: write a default `.statematch.toml`
//! - **reset**: forget the saved session
//!
//! Commands write user-facing output to the `out` they are given and log
//! through `tracing`.

pub mod check_data;
pub mod checkout;
pub mod init;
pub mod quiz;
pub mod reset;
pub mod results;
pub mod send_report;
pub mod share;
pub mod support;

use crate::cli::GlobalArgs;
use crate::config::{load_config, load_config_from, StateMatchConfig};
use crate::dataset::Dataset;
use crate::formatting::FormattingConfig;
use crate::session::{FileSessionStore, SessionContext, SessionStore};
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Everything a command needs, resolved from flags, config and defaults.
pub struct AppContext {
    pub config: StateMatchConfig,
    pub dataset: Dataset,
    pub store: Box<dyn SessionStore>,
    pub session_dir: PathBuf,
    pub formatting: FormattingConfig,
}

impl AppContext {
    pub fn from_args(args: &GlobalArgs) -> Result<Self> {
        let config = resolve_config(args)?;
        let dataset = resolve_dataset(args, &config)?;
        let session_dir = args
            .session_dir
            .clone()
            .or_else(|| config.session.dir.clone())
            .unwrap_or_else(FileSessionStore::default_dir);
        let formatting = if args.plain {
            FormattingConfig::plain()
        } else {
            FormattingConfig::from_env(args.color)
        };

        tracing::debug!(session_dir = %session_dir.display(), "Resolved session directory");
        Ok(Self {
            store: Box::new(FileSessionStore::new(&session_dir)),
            config,
            dataset,
            session_dir,
            formatting,
        })
    }

    /// Saved session, or a friendly error pointing at the quiz.
    pub fn require_session(&self) -> Result<SessionContext> {
        match self.store.read() {
            Ok(session) => Ok(session),
            Err(e) if e.is_missing() => {
                anyhow::bail!("No quiz answers found. Run `statematch quiz` first.")
            }
            Err(e) => Err(e.into()),
        }
    }
}

pub fn resolve_config(args: &GlobalArgs) -> Result<StateMatchConfig> {
    match &args.config {
        Some(path) => load_config_from(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => Ok(load_config()),
    }
}

pub fn resolve_dataset(args: &GlobalArgs, config: &StateMatchConfig) -> Result<Dataset> {
    match args.data_dir.as_ref().or(config.data.dir.as_ref()) {
        Some(dir) => Dataset::load(dir)
            .with_context(|| format!("Failed to load dataset from {}", dir.display())),
        None => Ok(Dataset::bundled()?),
    }
}
