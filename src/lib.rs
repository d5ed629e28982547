// Export modules for library usage
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod dataset;
pub mod errors;
pub mod formatting;
pub mod io;
pub mod observability;
pub mod quiz;
pub mod report;
pub mod results;
pub mod scoring;
pub mod services;
pub mod session;
pub mod share;

// Re-export commonly used types
pub use crate::core::{AnswerMap, Choice, Question, StateCode, StateProfile, StateScore};

pub use crate::dataset::{load_dir, DataFormat, Dataset, DatasetIssue};

pub use crate::errors::{ConfigError, DatasetError, QuizError, ServiceError, SessionError};

pub use crate::scoring::{
    calculate_scores, explain_score, match_percentages, rank_states, unanswered_questions,
    validate_answers, ScoreBreakdown, ScoringOptions, TieBreak, DEFAULT_RESULT_COUNT,
};

pub use crate::results::{partition, PartitionPolicy, Price, ResultPartition, Segment};

pub use crate::session::{FileSessionStore, MemorySessionStore, SessionContext, SessionStore};

pub use crate::quiz::{Progress, QuizFlow, QuizOutcome, Step};

pub use crate::report::{create_writer, OutputFormat, ReportTier, ReportView, ReportWriter};

pub use crate::config::{load_config, StateMatchConfig};
