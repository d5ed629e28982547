//! Core data model shared by every layer: dataset records, the user's
//! answers and the derived ranking entries.

pub mod types;

pub use types::{AnswerMap, Choice, Question, StateCode, StateProfile, StateScore};
