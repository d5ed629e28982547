//! Static reference data: the state records and the weighted questions.
//!
//! A [`Dataset`] is built once, validated, and then only ever borrowed. The
//! scoring engine, quiz flow and renderers all take `&Dataset`, so tests can
//! inject small synthetic datasets instead of the bundled one.

pub mod loader;
pub mod validation;

pub use loader::{load_dir, parse_collection, DataFormat};
pub use validation::{collect_issues, validate, DatasetIssue};

use crate::core::{Question, StateProfile};
use crate::errors::DatasetError;
use std::collections::HashMap;
use std::path::Path;

const BUNDLED_STATES: &str = include_str!("../../data/states.json");
const BUNDLED_QUESTIONS: &str = include_str!("../../data/questions.json");

#[derive(Debug, Clone)]
pub struct Dataset {
    states: Vec<StateProfile>,
    questions: Vec<Question>,
    state_positions: HashMap<String, usize>,
}

impl Dataset {
    /// Validate the records and build the lookup index.
    pub fn new(states: Vec<StateProfile>, questions: Vec<Question>) -> Result<Self, DatasetError> {
        validate(&states, &questions)?;

        let state_positions = states
            .iter()
            .enumerate()
            .map(|(position, state)| (state.state_code.clone(), position))
            .collect();

        Ok(Self {
            states,
            questions,
            state_positions,
        })
    }

    /// The dataset compiled into the binary (50 states, 30 questions).
    pub fn bundled() -> Result<Self, DatasetError> {
        let states = parse_collection(DataFormat::Json, BUNDLED_STATES, "bundled states.json")?;
        let questions =
            parse_collection(DataFormat::Json, BUNDLED_QUESTIONS, "bundled questions.json")?;
        Self::new(states, questions)
    }

    /// Load from a data directory, see [`loader::load_dir`].
    pub fn load(dir: &Path) -> Result<Self, DatasetError> {
        load_dir(dir)
    }

    pub fn states(&self) -> &[StateProfile] {
        &self.states
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn state(&self, code: &str) -> Option<&StateProfile> {
        self.state_position(code).map(|position| &self.states[position])
    }

    /// Index of `code` in [`Dataset::states`].
    pub fn state_position(&self, code: &str) -> Option<usize> {
        self.state_positions.get(code).copied()
    }

    pub fn question(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|question| question.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_dataset_is_complete_and_valid() {
        let dataset = Dataset::bundled().unwrap();
        assert_eq!(dataset.states().len(), 50);
        assert_eq!(dataset.questions().len(), 30);
        assert!(dataset
            .states()
            .iter()
            .all(|state| !state.top_cities.is_empty()));
    }

    #[test]
    fn lookups_resolve_by_identifier() {
        let dataset = Dataset::bundled().unwrap();
        assert_eq!(dataset.state("CO").unwrap().state_name, "Colorado");
        assert!(dataset.state("ZZ").is_none());
        assert!(dataset.question("climate").is_some());
        let position = dataset.state_position("AL").unwrap();
        assert_eq!(dataset.states()[position].state_code, "AL");
    }
}
