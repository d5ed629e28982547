//! Question-by-question navigation through the dataset.
//!
//! [`QuizFlow`] is a pure state machine; [`terminal::run_quiz`] drives it
//! over any reader/writer pair.

pub mod terminal;

pub use terminal::{run_quiz, QuizOutcome};

use crate::core::{AnswerMap, Question};
use crate::dataset::Dataset;
use crate::errors::QuizError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// 1-based number of the current question.
    pub current: usize,
    pub total: usize,
    pub percent: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Advanced,
    Completed(AnswerMap),
}

#[derive(Debug, Clone)]
pub struct QuizFlow<'d> {
    dataset: &'d Dataset,
    index: usize,
    answers: AnswerMap,
}

impl<'d> QuizFlow<'d> {
    pub fn new(dataset: &'d Dataset) -> Result<Self, QuizError> {
        Self::resume(dataset, AnswerMap::new())
    }

    /// Start at the first question while keeping earlier picks.
    pub fn resume(dataset: &'d Dataset, answers: AnswerMap) -> Result<Self, QuizError> {
        if dataset.questions().is_empty() {
            return Err(QuizError::NoQuestions);
        }
        Ok(Self {
            dataset,
            index: 0,
            answers,
        })
    }

    pub fn current(&self) -> &'d Question {
        &self.dataset.questions()[self.index]
    }

    pub fn selected(&self) -> Option<&str> {
        self.answers.choice_for(&self.current().id)
    }

    pub fn answers(&self) -> &AnswerMap {
        &self.answers
    }

    /// Record a pick for the current question, replacing any earlier one.
    pub fn select(&mut self, choice_id: &str) -> Result<(), QuizError> {
        let question = self.current();
        if question.choice(choice_id).is_none() {
            return Err(QuizError::UnknownChoice {
                question: question.id.clone(),
                choice: choice_id.to_string(),
            });
        }
        self.answers.record(question.id.clone(), choice_id);
        Ok(())
    }

    pub fn can_go_next(&self) -> bool {
        self.selected().is_some()
    }

    pub fn can_go_back(&self) -> bool {
        self.index > 0
    }

    pub fn is_last(&self) -> bool {
        self.index + 1 == self.dataset.questions().len()
    }

    pub fn next(&mut self) -> Result<Step, QuizError> {
        if !self.can_go_next() {
            return Err(QuizError::NotAnswered {
                question: self.current().id.clone(),
            });
        }
        if self.is_last() {
            return Ok(Step::Completed(self.answers.clone()));
        }
        self.index += 1;
        Ok(Step::Advanced)
    }

    /// Move to the previous question. Returns false on the first one.
    pub fn back(&mut self) -> bool {
        if self.can_go_back() {
            self.index -= 1;
            true
        } else {
            false
        }
    }

    pub fn progress(&self) -> Progress {
        let total = self.dataset.questions().len();
        let current = self.index + 1;
        Progress {
            current,
            total,
            percent: ((current as f64 / total as f64) * 100.0).round() as u32,
        }
    }
}
