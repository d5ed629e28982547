//! Structural checks run on every dataset before it is handed out.
//!
//! All issues are collected in one pass so a content editor sees the full
//! list instead of fixing problems one load at a time.

use crate::core::{Question, StateProfile};
use crate::errors::DatasetError;
use std::collections::HashSet;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DatasetIssue {
    #[error("state with empty state code")]
    EmptyStateCode,

    #[error("duplicate state code '{0}'")]
    DuplicateState(String),

    #[error("state '{0}' has no top cities")]
    MissingTopCities(String),

    #[error("question with empty id")]
    EmptyQuestionId,

    #[error("duplicate question id '{0}'")]
    DuplicateQuestion(String),

    #[error("question '{0}' has no choices")]
    NoChoices(String),

    #[error("question '{question}' repeats choice id '{choice}'")]
    DuplicateChoice { question: String, choice: String },

    #[error("choice '{choice}' of question '{question}' weights unknown state '{state}'")]
    UnknownWeightState {
        question: String,
        choice: String,
        state: String,
    },
}

pub fn validate(states: &[StateProfile], questions: &[Question]) -> Result<(), DatasetError> {
    let issues = collect_issues(states, questions);
    if issues.is_empty() {
        Ok(())
    } else {
        Err(DatasetError::Invalid { issues })
    }
}

pub fn collect_issues(states: &[StateProfile], questions: &[Question]) -> Vec<DatasetIssue> {
    let mut issues = state_issues(states);
    let known: HashSet<&str> = states.iter().map(|s| s.state_code.as_str()).collect();
    issues.extend(question_issues(questions, &known));
    issues
}

fn state_issues(states: &[StateProfile]) -> Vec<DatasetIssue> {
    let mut seen = HashSet::new();
    let mut issues = Vec::new();

    for state in states {
        if state.state_code.trim().is_empty() {
            issues.push(DatasetIssue::EmptyStateCode);
            continue;
        }
        if !seen.insert(state.state_code.as_str()) {
            issues.push(DatasetIssue::DuplicateState(state.state_code.clone()));
        }
        if state.top_cities.is_empty() {
            issues.push(DatasetIssue::MissingTopCities(state.state_code.clone()));
        }
    }

    issues
}

fn question_issues(questions: &[Question], known_states: &HashSet<&str>) -> Vec<DatasetIssue> {
    let mut seen = HashSet::new();
    let mut issues = Vec::new();

    for question in questions {
        if question.id.trim().is_empty() {
            issues.push(DatasetIssue::EmptyQuestionId);
        } else if !seen.insert(question.id.as_str()) {
            issues.push(DatasetIssue::DuplicateQuestion(question.id.clone()));
        }
        if question.choices.is_empty() {
            issues.push(DatasetIssue::NoChoices(question.id.clone()));
        }

        let mut choice_ids = HashSet::new();
        for choice in &question.choices {
            if !choice_ids.insert(choice.id.as_str()) {
                issues.push(DatasetIssue::DuplicateChoice {
                    question: question.id.clone(),
                    choice: choice.id.clone(),
                });
            }
            issues.extend(
                choice
                    .weights
                    .keys()
                    .filter(|state| !known_states.contains(state.as_str()))
                    .map(|state| DatasetIssue::UnknownWeightState {
                        question: question.id.clone(),
                        choice: choice.id.clone(),
                        state: state.clone(),
                    }),
            );
        }
    }

    issues
}
