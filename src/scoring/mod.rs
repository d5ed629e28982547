//! Weighted-sum scoring of states against a user's answers.
//!
//! Every selected choice adds its per-state weights to a running total.
//! Unanswered questions and dangling choice ids contribute nothing, and the
//! engine never fails: bad input only ever degrades to a zero contribution,
//! and totals saturate at the `i64` bounds instead of overflowing.

pub mod breakdown;

pub use breakdown::{explain_score, Contribution, ScoreBreakdown};

use crate::core::{AnswerMap, StateScore};
use crate::dataset::Dataset;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Number of ranked states returned by [`calculate_scores`] by default.
pub const DEFAULT_RESULT_COUNT: usize = 5;

/// Ordering applied between states with equal totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TieBreak {
    /// Ascending state code.
    #[default]
    StateCode,
    /// Order in which the states appear in the dataset.
    DatasetOrder,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoringOptions {
    pub result_count: usize,
    pub tie_break: TieBreak,
}

impl Default for ScoringOptions {
    fn default() -> Self {
        Self {
            result_count: DEFAULT_RESULT_COUNT,
            tie_break: TieBreak::default(),
        }
    }
}

impl ScoringOptions {
    pub fn with_result_count(mut self, result_count: usize) -> Self {
        self.result_count = result_count;
        self
    }
}

/// Total score per state, indexed like [`Dataset::states`].
pub fn accumulate(dataset: &Dataset, answers: &AnswerMap) -> Vec<i64> {
    let mut totals = vec![0i64; dataset.states().len()];

    for question in dataset.questions() {
        let Some(choice_id) = answers.choice_for(&question.id) else {
            continue;
        };
        let Some(choice) = question.choice(choice_id) else {
            tracing::trace!(
                question = %question.id,
                choice = choice_id,
                "Ignoring answer that matches no choice"
            );
            continue;
        };

        for (state, weight) in &choice.weights {
            if let Some(position) = dataset.state_position(state) {
                totals[position] = totals[position].saturating_add(*weight);
            }
        }
    }

    totals
}

/// Every state in the dataset, best match first.
pub fn rank_states(dataset: &Dataset, answers: &AnswerMap, tie_break: TieBreak) -> Vec<StateScore> {
    let totals = accumulate(dataset, answers);

    let mut ranked: Vec<StateScore> = dataset
        .states()
        .iter()
        .zip(totals)
        .map(|(state, score)| StateScore {
            state: state.state_code.clone(),
            city: state.representative_city().to_string(),
            score,
        })
        .collect();

    // sort_by is stable, so DatasetOrder keeps the natural order among equals
    ranked.sort_by(|a, b| compare_ranked(a, b, tie_break));
    ranked
}

fn compare_ranked(a: &StateScore, b: &StateScore, tie_break: TieBreak) -> Ordering {
    let by_score = b.score.cmp(&a.score);
    match tie_break {
        TieBreak::StateCode => by_score.then_with(|| a.state.cmp(&b.state)),
        TieBreak::DatasetOrder => by_score,
    }
}

/// The top `options.result_count` states for `answers`.
pub fn calculate_scores(
    dataset: &Dataset,
    answers: &AnswerMap,
    options: &ScoringOptions,
) -> Vec<StateScore> {
    let mut ranked = rank_states(dataset, answers, options.tie_break);
    ranked.truncate(options.result_count);
    ranked
}

/// True when every question in the dataset has an answer.
pub fn validate_answers(dataset: &Dataset, answers: &AnswerMap) -> bool {
    dataset
        .questions()
        .iter()
        .all(|question| answers.is_answered(&question.id))
}

/// Question ids without an answer, in dataset order.
pub fn unanswered_questions<'d>(dataset: &'d Dataset, answers: &AnswerMap) -> Vec<&'d str> {
    dataset
        .questions()
        .iter()
        .filter(|question| !answers.is_answered(&question.id))
        .map(|question| question.id.as_str())
        .collect()
}

/// Each score as a rounded percentage of the best score.
///
/// Everything maps to 0 when the best score is not positive.
pub fn match_percentages(results: &[StateScore]) -> Vec<u32> {
    let top = results.iter().map(|r| r.score).max().unwrap_or(0);
    results
        .iter()
        .map(|result| {
            if top <= 0 || result.score <= 0 {
                0
            } else {
                ((result.score as f64 / top as f64) * 100.0).round() as u32
            }
        })
        .collect()
}
