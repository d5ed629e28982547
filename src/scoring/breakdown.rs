//! Per-state explanation of a total score.

use crate::core::AnswerMap;
use crate::dataset::Dataset;
use serde::Serialize;

/// One answered question's effect on a state's total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Contribution {
    pub question_id: String,
    pub choice_id: String,
    pub weight: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreBreakdown {
    pub state: String,
    pub total: i64,
    pub contributions: Vec<Contribution>,
}

impl ScoreBreakdown {
    /// Contributions sorted by absolute weight, largest first.
    pub fn strongest(&self, limit: usize) -> Vec<&Contribution> {
        let mut sorted: Vec<&Contribution> = self.contributions.iter().collect();
        sorted.sort_by(|a, b| b.weight.abs().cmp(&a.weight.abs()));
        sorted.truncate(limit);
        sorted
    }
}

/// Explain how `state_code` reached its score. `None` for unknown states.
///
/// Only non-zero contributions are listed; their saturating sum equals the
/// total the engine computes for the same answers.
pub fn explain_score(
    dataset: &Dataset,
    answers: &AnswerMap,
    state_code: &str,
) -> Option<ScoreBreakdown> {
    dataset.state(state_code)?;

    let contributions: Vec<Contribution> = dataset
        .questions()
        .iter()
        .filter_map(|question| {
            let choice = question.choice(answers.choice_for(&question.id)?)?;
            let weight = choice.weight_for(state_code);
            (weight != 0).then(|| Contribution {
                question_id: question.id.clone(),
                choice_id: choice.id.clone(),
                weight,
            })
        })
        .collect();

    Some(ScoreBreakdown {
        state: state_code.to_string(),
        total: contributions
            .iter()
            .fold(0i64, |total, c| total.saturating_add(c.weight)),
        contributions,
    })
}
