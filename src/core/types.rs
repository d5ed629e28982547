use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Two-letter postal code identifying a state, e.g. `"CO"`.
pub type StateCode = String;

/// One selectable answer to a [`Question`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub id: String,
    pub label: String,
    /// Per-state contribution when this choice is selected. States that are
    /// absent contribute nothing.
    #[serde(default)]
    pub weights: BTreeMap<StateCode, i64>,
}

impl Choice {
    pub fn weight_for(&self, state: &str) -> i64 {
        self.weights.get(state).copied().unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub prompt: String,
    pub choices: Vec<Choice>,
}

impl Question {
    pub fn choice(&self, choice_id: &str) -> Option<&Choice> {
        self.choices.iter().find(|choice| choice.id == choice_id)
    }
}

/// Reference record for a single state.
///
/// The attribute fields are plain display strings. The extended fields only
/// exist for some states, so every consumer has to handle `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateProfile {
    pub state_code: StateCode,
    pub state_name: String,
    pub top_cities: Vec<String>,
    #[serde(default)]
    pub highlights: Vec<String>,
    pub politics: String,
    pub abortion_laws: String,
    pub gun_laws: String,
    pub crime_level: String,
    pub cost_of_living: String,
    pub healthcare_quality: String,
    pub climate: String,
    pub landscape: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_home_price: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_salary: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fun_fact: Option<String>,
}

impl StateProfile {
    /// First of the state's top cities; empty only for unvalidated records.
    pub fn representative_city(&self) -> &str {
        self.top_cities.first().map(String::as_str).unwrap_or("")
    }
}

/// The user's picks, keyed by question id.
///
/// Entries are added or overwritten one question at a time and never
/// removed. An empty choice id counts as "not answered".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerMap(BTreeMap<String, String>);

impl AnswerMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `choice_id` for `question_id`, returning the previous pick.
    pub fn record(
        &mut self,
        question_id: impl Into<String>,
        choice_id: impl Into<String>,
    ) -> Option<String> {
        self.0.insert(question_id.into(), choice_id.into())
    }

    pub fn choice_for(&self, question_id: &str) -> Option<&str> {
        self.0
            .get(question_id)
            .map(String::as_str)
            .filter(|choice| !choice.is_empty())
    }

    pub fn is_answered(&self, question_id: &str) -> bool {
        self.choice_for(question_id).is_some()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(q, c)| (q.as_str(), c.as_str()))
    }
}

impl<Q, C> FromIterator<(Q, C)> for AnswerMap
where
    Q: Into<String>,
    C: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (Q, C)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(q, c)| (q.into(), c.into()))
                .collect(),
        )
    }
}

/// One ranking entry produced by the scoring engine.
///
/// Field names are part of the report wire shape (`state`, `city`, `score`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateScore {
    pub state: StateCode,
    pub city: String,
    pub score: i64,
}
