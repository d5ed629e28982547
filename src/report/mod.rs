//! Rendering a partitioned ranking for people.
//!
//! Every writer consumes the same [`ReportView`], which joins the engine's
//! [`StateScore`]s with their dataset profiles and knows which entries the
//! current [`ReportTier`] may reveal.

pub mod details;
pub mod html;
pub mod json;
pub mod markdown;
pub mod terminal;

pub use html::HtmlWriter;
pub use json::JsonWriter;
pub use markdown::MarkdownWriter;
pub use terminal::TerminalWriter;

use crate::core::{AnswerMap, StateProfile, StateScore};
use crate::dataset::Dataset;
use crate::formatting::FormattingConfig;
use crate::results::{partition, PartitionPolicy, Price, Segment};
use crate::scoring::{explain_score, match_percentages, ScoreBreakdown};
use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Terminal,
    Markdown,
    Json,
    Html,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportTier {
    /// Free entries in full, paid entries locked.
    Preview,
    Full,
}

#[derive(Debug, Clone)]
pub struct ReportEntry<'a> {
    pub rank: usize,
    pub segment: Segment,
    pub score: &'a StateScore,
    /// `None` when the ranked state is missing from the dataset.
    pub profile: Option<&'a StateProfile>,
    pub match_percent: u32,
    pub locked: bool,
    pub breakdown: Option<ScoreBreakdown>,
}

impl ReportEntry<'_> {
    pub fn display_name(&self) -> &str {
        self.profile
            .map(|p| p.state_name.as_str())
            .unwrap_or(self.score.state.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct ReportView<'a> {
    pub tier: ReportTier,
    pub generated_at: DateTime<Utc>,
    pub price: Price,
    pub entries: Vec<ReportEntry<'a>>,
}

impl<'a> ReportView<'a> {
    pub fn build(
        dataset: &'a Dataset,
        results: &'a [StateScore],
        policy: PartitionPolicy,
        tier: ReportTier,
        price: Price,
    ) -> Self {
        let percents = match_percentages(results);
        let split = partition(results, policy);

        let entries = split
            .ranked()
            .map(|(rank, _, segment)| {
                let score = &results[rank - 1];
                ReportEntry {
                    rank,
                    segment,
                    score,
                    profile: dataset.state(&score.state),
                    match_percent: percents[rank - 1],
                    locked: tier == ReportTier::Preview && segment == Segment::Paid,
                    breakdown: None,
                }
            })
            .collect();

        Self {
            tier,
            generated_at: Utc::now(),
            price,
            entries,
        }
    }

    /// Attach per-question contributions to every unlocked entry.
    pub fn with_explanations(mut self, dataset: &Dataset, answers: &AnswerMap) -> Self {
        for entry in self.entries.iter_mut().filter(|e| !e.locked) {
            entry.breakdown = explain_score(dataset, answers, &entry.score.state);
        }
        self
    }

    pub fn visible(&self) -> impl Iterator<Item = &ReportEntry<'a>> {
        self.entries.iter().filter(|e| !e.locked)
    }

    pub fn locked_count(&self) -> usize {
        self.entries.iter().filter(|e| e.locked).count()
    }
}

pub trait ReportWriter {
    fn write_report(&mut self, view: &ReportView<'_>) -> anyhow::Result<()>;
}

pub fn create_writer<'w>(
    format: OutputFormat,
    out: Box<dyn Write + 'w>,
    formatting: FormattingConfig,
) -> Box<dyn ReportWriter + 'w> {
    match format {
        OutputFormat::Terminal => Box::new(TerminalWriter::new(out, formatting)),
        OutputFormat::Markdown => Box::new(MarkdownWriter::new(out)),
        OutputFormat::Json => Box::new(JsonWriter::new(out)),
        OutputFormat::Html => Box::new(HtmlWriter::new(out)),
    }
}
