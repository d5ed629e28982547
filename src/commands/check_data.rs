use crate::dataset::Dataset;
use crate::errors::DatasetError;
use anyhow::Result;
use colored::Colorize;
use std::collections::BTreeSet;
use std::io::Write;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetSummary {
    pub states: usize,
    pub questions: usize,
    pub choices: usize,
    /// Choices that add nothing to any state.
    pub neutral_choices: usize,
    /// States no choice ever weights; they can only score 0.
    pub unreachable_states: Vec<String>,
}

pub fn summarize(dataset: &Dataset) -> DatasetSummary {
    let choices = dataset.questions().iter().flat_map(|q| &q.choices);

    let weighted: BTreeSet<&str> = choices
        .clone()
        .flat_map(|c| c.weights.iter())
        .filter(|(_, weight)| **weight != 0)
        .map(|(state, _)| state.as_str())
        .collect();

    DatasetSummary {
        states: dataset.states().len(),
        questions: dataset.questions().len(),
        choices: choices.clone().count(),
        neutral_choices: choices
            .filter(|c| c.weights.values().all(|w| *w == 0))
            .count(),
        unreachable_states: dataset
            .states()
            .iter()
            .map(|s| s.state_code.as_str())
            .filter(|code| !weighted.contains(code))
            .map(str::to_string)
            .collect(),
    }
}

/// Validate `dir`, or the bundled data when `None`.
pub fn run(dir: Option<&Path>, out: &mut dyn Write) -> Result<()> {
    let source = dir.map_or_else(|| "bundled data".to_string(), |d| d.display().to_string());
    let loaded = match dir {
        Some(dir) => Dataset::load(dir),
        None => Dataset::bundled(),
    };

    let dataset = match loaded {
        Ok(dataset) => dataset,
        Err(DatasetError::Invalid { issues }) => {
            writeln!(out, "{} {source}", "Dataset invalid:".red().bold())?;
            for issue in &issues {
                writeln!(out, "  - {issue}")?;
            }
            anyhow::bail!("{} dataset issue(s) found", issues.len());
        }
        Err(e) => return Err(e.into()),
    };

    let summary = summarize(&dataset);
    writeln!(out, "{} {source}", "Dataset OK:".green().bold())?;
    writeln!(out, "  states:    {}", summary.states)?;
    writeln!(out, "  questions: {}", summary.questions)?;
    writeln!(
        out,
        "  choices:   {} ({} neutral)",
        summary.choices, summary.neutral_choices
    )?;
    if !summary.unreachable_states.is_empty() {
        writeln!(
            out,
            "  {} never weighted by any choice: {}",
            "warning:".yellow(),
            summary.unreachable_states.join(", ")
        )?;
    }
    Ok(())
}
