use super::details::{attribute_rows, optional_rows, rationale};
use super::{ReportEntry, ReportTier, ReportView, ReportWriter};
use crate::formatting::FormattingConfig;
use colored::Colorize;
use comfy_table::{presets, ContentArrangement, Table};
use std::io::Write;

/// Number of contributions listed per state with `--explain`.
const EXPLAIN_LIMIT: usize = 5;

pub struct TerminalWriter<W: Write> {
    writer: W,
    formatting: FormattingConfig,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W, formatting: FormattingConfig) -> Self {
        Self { writer, formatting }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_header(&mut self, view: &ReportView<'_>) -> anyhow::Result<()> {
        let title = match view.tier {
            ReportTier::Preview => "Your StateMatch Preview",
            ReportTier::Full => "Your Complete StateMatch Report",
        };
        writeln!(self.writer, "{}", title.blue().bold())?;
        writeln!(self.writer, "{}", "=".repeat(title.len()).blue())?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_ranking_table(&mut self, view: &ReportView<'_>) -> anyhow::Result<()> {
        let mut table = Table::new();
        table
            .load_preset(if self.formatting.emoji {
                presets::UTF8_FULL
            } else {
                presets::ASCII_FULL
            })
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec!["Rank", "State", "City", "Score", "Match"]);

        for entry in &view.entries {
            if entry.locked {
                table.add_row(vec![
                    format!("#{}", entry.rank),
                    self.formatting.lock().to_string(),
                    String::new(),
                    String::new(),
                    String::new(),
                ]);
            } else {
                table.add_row(vec![
                    format!("#{}", entry.rank),
                    entry.display_name().to_string(),
                    entry.score.city.clone(),
                    entry.score.score.to_string(),
                    format!("{}%", entry.match_percent),
                ]);
            }
        }

        writeln!(self.writer, "{table}")?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_entry(&mut self, entry: &ReportEntry<'_>) -> anyhow::Result<()> {
        writeln!(
            self.writer,
            "{} {}  {}",
            self.formatting.rank_marker(entry.rank),
            entry.display_name().bold(),
            format!("Match Score: {}", entry.score.score).cyan()
        )?;
        writeln!(
            self.writer,
            "   {} {}",
            self.formatting.glyph("📍", "City:"),
            entry.score.city
        )?;

        for (label, value) in attribute_rows(entry.profile) {
            writeln!(self.writer, "   {:<15} {value}", format!("{label}:").dimmed())?;
        }

        let Some(profile) = entry.profile else {
            writeln!(self.writer)?;
            return Ok(());
        };

        for (label, value) in optional_rows(profile) {
            writeln!(self.writer, "   {:<15} {value}", format!("{label}:").dimmed())?;
        }

        if !profile.highlights.is_empty() {
            writeln!(self.writer, "   {}", "Why this match?".green())?;
            for highlight in &profile.highlights {
                writeln!(self.writer, "     - {highlight}")?;
            }
        }

        if let Some(breakdown) = &entry.breakdown {
            writeln!(self.writer, "   {}", "Score breakdown:".green())?;
            for contribution in breakdown.strongest(EXPLAIN_LIMIT) {
                writeln!(
                    self.writer,
                    "     {:+} {} -> {}",
                    contribution.weight, contribution.question_id, contribution.choice_id
                )?;
            }
        }

        writeln!(
            self.writer,
            "   {}",
            rationale(entry.rank, profile, &entry.score.city).italic()
        )?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_unlock_notice(&mut self, view: &ReportView<'_>) -> anyhow::Result<()> {
        let locked = view.locked_count();
        if locked == 0 {
            return Ok(());
        }
        writeln!(
            self.writer,
            "{} {}",
            self.formatting.lock(),
            format!(
                "{locked} more recommendation(s) are locked. Unlock the full report for {} with `statematch checkout --email <you@example.com>`.",
                view.price
            )
            .yellow()
        )?;
        Ok(())
    }
}

impl<W: Write> ReportWriter for TerminalWriter<W> {
    fn write_report(&mut self, view: &ReportView<'_>) -> anyhow::Result<()> {
        self.write_header(view)?;
        self.write_ranking_table(view)?;
        for entry in view.visible() {
            self.write_entry(entry)?;
        }
        self.write_unlock_notice(view)?;
        self.writer.flush()?;
        Ok(())
    }
}
