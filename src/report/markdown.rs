use super::details::{attribute_rows, optional_rows, rationale};
use super::{ReportEntry, ReportTier, ReportView, ReportWriter};
use std::io::Write;

pub struct MarkdownWriter<W: Write> {
    writer: W,
}

impl<W: Write> MarkdownWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_header(&mut self, view: &ReportView<'_>) -> anyhow::Result<()> {
        let title = match view.tier {
            ReportTier::Preview => "StateMatch Preview",
            ReportTier::Full => "StateMatch Report",
        };
        writeln!(self.writer, "# {title}")?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "Generated: {}",
            view.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        )?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_summary(&mut self, view: &ReportView<'_>) -> anyhow::Result<()> {
        writeln!(self.writer, "## Rankings")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Rank | State | City | Score | Match |")?;
        writeln!(self.writer, "|------|-------|------|-------|-------|")?;
        for entry in &view.entries {
            if entry.locked {
                writeln!(self.writer, "| #{} | Locked | - | - | - |", entry.rank)?;
            } else {
                writeln!(
                    self.writer,
                    "| #{} | {} | {} | {} | {}% |",
                    entry.rank,
                    entry.display_name(),
                    entry.score.city,
                    entry.score.score,
                    entry.match_percent
                )?;
            }
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_entry(&mut self, entry: &ReportEntry<'_>) -> anyhow::Result<()> {
        writeln!(self.writer, "## #{} {}", entry.rank, entry.display_name())?;
        writeln!(self.writer)?;
        writeln!(self.writer, "**City:** {}  ", entry.score.city)?;
        writeln!(self.writer, "**Match Score:** {}", entry.score.score)?;
        writeln!(self.writer)?;

        for (label, value) in attribute_rows(entry.profile) {
            writeln!(self.writer, "- **{label}:** {value}")?;
        }
        if let Some(profile) = entry.profile {
            for (label, value) in optional_rows(profile) {
                writeln!(self.writer, "- **{label}:** {value}")?;
            }
        }
        writeln!(self.writer)?;

        let Some(profile) = entry.profile else {
            return Ok(());
        };

        if !profile.highlights.is_empty() {
            writeln!(self.writer, "### Why this match?")?;
            writeln!(self.writer)?;
            for highlight in &profile.highlights {
                writeln!(self.writer, "- {highlight}")?;
            }
            writeln!(self.writer)?;
        }

        if let Some(breakdown) = &entry.breakdown {
            writeln!(self.writer, "### Score breakdown")?;
            writeln!(self.writer)?;
            writeln!(self.writer, "| Question | Answer | Weight |")?;
            writeln!(self.writer, "|----------|--------|--------|")?;
            for c in &breakdown.contributions {
                writeln!(
                    self.writer,
                    "| {} | {} | {:+} |",
                    c.question_id, c.choice_id, c.weight
                )?;
            }
            writeln!(self.writer)?;
        }

        writeln!(
            self.writer,
            "_{}_",
            rationale(entry.rank, profile, &entry.score.city)
        )?;
        writeln!(self.writer)?;
        Ok(())
    }
}

impl<W: Write> ReportWriter for MarkdownWriter<W> {
    fn write_report(&mut self, view: &ReportView<'_>) -> anyhow::Result<()> {
        self.write_header(view)?;
        self.write_summary(view)?;
        for entry in view.visible() {
            self.write_entry(entry)?;
        }
        let locked = view.locked_count();
        if locked > 0 {
            writeln!(
                self.writer,
                "> {locked} more recommendation(s) are available in the full report ({}).",
                view.price
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::dataset::Dataset;
    use crate::results::{PartitionPolicy, Price};

    #[test]
    fn locked_rows_hide_state_names() {
        let dataset = Dataset::bundled().unwrap();
        let results = ranked(&dataset);
        let view = ReportView::build(
            &dataset,
            &results,
            PartitionPolicy::default(),
            ReportTier::Preview,
            Price::default(),
        );
        let output = String::from_utf8(render(MarkdownWriter::new(Vec::new()), &view).into_inner())
            .unwrap();

        assert!(output.starts_with("# StateMatch Preview"));
        assert!(output.contains("| #4 | Locked | - | - | - |"));
        let fourth = dataset.state(&results[3].state).unwrap();
        assert!(!output.contains(&format!("## #4 {}", fourth.state_name)));
        assert!(output.contains("full report ($7.00)"));
    }

    #[test]
    fn optional_fields_render_only_when_present() {
        let dataset = Dataset::bundled().unwrap();
        let results = ranked(&dataset);
        let view = ReportView::build(
            &dataset,
            &results,
            PartitionPolicy::default(),
            ReportTier::Full,
            Price::default(),
        );
        let output = String::from_utf8(render(MarkdownWriter::new(Vec::new()), &view).into_inner())
            .unwrap();

        // California carries a salary figure; the count matches states that have one.
        let with_salary = view
            .entries
            .iter()
            .filter(|e| e.profile.and_then(|p| p.avg_salary).is_some())
            .count();
        assert_eq!(output.matches("**Avg. Salary:**").count(), with_salary);
        assert!(output.contains("**Avg. Salary:** $84,000"));
    }
}
