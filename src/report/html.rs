//! Inline-styled HTML suitable for an email body.

use super::details::{attribute_rows, optional_rows};
use super::{ReportEntry, ReportTier, ReportView, ReportWriter};
use html_escape::encode_text;
use std::io::Write;

const ACCENT: &str = "#4F46E5";

pub struct HtmlWriter<W: Write> {
    writer: W,
}

impl<W: Write> HtmlWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_entry(&mut self, entry: &ReportEntry<'_>) -> anyhow::Result<()> {
        writeln!(
            self.writer,
            r#"<div style="background: #f9fafb; border-left: 4px solid {ACCENT}; padding: 20px; margin-bottom: 20px; border-radius: 4px;">"#
        )?;
        writeln!(
            self.writer,
            r#"<h2 style="color: #111; margin: 0 0 5px 0; font-size: 24px;">#{} {}</h2>"#,
            entry.rank,
            encode_text(entry.display_name())
        )?;
        writeln!(
            self.writer,
            r#"<p style="color: #666; margin: 0; font-size: 18px;">📍 {}</p>"#,
            encode_text(&entry.score.city)
        )?;
        writeln!(
            self.writer,
            r#"<p style="margin: 8px 0;"><span style="font-size: 12px; color: #666;">Match Score</span> <strong style="font-size: 28px; color: {ACCENT};">{}</strong></p>"#,
            entry.score.score
        )?;

        writeln!(
            self.writer,
            r#"<table style="width: 100%; font-size: 14px; border-top: 1px solid #ddd; margin-top: 15px;">"#
        )?;
        let mut rows = attribute_rows(entry.profile);
        if let Some(profile) = entry.profile {
            rows.extend(optional_rows(profile));
        }
        for (label, value) in rows {
            writeln!(
                self.writer,
                "<tr><td><strong>{label}:</strong></td><td>{}</td></tr>",
                encode_text(&value)
            )?;
        }
        writeln!(self.writer, "</table>")?;

        if let Some(profile) = entry.profile.filter(|p| !p.highlights.is_empty()) {
            writeln!(
                self.writer,
                r#"<div style="margin-top: 15px; padding: 12px; background: white; border-radius: 4px;"><strong style="color: {ACCENT};">Why This Match?</strong><ul style="margin: 8px 0 0 0; padding-left: 20px; color: #666;">"#
            )?;
            for highlight in &profile.highlights {
                writeln!(
                    self.writer,
                    r#"<li style="margin: 4px 0;">{}</li>"#,
                    encode_text(highlight)
                )?;
            }
            writeln!(self.writer, "</ul></div>")?;
        }

        writeln!(self.writer, "</div>")?;
        Ok(())
    }
}

impl<W: Write> ReportWriter for HtmlWriter<W> {
    fn write_report(&mut self, view: &ReportView<'_>) -> anyhow::Result<()> {
        let shown = view.visible().count();
        writeln!(
            self.writer,
            r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto; padding: 20px;">"#
        )?;
        writeln!(
            self.writer,
            r#"<h1 style="color: #333; border-bottom: 3px solid {ACCENT}; padding-bottom: 10px;">Your StateMatch Report</h1>"#
        )?;
        writeln!(
            self.writer,
            r#"<p style="font-size: 16px; color: #666; margin-bottom: 30px;">Thank you for using StateMatch! Here are your top {shown} personalized state recommendations:</p>"#
        )?;

        for entry in view.visible() {
            self.write_entry(entry)?;
        }

        if view.tier == ReportTier::Preview && view.locked_count() > 0 {
            writeln!(
                self.writer,
                r#"<p style="color: #666;">{} more recommendation(s) are available in the full report ({}).</p>"#,
                view.locked_count(),
                encode_text(&view.price.to_string())
            )?;
        }

        writeln!(
            self.writer,
            r#"<div style="margin-top: 30px; padding: 20px; background: #f0f9ff; border-radius: 4px; text-align: center;"><p style="margin: 0; color: #666; font-size: 14px;">This report was generated based on your quiz responses. We hope it helps you find your perfect state!</p></div>"#
        )?;
        writeln!(self.writer, "</div>")?;
        Ok(())
    }
}

/// Render `view` into an HTML string.
pub fn render_html(view: &ReportView<'_>) -> anyhow::Result<String> {
    let mut writer = HtmlWriter::new(Vec::new());
    writer.write_report(view)?;
    Ok(String::from_utf8(writer.into_inner())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{StateProfile, StateScore};
    use crate::dataset::Dataset;
    use crate::results::{PartitionPolicy, Price};

    fn hostile_dataset() -> Dataset {
        let state = StateProfile {
            state_code: "XX".into(),
            state_name: "<script>alert(1)</script>".into(),
            top_cities: vec!["Tom & Jerry".into()],
            highlights: vec!["<b>bold</b>".into()],
            politics: "Mixed".into(),
            abortion_laws: "Varies".into(),
            gun_laws: "Varies".into(),
            crime_level: "Low".into(),
            cost_of_living: "Low".into(),
            healthcare_quality: "Good".into(),
            climate: "Mild".into(),
            landscape: "Hills".into(),
            region: None,
            avg_home_price: None,
            avg_salary: None,
            fun_fact: None,
        };
        Dataset::new(vec![state], vec![]).unwrap()
    }

    #[test]
    fn dataset_text_is_escaped() {
        let dataset = hostile_dataset();
        let results = vec![StateScore {
            state: "XX".into(),
            city: "Tom & Jerry".into(),
            score: 3,
        }];
        let view = ReportView::build(
            &dataset,
            &results,
            PartitionPolicy::default(),
            ReportTier::Full,
            Price::default(),
        );
        let html = render_html(&view).unwrap();

        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(html.contains("Tom &amp; Jerry"));
        assert!(html.contains("&lt;b&gt;bold&lt;/b&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn intro_counts_shown_entries() {
        let dataset = Dataset::bundled().unwrap();
        let results = super::super::test_support::ranked(&dataset);
        let view = ReportView::build(
            &dataset,
            &results,
            PartitionPolicy::default(),
            ReportTier::Full,
            Price::default(),
        );
        let html = render_html(&view).unwrap();
        assert!(html.contains("Here are your top 5 personalized state recommendations"));
        assert_eq!(html.matches("Why This Match?").count(), 5);
    }
}
