use super::{ReportEntry, ReportTier, ReportView, ReportWriter};
use crate::core::StateProfile;
use crate::results::{Price, Segment};
use crate::scoring::ScoreBreakdown;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct JsonReport<'a> {
    tier: ReportTier,
    generated_at: DateTime<Utc>,
    price: &'a Price,
    results: Vec<JsonEntry<'a>>,
}

#[derive(Serialize)]
struct JsonEntry<'a> {
    rank: usize,
    segment: Segment,
    locked: bool,
    #[serde(flatten)]
    details: Option<JsonDetails<'a>>,
}

#[derive(Serialize)]
struct JsonDetails<'a> {
    state: &'a str,
    city: &'a str,
    score: i64,
    match_percent: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    profile: Option<&'a StateProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    breakdown: Option<&'a ScoreBreakdown>,
}

impl<'a> JsonEntry<'a> {
    fn from_entry(entry: &'a ReportEntry<'a>) -> Self {
        let details = (!entry.locked).then(|| JsonDetails {
            state: &entry.score.state,
            city: &entry.score.city,
            score: entry.score.score,
            match_percent: entry.match_percent,
            profile: entry.profile,
            breakdown: entry.breakdown.as_ref(),
        });
        Self {
            rank: entry.rank,
            segment: entry.segment,
            locked: entry.locked,
            details,
        }
    }
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ReportWriter for JsonWriter<W> {
    fn write_report(&mut self, view: &ReportView<'_>) -> anyhow::Result<()> {
        let report = JsonReport {
            tier: view.tier,
            generated_at: view.generated_at,
            price: &view.price,
            results: view.entries.iter().map(JsonEntry::from_entry).collect(),
        };
        serde_json::to_writer_pretty(&mut self.writer, &report)?;
        writeln!(self.writer)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::dataset::Dataset;
    use crate::results::PartitionPolicy;
    use serde_json::Value;

    #[test]
    fn locked_entries_carry_only_their_rank() {
        let dataset = Dataset::bundled().unwrap();
        let results = ranked(&dataset);
        let view = ReportView::build(
            &dataset,
            &results,
            PartitionPolicy::default(),
            ReportTier::Preview,
            Price::default(),
        );
        let bytes = render(JsonWriter::new(Vec::new()), &view).into_inner();
        let json: Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(json["tier"], "preview");
        assert_eq!(json["price"]["amount_cents"], 700);
        let entries = json["results"].as_array().unwrap();
        assert_eq!(entries.len(), 5);
        assert_eq!(entries[0]["state"], "CA");
        assert_eq!(entries[0]["profile"]["state_name"], "California");
        assert_eq!(entries[4]["locked"], true);
        assert!(entries[4].get("state").is_none());
    }
}
