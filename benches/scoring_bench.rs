//! Benchmarks for scoring and report rendering on the bundled dataset.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use statematch::formatting::FormattingConfig;
use statematch::{
    calculate_scores, create_writer, rank_states, AnswerMap, Dataset, OutputFormat,
    PartitionPolicy, ReportTier, ReportView, ScoringOptions, TieBreak,
};
use statematch::results::Price;
use std::hint::black_box;

/// Answer every question, rotating through choices so most weights are hit.
fn rotating_answers(dataset: &Dataset, offset: usize) -> AnswerMap {
    dataset
        .questions()
        .iter()
        .enumerate()
        .map(|(i, q)| (q.id.clone(), q.choices[(i + offset) % q.choices.len()].id.clone()))
        .collect()
}

fn bench_scoring(c: &mut Criterion) {
    let dataset = Dataset::bundled().unwrap();
    let answers = rotating_answers(&dataset, 1);

    let mut group = c.benchmark_group("scoring");
    group.bench_function("rank_states", |b| {
        b.iter(|| rank_states(black_box(&dataset), black_box(&answers), TieBreak::StateCode))
    });

    for count in [3usize, 5, 50] {
        let options = ScoringOptions::default().with_result_count(count);
        group.bench_with_input(
            BenchmarkId::new("calculate_scores", count),
            &options,
            |b, options| {
                b.iter(|| calculate_scores(black_box(&dataset), black_box(&answers), options))
            },
        );
    }
    group.finish();
}

fn bench_rendering(c: &mut Criterion) {
    let dataset = Dataset::bundled().unwrap();
    let answers = rotating_answers(&dataset, 2);
    let results = calculate_scores(&dataset, &answers, &ScoringOptions::default());

    let mut group = c.benchmark_group("report");
    for format in [
        OutputFormat::Terminal,
        OutputFormat::Markdown,
        OutputFormat::Json,
        OutputFormat::Html,
    ] {
        group.bench_function(format!("{format:?}"), |b| {
            b.iter(|| {
                let view = ReportView::build(
                    &dataset,
                    &results,
                    PartitionPolicy::default(),
                    ReportTier::Full,
                    Price::default(),
                )
                .with_explanations(&dataset, &answers);
                let mut buffer = Vec::new();
                create_writer(format, Box::new(&mut buffer), FormattingConfig::plain())
                    .write_report(&view)
                    .unwrap();
                black_box(buffer)
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_scoring, bench_rendering);
criterion_main!(benches);
