use super::{quiz, AppContext};
use crate::report::{create_writer, OutputFormat, ReportTier, ReportView};
use crate::results::PartitionPolicy;
use crate::scoring::calculate_scores;
use crate::session::SessionContext;
use anyhow::Result;
use std::io::{BufRead, Write};
use std::path::PathBuf;

#[derive(Debug, Clone, Default)]
pub struct ResultsOptions {
    pub full: bool,
    pub explain: bool,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
    pub top: Option<usize>,
}

pub fn run(
    ctx: &AppContext,
    options: &ResultsOptions,
    input: &mut dyn BufRead,
    out: &mut dyn Write,
) -> Result<()> {
    let Some(session) = load_or_redirect(ctx, input, out)? else {
        return Ok(());
    };

    if options.full && !session.unlocked {
        anyhow::bail!(
            "The full report is locked. Run `statematch checkout --email <you@example.com>` to unlock it."
        );
    }
    let tier = if session.unlocked {
        ReportTier::Full
    } else {
        ReportTier::Preview
    };

    let mut scoring = ctx.config.scoring.options();
    if let Some(top) = options.top {
        if top == 0 {
            anyhow::bail!("--top must be at least 1");
        }
        scoring = scoring.with_result_count(top);
    }

    let results = calculate_scores(&ctx.dataset, &session.answers, &scoring);
    tracing::debug!(count = results.len(), ?tier, "Rendering results");

    let mut view = ReportView::build(
        &ctx.dataset,
        &results,
        PartitionPolicy {
            free_count: ctx.config.scoring.free_preview,
        },
        tier,
        ctx.config.checkout.price(),
    );
    if options.explain {
        view = view.with_explanations(&ctx.dataset, &session.answers);
    }

    match &options.output {
        Some(path) => {
            let mut writer = create_writer(
                options.format,
                crate::io::open_output(Some(path))?,
                ctx.formatting,
            );
            writer.write_report(&view)?;
            writeln!(out, "Report written to {}", path.display())?;
        }
        None => {
            create_writer(options.format, Box::new(&mut *out), ctx.formatting).write_report(&view)?;
        }
    }
    Ok(())
}

/// Without saved answers the user is sent back to the quiz.
fn load_or_redirect(
    ctx: &AppContext,
    input: &mut dyn BufRead,
    out: &mut dyn Write,
) -> Result<Option<SessionContext>> {
    match ctx.store.read() {
        Ok(session) => Ok(Some(session)),
        Err(e) if e.is_missing() => {
            tracing::info!("No saved answers; redirecting to the quiz");
            writeln!(out, "No quiz answers found yet. Let's start the quiz.")?;
            quiz::interactive(ctx, input, out)
        }
        Err(e) => Err(e.into()),
    }
}
