use super::AppContext;
use crate::scoring::calculate_scores;
use crate::share::{clipboard_text, copy_to_clipboard, share_links, share_text};
use anyhow::Result;
use colored::Colorize;
use std::io::Write;

pub fn run(ctx: &AppContext, copy: bool, out: &mut dyn Write) -> Result<()> {
    let session = ctx.require_session()?;
    let results = calculate_scores(&ctx.dataset, &session.answers, &ctx.config.scoring.options());
    let site = &ctx.config.site.url;

    let text = share_text(&results, &ctx.dataset, site);
    let links = share_links(&text, site)?;

    writeln!(out, "{text}")?;
    writeln!(out)?;
    writeln!(out, "{}", "Share directly:".bold())?;
    writeln!(out, "  Twitter/X: {}", links.twitter)?;
    writeln!(out, "  Facebook:  {}", links.facebook)?;
    writeln!(out, "  LinkedIn:  {}", links.linkedin)?;

    if copy {
        let status = copy_to_clipboard(&clipboard_text(&text, site));
        eprintln!("{status}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;

    #[test]
    fn prints_text_and_links() {
        let ctx = context_with_answers();
        let mut out = Vec::new();
        run(&ctx, false, &mut out).unwrap();

        let text = output(out);
        assert!(text.contains("I found my perfect states on StateMatch!"));
        assert!(text.contains("#1 "));
        assert!(text.contains("% match"));
        assert!(text.contains("https://twitter.com/intent/tweet?text="));
        assert!(text.contains("Find your perfect state at https://statematchquiz.com"));
    }
}
