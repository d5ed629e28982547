use super::AppContext;
use anyhow::Result;
use std::io::Write;

pub fn run(ctx: &AppContext, out: &mut dyn Write) -> Result<()> {
    ctx.store.clear()?;
    tracing::info!(dir = %ctx.session_dir.display(), "Session cleared");
    writeln!(out, "Saved answers cleared.")?;
    Ok(())
}
