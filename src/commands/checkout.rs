use super::AppContext;
use crate::services::{CheckoutGateway, CheckoutRequest, DemoCheckout};
use anyhow::Result;
use colored::Colorize;
use std::io::Write;

pub fn run(ctx: &AppContext, email: &str, out: &mut dyn Write) -> Result<()> {
    let gateway = DemoCheckout::new(ctx.config.checkout.price());
    run_with(ctx, &gateway, email, out)
}

pub fn run_with(
    ctx: &AppContext,
    gateway: &dyn CheckoutGateway,
    email: &str,
    out: &mut dyn Write,
) -> Result<()> {
    let mut session = ctx.require_session()?;

    let checkout = gateway.begin_checkout(&CheckoutRequest {
        email,
        answers: &session.answers,
        return_origin: &ctx.config.checkout.return_origin,
    })?;

    session.unlock(email.trim());
    ctx.store.write(&session)?;

    writeln!(
        out,
        "{} Full report unlocked for {} ({}).",
        "Payment approved.".green(),
        email.trim(),
        checkout.price
    )?;
    writeln!(out, "Continue at {}", checkout.redirect_url)?;
    writeln!(
        out,
        "Run `statematch results --full` to view it or `statematch send-report` to email it."
    )?;
    Ok(())
}
