use super::AppContext;
use crate::config::MailerKind;
use crate::scoring::calculate_scores;
use crate::services::{compose_report_email, OutboxMailer, ReportMailer, ResendMailer};
use anyhow::{Context, Result};
use std::io::Write;

pub fn build_mailer(ctx: &AppContext) -> Result<Box<dyn ReportMailer>> {
    let mailer = &ctx.config.mailer;
    Ok(match mailer.kind {
        MailerKind::Outbox => {
            let dir = mailer
                .outbox_dir
                .clone()
                .unwrap_or_else(|| ctx.session_dir.join("outbox"));
            Box::new(OutboxMailer::new(dir, mailer.from.clone()))
        }
        MailerKind::Resend => {
            let mut resend = ResendMailer::from_env(mailer.from.clone(), mailer.timeout())?;
            if let Some(endpoint) = &mailer.endpoint {
                resend = resend.with_endpoint(endpoint.clone());
            }
            Box::new(resend)
        }
    })
}

pub fn run(ctx: &AppContext, email: Option<&str>, out: &mut dyn Write) -> Result<()> {
    let mailer = build_mailer(ctx)?;
    run_with(ctx, mailer.as_ref(), email, out)
}

pub fn run_with(
    ctx: &AppContext,
    mailer: &dyn ReportMailer,
    email: Option<&str>,
    out: &mut dyn Write,
) -> Result<()> {
    let session = ctx.require_session()?;
    if !session.unlocked {
        anyhow::bail!(
            "The full report is locked. Run `statematch checkout --email <you@example.com>` first."
        );
    }
    let to = email
        .or(session.email.as_deref())
        .context("No email address. Pass --email <you@example.com>.")?;

    let results = calculate_scores(&ctx.dataset, &session.answers, &ctx.config.scoring.options());
    let message = compose_report_email(to, &results, &ctx.dataset)?;
    let delivery = mailer.send(&message)?;

    tracing::debug!(id = %delivery.id, "Report delivered");
    writeln!(out, "Report sent to {}.", message.to)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::errors::ServiceError;
    use crate::services::mailer::{Delivery, ReportEmail};
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingMailer {
        sent: RefCell<Vec<ReportEmail>>,
    }

    impl ReportMailer for RecordingMailer {
        fn send(&self, email: &ReportEmail) -> Result<Delivery, ServiceError> {
            self.sent.borrow_mut().push(email.clone());
            Ok(Delivery { id: "test".into() })
        }
    }

    struct FailingMailer;

    impl ReportMailer for FailingMailer {
        fn send(&self, _email: &ReportEmail) -> Result<Delivery, ServiceError> {
            Err(ServiceError::Unavailable)
        }
    }

    fn unlocked_context() -> AppContext {
        let ctx = context_with_answers();
        let mut session = ctx.store.read().unwrap();
        session.unlock("buyer@example.com");
        ctx.store.write(&session).unwrap();
        ctx
    }

    #[test]
    fn defaults_to_checkout_email() {
        let ctx = unlocked_context();
        let mailer = RecordingMailer::default();
        let mut out = Vec::new();
        run_with(&ctx, &mailer, None, &mut out).unwrap();

        let sent = mailer.sent.borrow();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "buyer@example.com");
        assert_eq!(sent[0].subject, "Your StateMatch Report - Top 5 Recommendations");
        assert!(output(out).contains("Report sent to buyer@example.com."));
    }

    #[test]
    fn locked_session_is_refused() {
        let ctx = context_with_answers();
        let err = run_with(
            &ctx,
            &RecordingMailer::default(),
            Some("me@example.com"),
            &mut Vec::new(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("locked"));
    }

    #[test]
    fn mailer_failure_surfaces_once() {
        let ctx = unlocked_context();
        let err = run_with(&ctx, &FailingMailer, None, &mut Vec::new()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Service temporarily unavailable. Please contact support."
        );
    }
}
