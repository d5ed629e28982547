use super::AppContext;
use crate::core::AnswerMap;
use crate::errors::SessionError;
use crate::quiz::{run_quiz, QuizFlow, QuizOutcome};
use crate::scoring::unanswered_questions;
use crate::session::SessionContext;
use anyhow::{Context, Result};
use colored::Colorize;
use std::io::{BufRead, Write};
use std::path::Path;

pub fn run(
    ctx: &AppContext,
    answers_file: Option<&Path>,
    input: &mut dyn BufRead,
    out: &mut dyn Write,
) -> Result<()> {
    let saved = match answers_file {
        Some(path) => Some(import_answers(ctx, path, out)?),
        None => interactive(ctx, input, out)?,
    };

    if saved.is_some() {
        writeln!(
            out,
            "{} Run `statematch results` to see your matches.",
            "Answers saved.".green()
        )?;
    }
    Ok(())
}

/// Run the quiz on `input`. Earlier answers are kept as defaults.
/// Returns the new session, or `None` when the user quit.
pub fn interactive(
    ctx: &AppContext,
    input: &mut dyn BufRead,
    out: &mut dyn Write,
) -> Result<Option<SessionContext>> {
    let previous = match ctx.store.read() {
        Ok(session) => session.answers,
        Err(SessionError::Missing { .. }) => AnswerMap::new(),
        Err(e) => {
            tracing::warn!("Ignoring unreadable session: {e}");
            AnswerMap::new()
        }
    };

    let flow = QuizFlow::resume(&ctx.dataset, previous)?;
    match run_quiz(flow, input, out)? {
        QuizOutcome::Completed(answers) => Ok(Some(ctx.store.create(answers)?)),
        QuizOutcome::Quit => {
            writeln!(out, "{}", "Quiz not finished; answers were not saved.".yellow())?;
            Ok(None)
        }
    }
}

fn import_answers(ctx: &AppContext, path: &Path, out: &mut dyn Write) -> Result<SessionContext> {
    let contents = crate::io::read_file(path)?;
    let answers: AnswerMap = serde_json::from_str(&contents).with_context(|| {
        format!(
            "{} is not a JSON object of question ids to choice ids",
            path.display()
        )
    })?;

    for (question_id, choice_id) in answers.iter() {
        match ctx.dataset.question(question_id) {
            None => tracing::warn!(question = question_id, "Ignoring answer for unknown question"),
            Some(question) if !choice_id.is_empty() && question.choice(choice_id).is_none() => {
                tracing::warn!(
                    question = question_id,
                    choice = choice_id,
                    "Ignoring unknown choice"
                )
            }
            Some(_) => {}
        }
    }

    let missing = unanswered_questions(&ctx.dataset, &answers);
    if !missing.is_empty() {
        writeln!(
            out,
            "{} {} of {} questions unanswered: {}",
            "Note:".yellow(),
            missing.len(),
            ctx.dataset.questions().len(),
            missing.join(", ")
        )?;
    }

    tracing::info!(path = %path.display(), answered = answers.len(), "Imported answers");
    Ok(ctx.store.create(answers)?)
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use std::io::Cursor;
    use tempfile::TempDir;

    #[test]
    fn imports_answers_and_reports_gaps() {
        colored::control::set_override(false);
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("answers.json");
        std::fs::write(&path, r#"{"climate": "climate_warm", "coast": "coast_must"}"#).unwrap();

        let ctx = context();
        let mut out = Vec::new();
        run(&ctx, Some(&path), &mut Cursor::new(Vec::new()), &mut out).unwrap();

        let text = output(out);
        assert!(text.contains("28 of 30 questions unanswered"));
        assert!(text.contains("Answers saved."));
        let session = ctx.store.read().unwrap();
        assert_eq!(session.answers.choice_for("coast"), Some("coast_must"));
    }

    #[test]
    fn quitting_saves_nothing() {
        let ctx = context();
        let mut out = Vec::new();
        run(&ctx, None, &mut Cursor::new(b"1\nq\n".to_vec()), &mut out).unwrap();

        assert!(ctx.store.read().unwrap_err().is_missing());
        assert!(output(out).contains("answers were not saved"));
    }

    #[test]
    fn interactive_completion_creates_session() {
        let ctx = context();
        let script = "2\n".repeat(ctx.dataset.questions().len());
        let mut out = Vec::new();

        let session = interactive(&ctx, &mut Cursor::new(script.into_bytes()), &mut out)
            .unwrap()
            .unwrap();
        assert_eq!(session.answers.len(), ctx.dataset.questions().len());
        assert_eq!(ctx.store.read().unwrap(), session);
    }
}
