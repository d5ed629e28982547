//! Line-oriented quiz runner.
//!
//! Input per prompt:
//! - a choice number selects that choice and advances
//! - `b` goes back one question
//! - an empty line advances when the question is already answered
//! - `q` or end of input quits without completing

use super::{QuizFlow, Step};
use crate::core::AnswerMap;
use colored::Colorize;
use std::io::{BufRead, Write};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizOutcome {
    Completed(AnswerMap),
    Quit,
}

enum Command {
    Pick(usize),
    Back,
    Continue,
    Quit,
    Invalid,
}

fn parse_command(line: &str, choice_count: usize) -> Command {
    match line.trim() {
        "" => Command::Continue,
        "b" | "B" | "back" => Command::Back,
        "q" | "Q" | "quit" => Command::Quit,
        other => match other.parse::<usize>() {
            Ok(n) if (1..=choice_count).contains(&n) => Command::Pick(n - 1),
            _ => Command::Invalid,
        },
    }
}

fn render_question<W: Write + ?Sized>(flow: &QuizFlow<'_>, out: &mut W) -> std::io::Result<()> {
    let progress = flow.progress();
    let question = flow.current();
    let selected = flow.selected();

    writeln!(out)?;
    writeln!(
        out,
        "{}",
        format!(
            "Question {} of {} ({}%)",
            progress.current, progress.total, progress.percent
        )
        .dimmed()
    )?;
    writeln!(out, "{}", question.prompt.bold())?;
    for (i, choice) in question.choices.iter().enumerate() {
        let marker = if selected == Some(choice.id.as_str()) {
            "*"
        } else {
            " "
        };
        writeln!(out, " {marker} {}. {}", i + 1, choice.label)?;
    }

    let mut hints = vec![format!("1-{}", question.choices.len())];
    if flow.can_go_back() {
        hints.push("b = back".to_string());
    }
    if flow.can_go_next() {
        hints.push("enter = keep answer".to_string());
    }
    hints.push("q = quit".to_string());
    write!(out, "{} > ", hints.join(", ").dimmed())?;
    out.flush()
}

/// Drive `flow` to completion with answers read from `input`.
pub fn run_quiz<R: BufRead + ?Sized, W: Write + ?Sized>(
    mut flow: QuizFlow<'_>,
    input: &mut R,
    out: &mut W,
) -> anyhow::Result<QuizOutcome> {
    let mut line = String::new();

    loop {
        render_question(&flow, out)?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(out)?;
            return Ok(QuizOutcome::Quit);
        }

        let advance = match parse_command(&line, flow.current().choices.len()) {
            Command::Pick(index) => {
                let choice_id = flow.current().choices[index].id.clone();
                flow.select(&choice_id)?;
                true
            }
            Command::Continue if flow.can_go_next() => true,
            Command::Continue => {
                writeln!(out, "{}", "Pick an answer to continue.".yellow())?;
                false
            }
            Command::Back => {
                if !flow.back() {
                    writeln!(out, "{}", "Already at the first question.".yellow())?;
                }
                false
            }
            Command::Quit => return Ok(QuizOutcome::Quit),
            Command::Invalid => {
                writeln!(
                    out,
                    "{}",
                    format!("Enter a number from 1 to {}.", flow.current().choices.len()).yellow()
                )?;
                false
            }
        };

        if advance {
            if let Step::Completed(answers) = flow.next()? {
                tracing::debug!(answered = answers.len(), "Quiz completed");
                return Ok(QuizOutcome::Completed(answers));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Dataset;
    use std::io::Cursor;

    fn run(dataset: &Dataset, script: &str) -> (QuizOutcome, String) {
        let flow = QuizFlow::new(dataset).unwrap();
        let mut input = Cursor::new(script.as_bytes().to_vec());
        let mut out = Vec::new();
        let outcome = run_quiz(flow, &mut input, &mut out).unwrap();
        (outcome, String::from_utf8(out).unwrap())
    }

    #[test]
    fn answering_every_question_completes() {
        let dataset = Dataset::bundled().unwrap();
        let script = "1\n".repeat(dataset.questions().len());

        let (outcome, _) = run(&dataset, &script);
        match outcome {
            QuizOutcome::Completed(answers) => {
                assert_eq!(answers.len(), dataset.questions().len());
                let first = &dataset.questions()[0];
                assert_eq!(answers.choice_for(&first.id), Some(first.choices[0].id.as_str()));
            }
            QuizOutcome::Quit => panic!("quiz should complete"),
        }
    }

    #[test]
    fn end_of_input_quits() {
        let dataset = Dataset::bundled().unwrap();
        let (outcome, _) = run(&dataset, "1\n2\n");
        assert_eq!(outcome, QuizOutcome::Quit);
    }

    #[test]
    fn back_then_enter_keeps_the_previous_answer() {
        let dataset = Dataset::bundled().unwrap();
        let remaining = "1\n".repeat(dataset.questions().len() - 1);
        let script = format!("2\nb\n\n{remaining}");

        let (outcome, _) = run(&dataset, &script);
        let QuizOutcome::Completed(answers) = outcome else {
            panic!("quiz should complete");
        };
        let first = &dataset.questions()[0];
        assert_eq!(answers.choice_for(&first.id), Some(first.choices[1].id.as_str()));
    }

    #[test]
    fn invalid_input_reprompts() {
        colored::control::set_override(false);
        let dataset = Dataset::bundled().unwrap();
        let (outcome, output) = run(&dataset, "99\n\nq\n");

        assert_eq!(outcome, QuizOutcome::Quit);
        assert!(output.contains("Enter a number from 1 to"));
        assert!(output.contains("Pick an answer to continue."));
    }
}
