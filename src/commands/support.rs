use super::AppContext;
use crate::services::chat::support_system_prompt;
use crate::services::{ChatMessage, GatewayChat, SupportChat};
use anyhow::Result;
use colored::Colorize;
use std::io::{BufRead, Write};

pub fn run(
    ctx: &AppContext,
    message: Option<&str>,
    input: &mut dyn BufRead,
    out: &mut dyn Write,
) -> Result<()> {
    let chat_config = &ctx.config.chat;
    let prompt = support_system_prompt(
        &ctx.config.checkout.price(),
        ctx.dataset.questions().len(),
        ctx.config.scoring.result_count,
    );
    let chat = GatewayChat::new(
        chat_config.endpoint.clone(),
        chat_config.model.clone(),
        GatewayChat::api_key_from_env()?,
        prompt,
        chat_config.timeout(),
    )?;
    run_with(&chat, message, input, out)
}

pub fn run_with(
    chat: &dyn SupportChat,
    message: Option<&str>,
    input: &mut dyn BufRead,
    out: &mut dyn Write,
) -> Result<()> {
    let mut history = Vec::new();

    if let Some(message) = message {
        history.push(ChatMessage::user(message));
        reply(chat, &history, out)?;
        return Ok(());
    }

    writeln!(
        out,
        "{}",
        "Ask anything about StateMatch. An empty line or `exit` ends the chat.".dimmed()
    )?;
    let mut line = String::new();
    loop {
        write!(out, "{} ", "you>".cyan())?;
        out.flush()?;
        line.clear();
        if input.read_line(&mut line)? == 0 {
            break;
        }
        let question = line.trim();
        if question.is_empty() || question == "exit" {
            break;
        }

        history.push(ChatMessage::user(question));
        let answer = reply(chat, &history, out)?;
        history.push(ChatMessage::assistant(answer));
    }
    Ok(())
}

fn reply(chat: &dyn SupportChat, history: &[ChatMessage], out: &mut dyn Write) -> Result<String> {
    write!(out, "{} ", "support>".green())?;
    let mut write_error = None;
    let answer = chat.respond(history, &mut |delta| {
        if write_error.is_none() {
            if let Err(e) = out.write_all(delta.as_bytes()).and_then(|_| out.flush()) {
                write_error = Some(e);
            }
        }
    })?;
    if let Some(e) = write_error {
        return Err(e.into());
    }
    writeln!(out)?;
    Ok(answer)
}
