//! Customer-support assistant backed by an OpenAI-compatible chat gateway.
//!
//! Responses are streamed as server-sent events; each `data:` line carries a
//! JSON chunk whose `choices[0].delta.content` is appended to the reply.

use super::http_client;
use crate::errors::ServiceError;
use crate::results::Price;
use serde::{Deserialize, Serialize};
use std::io::{BufRead, BufReader};
use std::time::Duration;

pub const DEFAULT_CHAT_ENDPOINT: &str = "https://ai.gateway.lovable.dev/v1/chat/completions";
pub const DEFAULT_CHAT_MODEL: &str = "google/gemini-2.5-flash";
pub const CHAT_API_KEY_ENV: &str = "STATEMATCH_CHAT_API_KEY";
pub const SUPPORT_EMAIL: &str = "support@statematchquiz.com";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// Product facts the assistant answers from.
pub fn support_system_prompt(price: &Price, question_count: usize, full_count: usize) -> String {
    format!(
        "You are a helpful customer support assistant for StateMatch Quiz (statematchquiz.com).

PRODUCT INFORMATION:
- StateMatch Quiz helps people find their ideal US state and city to live in
- Users take a {question_count}-question quiz covering climate, cost of living, politics, lifestyle, and more
- The quiz matches their preferences with data for all 50 US states

PRICING:
- Free preview: see the top 3 state matches immediately after the quiz
- Full report: {price} one-time payment
- Full report includes the top {full_count} state matches with scores, a city recommendation for each state, and details on politics, climate, cost of living, healthcare and crime

REFUND POLICY:
- 30-day money-back guarantee, no questions asked
- Contact: {SUPPORT_EMAIL}

ESCALATION:
For refund requests, complex issues or complaints, tell users to email {SUPPORT_EMAIL}; a team member responds within 24 hours.

Be friendly, concise and helpful. If you don't know something, say so and direct them to {SUPPORT_EMAIL}."
    )
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    Delta(String),
    Done,
    Ignore,
}

#[derive(Deserialize)]
struct StreamChunk {
    #[serde(default)]
    choices: Vec<StreamChoice>,
}

#[derive(Deserialize)]
struct StreamChoice {
    #[serde(default)]
    delta: StreamDelta,
}

#[derive(Deserialize, Default)]
struct StreamDelta {
    content: Option<String>,
}

/// Interpret one line of an SSE response body.
pub fn parse_sse_line(line: &str) -> StreamEvent {
    let line = line.trim_end_matches(['\r', '\n']);
    let Some(data) = line.strip_prefix("data:") else {
        return StreamEvent::Ignore;
    };
    let data = data.trim_start();
    if data == "[DONE]" {
        return StreamEvent::Done;
    }

    match serde_json::from_str::<StreamChunk>(data) {
        Ok(chunk) => chunk
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.delta.content)
            .filter(|content| !content.is_empty())
            .map_or(StreamEvent::Ignore, StreamEvent::Delta),
        Err(e) => {
            tracing::trace!(error = %e, "Skipping unparsable stream chunk");
            StreamEvent::Ignore
        }
    }
}

/// Map a failed gateway response to the user-facing error.
pub fn gateway_error(status: u16, body: String) -> ServiceError {
    match status {
        429 => ServiceError::RateLimited,
        402 => ServiceError::Unavailable,
        _ => ServiceError::Upstream { status, body },
    }
}

pub trait SupportChat {
    /// Send `history` and stream the reply through `on_delta`.
    /// Returns the full assistant reply.
    fn respond(
        &self,
        history: &[ChatMessage],
        on_delta: &mut dyn FnMut(&str),
    ) -> Result<String, ServiceError>;
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<&'a ChatMessage>,
    stream: bool,
}

pub struct GatewayChat {
    client: reqwest::blocking::Client,
    endpoint: String,
    model: String,
    api_key: String,
    system: ChatMessage,
}

impl GatewayChat {
    pub fn new(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
        system_prompt: String,
        timeout: Duration,
    ) -> Result<Self, ServiceError> {
        Ok(Self {
            client: http_client(timeout)?,
            endpoint: endpoint.into(),
            model: model.into(),
            api_key: api_key.into(),
            system: ChatMessage {
                role: ChatRole::System,
                content: system_prompt,
            },
        })
    }

    /// Fetch the key from `STATEMATCH_CHAT_API_KEY`.
    pub fn api_key_from_env() -> Result<String, ServiceError> {
        std::env::var(CHAT_API_KEY_ENV)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or(ServiceError::MissingCredential(CHAT_API_KEY_ENV))
    }

    fn request<'a>(&'a self, history: &'a [ChatMessage]) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.model,
            messages: std::iter::once(&self.system).chain(history).collect(),
            stream: true,
        }
    }
}

impl SupportChat for GatewayChat {
    fn respond(
        &self,
        history: &[ChatMessage],
        on_delta: &mut dyn FnMut(&str),
    ) -> Result<String, ServiceError> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&self.request(history))
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            tracing::error!(status = status.as_u16(), %body, "Chat gateway error");
            return Err(gateway_error(status.as_u16(), body));
        }

        let mut reply = String::new();
        for line in BufReader::new(response).lines() {
            let line = line.map_err(|e| ServiceError::Transport(e.to_string()))?;
            match parse_sse_line(&line) {
                StreamEvent::Delta(text) => {
                    on_delta(&text);
                    reply.push_str(&text);
                }
                StreamEvent::Done => break,
                StreamEvent::Ignore => {}
            }
        }
        Ok(reply)
    }
}
