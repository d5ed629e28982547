//! Delivery of the full report by email.

use super::http_client;
use super::payment::validate_email;
use crate::core::StateScore;
use crate::dataset::Dataset;
use crate::errors::ServiceError;
use crate::report::html::render_html;
use crate::report::{MarkdownWriter, ReportTier, ReportView, ReportWriter};
use crate::results::{PartitionPolicy, Price};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const RESEND_ENDPOINT: &str = "https://api.resend.com/emails";
pub const RESEND_API_KEY_ENV: &str = "RESEND_API_KEY";
pub const DEFAULT_SENDER: &str = "StateMatch <onboarding@resend.dev>";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportEmail {
    pub to: String,
    pub subject: String,
    pub html: String,
    pub text: String,
}

/// Identifier of an accepted message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    pub id: String,
}

/// Build the report email for `results`, every rank unlocked.
pub fn compose_report_email(
    email: &str,
    results: &[StateScore],
    dataset: &Dataset,
) -> Result<ReportEmail, ServiceError> {
    let to = validate_email(email)?;
    if results.is_empty() {
        return Err(ServiceError::InvalidRequest("results are required".into()));
    }

    let view = ReportView::build(
        dataset,
        results,
        PartitionPolicy {
            free_count: results.len(),
        },
        ReportTier::Full,
        Price::default(),
    );

    let html = render_html(&view).map_err(|e| ServiceError::Render(e.to_string()))?;
    let mut markdown = MarkdownWriter::new(Vec::new());
    markdown
        .write_report(&view)
        .map_err(|e| ServiceError::Render(e.to_string()))?;
    let text = String::from_utf8(markdown.into_inner())
        .map_err(|e| ServiceError::Render(e.to_string()))?;

    Ok(ReportEmail {
        to: to.to_string(),
        subject: format!(
            "Your StateMatch Report - Top {} Recommendations",
            results.len()
        ),
        html,
        text,
    })
}

pub trait ReportMailer {
    fn send(&self, email: &ReportEmail) -> Result<Delivery, ServiceError>;
}

/// Writes each message into a local directory instead of sending it.
#[derive(Debug, Clone)]
pub struct OutboxMailer {
    dir: PathBuf,
    from: String,
}

#[derive(Serialize, Deserialize)]
struct OutboxEnvelope {
    from: String,
    to: String,
    subject: String,
    text: String,
    created_at: chrono::DateTime<Utc>,
}

impl OutboxMailer {
    pub fn new(dir: impl Into<PathBuf>, from: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            from: from.into(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn write(&self, path: &Path, contents: &str) -> Result<(), ServiceError> {
        fs::write(path, contents).map_err(|source| ServiceError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

fn message_id(to: &str) -> String {
    let recipient: String = to
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    format!("{}-{recipient}", Utc::now().format("%Y%m%dT%H%M%S%.3f"))
}

impl ReportMailer for OutboxMailer {
    fn send(&self, email: &ReportEmail) -> Result<Delivery, ServiceError> {
        fs::create_dir_all(&self.dir).map_err(|source| ServiceError::Io {
            path: self.dir.clone(),
            source,
        })?;

        let id = message_id(&email.to);
        let envelope = OutboxEnvelope {
            from: self.from.clone(),
            to: email.to.clone(),
            subject: email.subject.clone(),
            text: email.text.clone(),
            created_at: Utc::now(),
        };
        let json = serde_json::to_string_pretty(&envelope)
            .map_err(|e| ServiceError::Render(e.to_string()))?;

        self.write(&self.dir.join(format!("{id}.html")), &email.html)?;
        self.write(&self.dir.join(format!("{id}.json")), &json)?;
        tracing::info!(to = %email.to, dir = %self.dir.display(), "Report written to outbox");
        Ok(Delivery { id })
    }
}

#[derive(Serialize)]
struct ResendRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    html: &'a str,
    text: &'a str,
}

#[derive(Deserialize)]
struct ResendResponse {
    id: String,
}

/// Sends through the Resend HTTP API.
pub struct ResendMailer {
    client: reqwest::blocking::Client,
    endpoint: String,
    api_key: String,
    from: String,
}

impl ResendMailer {
    pub fn new(
        api_key: impl Into<String>,
        from: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ServiceError> {
        Ok(Self {
            client: http_client(timeout)?,
            endpoint: RESEND_ENDPOINT.to_string(),
            api_key: api_key.into(),
            from: from.into(),
        })
    }

    /// Read the API key from `RESEND_API_KEY`.
    pub fn from_env(from: impl Into<String>, timeout: Duration) -> Result<Self, ServiceError> {
        let api_key = std::env::var(RESEND_API_KEY_ENV)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or(ServiceError::MissingCredential(RESEND_API_KEY_ENV))?;
        Self::new(api_key, from, timeout)
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

impl ReportMailer for ResendMailer {
    fn send(&self, email: &ReportEmail) -> Result<Delivery, ServiceError> {
        let body = ResendRequest {
            from: &self.from,
            to: [email.to.as_str()],
            subject: &email.subject,
            html: &email.html,
            text: &email.text,
        };

        tracing::info!(to = %email.to, "Sending report");
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            tracing::error!(status = status.as_u16(), %body, "Email provider rejected report");
            return Err(match status.as_u16() {
                429 => ServiceError::RateLimited,
                code => ServiceError::Upstream { status: code, body },
            });
        }

        let accepted: ResendResponse = response.json()?;
        tracing::debug!(id = %accepted.id, "Email accepted");
        Ok(Delivery { id: accepted.id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::AnswerMap;
    use crate::scoring::{calculate_scores, ScoringOptions};
    use tempfile::TempDir;

    fn sample(dataset: &Dataset) -> Vec<StateScore> {
        let answers: AnswerMap = [("climate", "climate_cold"), ("coast", "coast_no")]
            .into_iter()
            .collect();
        calculate_scores(dataset, &answers, &ScoringOptions::default())
    }

    #[test]
    fn compose_requires_email_and_results() {
        let dataset = Dataset::bundled().unwrap();
        let results = sample(&dataset);

        assert!(compose_report_email("", &results, &dataset).is_err());
        assert!(compose_report_email("me@example.com", &[], &dataset).is_err());
    }

    #[test]
    fn subject_counts_recommendations() {
        let dataset = Dataset::bundled().unwrap();
        let results = sample(&dataset);
        let email = compose_report_email("me@example.com", &results, &dataset).unwrap();

        assert_eq!(email.subject, "Your StateMatch Report - Top 5 Recommendations");
        assert!(email.html.contains("Your StateMatch Report"));
        assert!(!email.text.contains("Locked"));
    }

    #[test]
    fn outbox_writes_html_and_envelope() {
        let temp = TempDir::new().unwrap();
        let dataset = Dataset::bundled().unwrap();
        let email = compose_report_email("me@example.com", &sample(&dataset), &dataset).unwrap();

        let mailer = OutboxMailer::new(temp.path().join("outbox"), DEFAULT_SENDER);
        let delivery = mailer.send(&email).unwrap();

        let html = fs::read_to_string(mailer.dir().join(format!("{}.html", delivery.id))).unwrap();
        assert_eq!(html, email.html);
        let envelope: serde_json::Value = serde_json::from_str(
            &fs::read_to_string(mailer.dir().join(format!("{}.json", delivery.id))).unwrap(),
        )
        .unwrap();
        assert_eq!(envelope["to"], "me@example.com");
        assert_eq!(envelope["from"], DEFAULT_SENDER);
    }
}
