use crate::config::CONFIG_FILE_NAME;
use crate::io;
use anyhow::Result;
use std::io::Write;
use std::path::Path;

pub const DEFAULT_CONFIG: &str = r#"# StateMatch configuration
#
# API keys are never read from this file. Set RESEND_API_KEY for email
# delivery and STATEMATCH_CHAT_API_KEY for the support assistant.

[scoring]
# Number of ranked states in a report
result_count = 5
# Ranks shown before checkout
free_preview = 3
# Order among equal scores: "state-code" or "dataset-order"
tie_break = "state-code"

[data]
# Directory with states.{json,yaml,toml} and questions.{json,yaml,toml}
# dir = "data"

[session]
# dir = "/path/to/sessions"

[checkout]
price_cents = 700
currency = "USD"
return_origin = "http://localhost:8080"

[mailer]
# "outbox" writes emails to disk, "resend" sends them
kind = "outbox"
from = "StateMatch <onboarding@resend.dev>"
# outbox_dir = "outbox"
timeout_secs = 30

[chat]
endpoint = "https://ai.gateway.lovable.dev/v1/chat/completions"
model = "google/gemini-2.5-flash"
timeout_secs = 60

[site]
url = "https://statematchquiz.com"
"#;

pub fn init_config(dir: &Path, force: bool, out: &mut dyn Write) -> Result<()> {
    let config_path = dir.join(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!("Configuration file already exists. Use --force to overwrite.");
    }

    io::write_file(&config_path, DEFAULT_CONFIG)?;
    writeln!(out, "Created {CONFIG_FILE_NAME} configuration file")?;
    Ok(())
}
