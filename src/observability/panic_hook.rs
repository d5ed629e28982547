//! Crash report printed instead of the default panic message.

use std::panic::PanicHookInfo;
use std::sync::Mutex;

const VERSION: &str = env!("CARGO_PKG_VERSION");
const RULE: &str = "════════════════════════════════════════════════════════════";

static CURRENT_COMMAND: Mutex<Option<&'static str>> = Mutex::new(None);

/// Record the subcommand being run so a crash report can name it.
pub fn set_current_command(command: &'static str) {
    if let Ok(mut slot) = CURRENT_COMMAND.lock() {
        *slot = Some(command);
    }
}

fn current_command() -> Option<&'static str> {
    CURRENT_COMMAND.lock().ok().and_then(|slot| *slot)
}

pub fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        eprintln!("{}", crash_report(info));
    }));
}

fn crash_report(info: &PanicHookInfo<'_>) -> String {
    let mut lines = vec![
        String::new(),
        RULE.to_string(),
        "STATEMATCH CRASH REPORT".to_string(),
        RULE.to_string(),
        format!("Version:  {VERSION}"),
        format!("Platform: {}", std::env::consts::OS),
        format!("Time:     {}", chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")),
        format!("Command:  {}", current_command().unwrap_or("(none)")),
        format!("Panic:    {}", panic_message(info)),
    ];

    if let Some(location) = info.location() {
        lines.push(format!(
            "Location: {}:{}:{}",
            location.file(),
            location.line(),
            location.column()
        ));
    }

    lines.push(RULE.to_string());
    if std::env::var_os("RUST_BACKTRACE").is_some() {
        lines.push(std::backtrace::Backtrace::capture().to_string());
    } else {
        lines.push("Run with RUST_BACKTRACE=1 for a stack trace".to_string());
    }
    lines.join("\n")
}

fn panic_message(info: &PanicHookInfo<'_>) -> String {
    let payload = info.payload();
    payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "Unknown panic".to_string())
}
