//! Logging setup and crash reporting.
//!
//! Logs go to stderr so rendered reports on stdout stay clean. `RUST_LOG`
//! wins over the `-v` count when set.

pub mod panic_hook;

pub use panic_hook::{install_panic_hook, set_current_command};

use tracing::Level;
use tracing_subscriber::{fmt, EnvFilter};

/// `-v` count to default log level.
pub fn level_for_verbosity(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

fn env_filter(verbosity: u8) -> EnvFilter {
    let default = level_for_verbosity(verbosity).to_string().to_lowercase();
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// Install the global subscriber. Safe to call more than once; later calls
/// are ignored.
pub fn init_logging(verbosity: u8) {
    let _ = fmt()
        .with_env_filter(env_filter(verbosity))
        .with_writer(std::io::stderr)
        .with_target(verbosity >= 2)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_maps_to_levels() {
        assert_eq!(level_for_verbosity(0), Level::WARN);
        assert_eq!(level_for_verbosity(1), Level::INFO);
        assert_eq!(level_for_verbosity(2), Level::DEBUG);
        assert_eq!(level_for_verbosity(7), Level::TRACE);
    }

    #[test]
    fn repeated_init_is_harmless() {
        init_logging(0);
        init_logging(3);
    }
}
