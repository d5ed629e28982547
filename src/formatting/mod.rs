use clap::ValueEnum;
use std::env;
use std::io::IsTerminal;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ColorMode {
    #[default]
    Auto, // Detect based on terminal
    Always,
    Never,
}

impl ColorMode {
    pub fn should_use_color(&self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => detect_color_support(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormattingConfig {
    pub color: ColorMode,
    pub emoji: bool,
}

impl Default for FormattingConfig {
    fn default() -> Self {
        Self {
            color: ColorMode::Auto,
            emoji: true,
        }
    }
}

impl FormattingConfig {
    /// Honour NO_COLOR, CLICOLOR and CLICOLOR_FORCE on top of `color`.
    pub fn from_env(color: ColorMode) -> Self {
        let mut config = Self {
            color,
            ..Self::default()
        };

        if color == ColorMode::Auto {
            // no-color.org
            if env::var_os("NO_COLOR").is_some() {
                config.color = ColorMode::Never;
            }
            if env::var("CLICOLOR").is_ok_and(|val| val == "0") {
                config.color = ColorMode::Never;
            }
            if env::var("CLICOLOR_FORCE").is_ok_and(|val| val == "1") {
                config.color = ColorMode::Always;
            }
        }

        config.emoji = config.color.should_use_color();
        config
    }

    /// ASCII-only, no colors.
    pub fn plain() -> Self {
        Self {
            color: ColorMode::Never,
            emoji: false,
        }
    }

    /// Make the `colored` crate follow this configuration process-wide.
    pub fn apply(&self) {
        colored::control::set_override(self.color.should_use_color());
    }

    pub fn glyph<'a>(&self, emoji: &'a str, fallback: &'a str) -> &'a str {
        if self.emoji {
            emoji
        } else {
            fallback
        }
    }

    /// Marker shown in front of a ranked state.
    pub fn rank_marker(&self, rank: usize) -> String {
        match (self.emoji, rank) {
            (true, 1) => "🥇".to_string(),
            (true, 2) => "🥈".to_string(),
            (true, 3) => "🥉".to_string(),
            _ => format!("#{rank}"),
        }
    }

    pub fn lock(&self) -> &'static str {
        self.glyph("🔒", "[locked]")
    }
}

fn detect_color_support() -> bool {
    if env::var("TERM").is_ok_and(|term| term == "dumb") {
        return false;
    }
    std::io::stdout().is_terminal()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_modes_are_respected() {
        assert!(ColorMode::Always.should_use_color());
        assert!(!ColorMode::Never.should_use_color());
    }

    #[test]
    fn plain_uses_ascii_markers() {
        let plain = FormattingConfig::plain();
        assert_eq!(plain.rank_marker(1), "#1");
        assert_eq!(plain.lock(), "[locked]");
    }

    #[test]
    fn emoji_medals_stop_after_third_place() {
        let fancy = FormattingConfig {
            color: ColorMode::Always,
            emoji: true,
        };
        assert_eq!(fancy.rank_marker(2), "🥈");
        assert_eq!(fancy.rank_marker(4), "#4");
    }

    #[test]
    fn forced_mode_ignores_environment() {
        let config = FormattingConfig::from_env(ColorMode::Never);
        assert_eq!(config.color, ColorMode::Never);
        assert!(!config.emoji);
    }
}
