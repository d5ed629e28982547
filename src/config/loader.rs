use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::StateMatchConfig;
use crate::errors::ConfigError;

pub const CONFIG_FILE_NAME: &str = ".statematch.toml";

const MAX_TRAVERSAL_DEPTH: usize = 10;

fn read_config_file(path: &Path) -> Result<String, ConfigError> {
    fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse TOML contents and run [`StateMatchConfig::validate`].
pub fn parse_and_validate_config(
    contents: &str,
    origin: &Path,
) -> Result<StateMatchConfig, ConfigError> {
    let config = toml::from_str::<StateMatchConfig>(contents).map_err(|e| ConfigError::Parse {
        path: origin.to_path_buf(),
        message: e.to_string(),
    })?;
    config.validate()?;
    Ok(config)
}

/// Load an explicitly requested file. Any problem is an error.
pub fn load_config_from(path: &Path) -> Result<StateMatchConfig, ConfigError> {
    let contents = read_config_file(path)?;
    let config = parse_and_validate_config(&contents, path)?;
    tracing::debug!(path = %path.display(), "Loaded config");
    Ok(config)
}

/// Discovered files that fail to load are skipped with a warning.
fn try_load_config_from_path(config_path: &Path) -> Option<StateMatchConfig> {
    match load_config_from(config_path) {
        Ok(config) => Some(config),
        Err(ConfigError::Read { source, .. }) if source.kind() == ErrorKind::NotFound => None,
        Err(e) => {
            tracing::warn!("{e}. Using defaults.");
            None
        }
    }
}

/// `start` followed by up to `max_depth - 1` of its parents.
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        parent.pop().then_some(parent)
    })
    .take(max_depth)
}

/// Find `.statematch.toml` in `start` or one of its ancestors.
pub fn discover_config(start: PathBuf) -> StateMatchConfig {
    directory_ancestors(start, MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_else(|| {
            tracing::debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH
            );
            StateMatchConfig::default()
        })
}

pub fn load_config() -> StateMatchConfig {
    match std::env::current_dir() {
        Ok(current) => discover_config(current),
        Err(e) => {
            tracing::warn!("Failed to get current directory: {e}. Using default config.");
            StateMatchConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MailerKind;
    use crate::scoring::TieBreak;
    use indoc::indoc;
    use tempfile::TempDir;

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config = parse_and_validate_config(
            indoc! {r#"
                [scoring]
                result_count = 10
                tie_break = "dataset-order"

                [mailer]
                kind = "resend"
            "#},
            Path::new("test.toml"),
        )
        .unwrap();

        assert_eq!(config.scoring.result_count, 10);
        assert_eq!(config.scoring.free_preview, 3);
        assert_eq!(config.scoring.tie_break, TieBreak::DatasetOrder);
        assert_eq!(config.mailer.kind, MailerKind::Resend);
        assert_eq!(config.checkout.price_cents, 700);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = parse_and_validate_config("[scoring]\nresult_cnt = 3\n", Path::new("x.toml"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn invalid_values_fail_validation() {
        let err = parse_and_validate_config("[scoring]\nresult_count = 0\n", Path::new("x.toml"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn ancestors_stop_at_depth() {
        let dirs: Vec<PathBuf> = directory_ancestors(PathBuf::from("/a/b/c/d"), 3).collect();
        assert_eq!(
            dirs,
            vec![
                PathBuf::from("/a/b/c/d"),
                PathBuf::from("/a/b/c"),
                PathBuf::from("/a/b")
            ]
        );
    }

    #[test]
    fn discovers_config_in_parent_directory() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(CONFIG_FILE_NAME),
            "[site]\nurl = \"https://example.org\"\n",
        )
        .unwrap();
        let nested = temp.path().join("one").join("two");
        fs::create_dir_all(&nested).unwrap();

        let config = discover_config(nested);
        assert_eq!(config.site.url, "https://example.org");
    }

    #[test]
    fn broken_discovered_file_falls_back_to_defaults() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(CONFIG_FILE_NAME), "[scoring\n").unwrap();

        let config = discover_config(temp.path().to_path_buf());
        assert_eq!(config, StateMatchConfig::default());
    }
}
