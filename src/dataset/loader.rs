use super::Dataset;
use crate::core::{Question, StateProfile};
use crate::errors::DatasetError;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const STATES_STEM: &str = "states";
pub const QUESTIONS_STEM: &str = "questions";

/// Serialization formats accepted for dataset files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFormat {
    Json,
    Yaml,
    Toml,
}

impl DataFormat {
    /// Extensions probed when searching a data directory, in priority order.
    pub const EXTENSIONS: [&'static str; 4] = ["json", "yaml", "yml", "toml"];

    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }
}

// A collection file may be a bare list or a table keyed by the collection
// name. TOML has no top-level arrays, so only the keyed form works there.
#[derive(Deserialize)]
#[serde(untagged)]
enum Collection<T> {
    Bare(Vec<T>),
    Keyed {
        #[serde(alias = "states", alias = "questions")]
        items: Vec<T>,
    },
}

impl<T> Collection<T> {
    fn into_items(self) -> Vec<T> {
        match self {
            Self::Bare(items) | Self::Keyed { items } => items,
        }
    }
}

/// Parse one collection from a string. `origin` names the source in errors.
pub fn parse_collection<T: DeserializeOwned>(
    format: DataFormat,
    contents: &str,
    origin: &str,
) -> Result<Vec<T>, DatasetError> {
    let parsed: Result<Collection<T>, String> = match format {
        DataFormat::Json => serde_json::from_str(contents).map_err(|e| e.to_string()),
        DataFormat::Yaml => serde_yaml::from_str(contents).map_err(|e| e.to_string()),
        DataFormat::Toml => toml::from_str(contents).map_err(|e| e.to_string()),
    };

    parsed
        .map(Collection::into_items)
        .map_err(|message| DatasetError::Parse {
            origin: origin.to_string(),
            message,
        })
}

/// Find `<stem>.<ext>` inside `dir`, trying [`DataFormat::EXTENSIONS`] in order.
pub fn locate_collection(dir: &Path, stem: &'static str) -> Result<PathBuf, DatasetError> {
    DataFormat::EXTENSIONS
        .iter()
        .map(|ext| dir.join(format!("{stem}.{ext}")))
        .find(|candidate| candidate.is_file())
        .ok_or_else(|| DatasetError::MissingFile {
            collection: stem,
            dir: dir.to_path_buf(),
        })
}

pub fn read_collection<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, DatasetError> {
    let format = DataFormat::from_path(path).ok_or_else(|| DatasetError::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;
    let contents = fs::read_to_string(path).map_err(|source| DatasetError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_collection(format, &contents, &path.display().to_string())
}

/// Load and validate the dataset stored in `dir`.
pub fn load_dir(dir: &Path) -> Result<Dataset, DatasetError> {
    let states_path = locate_collection(dir, STATES_STEM)?;
    let questions_path = locate_collection(dir, QUESTIONS_STEM)?;

    let states: Vec<StateProfile> = read_collection(&states_path)?;
    let questions: Vec<Question> = read_collection(&questions_path)?;

    tracing::debug!(
        states = states.len(),
        questions = questions.len(),
        dir = %dir.display(),
        "Loaded dataset files"
    );

    Dataset::new(states, questions)
}
