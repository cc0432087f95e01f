//! Error types for the OSMT skills graph builder

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OsmtError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Not a skill record (type = {found:?})")]
    NotASkillRecord { found: Option<String> },

    #[error("Skill record has no usable uuid or id")]
    MissingIdentifier,

    #[error("Invalid IRI: {0}")]
    InvalidIri(String),

    #[error("Failed to parse Turtle {path}: {message}")]
    FragmentParse { path: PathBuf, message: String },

    #[error("Store error: {0}")]
    Storage(String),

    #[error("Query error: {0}")]
    Query(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Config error: {0}")]
    Config(String),
}

impl OsmtError {
    /// True for the "this JSON is simply not one of ours" case, which batch
    /// drivers skip instead of counting as a failure.
    pub fn is_not_a_record(&self) -> bool {
        matches!(self, OsmtError::NotASkillRecord { .. })
    }
}

impl From<oxigraph::store::StorageError> for OsmtError {
    fn from(err: oxigraph::store::StorageError) -> Self {
        OsmtError::Storage(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, OsmtError>;
