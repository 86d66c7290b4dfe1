use thiserror::Error;

#[derive(Error, Debug)]
pub enum RecordError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{query}: no cleaned records to aggregate")]
    EmptyDataset { query: &'static str },

    #[error("{query}: no records with title '{title}'")]
    NoMatchingRecords { query: &'static str, title: String },
}

pub type Result<T> = std::result::Result<T, RecordError>;
