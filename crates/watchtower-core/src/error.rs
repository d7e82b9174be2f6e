use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum WatchtowerError {
    #[error("io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("json error at {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("tracker error: {0}")]
    Tracker(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("{0}")]
    Other(String),
}

impl WatchtowerError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.into(),
            source,
        }
    }
}
