use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading manifests or rendering class records.
#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse manifest: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid manifest: {0}")]
    InvalidManifest(String),

    #[error("unknown format: {0}. Use xml or json")]
    UnknownFormat(String),

    #[error("failed to serialize class {class}: {source}")]
    Serialize {
        class: String,
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
