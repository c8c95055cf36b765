use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, HudError>;

#[derive(Debug, Error)]
pub enum HudError {
    #[error("status payload must be a JSON object, got {kind}")]
    NotAnObject { kind: &'static str },
    #[error("status payload has a non-numeric field: {0}")]
    Payload(#[source] serde_json::Error),
    #[error("status payload is not valid JSON: {0}")]
    Json(#[source] serde_json::Error),
    #[error("failed to parse config {}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
