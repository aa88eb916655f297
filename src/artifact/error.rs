use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("Failed to encode artifact")]
    Encode(#[source] serde_json::Error),

    #[error("Failed to create output directory '{0}'")]
    DirCreation(PathBuf, #[source] std::io::Error),

    #[error("Failed to write temporary artifact in '{0}'")]
    TempWrite(PathBuf, #[source] std::io::Error),

    #[error("Failed to replace artifact '{0}'")]
    Persist(PathBuf, #[source] std::io::Error),

    #[error("Failed to read artifact '{0}'")]
    Read(PathBuf, #[source] std::io::Error),

    #[error("Failed to decode artifact '{0}'")]
    Decode(PathBuf, #[source] serde_json::Error),

    #[error("Artifact '{0}' is neither JSON nor a `const DATA = ...;` script")]
    UnrecognizedFormat(PathBuf),

    #[error("Background task failed to complete")]
    TaskJoin(#[from] tokio::task::JoinError),
}
