use crate::archive::error::ArchiveError;
use crate::artifact::error::ArtifactError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error(transparent)]
    Archive(#[from] ArchiveError),

    #[error(transparent)]
    Artifact(#[from] ArtifactError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to resolve a calendar date range")]
    DateParsingError,
}
