use crate::types::SnapshotVersion;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlanError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Placement infeasible: placed {placed} of {target} hotspots before {attempts} consecutive rejections")]
    PlacementInfeasible { placed: usize, target: usize, attempts: u64 },

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Unknown channel '{symbol}'")]
    UnknownChannel { symbol: String },

    #[error("Snapshot version {version} not found")]
    SnapshotNotFound { version: SnapshotVersion },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type PlanResult<T> = Result<T, PlanError>;
