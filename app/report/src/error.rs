//! FILENAME: app/report/src/error.rs

use crosstab_engine::ReportError;
use persistence::PersistenceError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Report(#[from] ReportError),

    #[error("{0}")]
    Persistence(#[from] PersistenceError),

    #[error("Cannot read report definition {path}: {source}")]
    Definition {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid report definition: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Cannot render report: {0}")]
    Render(#[source] serde_json::Error),

    #[error("Cannot write report: {0}")]
    Io(#[from] std::io::Error),
}
