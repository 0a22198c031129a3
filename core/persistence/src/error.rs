//! FILENAME: core/persistence/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid file format: line {line}: {message}")]
    InvalidFormat { line: usize, message: String },

    #[error("Raster error: {0}")]
    Raster(#[from] raster::RasterError),

    #[error("File not found: {0}")]
    NotFound(String),
}

impl PersistenceError {
    pub(crate) fn format(line: usize, message: impl Into<String>) -> Self {
        PersistenceError::InvalidFormat {
            line,
            message: message.into(),
        }
    }
}
