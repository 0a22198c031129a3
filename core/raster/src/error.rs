//! FILENAME: core/raster/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RasterError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("row {row} is outside the raster ({rows} rows)")]
    RowOutOfRange { row: usize, rows: usize },

    #[error("row buffer holds {got} cells but the raster has {expected} columns")]
    BufferSize { expected: usize, got: usize },

    #[error("row {row} has {got} cells, expected {expected}")]
    RaggedRow { row: usize, expected: usize, got: usize },

    #[error("invalid window: {0}")]
    InvalidWindow(String),

    #[error("category table not found: {0}")]
    CategoriesNotFound(String),

    #[error("invalid category table: {0}")]
    InvalidCategories(String),
}
