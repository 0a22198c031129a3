//! FILENAME: core/crosstab-engine/src/error.rs

use raster::RasterError;
use thiserror::Error;
use crate::engine::DriverState;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("cannot read category metadata for {layer}: {source}")]
    MetadataUnreadable { layer: String, source: RasterError },

    #[error("{what} is {rows}x{cols} but the window is {expected_rows}x{expected_cols}")]
    GeometryMismatch {
        what: String,
        expected_rows: usize,
        expected_cols: usize,
        rows: usize,
        cols: usize,
    },

    #[error("{expected} layers registered but {got} row sources supplied")]
    LayerCount { expected: usize, got: usize },

    #[error("failed to read row {row} of {layer}: {source}")]
    RowRead {
        layer: String,
        row: usize,
        source: RasterError,
    },

    #[error("invalid unit: {0}")]
    InvalidUnit(String),

    #[error("{requested} units requested, at most {max} are supported")]
    TooManyUnits { requested: usize, max: usize },

    #[error("a report needs at least one layer")]
    NoLayers,

    #[error("report driver is {actual:?}, expected {expected:?}")]
    OutOfOrder {
        expected: DriverState,
        actual: DriverState,
    },
}
