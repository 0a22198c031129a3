//! FILENAME: core/raster/src/window.rs
//! PURPOSE: The shared extent and resolution of every layer in one report.
//! CONTEXT: All layers (and the mask) are scanned against a single window.
//! The engine only needs the row/column counts and the cell size; bounds are
//! kept so adapters can build a window from a file header.

use serde::{Deserialize, Serialize};
use crate::error::RasterError;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Window {
    pub rows: usize,
    pub cols: usize,
    /// North-south cell size in meters.
    pub ns_res: f64,
    /// East-west cell size in meters.
    pub ew_res: f64,
}

impl Window {
    pub fn new(rows: usize, cols: usize, ns_res: f64, ew_res: f64) -> Self {
        Window { rows, cols, ns_res, ew_res }
    }

    /// Builds a window from its edges, deriving the resolution from the cell counts.
    pub fn from_bounds(
        north: f64,
        south: f64,
        east: f64,
        west: f64,
        rows: usize,
        cols: usize,
    ) -> Result<Self, RasterError> {
        if rows == 0 || cols == 0 {
            return Err(RasterError::InvalidWindow(format!(
                "window must have at least one row and column (rows={} cols={})",
                rows, cols
            )));
        }
        if north <= south {
            return Err(RasterError::InvalidWindow(format!(
                "north ({}) must be greater than south ({})",
                north, south
            )));
        }
        if east <= west {
            return Err(RasterError::InvalidWindow(format!(
                "east ({}) must be greater than west ({})",
                east, west
            )));
        }

        Ok(Window {
            rows,
            cols,
            ns_res: (north - south) / rows as f64,
            ew_res: (east - west) / cols as f64,
        })
    }

    /// Area of one cell in square meters.
    pub fn cell_area(&self) -> f64 {
        self.ns_res * self.ew_res
    }

    /// Total number of cells in the window.
    pub fn cell_count(&self) -> u64 {
        self.rows as u64 * self.cols as u64
    }

    pub fn same_extent(&self, rows: usize, cols: usize) -> bool {
        self.rows == rows && self.cols == cols
    }
}
