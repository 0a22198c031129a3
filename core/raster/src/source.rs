//! FILENAME: core/raster/src/source.rs
//! PURPOSE: Row-at-a-time access to a category layer.
//! CONTEXT: The engine never holds a whole layer; it pulls one row per layer
//! into a reusable buffer. `MemoryRaster` is the in-process implementation
//! used by tests and by adapters that load a small file completely.

use crate::cell::{CategoryValue, NULL_CODE};
use crate::error::RasterError;

/// A source of category rows sharing one window.
pub trait RowSource {
    fn rows(&self) -> usize;

    fn cols(&self) -> usize;

    /// Fills `buf` (exactly `cols()` long) with the values of `row`.
    fn read_row(&mut self, row: usize, buf: &mut [CategoryValue]) -> Result<(), RasterError>;

    /// Integer code this layer uses on disk for no-data.
    fn no_data_code(&self) -> i64 {
        NULL_CODE
    }
}

impl<T: RowSource + ?Sized> RowSource for Box<T> {
    fn rows(&self) -> usize {
        (**self).rows()
    }

    fn cols(&self) -> usize {
        (**self).cols()
    }

    fn read_row(&mut self, row: usize, buf: &mut [CategoryValue]) -> Result<(), RasterError> {
        (**self).read_row(row, buf)
    }

    fn no_data_code(&self) -> i64 {
        (**self).no_data_code()
    }
}

/// A fully loaded layer stored row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryRaster {
    rows: usize,
    cols: usize,
    cells: Vec<CategoryValue>,
    no_data_code: i64,
}

impl MemoryRaster {
    /// Creates a raster where every cell is no-data.
    pub fn new(rows: usize, cols: usize) -> Self {
        MemoryRaster {
            rows,
            cols,
            cells: vec![CategoryValue::NoData; rows * cols],
            no_data_code: NULL_CODE,
        }
    }

    /// Builds a raster from rows of values. All rows must have the same length.
    pub fn from_rows(rows: Vec<Vec<CategoryValue>>) -> Result<Self, RasterError> {
        let cols = rows.first().map_or(0, |r| r.len());
        let mut cells = Vec::with_capacity(rows.len() * cols);
        for (index, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return Err(RasterError::RaggedRow {
                    row: index,
                    expected: cols,
                    got: row.len(),
                });
            }
            cells.extend_from_slice(row);
        }

        Ok(MemoryRaster {
            rows: rows.len(),
            cols,
            cells,
            no_data_code: NULL_CODE,
        })
    }

    /// Convenience constructor from plain category codes (no no-data cells).
    /// Panics on ragged input; intended for fixtures.
    pub fn from_codes(rows: &[&[i64]]) -> Self {
        let values = rows
            .iter()
            .map(|row| row.iter().map(|&c| CategoryValue::Category(c)).collect())
            .collect();
        match Self::from_rows(values) {
            Ok(raster) => raster,
            Err(e) => panic!("from_codes: {}", e),
        }
    }

    pub fn with_no_data_code(mut self, code: i64) -> Self {
        self.no_data_code = code;
        self
    }

    pub fn get(&self, row: usize, col: usize) -> Option<CategoryValue> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        Some(self.cells[row * self.cols + col])
    }

    pub fn set(&mut self, row: usize, col: usize, value: CategoryValue) {
        if row < self.rows && col < self.cols {
            self.cells[row * self.cols + col] = value;
        }
    }
}

impl RowSource for MemoryRaster {
    fn rows(&self) -> usize {
        self.rows
    }

    fn cols(&self) -> usize {
        self.cols
    }

    fn read_row(&mut self, row: usize, buf: &mut [CategoryValue]) -> Result<(), RasterError> {
        if row >= self.rows {
            return Err(RasterError::RowOutOfRange { row, rows: self.rows });
        }
        if buf.len() != self.cols {
            return Err(RasterError::BufferSize {
                expected: self.cols,
                got: buf.len(),
            });
        }
        let start = row * self.cols;
        buf.copy_from_slice(&self.cells[start..start + self.cols]);
        Ok(())
    }

    fn no_data_code(&self) -> i64 {
        self.no_data_code
    }
}
