//! FILENAME: core/raster/src/lib.rs
//! PURPOSE: Shared raster types used by the cross-tabulation engine and its adapters.
//! CONTEXT: Row sources, category sources and the window geometry they share.
//! Nothing in this crate aggregates; it only describes what the engine scans.

pub mod categories;
pub mod cell;
pub mod error;
pub mod source;
pub mod window;

pub use categories::{CategorySource, CategoryTable, MemoryCatalog};
pub use cell::{CategoryValue, NULL_CODE};
pub use error::RasterError;
pub use source::{MemoryRaster, RowSource};
pub use window::Window;
