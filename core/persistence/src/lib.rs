//! FILENAME: core/persistence/src/lib.rs
//! Raster Persistence Module
//!
//! Reads category rasters stored as plain-text grids and their label
//! tables stored as category rule files, and resolves both by map name
//! under a directory tree.

mod ascii_grid;
mod catalog;
mod category_rules;
mod error;

pub use ascii_grid::{load_ascii_grid, parse_ascii_grid, AsciiGrid};
pub use catalog::{split_map_name, DirectoryCatalog, DEFAULT_MAPSET};
pub use category_rules::{load_category_rules, parse_category_rules};
pub use error::PersistenceError;
