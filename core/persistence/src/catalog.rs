//! FILENAME: core/persistence/src/catalog.rs
//! PURPOSE: Resolves `name@mapset` map references to files under a root directory.
//! CONTEXT: `<root>/<mapset>/<name>.asc` holds the grid and
//! `<root>/<mapset>/<name>.cats` its category rules.

use std::path::{Path, PathBuf};
use log::debug;
use raster::{CategorySource, CategoryTable, RasterError};
use crate::ascii_grid::{load_ascii_grid, AsciiGrid};
use crate::category_rules::load_category_rules;
use crate::error::PersistenceError;

/// Mapset used when a map reference does not name one.
pub const DEFAULT_MAPSET: &str = "PERMANENT";

/// Splits `name@mapset`; a bare name lives in the default mapset.
pub fn split_map_name(reference: &str) -> (&str, &str) {
    match reference.split_once('@') {
        Some((name, mapset)) if !mapset.is_empty() => (name, mapset),
        Some((name, _)) => (name, DEFAULT_MAPSET),
        None => (reference, DEFAULT_MAPSET),
    }
}

#[derive(Debug, Clone)]
pub struct DirectoryCatalog {
    root: PathBuf,
}

impl DirectoryCatalog {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        DirectoryCatalog { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn raster_path(&self, name: &str, mapset: &str) -> PathBuf {
        self.root.join(mapset).join(format!("{}.asc", name))
    }

    pub fn categories_path(&self, name: &str, mapset: &str) -> PathBuf {
        self.root.join(mapset).join(format!("{}.cats", name))
    }

    pub fn open_raster(&self, name: &str, mapset: &str) -> Result<AsciiGrid, PersistenceError> {
        let path = self.raster_path(name, mapset);
        debug!("opening raster {}", path.display());
        load_ascii_grid(&path)
    }
}

impl CategorySource for DirectoryCatalog {
    fn load_categories(&self, name: &str, mapset: &str) -> Result<CategoryTable, RasterError> {
        let path = self.categories_path(name, mapset);
        load_category_rules(&path).map_err(|e| match e {
            PersistenceError::NotFound(p) => RasterError::CategoriesNotFound(p),
            PersistenceError::Io(io) => RasterError::Io(io),
            other => RasterError::InvalidCategories(other.to_string()),
        })
    }
}
