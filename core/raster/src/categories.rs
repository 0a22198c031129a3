//! FILENAME: core/raster/src/categories.rs
//! PURPOSE: Category code to label metadata for one layer.

use std::collections::{BTreeMap, HashMap};
use crate::error::RasterError;

/// Labels keyed by category code, plus an optional layer title.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryTable {
    pub title: Option<String>,
    labels: BTreeMap<i64, String>,
}

impl CategoryTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(title: impl Into<String>) -> Self {
        CategoryTable {
            title: Some(title.into()),
            labels: BTreeMap::new(),
        }
    }

    /// Sets the label for `code`, returning the previous label if any.
    pub fn insert(&mut self, code: i64, label: impl Into<String>) -> Option<String> {
        self.labels.insert(code, label.into())
    }

    pub fn label(&self, code: i64) -> Option<&str> {
        self.labels.get(&code).map(String::as_str)
    }

    /// Iterates labels in ascending code order.
    pub fn iter(&self) -> impl Iterator<Item = (i64, &str)> {
        self.labels.iter().map(|(code, label)| (*code, label.as_str()))
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Where layer category tables come from.
pub trait CategorySource {
    fn load_categories(&self, name: &str, mapset: &str) -> Result<CategoryTable, RasterError>;
}

/// In-memory catalog of category tables keyed by (name, mapset).
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalog {
    tables: HashMap<(String, String), CategoryTable>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: &str, mapset: &str, table: CategoryTable) {
        self.tables
            .insert((name.to_string(), mapset.to_string()), table);
    }
}

impl CategorySource for MemoryCatalog {
    fn load_categories(&self, name: &str, mapset: &str) -> Result<CategoryTable, RasterError> {
        self.tables
            .get(&(name.to_string(), mapset.to_string()))
            .cloned()
            .ok_or_else(|| RasterError::CategoriesNotFound(format!("{}@{}", name, mapset)))
    }
}
