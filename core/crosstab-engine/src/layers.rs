//! FILENAME: core/crosstab-engine/src/layers.rs
//! PURPOSE: Per-layer category labels and the widths needed to print them.
//! CONTEXT: Loaded once before scanning and read-only afterwards, so a
//! registry can be shared by reference between independent report runs.

use log::{debug, warn};
use raster::{CategorySource, CategoryTable, CategoryValue};
use crate::error::ReportError;

/// One input layer as the report sees it.
#[derive(Debug, Clone)]
pub struct Layer {
    pub name: String,
    pub mapset: String,
    pub categories: CategoryTable,
    /// Widest printed category code, including the no-data code string.
    pub nlen: usize,
    /// Widest printed label, including the no-data label.
    pub clen: usize,
}

impl Layer {
    /// `name@mapset`, or just `name` when the mapset is empty.
    pub fn qualified_name(&self) -> String {
        if self.mapset.is_empty() {
            self.name.clone()
        } else {
            format!("{}@{}", self.name, self.mapset)
        }
    }
}

#[derive(Debug, Clone)]
pub struct LayerRegistry {
    layers: Vec<Layer>,
    no_data_code: String,
    no_data_label: String,
}

impl Default for LayerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl LayerRegistry {
    pub fn new() -> Self {
        Self::with_no_data_strings("*", "no data")
    }

    /// Registry printing no-data cells as `code` / `label`.
    pub fn with_no_data_strings(code: &str, label: &str) -> Self {
        LayerRegistry {
            layers: Vec::new(),
            no_data_code: code.to_string(),
            no_data_label: label.to_string(),
        }
    }

    /// Reads the category table of `name@mapset` and registers the layer.
    pub fn load(
        &mut self,
        source: &dyn CategorySource,
        name: &str,
        mapset: &str,
    ) -> Result<&Layer, ReportError> {
        let categories = source
            .load_categories(name, mapset)
            .map_err(|e| ReportError::MetadataUnreadable {
                layer: format!("{}@{}", name, mapset),
                source: e,
            })?;
        Ok(self.insert(name, mapset, categories))
    }

    /// Registers a layer whose categories are already in memory.
    pub fn insert(&mut self, name: &str, mapset: &str, categories: CategoryTable) -> &Layer {
        let nlen = categories
            .iter()
            .map(|(code, _)| code.to_string().len())
            .chain(std::iter::once(self.no_data_code.chars().count()))
            .max()
            .unwrap_or(1);
        let clen = categories
            .iter()
            .map(|(_, label)| label.chars().count())
            .chain(std::iter::once(self.no_data_label.chars().count()))
            .max()
            .unwrap_or(0);

        if categories.is_empty() {
            warn!("layer {}@{} has no category labels", name, mapset);
        }
        debug!(
            "registered layer {}@{} categories={} nlen={} clen={}",
            name,
            mapset,
            categories.len(),
            nlen,
            clen
        );

        self.layers.push(Layer {
            name: name.to_string(),
            mapset: mapset.to_string(),
            categories,
            nlen,
            clen,
        });
        let index = self.layers.len() - 1;
        &self.layers[index]
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn layer(&self, index: usize) -> Option<&Layer> {
        self.layers.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Layer> {
        self.layers.iter()
    }

    /// Human-readable label; empty when the category has none.
    pub fn label_for(&self, layer: usize, value: CategoryValue) -> &str {
        match value {
            CategoryValue::NoData => &self.no_data_label,
            CategoryValue::Category(code) => self
                .layers
                .get(layer)
                .and_then(|l| l.categories.label(code))
                .unwrap_or(""),
        }
    }

    /// The category code as printed.
    pub fn code_text(&self, value: CategoryValue) -> String {
        match value {
            CategoryValue::NoData => self.no_data_code.clone(),
            CategoryValue::Category(code) => code.to_string(),
        }
    }

    /// The layer title, falling back to its name.
    pub fn title(&self, layer: usize) -> &str {
        self.layers
            .get(layer)
            .map(|l| l.categories.title.as_deref().unwrap_or(&l.name))
            .unwrap_or("")
    }
}
