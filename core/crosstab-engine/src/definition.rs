//! FILENAME: core/crosstab-engine/src/definition.rs
//! Report Definition - The serializable configuration.
//!
//! This module contains everything needed to DESCRIBE a report:
//! which units to print, how to order the rows, how no-data cells are
//! treated and how the mask is interpreted. It is consumed, never owned,
//! by the driver, and can be loaded from JSON by a host application.

use raster::CategoryValue;
use serde::{Deserialize, Serialize};
use crate::error::ReportError;
use crate::mask::MaskConfig;
use crate::units::{UnitSpec, UnitTable, MAX_UNITS};

// ============================================================================
// ORDERING
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortMode {
    /// Keep the order in which each tuple was first seen.
    #[default]
    None,
    ByCount,
    ByArea,
    /// Lexicographic over the tuple, no-data first.
    ByCategory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SortRequest {
    pub mode: SortMode,
    #[serde(default)]
    pub direction: SortDirection,
}

impl SortRequest {
    pub fn new(mode: SortMode, direction: SortDirection) -> Self {
        SortRequest { mode, direction }
    }
}

// ============================================================================
// NO-DATA POLICY
// ============================================================================

/// How a no-data cell is represented in the tuple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoDataMode {
    /// Keep the explicit no-data marker.
    #[default]
    Sentinel,
    /// Replace it with the layer's on-disk no-data code, an ordinary category.
    AsCategory,
}

/// Which cells are dropped because of no-data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoDataSkip {
    #[default]
    Never,
    /// Drop the cell if any layer is no-data.
    AnyLayer,
    /// Drop the cell only if every layer is no-data.
    AllLayers,
}

/// How a partially no-data tuple is grouped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoDataGrouping {
    /// Each position keeps its own value.
    #[default]
    PerLayer,
    /// One no-data position turns the whole tuple into all no-data.
    WholeTuple,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NoDataPolicy {
    #[serde(default)]
    pub mode: NoDataMode,
    #[serde(default)]
    pub skip: NoDataSkip,
    #[serde(default)]
    pub grouping: NoDataGrouping,
}

impl NoDataPolicy {
    /// Applies the policy to a freshly read tuple in place.
    ///
    /// Returns `false` when the cell must not be aggregated. Skip rules look
    /// at the tuple as grouped, before category substitution: under
    /// `WholeTuple` any no-data position counts as an all-no-data tuple.
    /// `codes` holds each layer's on-disk no-data code.
    pub fn apply(&self, tuple: &mut [CategoryValue], codes: &[i64]) -> bool {
        let nulls = tuple.iter().filter(|v| v.is_no_data()).count();
        if nulls == 0 {
            return true;
        }
        let all_null = nulls == tuple.len() || self.grouping == NoDataGrouping::WholeTuple;

        match self.skip {
            NoDataSkip::AnyLayer => return false,
            NoDataSkip::AllLayers if all_null => return false,
            _ => {}
        }

        if self.grouping == NoDataGrouping::WholeTuple {
            tuple.fill(CategoryValue::NoData);
        }

        if self.mode == NoDataMode::AsCategory {
            for (value, code) in tuple.iter_mut().zip(codes) {
                if value.is_no_data() {
                    *value = CategoryValue::Category(*code);
                }
            }
        }

        true
    }
}

// ============================================================================
// REPORT DEFINITION
// ============================================================================

fn default_units() -> Vec<String> {
    vec!["cell_counts".to_string(), "percent_cover".to_string()]
}

fn default_no_data_code() -> String {
    "*".to_string()
}

fn default_no_data_label() -> String {
    "no data".to_string()
}

/// Everything a report run is configured with, apart from its layers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportDefinition {
    /// Unit names in column order, resolved through the unit table.
    #[serde(default = "default_units")]
    pub units: Vec<String>,

    /// Applied in order; each sort is stable.
    #[serde(default)]
    pub sort: Vec<SortRequest>,

    #[serde(default)]
    pub no_data: NoDataPolicy,

    #[serde(default)]
    pub mask: MaskConfig,

    /// Printed in place of a category code for no-data.
    #[serde(default = "default_no_data_code")]
    pub no_data_code: String,

    /// Printed in place of a label for no-data.
    #[serde(default = "default_no_data_label")]
    pub no_data_label: String,

    /// Print every unit column in scientific notation.
    #[serde(default)]
    pub scientific: bool,
}

impl Default for ReportDefinition {
    fn default() -> Self {
        ReportDefinition {
            units: default_units(),
            sort: Vec::new(),
            no_data: NoDataPolicy::default(),
            mask: MaskConfig::default(),
            no_data_code: default_no_data_code(),
            no_data_label: default_no_data_label(),
            scientific: false,
        }
    }
}

impl ReportDefinition {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_units(mut self, units: &[&str]) -> Self {
        self.units = units.iter().map(|u| u.to_string()).collect();
        self
    }

    pub fn with_sort(mut self, mode: SortMode, direction: SortDirection) -> Self {
        self.sort.push(SortRequest::new(mode, direction));
        self
    }

    pub fn with_no_data(mut self, policy: NoDataPolicy) -> Self {
        self.no_data = policy;
        self
    }

    /// Resolves the unit names. Runs before any scanning.
    pub fn validate(&self, table: &UnitTable) -> Result<Vec<UnitSpec>, ReportError> {
        if self.units.len() > MAX_UNITS {
            return Err(ReportError::TooManyUnits {
                requested: self.units.len(),
                max: MAX_UNITS,
            });
        }

        let table = table.with_scientific(self.scientific);
        self.units.iter().map(|name| table.resolve(name)).collect()
    }
}
