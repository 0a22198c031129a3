//! FILENAME: core/crosstab-engine/src/mask.rs
//! PURPOSE: Decides which cells are excluded before a tuple is formed.
//! CONTEXT: A masked cell is not counted anywhere, not even under a no-data
//! tuple. The mask raster is read one row at a time alongside the layers.

use raster::{CategoryValue, RasterError, RowSource};
use serde::{Deserialize, Serialize};

/// Which mask value marks a cell as excluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaskRule {
    #[default]
    NoData,
    Zero,
    Value(i64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MaskConfig {
    #[serde(default)]
    pub rule: MaskRule,
    /// Keep only the cells the rule would exclude.
    #[serde(default)]
    pub inverse: bool,
}

impl MaskConfig {
    pub fn excludes(&self, value: CategoryValue) -> bool {
        let hit = match self.rule {
            MaskRule::NoData => value.is_no_data(),
            MaskRule::Zero => value == CategoryValue::Category(0),
            MaskRule::Value(code) => value == CategoryValue::Category(code),
        };
        hit != self.inverse
    }
}

struct MaskRaster {
    source: Box<dyn RowSource>,
    config: MaskConfig,
    row: Vec<CategoryValue>,
    loaded: Option<usize>,
}

/// The masking policy for one scan. Without a mask raster nothing is masked.
pub struct MaskPolicy {
    raster: Option<MaskRaster>,
}

impl MaskPolicy {
    pub fn none() -> Self {
        MaskPolicy { raster: None }
    }

    pub fn from_raster(source: Box<dyn RowSource>, config: MaskConfig) -> Self {
        let cols = source.cols();
        MaskPolicy {
            raster: Some(MaskRaster {
                source,
                config,
                row: vec![CategoryValue::NoData; cols],
                loaded: None,
            }),
        }
    }

    pub fn is_active(&self) -> bool {
        self.raster.is_some()
    }

    /// (rows, cols) of the mask raster, if any.
    pub fn extent(&self) -> Option<(usize, usize)> {
        self.raster
            .as_ref()
            .map(|m| (m.source.rows(), m.source.cols()))
    }

    /// Buffers mask row `row`. Must precede `is_masked` calls for that row.
    pub fn load_row(&mut self, row: usize) -> Result<(), RasterError> {
        match self.raster.as_mut() {
            Some(mask) if mask.loaded != Some(row) => {
                mask.source.read_row(row, &mut mask.row)?;
                mask.loaded = Some(row);
                Ok(())
            }
            _ => Ok(()),
        }
    }

    pub fn is_masked(&self, row: usize, col: usize) -> bool {
        let Some(mask) = self.raster.as_ref() else {
            return false;
        };
        debug_assert_eq!(mask.loaded, Some(row), "mask row {} not loaded", row);
        mask.row
            .get(col)
            .map_or(false, |value| mask.config.excludes(*value))
    }
}

impl Default for MaskPolicy {
    fn default() -> Self {
        Self::none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use raster::MemoryRaster;

    fn mask_of(rows: Vec<Vec<CategoryValue>>, config: MaskConfig) -> MaskPolicy {
        MaskPolicy::from_raster(Box::new(MemoryRaster::from_rows(rows).unwrap()), config)
    }

    #[test]
    fn no_mask_never_excludes() {
        let mask = MaskPolicy::none();
        assert!(!mask.is_masked(0, 0));
        assert!(!mask.is_active());
    }

    #[test]
    fn no_data_rule_excludes_null_mask_cells() {
        let mut mask = mask_of(
            vec![vec![CategoryValue::Category(1), CategoryValue::NoData]],
            MaskConfig::default(),
        );
        mask.load_row(0).unwrap();
        assert!(!mask.is_masked(0, 0));
        assert!(mask.is_masked(0, 1));
    }

    #[test]
    fn zero_rule_and_inverse() {
        let rows = vec![vec![CategoryValue::Category(0), CategoryValue::Category(5)]];
        let mut zero = mask_of(rows.clone(), MaskConfig { rule: MaskRule::Zero, inverse: false });
        zero.load_row(0).unwrap();
        assert!(zero.is_masked(0, 0));
        assert!(!zero.is_masked(0, 1));

        let mut inverted = mask_of(rows, MaskConfig { rule: MaskRule::Zero, inverse: true });
        inverted.load_row(0).unwrap();
        assert!(!inverted.is_masked(0, 0));
        assert!(inverted.is_masked(0, 1));
    }

    #[test]
    fn value_rule_matches_one_code() {
        let config = MaskConfig { rule: MaskRule::Value(5), inverse: false };
        assert!(config.excludes(CategoryValue::Category(5)));
        assert!(!config.excludes(CategoryValue::NoData));
    }
}
