//! FILENAME: core/raster/src/cell.rs
//! PURPOSE: The value a single raster cell can hold.
//! CONTEXT: A category layer stores signed integer codes. "No data" is a
//! separate variant rather than a magic integer, so it can never collide
//! with a real category and compares equal only to itself.

use std::fmt;
use serde::{Deserialize, Serialize};

/// Integer code conventionally used on disk for a null integer cell.
/// Only consulted when no-data is deliberately reported as a category.
pub const NULL_CODE: i64 = i32::MIN as i64;

/// One cell of a category layer.
///
/// Variant order matters: the derived `Ord` places `NoData` before every
/// category, which is the order category-sorted reports use. Serialized as
/// the bare code, with no-data as `null`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "Option<i64>", into = "Option<i64>")]
pub enum CategoryValue {
    NoData,
    Category(i64),
}

impl CategoryValue {
    pub fn is_no_data(&self) -> bool {
        matches!(self, CategoryValue::NoData)
    }

    /// The category code, or `None` for no-data.
    pub fn category(&self) -> Option<i64> {
        match self {
            CategoryValue::Category(code) => Some(*code),
            CategoryValue::NoData => None,
        }
    }
}

impl Default for CategoryValue {
    fn default() -> Self {
        CategoryValue::NoData
    }
}

impl From<i64> for CategoryValue {
    fn from(code: i64) -> Self {
        CategoryValue::Category(code)
    }
}

impl From<Option<i64>> for CategoryValue {
    fn from(code: Option<i64>) -> Self {
        code.map_or(CategoryValue::NoData, CategoryValue::Category)
    }
}

impl From<CategoryValue> for Option<i64> {
    fn from(value: CategoryValue) -> Self {
        value.category()
    }
}

impl fmt::Display for CategoryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryValue::Category(code) => write!(f, "{}", code),
            CategoryValue::NoData => f.write_str("null"),
        }
    }
}
