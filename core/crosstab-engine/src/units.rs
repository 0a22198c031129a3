//! FILENAME: core/crosstab-engine/src/units.rs
//! PURPOSE: The fixed set of report units and how their columns are printed.
//! CONTEXT: Area units convert square meters to the unit by multiplication.
//! Cell counts and percent cover are derived from the group count alone.
//! A report can request at most `MAX_UNITS` of these, in any order.

use serde::{Deserialize, Serialize};
use crate::error::ReportError;

/// Maximum number of unit columns in one report.
pub const MAX_UNITS: usize = 10;

/// Widest fixed-point column before a unit falls back to scientific notation.
const DEFAULT_MAX_WIDTH: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitKind {
    CellCounts,
    PercentCover,
    Acres,
    Hectares,
    SquareMiles,
    SquareMeters,
    SquareKilometers,
}

impl UnitKind {
    pub fn is_area(&self) -> bool {
        !matches!(self, UnitKind::CellCounts | UnitKind::PercentCover)
    }

    /// Position of this kind in `STANDARD_UNITS`.
    fn table_index(self) -> usize {
        match self {
            UnitKind::SquareMiles => 0,
            UnitKind::SquareMeters => 1,
            UnitKind::SquareKilometers => 2,
            UnitKind::Acres => 3,
            UnitKind::Hectares => 4,
            UnitKind::CellCounts => 5,
            UnitKind::PercentCover => 6,
        }
    }
}

// ============================================================================
// UNIT TABLE
// ============================================================================

struct UnitEntry {
    kind: UnitKind,
    /// Full option name; any prefix of at least `min_abbrev` chars selects it.
    name: &'static str,
    min_abbrev: usize,
    /// Snake-case kind name, accepted verbatim.
    alias: &'static str,
    /// Square meters to unit.
    factor: f64,
    decimals: usize,
    singular: &'static str,
    plural: &'static str,
}

const STANDARD_UNITS: [UnitEntry; 7] = [
    UnitEntry {
        kind: UnitKind::SquareMiles,
        name: "miles",
        min_abbrev: 2,
        alias: "square_miles",
        factor: 3.86102158542446e-7,
        decimals: 4,
        singular: "square mile",
        plural: "square miles",
    },
    UnitEntry {
        kind: UnitKind::SquareMeters,
        name: "meters",
        min_abbrev: 2,
        alias: "square_meters",
        factor: 1.0,
        decimals: 0,
        singular: "square meter",
        plural: "square meters",
    },
    UnitEntry {
        kind: UnitKind::SquareKilometers,
        name: "kilometers",
        min_abbrev: 1,
        alias: "square_kilometers",
        factor: 1.0e-6,
        decimals: 4,
        singular: "square kilometer",
        plural: "square kilometers",
    },
    UnitEntry {
        kind: UnitKind::Acres,
        name: "acres",
        min_abbrev: 1,
        alias: "acres",
        factor: 2.47105381467165e-4,
        decimals: 3,
        singular: "acre",
        plural: "acres",
    },
    UnitEntry {
        kind: UnitKind::Hectares,
        name: "hectares",
        min_abbrev: 1,
        alias: "hectares",
        factor: 1.0e-4,
        decimals: 3,
        singular: "hectare",
        plural: "hectares",
    },
    UnitEntry {
        kind: UnitKind::CellCounts,
        name: "cell_counts",
        min_abbrev: 1,
        alias: "cell_counts",
        factor: 1.0,
        decimals: 0,
        singular: "cell",
        plural: "cells",
    },
    UnitEntry {
        kind: UnitKind::PercentCover,
        name: "percent_cover",
        min_abbrev: 1,
        alias: "percent_cover",
        factor: 1.0,
        decimals: 2,
        singular: "percent",
        plural: "percent",
    },
];

impl UnitEntry {
    fn matches(&self, input: &str) -> bool {
        input == self.alias
            || (input.len() >= self.min_abbrev && self.name.starts_with(input))
    }
}

/// The unit lookup table. Read-only once built; share it by reference.
#[derive(Debug, Clone, Copy)]
pub struct UnitTable {
    max_width: usize,
    scientific: bool,
}

impl Default for UnitTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl UnitTable {
    pub fn standard() -> Self {
        UnitTable {
            max_width: DEFAULT_MAX_WIDTH,
            scientific: false,
        }
    }

    pub fn with_max_width(mut self, max_width: usize) -> Self {
        self.max_width = max_width.max(1);
        self
    }

    /// Forces scientific notation for every unit resolved from this table.
    pub fn with_scientific(mut self, scientific: bool) -> Self {
        self.scientific = scientific;
        self
    }

    /// Resolves a unit name or abbreviation (`mi`, `me`, `k`, `a`, `h`, `c`, `p`).
    pub fn resolve(&self, name: &str) -> Result<UnitSpec, ReportError> {
        let input = name.trim().to_ascii_lowercase();
        if input.is_empty() {
            return Err(ReportError::InvalidUnit(name.to_string()));
        }

        let mut matches = STANDARD_UNITS.iter().filter(|e| e.matches(&input));
        match (matches.next(), matches.next()) {
            (Some(entry), None) => Ok(self.build(entry)),
            _ => Err(ReportError::InvalidUnit(name.to_string())),
        }
    }

    pub fn spec(&self, kind: UnitKind) -> UnitSpec {
        self.build(&STANDARD_UNITS[kind.table_index()])
    }

    /// Full option names in table order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> {
        STANDARD_UNITS.iter().map(|e| e.name)
    }

    fn build(&self, entry: &UnitEntry) -> UnitSpec {
        UnitSpec {
            kind: entry.kind,
            factor: entry.factor,
            max_width: self.max_width,
            decimals: entry.decimals,
            scientific: self.scientific,
            singular: entry.singular.to_string(),
            plural: entry.plural.to_string(),
        }
    }
}

// ============================================================================
// UNIT SPEC
// ============================================================================

/// One requested unit column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitSpec {
    pub kind: UnitKind,
    /// Multiplier from square meters; 1 for counts and percent.
    pub factor: f64,
    pub max_width: usize,
    pub decimals: usize,
    pub scientific: bool,
    pub singular: String,
    pub plural: String,
}

impl UnitSpec {
    /// Value of this unit for a group of `count` cells.
    /// Percent of a zero total is zero.
    pub fn value_for(&self, count: u64, cell_area: f64, total_count: u64) -> f64 {
        match self.kind {
            UnitKind::CellCounts => count as f64,
            UnitKind::PercentCover => {
                if total_count == 0 {
                    0.0
                } else {
                    100.0 * count as f64 / total_count as f64
                }
            }
            _ => count as f64 * cell_area * self.factor,
        }
    }

    pub fn label(&self, value: f64) -> &str {
        if value == 1.0 {
            &self.singular
        } else {
            &self.plural
        }
    }

    /// Picks the printed layout for a whole column so every value fits.
    pub fn column_format<I>(&self, values: I) -> ColumnFormat
    where
        I: IntoIterator<Item = f64>,
    {
        let values: Vec<f64> = values.into_iter().collect();

        if !self.scientific {
            let fixed = ColumnFormat {
                width: 1,
                decimals: self.decimals,
                scientific: false,
            };
            let width = widest(&values, &fixed);
            if width <= self.max_width {
                return ColumnFormat { width, ..fixed };
            }
        }

        let sci = ColumnFormat {
            width: 1,
            decimals: self.decimals,
            scientific: true,
        };
        ColumnFormat {
            width: widest(&values, &sci),
            ..sci
        }
    }
}

fn widest(values: &[f64], format: &ColumnFormat) -> usize {
    values
        .iter()
        .map(|v| format.text(*v).len())
        .max()
        .unwrap_or(1)
        .max(1)
}

/// Printed layout of one unit column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnFormat {
    pub width: usize,
    pub decimals: usize,
    pub scientific: bool,
}

impl ColumnFormat {
    /// The value without padding.
    pub fn text(&self, value: f64) -> String {
        if self.scientific {
            format!("{:.*e}", self.decimals, value)
        } else {
            format!("{:.*}", self.decimals, value)
        }
    }

    /// The value right-aligned to the column width.
    pub fn format(&self, value: f64) -> String {
        format!("{:>width$}", self.text(value), width = self.width)
    }
}
