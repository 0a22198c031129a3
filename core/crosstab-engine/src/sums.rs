//! FILENAME: core/crosstab-engine/src/sums.rs
//! PURPOSE: Turns finished group counts into per-unit values and totals.
//! CONTEXT: Areas are planimetric: every cell of the window has the same
//! area, so a group's area is its count times the cell area. Totals are
//! computed from the total count, which equals the per-unit sum of rows.

use raster::{CategoryValue, Window};
use serde::{Deserialize, Serialize};
use crate::cache::{AggregationEntry, CategoryTuple};
use crate::units::{ColumnFormat, UnitSpec};

/// One group with a value per requested unit (same order as the units).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedRow {
    pub entry: AggregationEntry,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedTotals {
    pub count: u64,
    /// Square meters.
    pub area: f64,
    pub values: Vec<f64>,
}

/// Sums over a run of consecutive rows sharing their leading categories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subtotal {
    pub prefix: CategoryTuple,
    pub first_row: usize,
    pub row_count: usize,
    pub count: u64,
    pub area: f64,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedTable {
    pub units: Vec<UnitSpec>,
    /// Square meters per cell.
    pub cell_area: f64,
    pub rows: Vec<DerivedRow>,
    pub totals: DerivedTotals,
}

/// Computes every unit value for every entry, plus the totals row.
pub fn derive(entries: Vec<AggregationEntry>, window: &Window, units: &[UnitSpec]) -> DerivedTable {
    let cell_area = window.cell_area();
    let total_count: u64 = entries.iter().map(|e| e.count).sum();

    let rows = entries
        .into_iter()
        .map(|mut entry| {
            entry.area = entry.count as f64 * cell_area;
            let values = unit_values(units, entry.count, cell_area, total_count);
            DerivedRow { entry, values }
        })
        .collect();

    DerivedTable {
        units: units.to_vec(),
        cell_area,
        rows,
        totals: DerivedTotals {
            count: total_count,
            area: total_count as f64 * cell_area,
            values: unit_values(units, total_count, cell_area, total_count),
        },
    }
}

fn unit_values(units: &[UnitSpec], count: u64, cell_area: f64, total_count: u64) -> Vec<f64> {
    units
        .iter()
        .map(|unit| unit.value_for(count, cell_area, total_count))
        .collect()
}

impl DerivedTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Values of unit `unit` for every row followed by the total.
    pub fn column(&self, unit: usize) -> impl Iterator<Item = f64> + '_ {
        self.rows
            .iter()
            .filter_map(move |row| row.values.get(unit).copied())
            .chain(self.totals.values.get(unit).copied())
    }

    /// Printed layout for each unit column, sized to fit rows and total.
    pub fn column_formats(&self) -> Vec<ColumnFormat> {
        self.units
            .iter()
            .enumerate()
            .map(|(i, unit)| unit.column_format(self.column(i)))
            .collect()
    }

    /// Groups consecutive rows by their first `depth` categories.
    ///
    /// Runs are taken in current row order, so a category-sorted table
    /// yields one subtotal per distinct prefix.
    pub fn subtotals(&self, depth: usize) -> Vec<Subtotal> {
        let mut out: Vec<Subtotal> = Vec::new();

        for (index, row) in self.rows.iter().enumerate() {
            let depth = depth.min(row.entry.cats.len());
            let prefix: &[CategoryValue] = &row.entry.cats[..depth];

            let same_run = out
                .last()
                .map_or(false, |run| run.prefix.as_slice() == prefix);
            if same_run {
                if let Some(run) = out.last_mut() {
                    run.row_count += 1;
                    run.count += row.entry.count;
                }
            } else {
                out.push(Subtotal {
                    prefix: CategoryTuple::from_slice(prefix),
                    first_row: index,
                    row_count: 1,
                    count: row.entry.count,
                    area: 0.0,
                    values: Vec::new(),
                });
            }
        }

        for run in &mut out {
            run.area = run.count as f64 * self.cell_area;
            run.values = unit_values(&self.units, run.count, self.cell_area, self.totals.count);
        }
        out
    }
}
