//! FILENAME: core/crosstab-engine/src/view.rs
//! PURPOSE: The renderable form of a finished report.
//! CONTEXT: Sinks (plain text, JSON, ...) receive a `ReportView` with labels
//! already resolved, so they never touch the registry or the unit table.

use raster::{CategoryValue, Window};
use serde::Serialize;
use crate::engine::{CrossTabReport, ScanStats};
use crate::layers::LayerRegistry;
use crate::units::{ColumnFormat, UnitKind};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayerHeader {
    pub name: String,
    pub mapset: String,
    pub title: String,
    pub code_width: usize,
    pub label_width: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnitColumn {
    pub kind: UnitKind,
    pub label: String,
    pub format: ColumnFormat,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewCategory {
    pub value: CategoryValue,
    pub code: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewRow {
    pub categories: Vec<ViewCategory>,
    pub count: u64,
    pub area: f64,
    pub values: Vec<f64>,
}

/// Sums over a run of rows sharing their first `depth` categories.
/// Rendered after row `last_row`; deeper subtotals come first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewSubtotal {
    pub depth: usize,
    pub last_row: usize,
    pub categories: Vec<ViewCategory>,
    pub count: u64,
    pub area: f64,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewTotals {
    pub count: u64,
    pub area: f64,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportView {
    pub window: Window,
    pub layers: Vec<LayerHeader>,
    pub units: Vec<UnitColumn>,
    pub rows: Vec<ViewRow>,
    /// One level per leading layer; empty for a single layer.
    pub subtotals: Vec<ViewSubtotal>,
    pub totals: ViewTotals,
    pub stats: ScanStats,
}

impl ReportView {
    pub fn build(report: &CrossTabReport, registry: &LayerRegistry) -> Self {
        let derived = &report.derived;

        let layers = registry
            .iter()
            .enumerate()
            .map(|(i, layer)| LayerHeader {
                name: layer.name.clone(),
                mapset: layer.mapset.clone(),
                title: registry.title(i).to_string(),
                code_width: layer.nlen,
                label_width: layer.clen,
            })
            .collect();

        let units = derived
            .units
            .iter()
            .zip(derived.column_formats())
            .map(|(unit, format)| UnitColumn {
                kind: unit.kind,
                label: unit.plural.clone(),
                format,
            })
            .collect();

        let rows = derived
            .rows
            .iter()
            .map(|row| ViewRow {
                categories: view_categories(registry, &row.entry.cats),
                count: row.entry.count,
                area: row.entry.area,
                values: row.values.clone(),
            })
            .collect();

        let layer_count = registry.len();
        let mut subtotals: Vec<ViewSubtotal> = (1..layer_count)
            .flat_map(|depth| {
                derived
                    .subtotals(depth)
                    .into_iter()
                    .map(move |run| (depth, run))
            })
            .map(|(depth, run)| ViewSubtotal {
                depth,
                last_row: run.first_row + run.row_count - 1,
                categories: view_categories(registry, &run.prefix),
                count: run.count,
                area: run.area,
                values: run.values,
            })
            .collect();
        subtotals.sort_by(|a, b| a.last_row.cmp(&b.last_row).then(b.depth.cmp(&a.depth)));

        ReportView {
            window: report.window,
            layers,
            units,
            rows,
            subtotals,
            totals: ViewTotals {
                count: derived.totals.count,
                area: derived.totals.area,
                values: derived.totals.values.clone(),
            },
            stats: report.stats,
        }
    }
}

fn view_categories(registry: &LayerRegistry, cats: &[CategoryValue]) -> Vec<ViewCategory> {
    cats.iter()
        .enumerate()
        .map(|(i, value)| ViewCategory {
            value: *value,
            code: registry.code_text(*value),
            label: registry.label_for(i, *value).to_string(),
        })
        .collect()
}

/// Something that renders a finished report.
pub trait ReportSink {
    type Error;

    fn emit(&mut self, view: &ReportView) -> Result<(), Self::Error>;
}
