//! FILENAME: core/crosstab-engine/src/engine.rs
//! Report Driver - One full pass over the window, then sums and ordering.
//!
//! The driver moves through a fixed sequence of states and never goes back:
//! Idle -> Scanning -> Deriving -> Ordering -> Done.
//!
//! Algorithm:
//! 1. Check every row source (and the mask) against the window extent
//! 2. For each row: buffer the mask row and one row per layer
//! 3. For each unmasked cell: build the tuple, apply the no-data policy, observe
//! 4. Derive per-unit values and totals from the finished groups
//! 5. Apply each configured sort request in order
//!
//! A failed row read discards the partial table and aborts the run.

use log::{debug, info};
use raster::{CategoryValue, RowSource, Window};
use serde::{Deserialize, Serialize};
use smallvec::smallvec;
use crate::cache::{AggregationTable, CategoryTuple};
use crate::definition::{ReportDefinition, SortRequest};
use crate::error::ReportError;
use crate::layers::LayerRegistry;
use crate::mask::MaskPolicy;
use crate::ordering;
use crate::sums::{self, DerivedTable};
use crate::units::{UnitSpec, UnitTable};

// ============================================================================
// STATE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DriverState {
    Idle,
    Scanning,
    Deriving,
    Ordering,
    Done,
    /// A row read failed; nothing further can happen.
    Aborted,
}

/// What happened to the cells of the window during the scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanStats {
    pub cells: u64,
    pub masked: u64,
    /// Dropped by the no-data skip rule.
    pub skipped: u64,
    pub observed: u64,
}

/// The immutable result of a finished run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrossTabReport {
    pub window: Window,
    pub derived: DerivedTable,
    pub stats: ScanStats,
    pub sort: Vec<SortRequest>,
}

// ============================================================================
// REPORT DRIVER
// ============================================================================

/// Drives exactly one scan of one window.
pub struct ReportDriver<'a> {
    window: Window,
    registry: &'a LayerRegistry,
    definition: &'a ReportDefinition,
    units: Vec<UnitSpec>,
    state: DriverState,
    table: Option<AggregationTable>,
    derived: Option<DerivedTable>,
    stats: ScanStats,
}

impl<'a> ReportDriver<'a> {
    /// Validates the configuration. Unit errors surface here, before any scan.
    pub fn new(
        window: Window,
        registry: &'a LayerRegistry,
        units: &UnitTable,
        definition: &'a ReportDefinition,
    ) -> Result<Self, ReportError> {
        if registry.is_empty() {
            return Err(ReportError::NoLayers);
        }
        let units = definition.validate(units)?;

        Ok(ReportDriver {
            window,
            registry,
            definition,
            units,
            state: DriverState::Idle,
            table: None,
            derived: None,
            stats: ScanStats::default(),
        })
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn units(&self) -> &[UnitSpec] {
        &self.units
    }

    fn expect(&self, expected: DriverState) -> Result<(), ReportError> {
        if self.state == expected {
            Ok(())
        } else {
            Err(ReportError::OutOfOrder {
                expected,
                actual: self.state,
            })
        }
    }

    fn transition(&mut self, next: DriverState) {
        debug!("report driver {:?} -> {:?}", self.state, next);
        self.state = next;
    }

    /// Idle -> Scanning: opens an empty aggregation table.
    pub fn begin(&mut self) -> Result<(), ReportError> {
        self.expect(DriverState::Idle)?;
        self.table = Some(AggregationTable::begin(self.registry.len()));
        self.transition(DriverState::Scanning);
        Ok(())
    }

    /// Scanning -> Deriving: reads every row of every layer once.
    ///
    /// `layers` must be in registry order. Geometry is checked before the
    /// first row is read.
    pub fn scan<S: RowSource>(
        &mut self,
        layers: &mut [S],
        mask: &mut MaskPolicy,
    ) -> Result<(), ReportError> {
        self.expect(DriverState::Scanning)?;
        self.check_geometry(layers, mask)?;

        let Some(mut table) = self.table.take() else {
            return Err(ReportError::OutOfOrder {
                expected: DriverState::Scanning,
                actual: self.state,
            });
        };

        match self.scan_rows(&mut table, layers, mask) {
            Ok(()) => {
                info!(
                    "scan complete groups={} cells={} masked={} skipped={} observed={}",
                    table.len(),
                    self.stats.cells,
                    self.stats.masked,
                    self.stats.skipped,
                    self.stats.observed
                );
                self.table = Some(table);
                self.transition(DriverState::Deriving);
                Ok(())
            }
            Err(e) => {
                // the partial table is dropped here
                self.transition(DriverState::Aborted);
                Err(e)
            }
        }
    }

    fn check_geometry<S: RowSource>(
        &self,
        layers: &[S],
        mask: &MaskPolicy,
    ) -> Result<(), ReportError> {
        if layers.len() != self.registry.len() {
            return Err(ReportError::LayerCount {
                expected: self.registry.len(),
                got: layers.len(),
            });
        }

        let extents = layers
            .iter()
            .enumerate()
            .map(|(i, layer)| (self.layer_name(i), layer.rows(), layer.cols()))
            .chain(mask.extent().map(|(rows, cols)| ("mask".to_string(), rows, cols)));

        for (what, rows, cols) in extents {
            if !self.window.same_extent(rows, cols) {
                return Err(ReportError::GeometryMismatch {
                    what,
                    expected_rows: self.window.rows,
                    expected_cols: self.window.cols,
                    rows,
                    cols,
                });
            }
        }
        Ok(())
    }

    fn layer_name(&self, index: usize) -> String {
        self.registry
            .layer(index)
            .map(|l| l.qualified_name())
            .unwrap_or_else(|| format!("layer {}", index))
    }

    fn scan_rows<S: RowSource>(
        &mut self,
        table: &mut AggregationTable,
        layers: &mut [S],
        mask: &mut MaskPolicy,
    ) -> Result<(), ReportError> {
        let cols = self.window.cols;
        let policy = self.definition.no_data;
        let codes: Vec<i64> = layers.iter().map(|l| l.no_data_code()).collect();
        let mut rows: Vec<Vec<CategoryValue>> =
            vec![vec![CategoryValue::NoData; cols]; layers.len()];
        let mut tuple: CategoryTuple = smallvec![CategoryValue::NoData; layers.len()];

        for row in 0..self.window.rows {
            mask.load_row(row).map_err(|source| ReportError::RowRead {
                layer: "mask".to_string(),
                row,
                source,
            })?;
            for (index, layer) in layers.iter_mut().enumerate() {
                layer
                    .read_row(row, &mut rows[index])
                    .map_err(|source| ReportError::RowRead {
                        layer: self.layer_name(index),
                        row,
                        source,
                    })?;
            }

            for col in 0..cols {
                self.stats.cells += 1;
                if mask.is_masked(row, col) {
                    self.stats.masked += 1;
                    continue;
                }

                for (slot, layer_row) in tuple.iter_mut().zip(&rows) {
                    *slot = layer_row[col];
                }
                if !policy.apply(&mut tuple, &codes) {
                    self.stats.skipped += 1;
                    continue;
                }

                table.observe(&tuple);
                self.stats.observed += 1;
            }
        }
        Ok(())
    }

    /// Deriving -> Ordering: computes unit values and totals once.
    pub fn derive(&mut self) -> Result<(), ReportError> {
        self.expect(DriverState::Deriving)?;
        let entries = self.table.take().map(AggregationTable::finish).unwrap_or_default();
        self.derived = Some(sums::derive(entries, &self.window, &self.units));
        self.transition(DriverState::Ordering);
        Ok(())
    }

    /// Ordering -> Done: applies each sort request in turn.
    pub fn order(&mut self) -> Result<(), ReportError> {
        self.expect(DriverState::Ordering)?;
        if let Some(derived) = self.derived.as_mut() {
            for request in &self.definition.sort {
                ordering::sort(&mut derived.rows, *request);
            }
        }
        self.transition(DriverState::Done);
        Ok(())
    }

    /// Hands over the finished report.
    pub fn finish(mut self) -> Result<CrossTabReport, ReportError> {
        self.expect(DriverState::Done)?;
        let derived = self.derived.take().unwrap_or_else(|| {
            sums::derive(Vec::new(), &self.window, &self.units)
        });

        Ok(CrossTabReport {
            window: self.window,
            derived,
            stats: self.stats,
            sort: self.definition.sort.clone(),
        })
    }

    /// Runs every stage in order.
    pub fn run<S: RowSource>(
        mut self,
        layers: &mut [S],
        mask: &mut MaskPolicy,
    ) -> Result<CrossTabReport, ReportError> {
        self.begin()?;
        self.scan(layers, mask)?;
        self.derive()?;
        self.order()?;
        self.finish()
    }
}
