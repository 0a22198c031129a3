//! FILENAME: core/crosstab-engine/src/lib.rs
//! Cross-tabulation engine for co-registered category rasters.
//!
//! Every layer is scanned row by row in lock-step. Each unmasked cell
//! contributes one observation of its tuple of per-layer category values;
//! the engine counts cells per distinct tuple and derives areas from the
//! window resolution.
//!
//! Layers:
//! - `units`: Area/count/percent unit table and column formatting
//! - `definition`: Serializable report configuration (what to compute)
//! - `layers`: Per-layer category labels and display widths
//! - `mask`: Which cells are excluded before aggregation
//! - `cache`: The group-by table of distinct tuples (HOW we count)
//! - `sums`: Per-unit values, totals and subtotals
//! - `ordering`: Stable sorting of the finished rows
//! - `engine`: The report driver state machine
//! - `view`: Renderable output handed to a report sink

pub mod cache;
pub mod definition;
pub mod engine;
pub mod error;
pub mod layers;
pub mod mask;
pub mod ordering;
pub mod sums;
pub mod units;
pub mod view;

pub use cache::{AggregationEntry, AggregationTable, CategoryTuple};
pub use definition::{
    NoDataGrouping, NoDataMode, NoDataPolicy, NoDataSkip, ReportDefinition, SortDirection,
    SortMode, SortRequest,
};
pub use engine::{CrossTabReport, DriverState, ReportDriver, ScanStats};
pub use error::ReportError;
pub use layers::{Layer, LayerRegistry};
pub use mask::{MaskConfig, MaskPolicy, MaskRule};
pub use ordering::{sort, sorted, Ranked};
pub use sums::{derive, DerivedRow, DerivedTable, DerivedTotals, Subtotal};
pub use units::{ColumnFormat, UnitKind, UnitSpec, UnitTable, MAX_UNITS};
pub use view::{ReportSink, ReportView, ViewCategory, ViewRow, ViewSubtotal, ViewTotals};
