//! FILENAME: core/crosstab-engine/src/cache.rs
//! Aggregation Table - The group-by core of a scan.
//!
//! The table is designed for:
//! - One pass over every unmasked cell, O(1) amortized per observation
//! - First-seen order of groups, which is the default report order
//! - Exact tuple equality, no-data markers included
//!
//! Architecture:
//! - Entries live in a Vec in the order their tuple first appeared
//! - An FxHashMap from tuple to entry index replaces a linear search
//! - Tuples of up to four layers are stored inline (no heap allocation)

use raster::CategoryValue;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Ordered per-layer category values identifying one group.
pub type CategoryTuple = SmallVec<[CategoryValue; 4]>;

/// Initial room for distinct groups; the Vec doubles from here.
const INITIAL_GROUPS: usize = 64;

// ============================================================================
// AGGREGATION ENTRY
// ============================================================================

/// One group: its tuple, how many cells matched it and (after deriving) its area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregationEntry {
    pub cats: CategoryTuple,
    pub count: u64,
    /// Square meters. Zero until the sums stage fills it in.
    pub area: f64,
}

impl AggregationEntry {
    pub fn new(cats: &[CategoryValue]) -> Self {
        AggregationEntry {
            cats: SmallVec::from_slice(cats),
            count: 0,
            area: 0.0,
        }
    }
}

// ============================================================================
// AGGREGATION TABLE
// ============================================================================

/// Growing set of distinct tuples for one scan.
#[derive(Debug, Clone)]
pub struct AggregationTable {
    num_layers: usize,
    entries: Vec<AggregationEntry>,
    index: FxHashMap<CategoryTuple, usize>,
}

impl AggregationTable {
    /// Starts an empty table for tuples of `num_layers` values.
    pub fn begin(num_layers: usize) -> Self {
        AggregationTable {
            num_layers,
            entries: Vec::with_capacity(INITIAL_GROUPS),
            index: FxHashMap::with_capacity_and_hasher(INITIAL_GROUPS, Default::default()),
        }
    }

    /// Counts one cell under `tuple`, creating the group on first sight.
    pub fn observe(&mut self, tuple: &[CategoryValue]) {
        debug_assert_eq!(tuple.len(), self.num_layers);

        if let Some(&slot) = self.index.get(tuple) {
            self.entries[slot].count += 1;
            return;
        }

        let mut entry = AggregationEntry::new(tuple);
        entry.count = 1;
        self.index.insert(entry.cats.clone(), self.entries.len());
        self.entries.push(entry);
    }

    pub fn num_layers(&self) -> usize {
        self.num_layers
    }

    /// Number of distinct groups so far.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all group counts, i.e. the number of observed cells.
    pub fn total_count(&self) -> u64 {
        self.entries.iter().map(|e| e.count).sum()
    }

    pub fn count_of(&self, tuple: &[CategoryValue]) -> Option<u64> {
        self.index.get(tuple).map(|&slot| self.entries[slot].count)
    }

    pub fn entries(&self) -> &[AggregationEntry] {
        &self.entries
    }

    /// Closes the table and hands over the groups in first-seen order.
    pub fn finish(self) -> Vec<AggregationEntry> {
        self.entries
    }
}
