//! FILENAME: core/crosstab-engine/src/ordering.rs
//! PURPOSE: Optional ordering of the finished groups.
//! CONTEXT: All sorts are stable, so equal keys keep their first-seen order,
//! and `SortMode::None` leaves the input untouched whatever the direction.

use std::cmp::Ordering;
use raster::CategoryValue;
use crate::cache::AggregationEntry;
use crate::definition::{SortDirection, SortMode, SortRequest};
use crate::sums::DerivedRow;

/// Anything that can be ordered as a report group.
pub trait Ranked {
    fn count(&self) -> u64;
    fn area(&self) -> f64;
    fn cats(&self) -> &[CategoryValue];
}

impl Ranked for AggregationEntry {
    fn count(&self) -> u64 {
        self.count
    }

    fn area(&self) -> f64 {
        self.area
    }

    fn cats(&self) -> &[CategoryValue] {
        &self.cats
    }
}

impl Ranked for DerivedRow {
    fn count(&self) -> u64 {
        self.entry.count
    }

    fn area(&self) -> f64 {
        self.entry.area
    }

    fn cats(&self) -> &[CategoryValue] {
        &self.entry.cats
    }
}

fn compare<T: Ranked>(mode: SortMode, a: &T, b: &T) -> Ordering {
    match mode {
        SortMode::None => Ordering::Equal,
        SortMode::ByCount => a.count().cmp(&b.count()),
        SortMode::ByArea => a.area().total_cmp(&b.area()),
        SortMode::ByCategory => a.cats().cmp(b.cats()),
    }
}

/// Sorts `items` in place according to `request`.
pub fn sort<T: Ranked>(items: &mut [T], request: SortRequest) {
    if request.mode == SortMode::None {
        return;
    }
    match request.direction {
        SortDirection::Ascending => items.sort_by(|a, b| compare(request.mode, a, b)),
        // Comparing b to a (rather than reversing) keeps ties in input order.
        SortDirection::Descending => items.sort_by(|a, b| compare(request.mode, b, a)),
    }
}

/// Returns a sorted copy, leaving `items` as it was.
pub fn sorted<T: Ranked + Clone>(items: &[T], request: SortRequest) -> Vec<T> {
    let mut out = items.to_vec();
    sort(&mut out, request);
    out
}
