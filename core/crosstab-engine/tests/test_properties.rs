//! FILENAME: tests/test_properties.rs
//! Property tests over random layers and masks.

use crosstab_engine::{
    sorted, AggregationEntry, CategoryTuple, LayerRegistry, MaskConfig, MaskPolicy,
    ReportDefinition, ReportDriver, SortDirection, SortMode, SortRequest, UnitTable,
};
use proptest::prelude::*;
use raster::{CategoryTable, CategoryValue, MemoryRaster, Window};
use std::collections::HashSet;

fn cell() -> impl Strategy<Value = CategoryValue> {
    prop_oneof![
        1 => Just(CategoryValue::NoData),
        4 => (0i64..4).prop_map(CategoryValue::Category),
    ]
}

/// (rows, cols, layers, mask) with every grid sharing the extent.
fn scene() -> impl Strategy<Value = (usize, usize, Vec<Vec<CategoryValue>>, Vec<CategoryValue>)> {
    (1usize..6, 1usize..6, 1usize..4).prop_flat_map(|(rows, cols, layers)| {
        let cells = rows * cols;
        (
            Just(rows),
            Just(cols),
            prop::collection::vec(prop::collection::vec(cell(), cells), layers),
            prop::collection::vec(cell(), cells),
        )
    })
}

fn raster(cols: usize, cells: &[CategoryValue]) -> MemoryRaster {
    MemoryRaster::from_rows(cells.chunks(cols).map(<[CategoryValue]>::to_vec).collect()).unwrap()
}

fn run_scene(
    rows: usize,
    cols: usize,
    layers: &[Vec<CategoryValue>],
    mask: &[CategoryValue],
    definition: &ReportDefinition,
) -> crosstab_engine::CrossTabReport {
    let mut registry = LayerRegistry::new();
    for i in 0..layers.len() {
        registry.insert(&format!("l{}", i), "", CategoryTable::new());
    }
    let mut sources: Vec<MemoryRaster> = layers.iter().map(|l| raster(cols, l)).collect();
    let mut mask = MaskPolicy::from_raster(Box::new(raster(cols, mask)), MaskConfig::default());
    ReportDriver::new(Window::new(rows, cols, 2.0, 3.0), &registry, &UnitTable::standard(), definition)
        .unwrap()
        .run(&mut sources, &mut mask)
        .unwrap()
}

proptest! {
    #[test]
    fn counts_sum_to_unmasked_cells((rows, cols, layers, mask) in scene()) {
        let report = run_scene(rows, cols, &layers, &mask, &ReportDefinition::new());
        let unmasked = mask.iter().filter(|v| !v.is_no_data()).count() as u64;
        let total: u64 = report.derived.rows.iter().map(|r| r.entry.count).sum();
        prop_assert_eq!(total, unmasked);
        prop_assert_eq!(report.derived.totals.count, unmasked);
    }

    #[test]
    fn tuples_are_pairwise_distinct((rows, cols, layers, mask) in scene()) {
        let report = run_scene(rows, cols, &layers, &mask, &ReportDefinition::new());
        let distinct: HashSet<CategoryTuple> =
            report.derived.rows.iter().map(|r| r.entry.cats.clone()).collect();
        prop_assert_eq!(distinct.len(), report.derived.rows.len());
    }

    #[test]
    fn percent_sums_to_hundred_or_zero((rows, cols, layers, mask) in scene()) {
        let definition = ReportDefinition::new().with_units(&["p"]);
        let report = run_scene(rows, cols, &layers, &mask, &definition);
        let sum: f64 = report.derived.rows.iter().map(|r| r.values[0]).sum();
        if report.derived.totals.count > 0 {
            prop_assert!((sum - 100.0).abs() < 1e-9);
        } else {
            prop_assert_eq!(sum, 0.0);
            prop_assert_eq!(report.derived.totals.values[0], 0.0);
        }
    }

    #[test]
    fn descending_count_sort_is_stable(counts in prop::collection::vec(1u64..5, 0..20)) {
        let entries: Vec<AggregationEntry> = counts
            .iter()
            .enumerate()
            .map(|(i, &count)| {
                let mut e = AggregationEntry::new(&[CategoryValue::Category(i as i64)]);
                e.count = count;
                e
            })
            .collect();
        let out = sorted(&entries, SortRequest::new(SortMode::ByCount, SortDirection::Descending));

        for pair in out.windows(2) {
            prop_assert!(pair[0].count >= pair[1].count);
            if pair[0].count == pair[1].count {
                // codes are first-seen indices
                prop_assert!(pair[0].cats[0] < pair[1].cats[0]);
            }
        }
    }

    #[test]
    fn unsorted_mode_preserves_order(counts in prop::collection::vec(0u64..5, 0..20), descending in any::<bool>()) {
        let entries: Vec<AggregationEntry> = counts
            .iter()
            .enumerate()
            .map(|(i, &count)| {
                let mut e = AggregationEntry::new(&[CategoryValue::Category(i as i64)]);
                e.count = count;
                e
            })
            .collect();
        let direction = if descending { SortDirection::Descending } else { SortDirection::Ascending };
        prop_assert_eq!(sorted(&entries, SortRequest::new(SortMode::None, direction)), entries);
    }
}
