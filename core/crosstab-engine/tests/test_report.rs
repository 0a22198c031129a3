//! FILENAME: tests/test_report.rs
//! Integration tests: full runs through the driver into a report view.

mod common;

use common::{run_landscape, LandscapeFixture};
use crosstab_engine::{
    MaskPolicy, NoDataMode, NoDataPolicy, ReportDefinition, ReportDriver, ReportSink,
    ReportView, SortDirection, SortMode, UnitKind, UnitTable,
};
use raster::{CategoryValue, MemoryRaster, Window};

use CategoryValue::{Category, NoData};

// ============================================================================
// VIEW
// ============================================================================

#[test]
fn view_resolves_labels_and_codes() {
    let (report, registry) = run_landscape(&ReportDefinition::new());
    let view = ReportView::build(&report, &registry);

    assert_eq!(view.layers.len(), 2);
    assert_eq!(view.layers[0].title, "Land use 2024");
    assert_eq!(view.layers[1].label_width, "no data".len());

    let first = &view.rows[0];
    assert_eq!(first.categories[0].label, "forest");
    assert_eq!(first.categories[1].label, "loam");
    assert_eq!(first.count, 4);

    let no_data_row = view
        .rows
        .iter()
        .find(|r| r.categories[0].value == NoData)
        .unwrap();
    assert_eq!(no_data_row.categories[0].code, "*");
    assert_eq!(no_data_row.categories[0].label, "no data");
}

#[test]
fn overwritten_cell_leaves_no_zero_group() {
    let (report, registry) = run_landscape(&ReportDefinition::new());
    let view = ReportView::build(&report, &registry);
    let zero = view
        .rows
        .iter()
        .find(|r| r.categories[0].value == Category(0));
    // landuse 0 was overwritten with no-data in the fixture
    assert!(zero.is_none());

    let urban = view
        .rows
        .iter()
        .find(|r| r.categories[0].value == Category(3))
        .unwrap();
    assert_eq!(urban.categories[0].label, "urban");
}

#[test]
fn view_serializes_categories_as_plain_codes() {
    let (report, registry) = run_landscape(&ReportDefinition::new().with_units(&["c"]));
    let view = ReportView::build(&report, &registry);
    let json = serde_json::to_value(&view).unwrap();

    assert_eq!(json["rows"][0]["categories"][0]["value"], 1);
    assert_eq!(json["units"][0]["kind"], "cell_counts");
    assert_eq!(json["totals"]["count"], 12);

    let has_null = json["rows"]
        .as_array()
        .unwrap()
        .iter()
        .any(|r| r["categories"][0]["value"].is_null());
    assert!(has_null);
}

struct CollectingSink {
    seen: Vec<usize>,
}

impl ReportSink for CollectingSink {
    type Error = std::convert::Infallible;

    fn emit(&mut self, view: &ReportView) -> Result<(), Self::Error> {
        self.seen.push(view.rows.len());
        Ok(())
    }
}

#[test]
fn sinks_receive_the_finished_view() {
    let (report, registry) = run_landscape(&ReportDefinition::new());
    let view = ReportView::build(&report, &registry);
    let mut sink = CollectingSink { seen: Vec::new() };
    sink.emit(&view).unwrap();
    assert_eq!(sink.seen, vec![report.derived.rows.len()]);
}

// ============================================================================
// UNITS AND TOTALS
// ============================================================================

#[test]
fn totals_match_window_area() {
    let definition = ReportDefinition::new().with_units(&["me", "h", "c", "p"]);
    let (report, _) = run_landscape(&definition);
    let totals = &report.derived.totals;

    // 12 cells of 900 m2
    assert_eq!(totals.values[0], 10800.0);
    assert!((totals.values[1] - 1.08).abs() < 1e-12);
    assert_eq!(totals.values[2], 12.0);
    assert_eq!(totals.values[3], 100.0);

    let row_sum: f64 = report.derived.rows.iter().map(|r| r.values[0]).sum();
    assert_eq!(row_sum, totals.values[0]);
}

#[test]
fn unit_columns_keep_requested_order() {
    let definition = ReportDefinition::new().with_units(&["p", "a", "k"]);
    let (report, registry) = run_landscape(&definition);
    let view = ReportView::build(&report, &registry);
    let kinds: Vec<UnitKind> = view.units.iter().map(|u| u.kind).collect();
    assert_eq!(
        kinds,
        vec![UnitKind::PercentCover, UnitKind::Acres, UnitKind::SquareKilometers]
    );
}

#[test]
fn doubling_resolution_quadruples_area() {
    let definition = ReportDefinition::new().with_units(&["me", "c"]);
    let area_at = |res: f64| {
        let registry = LandscapeFixture::registry();
        let mut layers = [LandscapeFixture::landuse(), LandscapeFixture::soils()];
        ReportDriver::new(Window::new(3, 4, res, res), &registry, &UnitTable::standard(), &definition)
            .unwrap()
            .run(&mut layers, &mut MaskPolicy::none())
            .unwrap()
    };

    let small = area_at(10.0);
    let large = area_at(20.0);
    for (a, b) in small.derived.rows.iter().zip(&large.derived.rows) {
        assert_eq!(b.values[0], a.values[0] * 4.0);
        assert_eq!(b.values[1], a.values[1]);
    }
}

// ============================================================================
// ORDERING AND SUBTOTALS
// ============================================================================

#[test]
fn category_sort_then_subtotals_by_first_layer() {
    let definition = ReportDefinition::new()
        .with_units(&["c"])
        .with_sort(SortMode::ByCategory, SortDirection::Ascending);
    let (report, _) = run_landscape(&definition);

    let firsts: Vec<CategoryValue> = report
        .derived
        .rows
        .iter()
        .map(|r| r.entry.cats[0])
        .collect();
    let mut expected = firsts.clone();
    expected.sort();
    assert_eq!(firsts, expected);

    let subtotals = report.derived.subtotals(1);
    let summary: Vec<(CategoryValue, u64)> =
        subtotals.iter().map(|s| (s.prefix[0], s.count)).collect();
    assert_eq!(
        summary,
        vec![
            (NoData, 1),
            (Category(1), 5),
            (Category(2), 4),
            (Category(3), 2),
        ]
    );
    let subtotal_sum: u64 = subtotals.iter().map(|s| s.count).sum();
    assert_eq!(subtotal_sum, report.derived.totals.count);
}

#[test]
fn view_places_subtotals_after_each_run() {
    let definition = ReportDefinition::new()
        .with_units(&["c"])
        .with_sort(SortMode::ByCategory, SortDirection::Ascending);
    let (report, registry) = run_landscape(&definition);
    let view = ReportView::build(&report, &registry);

    let placed: Vec<(usize, usize, u64, String)> = view
        .subtotals
        .iter()
        .map(|s| (s.depth, s.last_row, s.count, s.categories[0].label.clone()))
        .collect();
    assert_eq!(
        placed,
        vec![
            (1, 0, 1, "no data".to_string()),
            (1, 2, 5, "forest".to_string()),
            (1, 4, 4, "pasture".to_string()),
            (1, 6, 2, "urban".to_string()),
        ]
    );
    assert_eq!(view.subtotals[1].values, vec![5.0]);
    assert!(view.subtotals.iter().all(|s| s.categories.len() == 1));
}

#[test]
fn single_layer_view_has_no_subtotals() {
    let mut registry = crosstab_engine::LayerRegistry::new();
    registry.insert("landuse", "PERMANENT", raster::CategoryTable::new());
    let definition = ReportDefinition::new();
    let report = ReportDriver::new(
        LandscapeFixture::window(),
        &registry,
        &UnitTable::standard(),
        &definition,
    )
    .unwrap()
    .run(&mut [LandscapeFixture::landuse()], &mut MaskPolicy::none())
    .unwrap();
    assert!(ReportView::build(&report, &registry).subtotals.is_empty());
}

#[test]
fn last_sort_request_is_the_primary_key() {
    let definition = ReportDefinition::new()
        .with_sort(SortMode::ByCategory, SortDirection::Descending)
        .with_sort(SortMode::ByCount, SortDirection::Descending);
    let (report, _) = run_landscape(&definition);

    let rows = &report.derived.rows;
    for pair in rows.windows(2) {
        assert!(pair[0].entry.count >= pair[1].entry.count);
        if pair[0].entry.count == pair[1].entry.count {
            assert!(pair[0].entry.cats >= pair[1].entry.cats);
        }
    }
}

// ============================================================================
// NO-DATA AS CATEGORY
// ============================================================================

#[test]
fn no_data_as_category_uses_the_layer_code() {
    let definition = ReportDefinition::new().with_no_data(NoDataPolicy {
        mode: NoDataMode::AsCategory,
        ..Default::default()
    });
    let (report, registry) = run_landscape(&definition);

    assert!(report
        .derived
        .rows
        .iter()
        .all(|r| r.entry.cats.iter().all(|c| !c.is_no_data())));
    let view = ReportView::build(&report, &registry);
    let substituted = view
        .rows
        .iter()
        .find(|r| r.categories[0].value == Category(-1))
        .unwrap();
    assert_eq!(substituted.categories[0].code, "-1");
    assert_eq!(substituted.categories[0].label, "");
}

#[test]
fn single_cell_window() {
    let registry = LandscapeFixture::registry();
    let definition = ReportDefinition::new();
    let mut layers = [
        MemoryRaster::from_codes(&[&[2]]),
        MemoryRaster::from_codes(&[&[20]]),
    ];
    let report = ReportDriver::new(Window::new(1, 1, 5.0, 5.0), &registry, &UnitTable::standard(), &definition)
        .unwrap()
        .run(&mut layers, &mut MaskPolicy::none())
        .unwrap();
    assert_eq!(report.derived.rows.len(), 1);
    assert_eq!(report.derived.totals.values, vec![1.0, 100.0]);
}
