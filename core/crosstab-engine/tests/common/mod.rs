//! FILENAME: tests/common/mod.rs
//! Fixtures for crosstab-engine integration tests.

#![allow(dead_code)]

use crosstab_engine::{
    CrossTabReport, LayerRegistry, MaskPolicy, ReportDefinition, ReportDriver, UnitTable,
};
use raster::{CategoryTable, CategoryValue, MemoryCatalog, MemoryRaster, Window};

/// Two 3x4 layers with labels, 30m cells.
pub struct LandscapeFixture;

impl LandscapeFixture {
    pub fn window() -> Window {
        Window::new(3, 4, 30.0, 30.0)
    }

    pub fn landuse() -> MemoryRaster {
        let mut raster = MemoryRaster::from_codes(&[
            &[1, 1, 2, 2],
            &[1, 3, 3, 2],
            &[1, 1, 2, 0],
        ]);
        raster.set(2, 3, CategoryValue::NoData);
        raster.with_no_data_code(-1)
    }

    pub fn soils() -> MemoryRaster {
        MemoryRaster::from_codes(&[
            &[10, 10, 10, 20],
            &[20, 20, 10, 20],
            &[10, 10, 20, 20],
        ])
    }

    pub fn catalog() -> MemoryCatalog {
        let mut landuse = CategoryTable::with_title("Land use 2024");
        landuse.insert(1, "forest");
        landuse.insert(2, "pasture");
        landuse.insert(3, "urban");

        let mut soils = CategoryTable::with_title("Soil series");
        soils.insert(10, "loam");
        soils.insert(20, "clay");

        let mut catalog = MemoryCatalog::new();
        catalog.insert("landuse", "PERMANENT", landuse);
        catalog.insert("soils", "PERMANENT", soils);
        catalog
    }

    pub fn registry() -> LayerRegistry {
        let catalog = Self::catalog();
        let mut registry = LayerRegistry::new();
        registry.load(&catalog, "landuse", "PERMANENT").unwrap();
        registry.load(&catalog, "soils", "PERMANENT").unwrap();
        registry
    }
}

/// Runs a full report over the landscape fixture.
pub fn run_landscape(definition: &ReportDefinition) -> (CrossTabReport, LayerRegistry) {
    let registry = LandscapeFixture::registry();
    let mut layers = [LandscapeFixture::landuse(), LandscapeFixture::soils()];
    let report = ReportDriver::new(
        LandscapeFixture::window(),
        &registry,
        &UnitTable::standard(),
        definition,
    )
    .unwrap()
    .run(&mut layers, &mut MaskPolicy::none())
    .unwrap();
    (report, registry)
}
