//! FILENAME: core/crosstab-engine/benches/crosstab_scan.rs
//! Scan throughput for a few layer counts on a 512x512 window.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use crosstab_engine::{LayerRegistry, MaskPolicy, ReportDefinition, ReportDriver, UnitTable};
use raster::{CategoryTable, CategoryValue, MemoryRaster, Window};

const SIDE: usize = 512;

fn layer(seed: i64, classes: i64) -> MemoryRaster {
    let mut raster = MemoryRaster::new(SIDE, SIDE);
    for row in 0..SIDE {
        for col in 0..SIDE {
            let code = (row as i64 * 31 + col as i64 * 17 + seed) % classes;
            raster.set(row, col, CategoryValue::Category(code));
        }
    }
    raster
}

fn bench_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("crosstab_scan");
    group.sample_size(10);
    let window = Window::new(SIDE, SIDE, 30.0, 30.0);
    let definition = ReportDefinition::new().with_units(&["c", "p", "h"]);
    let units = UnitTable::standard();

    for layer_count in [1usize, 2, 4] {
        let mut registry = LayerRegistry::new();
        let layers: Vec<MemoryRaster> = (0..layer_count)
            .map(|i| {
                registry.insert(&format!("layer{}", i), "bench", CategoryTable::new());
                layer(i as i64 * 7, 12)
            })
            .collect();

        group.bench_with_input(
            BenchmarkId::from_parameter(layer_count),
            &layers,
            |b, layers| {
                b.iter(|| {
                    let mut sources = layers.clone();
                    let report = ReportDriver::new(window, &registry, &units, &definition)
                        .and_then(|driver| driver.run(&mut sources, &mut MaskPolicy::none()));
                    black_box(report.map(|r| r.derived.rows.len()).ok())
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_scan);
criterion_main!(benches);
