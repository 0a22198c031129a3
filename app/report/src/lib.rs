//! FILENAME: app/report/src/lib.rs
// PURPOSE: Wires the file catalog, the report driver and the sinks together.

pub mod cli;
pub mod error;
pub mod logging;
pub mod sinks;

use crosstab_engine::{
    CrossTabReport, LayerRegistry, MaskPolicy, ReportDriver, ReportError, ReportSink,
    ReportView, UnitTable,
};
use log::{info, warn};
use persistence::{split_map_name, DirectoryCatalog};
use raster::{MemoryRaster, Window};
use std::io::Write;

use crate::cli::{Cli, OutputFormat};
pub use crate::error::AppError;
use crate::sinks::{JsonSink, PlainTextOptions, PlainTextSink};

/// Builds the report described by `cli` without rendering it.
pub fn compute(cli: &Cli) -> Result<(CrossTabReport, LayerRegistry), AppError> {
    let definition = cli.definition()?;
    let catalog = DirectoryCatalog::new(&cli.root);

    let mut registry =
        LayerRegistry::with_no_data_strings(&definition.no_data_code, &definition.no_data_label);
    let mut layers: Vec<MemoryRaster> = Vec::with_capacity(cli.map.len());
    let mut window = None;

    for reference in &cli.map {
        let (name, mapset) = split_map_name(reference);
        registry.load(&catalog, name, mapset)?;
        let grid = catalog.open_raster(name, mapset)?;

        match window {
            None => window = Some(grid.window),
            Some(first) => {
                if resolution_differs(&first, &grid.window) {
                    warn!(
                        "{}@{} resolution differs from the first layer; using the first layer's window",
                        name, mapset
                    );
                }
            }
        }
        layers.push(grid.raster);
    }
    let window = window.ok_or(ReportError::NoLayers)?;

    let mut mask = match &cli.mask {
        Some(reference) => {
            let (name, mapset) = split_map_name(reference);
            let grid = catalog.open_raster(name, mapset)?;
            info!("masking with {}@{}", name, mapset);
            MaskPolicy::from_raster(Box::new(grid.raster), definition.mask)
        }
        None => MaskPolicy::none(),
    };

    let units = UnitTable::standard();
    let report = ReportDriver::new(window, &registry, &units, &definition)?
        .run(&mut layers, &mut mask)?;
    Ok((report, registry))
}

/// Same rows and columns but a different cell size. A differing extent is
/// left to the driver's geometry check.
fn resolution_differs(first: &Window, other: &Window) -> bool {
    first.same_extent(other.rows, other.cols)
        && (first.ns_res != other.ns_res || first.ew_res != other.ew_res)
}

/// Computes the report and renders it to `out` in the requested format.
pub fn run(cli: &Cli, out: &mut dyn Write) -> Result<(), AppError> {
    let (report, registry) = compute(cli)?;
    let view = ReportView::build(&report, &registry);

    match cli.format {
        OutputFormat::Plain => {
            let options = PlainTextOptions {
                page_width: cli.page_width,
                header: !cli.no_header,
            };
            PlainTextSink::new(out, options).emit(&view)?;
        }
        OutputFormat::Json => JsonSink::new(out).emit(&view).map_err(AppError::Render)?,
    }
    Ok(())
}
