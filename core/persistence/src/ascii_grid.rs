//! FILENAME: core/persistence/src/ascii_grid.rs
//! PURPOSE: Reads integer category grids from the plain-text grid format.
//! CONTEXT: A header of `key: value` lines (north, south, east, west, rows,
//! cols and an optional null code) followed by `rows` lines of `cols`
//! whitespace-separated integers. `*` or the declared null code is no-data.

use std::fs;
use std::path::Path;
use raster::{CategoryValue, MemoryRaster, Window, NULL_CODE};
use crate::error::PersistenceError;

/// A fully loaded grid: its window and its cells.
#[derive(Debug, Clone)]
pub struct AsciiGrid {
    pub window: Window,
    pub raster: MemoryRaster,
}

#[derive(Default)]
struct Header {
    north: Option<f64>,
    south: Option<f64>,
    east: Option<f64>,
    west: Option<f64>,
    rows: Option<usize>,
    cols: Option<usize>,
    null: Option<i64>,
}

pub fn load_ascii_grid(path: &Path) -> Result<AsciiGrid, PersistenceError> {
    if !path.exists() {
        return Err(PersistenceError::NotFound(path.display().to_string()));
    }
    let text = fs::read_to_string(path)?;
    parse_ascii_grid(&text)
}

pub fn parse_ascii_grid(text: &str) -> Result<AsciiGrid, PersistenceError> {
    let mut header = Header::default();
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
        .peekable();

    while let Some((number, line)) = lines.peek().copied() {
        let Some((key, value)) = line.split_once(':') else {
            break;
        };
        let value = value.trim();
        match key.trim().to_ascii_lowercase().as_str() {
            "north" => header.north = Some(number_of(number, key, value)?),
            "south" => header.south = Some(number_of(number, key, value)?),
            "east" => header.east = Some(number_of(number, key, value)?),
            "west" => header.west = Some(number_of(number, key, value)?),
            "rows" => header.rows = Some(number_of(number, key, value)?),
            "cols" => header.cols = Some(number_of(number, key, value)?),
            "null" => header.null = Some(number_of(number, key, value)?),
            other => {
                return Err(PersistenceError::format(
                    number,
                    format!("unknown header key '{}'", other),
                ))
            }
        }
        lines.next();
    }

    let null = header.null;
    let (north, south, east, west, rows, cols) = match header {
        Header {
            north: Some(n),
            south: Some(s),
            east: Some(e),
            west: Some(w),
            rows: Some(r),
            cols: Some(c),
            ..
        } => (n, s, e, w, r, c),
        _ => {
            return Err(PersistenceError::format(
                1,
                "header needs north, south, east, west, rows and cols",
            ))
        }
    };
    let window = Window::from_bounds(north, south, east, west, rows, cols)?;

    let mut data = Vec::with_capacity(rows);
    for (number, line) in lines {
        let row = line
            .split_whitespace()
            .map(|token| cell_of(number, token, null))
            .collect::<Result<Vec<_>, _>>()?;
        if row.len() != cols {
            return Err(PersistenceError::format(
                number,
                format!("expected {} values, found {}", cols, row.len()),
            ));
        }
        data.push(row);
    }
    if data.len() != rows {
        return Err(PersistenceError::format(
            text.lines().count(),
            format!("expected {} data rows, found {}", rows, data.len()),
        ));
    }

    let raster = MemoryRaster::from_rows(data)?.with_no_data_code(null.unwrap_or(NULL_CODE));
    Ok(AsciiGrid { window, raster })
}

fn number_of<T: std::str::FromStr>(line: usize, key: &str, value: &str) -> Result<T, PersistenceError> {
    value
        .parse()
        .map_err(|_| PersistenceError::format(line, format!("bad {} value '{}'", key.trim(), value)))
}

fn cell_of(line: usize, token: &str, null: Option<i64>) -> Result<CategoryValue, PersistenceError> {
    if token == "*" {
        return Ok(CategoryValue::NoData);
    }
    let code: i64 = token
        .parse()
        .map_err(|_| PersistenceError::format(line, format!("'{}' is not an integer category", token)))?;
    if Some(code) == null {
        Ok(CategoryValue::NoData)
    } else {
        Ok(CategoryValue::Category(code))
    }
}
