//! FILENAME: app/report/src/sinks.rs
// PURPOSE: Report sinks for plain text and JSON output.

use crosstab_engine::{ReportSink, ReportView};
use std::io::{self, Write};

// ============================================================================
// PLAIN TEXT
// ============================================================================

#[derive(Debug, Clone, Copy)]
pub struct PlainTextOptions {
    pub page_width: usize,
    pub header: bool,
}

impl Default for PlainTextOptions {
    fn default() -> Self {
        PlainTextOptions {
            page_width: 79,
            header: true,
        }
    }
}

/// Fixed-width table. Category labels are shortened to fit the page width;
/// codes and unit columns never are.
pub struct PlainTextSink<W: Write> {
    writer: W,
    options: PlainTextOptions,
}

impl<W: Write> PlainTextSink<W> {
    pub fn new(writer: W, options: PlainTextOptions) -> Self {
        PlainTextSink { writer, options }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_header(&mut self, view: &ReportView, rule: &str) -> io::Result<()> {
        writeln!(self.writer, "{}", rule)?;
        writeln!(self.writer, "CATEGORY CROSS-TABULATION REPORT")?;
        for (i, layer) in view.layers.iter().enumerate() {
            let title = if layer.title.is_empty() { "" } else { " - " };
            writeln!(
                self.writer,
                "LAYER {}: {}@{}{}{}",
                i + 1,
                layer.name,
                layer.mapset,
                title,
                layer.title
            )?;
        }
        let w = &view.window;
        writeln!(
            self.writer,
            "WINDOW: {} rows x {} cols, resolution {} x {}",
            w.rows, w.cols, w.ns_res, w.ew_res
        )?;
        let s = &view.stats;
        writeln!(
            self.writer,
            "CELLS: {} scanned, {} masked, {} skipped",
            s.cells, s.masked, s.skipped
        )?;
        writeln!(self.writer, "{}", rule)
    }
}

/// Width of each label column once the page width is shared out.
fn label_widths(view: &ReportView, unit_widths: &[usize], page_width: usize) -> Vec<usize> {
    let layers = view.layers.len();
    let fixed: usize = view.layers.iter().map(|l| l.code_width + 2).sum::<usize>()
        + unit_widths.iter().map(|w| w + 1).sum::<usize>();
    let budget = page_width.saturating_sub(fixed);
    let share = if layers == 0 { 0 } else { budget / layers };
    view.layers
        .iter()
        .map(|l| l.label_width.min(share))
        .collect()
}

fn clip(text: &str, width: usize) -> String {
    text.chars().take(width).collect()
}

impl<W: Write> ReportSink for PlainTextSink<W> {
    type Error = io::Error;

    fn emit(&mut self, view: &ReportView) -> io::Result<()> {
        let unit_widths: Vec<usize> = view
            .units
            .iter()
            .map(|u| u.format.width.max(u.label.len()))
            .collect();
        let labels = label_widths(view, &unit_widths, self.options.page_width);

        let categories_width: usize = view
            .layers
            .iter()
            .zip(&labels)
            .map(|(l, w)| l.code_width + w + 2)
            .sum();
        let line_width = categories_width + unit_widths.iter().map(|w| w + 1).sum::<usize>();
        let rule = "-".repeat(line_width.min(self.options.page_width).max(1));

        if self.options.header {
            self.write_header(view, &rule)?;
        }

        let mut line = String::new();
        for (layer, width) in view.layers.iter().zip(&labels) {
            let heading = clip(&layer.name, layer.code_width + width + 1);
            line.push_str(&format!("{:<w$}|", heading, w = layer.code_width + width + 1));
        }
        for (unit, width) in view.units.iter().zip(&unit_widths) {
            line.push_str(&format!("{:>w$}|", unit.label, w = *width));
        }
        writeln!(self.writer, "{}", line.trim_end())?;
        writeln!(self.writer, "{}", rule)?;

        let mut subtotals = view.subtotals.iter().peekable();
        for (index, row) in view.rows.iter().enumerate() {
            line.clear();
            for ((category, layer), width) in row.categories.iter().zip(&view.layers).zip(&labels) {
                line.push_str(&format!(
                    "{:>cw$} {:<lw$}|",
                    category.code,
                    clip(&category.label, *width),
                    cw = layer.code_width,
                    lw = *width
                ));
            }
            for ((value, unit), width) in row.values.iter().zip(&view.units).zip(&unit_widths) {
                line.push_str(&format!("{:>w$}|", unit.format.text(*value), w = *width));
            }
            writeln!(self.writer, "{}", line.trim_end())?;

            while let Some(subtotal) = subtotals.next_if(|s| s.last_row == index) {
                line.clear();
                let prefix: Vec<String> = subtotal
                    .categories
                    .iter()
                    .map(|c| format!("{} {}", c.code, c.label).trim_end().to_string())
                    .collect();
                let heading = format!("SUBTOTAL {}", prefix.join(" / "));
                let width = categories_width.saturating_sub(1);
                line.push_str(&format!("{:<w$}|", clip(&heading, width), w = width));
                for ((value, unit), width) in subtotal.values.iter().zip(&view.units).zip(&unit_widths) {
                    line.push_str(&format!("{:>w$}|", unit.format.text(*value), w = *width));
                }
                writeln!(self.writer, "{}", line.trim_end())?;
            }
        }

        writeln!(self.writer, "{}", rule)?;
        line.clear();
        line.push_str(&format!("{:<w$}|", "TOTAL", w = categories_width.saturating_sub(1)));
        for ((value, unit), width) in view.totals.values.iter().zip(&view.units).zip(&unit_widths) {
            line.push_str(&format!("{:>w$}|", unit.format.text(*value), w = *width));
        }
        writeln!(self.writer, "{}", line.trim_end())?;
        self.writer.flush()
    }
}

// ============================================================================
// JSON
// ============================================================================

pub struct JsonSink<W: Write> {
    writer: W,
    pretty: bool,
}

impl<W: Write> JsonSink<W> {
    pub fn new(writer: W) -> Self {
        JsonSink {
            writer,
            pretty: true,
        }
    }

    pub fn compact(mut self) -> Self {
        self.pretty = false;
        self
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ReportSink for JsonSink<W> {
    type Error = serde_json::Error;

    fn emit(&mut self, view: &ReportView) -> Result<(), serde_json::Error> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, view)?;
        } else {
            serde_json::to_writer(&mut self.writer, view)?;
        }
        writeln!(self.writer).map_err(serde_json::Error::io)
    }
}
