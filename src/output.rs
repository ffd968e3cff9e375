use anyhow::{bail, Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::path::Path;
use tracing::info;

use crate::sweep::{Column, SweepRow, SweepTable, COLUMNS};

/// How a sweep table is written out
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, ValueEnum, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table, // Aligned columns for the terminal
    Csv,
    Json,
}

/// Most decimal places accepted for table and CSV output. An f64 carries 17 significant digits.
pub const MAX_PRECISION: usize = 17;

/// Render a table. `precision` is the number of decimals for table and CSV output.
pub fn render(table: &SweepTable, format: OutputFormat, precision: usize) -> Result<String> {
    if precision > MAX_PRECISION {
        bail!("Precision {} is above the maximum of {}", precision, MAX_PRECISION);
    }
    match format {
        OutputFormat::Table => Ok(render_table(table, precision)),
        OutputFormat::Csv => Ok(render_csv(table, precision)),
        OutputFormat::Json => {
            serde_json::to_string_pretty(table).context("Failed to serialize sweep as JSON")
        }
    }
}

/// Render and write to `path`.
pub fn write_to(
    path: &Path,
    table: &SweepTable,
    format: OutputFormat,
    precision: usize,
) -> Result<()> {
    let rendered = render(table, format, precision)?;
    std::fs::write(path, rendered)
        .with_context(|| format!("Failed to write output to {}", path.display()))?;
    info!("Wrote {} rows to {}", table.len(), path.display());
    Ok(())
}

fn format_cell(row: &SweepRow, column: Column, precision: usize) -> String {
    match column {
        Column::N => row.n.to_string(),
        _ => {
            let v = row.get(column);
            if v.is_nan() {
                "NaN".to_string()
            } else {
                format!("{:.*}", precision, v)
            }
        }
    }
}

fn render_csv(table: &SweepTable, precision: usize) -> String {
    let mut out = COLUMNS.join(",");
    out.push('\n');
    for row in table {
        let cells: Vec<String> = Column::all()
            .iter()
            .map(|&c| format_cell(row, c, precision))
            .collect();
        out.push_str(&cells.join(","));
        out.push('\n');
    }
    out
}

fn render_table(table: &SweepTable, precision: usize) -> String {
    let cells: Vec<Vec<String>> = table
        .iter()
        .map(|row| {
            Column::all()
                .iter()
                .map(|&c| format_cell(row, c, precision))
                .collect()
        })
        .collect();

    // Width of each column: widest of header and cells
    let widths: Vec<usize> = COLUMNS
        .iter()
        .enumerate()
        .map(|(i, name)| {
            cells
                .iter()
                .map(|r| r[i].len())
                .chain(std::iter::once(name.len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    let header: Vec<String> = COLUMNS
        .iter()
        .zip(&widths)
        .map(|(name, w)| format!("{:>w$}", name, w = *w))
        .collect();
    let _ = writeln!(out, "{}", header.join("  "));

    for row in &cells {
        let line: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, w)| format!("{:>w$}", cell, w = *w))
            .collect();
        let _ = writeln!(out, "{}", line.join("  "));
    }
    out
}
