//! Emissions inventory CSVs (FF10-style point files).
//!
//! Files carry a block of `#` comment lines before the header. Only the
//! columns stackstat needs are extracted; everything else is ignored.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use serde::Serialize;
use ss_core::{CapacityTable, Error, Result};

use crate::discover::discover_csv_files;
use crate::normalize_scc;

const COL_SCC: &str = "scc";
const COL_POLL: &str = "poll";
const COL_STKHGT: &str = "stkhgt";
const COL_CAPACITY: &str = "design_capacity";
const COL_CAPACITY_UNITS: &str = "design_capacity_units";

/// One inventory row, reduced to the columns used downstream.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmissionRow {
    /// Source classification code, normalized.
    pub scc: Option<String>,
    /// Pollutant code (`poll`), e.g. `PM25-PRI`.
    pub poll: Option<String>,
    /// `stkhgt`, meters.
    pub stack_height: Option<f64>,
    /// `design_capacity`; `None` when the column or cell is missing.
    pub design_capacity: Option<f64>,
    /// `design_capacity_units`, e.g. `MW`.
    pub design_capacity_unit: Option<String>,
}

/// All rows read from an inventory directory.
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    /// Rows of every readable file, in file order.
    pub rows: Vec<EmissionRow>,
    /// Files that were read successfully.
    pub files: Vec<PathBuf>,
    /// Files that failed to parse, with the rendered error.
    pub skipped: Vec<(PathBuf, String)>,
    /// Whether at least one file carried both design-capacity columns.
    pub has_capacity_columns: bool,
}

impl Inventory {
    /// Fail unless some file provided `design_capacity` and `design_capacity_units`.
    pub fn require_capacity_columns(&self) -> Result<()> {
        if self.has_capacity_columns {
            Ok(())
        } else {
            Err(Error::Ingest(format!(
                "missing required columns: {COL_CAPACITY}, {COL_CAPACITY_UNITS}"
            )))
        }
    }
}

/// Rows of a single file plus whether it had the capacity columns.
#[derive(Debug, Clone)]
pub struct EmissionsFile {
    /// Data rows, comments and header excluded.
    pub rows: Vec<EmissionRow>,
    /// Both `design_capacity` and `design_capacity_units` were in the header.
    pub has_capacity_columns: bool,
}

fn column_index(headers: &csv::StringRecord, name: &str) -> Option<usize> {
    headers.iter().position(|h| h.trim().eq_ignore_ascii_case(name))
}

fn cell<'r>(rec: &'r csv::StringRecord, idx: Option<usize>) -> Option<&'r str> {
    let s = rec.get(idx?)?.trim();
    if s.is_empty() { None } else { Some(s) }
}

fn parse_number(raw: Option<&str>, column: &str, path: &Path, line: u64) -> Result<Option<f64>> {
    let Some(s) = raw else {
        return Ok(None);
    };
    s.parse::<f64>().map(Some).map_err(|_| {
        Error::Ingest(format!(
            "{}:{}: column '{}' is not numeric: '{}'",
            path.display(),
            line,
            column,
            s
        ))
    })
}

/// Read one inventory CSV.
pub fn read_emissions_csv(path: &Path) -> Result<EmissionsFile> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .comment(Some(b'#'))
        .flexible(true)
        .from_path(path)?;

    let headers = rdr.headers()?.clone();
    let mut missing = Vec::new();
    let scc_idx = column_index(&headers, COL_SCC);
    let poll_idx = column_index(&headers, COL_POLL);
    let hgt_idx = column_index(&headers, COL_STKHGT);
    for (name, idx) in [(COL_SCC, scc_idx), (COL_POLL, poll_idx), (COL_STKHGT, hgt_idx)] {
        if idx.is_none() {
            missing.push(name);
        }
    }
    if !missing.is_empty() {
        return Err(Error::Ingest(format!(
            "{}: missing required columns: {}",
            path.display(),
            missing.join(", ")
        )));
    }

    let cap_idx = column_index(&headers, COL_CAPACITY);
    let unit_idx = column_index(&headers, COL_CAPACITY_UNITS);

    let mut rows = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let line = rec.position().map(|p| p.line()).unwrap_or(0);
        rows.push(EmissionRow {
            scc: cell(&rec, scc_idx).and_then(normalize_scc),
            poll: cell(&rec, poll_idx).map(str::to_string),
            stack_height: parse_number(cell(&rec, hgt_idx), COL_STKHGT, path, line)?,
            design_capacity: parse_number(cell(&rec, cap_idx), COL_CAPACITY, path, line)?,
            design_capacity_unit: cell(&rec, unit_idx).map(str::to_string),
        });
    }

    Ok(EmissionsFile { rows, has_capacity_columns: cap_idx.is_some() && unit_idx.is_some() })
}

/// Read a flat capacity table: `stkhgt`, `design_capacity`,
/// `design_capacity_units` columns, empty cells as missing.
pub fn read_capacity_table(path: &Path) -> Result<CapacityTable> {
    let mut rdr = csv::ReaderBuilder::new().has_headers(true).comment(Some(b'#')).from_path(path)?;
    let headers = rdr.headers()?.clone();
    let idx = |name: &str| {
        column_index(&headers, name).ok_or_else(|| {
            Error::Ingest(format!("{}: missing required column: {}", path.display(), name))
        })
    };
    let (hgt_idx, cap_idx, unit_idx) = (idx(COL_STKHGT)?, idx(COL_CAPACITY)?, idx(COL_CAPACITY_UNITS)?);

    let mut table = CapacityTable::default();
    for rec in rdr.records() {
        let rec = rec?;
        let line = rec.position().map(|p| p.line()).unwrap_or(0);
        table.push(
            parse_number(cell(&rec, Some(hgt_idx)), COL_STKHGT, path, line)?,
            parse_number(cell(&rec, Some(cap_idx)), COL_CAPACITY, path, line)?,
            cell(&rec, Some(unit_idx)).map(str::to_string),
        );
    }
    Ok(table)
}

/// Read every CSV under `dir`. Unreadable files are logged and skipped.
pub fn read_inventory(dir: &Path) -> Result<Inventory> {
    let files = discover_csv_files(dir)?;
    if files.is_empty() {
        return Err(Error::Ingest(format!("no CSV files found under {}", dir.display())));
    }

    let mut inv = Inventory::default();
    for path in files {
        match read_emissions_csv(&path) {
            Ok(file) => {
                tracing::debug!(path = %path.display(), rows = file.rows.len(), "read inventory file");
                inv.has_capacity_columns |= file.has_capacity_columns;
                inv.rows.extend(file.rows);
                inv.files.push(path);
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "skipping unreadable inventory file");
                inv.skipped.push((path, e.to_string()));
            }
        }
    }

    if inv.files.is_empty() {
        return Err(Error::Ingest(format!(
            "no readable inventory files under {} ({} skipped)",
            dir.display(),
            inv.skipped.len()
        )));
    }

    tracing::info!(
        files = inv.files.len(),
        skipped = inv.skipped.len(),
        rows = inv.rows.len(),
        "inventory loaded"
    );
    Ok(inv)
}

/// Rows for one pollutant selection, in the shapes the analyses consume.
#[derive(Debug, Clone, Default)]
pub struct PollutantSelection {
    /// Selected rows as capacity columns.
    pub table: CapacityTable,
    /// Stack heights of the same rows.
    pub stack_heights: Vec<f64>,
}

impl PollutantSelection {
    /// Number of selected rows.
    pub fn len(&self) -> usize {
        self.stack_heights.len()
    }

    /// True when nothing matched.
    pub fn is_empty(&self) -> bool {
        self.stack_heights.is_empty()
    }
}

/// Keep rows whose pollutant is listed, whose stack height is present and
/// whose SCC is in `scc_set`.
pub fn filter_pollutant(
    rows: &[EmissionRow],
    pollutants: &[String],
    scc_set: &BTreeSet<String>,
) -> PollutantSelection {
    let mut out = PollutantSelection::default();
    for row in rows {
        let Some(poll) = row.poll.as_deref() else {
            continue;
        };
        if !pollutants.iter().any(|p| p == poll) {
            continue;
        }
        let Some(h) = row.stack_height else {
            continue;
        };
        if !row.scc.as_ref().is_some_and(|s| scc_set.contains(s)) {
            continue;
        }
        out.table.push(Some(h), row.design_capacity, row.design_capacity_unit.clone());
        out.stack_heights.push(h);
    }
    tracing::info!(
        pollutants = %pollutants.join(","),
        scc_codes = scc_set.len(),
        rows = out.len(),
        "pollutant filter applied"
    );
    out
}

/// Capacity units present in `rows` (with a capacity value), most frequent first.
pub fn unit_counts(rows: &[EmissionRow]) -> Vec<(String, usize)> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for row in rows {
        if row.design_capacity.is_none() {
            continue;
        }
        if let Some(u) = row.design_capacity_unit.as_deref() {
            *counts.entry(u).or_default() += 1;
        }
    }
    let mut out: Vec<(String, usize)> = counts.into_iter().map(|(u, n)| (u.to_string(), n)).collect();
    out.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    out
}
