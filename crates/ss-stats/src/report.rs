//! Statistics table I/O and report emission.
//!
//! The table is a UTF-8 CSV with a fixed header. Numbers carry two decimals,
//! `count` is an integer, and the "no data" sentinel is an empty field.

use std::path::Path;

use ss_core::{CapacityPlot, CapacityPlotter, Error, Result};

use crate::describe::CategoryStats;

/// Column order of the statistics table.
pub const STATS_HEADER: [&str; 9] = [
    "category",
    "count",
    "min",
    "25th_percentile",
    "median",
    "mean",
    "75th_percentile",
    "max",
    "std",
];

fn fmt_opt(v: Option<f64>) -> String {
    v.map(|x| format!("{x:.2}")).unwrap_or_default()
}

fn parse_opt(field: &str, column: &str, line: u64) -> Result<Option<f64>> {
    let field = field.trim();
    if field.is_empty() {
        return Ok(None);
    }
    field
        .parse::<f64>()
        .map(Some)
        .map_err(|e| Error::Ingest(format!("line {line}: column '{column}': {e} ('{field}')")))
}

/// Write the statistics table to `path`.
pub fn write_stats_csv(path: &Path, stats: &[CategoryStats]) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record(STATS_HEADER)?;
    for s in stats {
        wtr.write_record([
            s.category.clone(),
            s.count.to_string(),
            fmt_opt(s.min),
            fmt_opt(s.p25),
            fmt_opt(s.median),
            fmt_opt(s.mean),
            fmt_opt(s.p75),
            fmt_opt(s.max),
            fmt_opt(s.std),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Read a statistics table written by [`write_stats_csv`].
pub fn read_stats_csv(path: &Path) -> Result<Vec<CategoryStats>> {
    let mut rdr = csv::Reader::from_path(path)?;
    let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
    if headers != STATS_HEADER {
        return Err(Error::Ingest(format!(
            "{}: unexpected header {:?}",
            path.display(),
            headers
        )));
    }

    let mut out = Vec::new();
    for result in rdr.records() {
        let rec = result?;
        let line = rec.position().map_or(0, |p| p.line());
        let field = |i: usize| rec.get(i).unwrap_or("");
        let count = field(1).trim().parse::<usize>().map_err(|e| {
            Error::Ingest(format!("line {line}: column 'count': {e} ('{}')", field(1)))
        })?;
        out.push(CategoryStats {
            category: field(0).to_string(),
            count,
            min: parse_opt(field(2), STATS_HEADER[2], line)?,
            p25: parse_opt(field(3), STATS_HEADER[3], line)?,
            median: parse_opt(field(4), STATS_HEADER[4], line)?,
            mean: parse_opt(field(5), STATS_HEADER[5], line)?,
            p75: parse_opt(field(6), STATS_HEADER[6], line)?,
            max: parse_opt(field(7), STATS_HEADER[7], line)?,
            std: parse_opt(field(8), STATS_HEADER[8], line)?,
        });
    }
    Ok(out)
}

/// Write the statistics table, then render the plot.
///
/// Exactly one file write and one plot call. If the plot fails the table
/// stays on disk; the error is returned as is.
pub fn emit_report(
    stats: &[CategoryStats],
    plot: &CapacityPlot<'_>,
    stats_path: &Path,
    plot_path: &Path,
    plotter: &dyn CapacityPlotter,
) -> Result<()> {
    write_stats_csv(stats_path, stats)?;
    tracing::info!(path = %stats_path.display(), rows = stats.len(), "wrote statistics table");

    plotter.plot_capacity(plot, plot_path)?;
    tracing::info!(path = %plot_path.display(), "rendered capacity plot");
    Ok(())
}
