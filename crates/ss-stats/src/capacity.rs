//! Top-level capacity analysis: filter, bin, partition, aggregate, emit.

use std::path::PathBuf;

use serde::Serialize;
use ss_core::{CapacityPlot, CapacityPlotter, CapacityTable, Result};

use crate::aggregate::aggregate;
use crate::binning::{BinScheme, Scale};
use crate::describe::CategoryStats;
use crate::filter::filter_capacity;
use crate::partition::{Excluded, partition};
use crate::report::emit_report;

/// Parameters of one capacity analysis run.
#[derive(Debug, Clone)]
pub struct CapacityOptions {
    /// Capacity unit to keep (exact match).
    pub target_unit: String,
    /// Directory receiving the statistics table and the plot.
    pub output_dir: PathBuf,
    /// File name of the statistics table.
    pub stats_filename: String,
    /// File name of the plot; the extension selects the image format.
    pub plot_filename: String,
    /// Explicit boundaries instead of the range-based presets.
    pub boundaries: Option<Vec<f64>>,
    /// Plot title.
    pub title: String,
}

impl Default for CapacityOptions {
    fn default() -> Self {
        Self {
            target_unit: "MW".to_string(),
            output_dir: PathBuf::from("plots"),
            stats_filename: "stack_height_by_capacity.csv".to_string(),
            plot_filename: "stack_height_by_capacity.svg".to_string(),
            boundaries: None,
            title: String::new(),
        }
    }
}

/// Outcome of [`analyze_capacity`].
#[derive(Debug, Clone, Serialize)]
pub struct CapacityReport {
    /// Unit the records were filtered on.
    pub unit: String,
    /// Scale tag of the scheme in use.
    pub scale: Scale,
    /// Bin boundaries in use.
    pub boundaries: Vec<f64>,
    /// Records kept by the unit filter.
    pub records: usize,
    /// "All" row followed by one row per bin.
    pub stats: Vec<CategoryStats>,
    /// Records whose capacity could not be binned.
    pub excluded: Vec<Excluded>,
    /// Statistics table path.
    pub stats_path: PathBuf,
    /// Plot path.
    pub plot_path: PathBuf,
}

/// Run one capacity analysis over `table`.
///
/// Fails before touching the filesystem when no record carries the target
/// unit. The output directory is created if needed.
pub fn analyze_capacity(
    table: &CapacityTable,
    options: &CapacityOptions,
    plotter: &dyn CapacityPlotter,
) -> Result<CapacityReport> {
    let unit = options.target_unit.as_str();
    let records = filter_capacity(table, unit)?;

    let capacities: Vec<f64> = records.iter().map(|r| r.design_capacity()).collect();
    let heights: Vec<f64> = records.iter().map(|r| r.stack_height()).collect();

    let scheme = match &options.boundaries {
        Some(b) => BinScheme::custom(b.clone())?,
        None => BinScheme::select(&capacities),
    };
    let bins = scheme.bins(unit);
    let part = partition(capacities.iter().copied().zip(heights.iter().copied()), &scheme);
    let stats = aggregate(&format!("All {unit}"), &heights, &part, &bins);

    // The plot only sees rows that received a bin.
    let (plot_caps, plot_heights): (Vec<f64>, Vec<f64>) = part
        .assignments()
        .iter()
        .zip(capacities.iter().zip(&heights))
        .filter(|(a, _)| a.is_some())
        .map(|(_, (c, h))| (*c, *h))
        .unzip();

    std::fs::create_dir_all(&options.output_dir)?;
    let stats_path = options.output_dir.join(&options.stats_filename);
    let plot_path = options.output_dir.join(&options.plot_filename);

    let plot = CapacityPlot {
        capacities: &plot_caps,
        stack_heights: &plot_heights,
        boundaries: scheme.boundaries(),
        unit,
        title: &options.title,
    };
    emit_report(&stats, &plot, &stats_path, &plot_path, plotter)?;

    tracing::info!(
        unit,
        scale = scheme.scale().as_str(),
        records = records.len(),
        excluded = part.excluded().len(),
        "capacity analysis complete"
    );

    Ok(CapacityReport {
        unit: unit.to_string(),
        scale: scheme.scale(),
        boundaries: scheme.boundaries().to_vec(),
        records: records.len(),
        stats,
        excluded: part.excluded().to_vec(),
        stats_path,
        plot_path,
    })
}
