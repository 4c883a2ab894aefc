//! Stack-height distribution analysis over fixed height categories.

use std::path::PathBuf;

use serde::Serialize;
use ss_core::{Error, HeightPlot, HeightPlotter, Result};

use crate::aggregate::aggregate;
use crate::binning::BinScheme;
use crate::describe::CategoryStats;
use crate::partition::partition;
use crate::report::write_stats_csv;

/// Height category boundaries, meters: `0-10`, `10-100`, `>100`.
pub const HEIGHT_CATEGORIES: [f64; 3] = [0.0, 10.0, 100.0];

/// Parameters of one height analysis run.
#[derive(Debug, Clone)]
pub struct HeightOptions {
    /// Output directory.
    pub output_dir: PathBuf,
    /// Statistics table file name.
    pub stats_filename: String,
    /// Plot file name.
    pub plot_filename: String,
    /// Plot title.
    pub title: String,
}

impl Default for HeightOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("plots"),
            stats_filename: "stack_height_analysis.csv".to_string(),
            plot_filename: "stack_height_analysis.svg".to_string(),
            title: String::new(),
        }
    }
}

/// Outcome of [`analyze_heights`].
#[derive(Debug, Clone, Serialize)]
pub struct HeightReport {
    /// Heights analyzed.
    pub records: usize,
    /// "All m" row then one row per height category.
    pub stats: Vec<CategoryStats>,
    /// Statistics table path.
    pub stats_path: PathBuf,
    /// Plot path.
    pub plot_path: PathBuf,
}

/// Summarize stack heights by fixed height category, write the table and plot.
pub fn analyze_heights(
    heights: &[f64],
    options: &HeightOptions,
    plotter: &dyn HeightPlotter,
) -> Result<HeightReport> {
    // Same rule as `Record::new`: a stack height is finite and positive.
    let total = heights.len();
    let heights: Vec<f64> = heights.iter().copied().filter(|&h| h.is_finite() && h > 0.0).collect();
    if heights.len() < total {
        tracing::warn!(dropped = total - heights.len(), "ignoring non-finite or non-positive stack heights");
    }
    if heights.is_empty() {
        return Err(Error::Validation("no stack heights to analyze".to_string()));
    }

    let scheme = BinScheme::custom(HEIGHT_CATEGORIES.to_vec())?;
    let bins = scheme.bins("m");
    let part = partition(heights.iter().map(|&h| (h, h)), &scheme);
    let stats = aggregate("All m", &heights, &part, &bins);

    std::fs::create_dir_all(&options.output_dir)?;
    let stats_path = options.output_dir.join(&options.stats_filename);
    let plot_path = options.output_dir.join(&options.plot_filename);

    write_stats_csv(&stats_path, &stats)?;
    let plot = HeightPlot {
        stack_heights: &heights,
        boundaries: scheme.boundaries(),
        title: &options.title,
    };
    plotter.plot_heights(&plot, &plot_path)?;

    tracing::info!(records = heights.len(), path = %stats_path.display(), "height analysis complete");

    Ok(HeightReport { records: heights.len(), stats, stats_path, plot_path })
}
