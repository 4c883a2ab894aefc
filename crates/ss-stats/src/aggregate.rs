//! Statistics per bin plus the synthetic "All" row.

use crate::binning::Bin;
use crate::describe::{CategoryStats, describe};
use crate::partition::Partition;

/// Build the statistics table.
///
/// Row 0 summarizes `all_values` (the whole filtered set, before
/// partitioning, so excluded rows still count there). The remaining rows
/// follow `bins` in ascending order; empty bins are kept with count 0.
pub fn aggregate(
    all_label: &str,
    all_values: &[f64],
    partition: &Partition,
    bins: &[Bin],
) -> Vec<CategoryStats> {
    let mut out = Vec::with_capacity(bins.len() + 1);
    out.push(describe(all_label, all_values));
    for (i, bin) in bins.iter().enumerate() {
        out.push(describe(bin.label.as_str(), partition.bin_values(i)));
    }
    out
}
