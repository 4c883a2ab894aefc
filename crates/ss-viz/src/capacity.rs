//! Stack height vs design capacity artifact.
//!
//! Scatter points plus one box-plot summary per capacity bin. Bin
//! membership uses the same `[lower, upper)` rule as the statistics table.

use serde::{Deserialize, Serialize};
use ss_core::{CapacityPlot, Error, Result};
use ss_stats::{BinScheme, partition};

use crate::{ArtifactMeta, BoxStats};

/// Plot-ready capacity data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapacityArtifact {
    /// Schema identifier.
    pub schema_version: String,
    /// Provenance.
    pub meta: ArtifactMeta,
    /// Capacity unit token.
    pub unit: String,
    /// Bin boundaries; the last bin is open above the final value.
    pub boundaries: Vec<f64>,
    /// Scatter x values (design capacity).
    pub capacity: Vec<f64>,
    /// Scatter y values (stack height, m).
    pub stack_height: Vec<f64>,
    /// One entry per bin, ascending.
    pub bins: Vec<CapacityBinArtifact>,
}

/// One capacity bin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapacityBinArtifact {
    /// Bin label, e.g. `"50-100 MW"`.
    pub label: String,
    /// Inclusive lower edge.
    pub lower: f64,
    /// Exclusive upper edge; `None` for the open last bin.
    pub upper: Option<f64>,
    /// Number of points in the bin.
    pub count: usize,
    /// Stack-height box summary; `None` for an empty bin.
    #[serde(rename = "box")]
    pub box_stats: Option<BoxStats>,
}

/// Build the artifact from a plot request.
pub fn capacity_artifact(plot: &CapacityPlot<'_>) -> Result<CapacityArtifact> {
    if plot.capacities.len() != plot.stack_heights.len() {
        return Err(Error::Validation(format!(
            "capacity/stack height length mismatch: {} vs {}",
            plot.capacities.len(),
            plot.stack_heights.len()
        )));
    }
    let scheme = BinScheme::custom(plot.boundaries.to_vec())?;
    let part = partition(
        plot.capacities.iter().copied().zip(plot.stack_heights.iter().copied()),
        &scheme,
    );

    let bins = scheme
        .bins(plot.unit)
        .into_iter()
        .enumerate()
        .map(|(i, bin)| {
            let values = part.bin_values(i);
            CapacityBinArtifact {
                label: bin.label,
                lower: bin.lower,
                upper: bin.upper,
                count: values.len(),
                box_stats: BoxStats::from_values(values),
            }
        })
        .collect();

    Ok(CapacityArtifact {
        schema_version: "stackstat_capacity_v0".to_string(),
        meta: ArtifactMeta::new(plot.title),
        unit: plot.unit.to_string(),
        boundaries: plot.boundaries.to_vec(),
        capacity: plot.capacities.to_vec(),
        stack_height: plot.stack_heights.to_vec(),
        bins,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request<'a>(caps: &'a [f64], heights: &'a [f64], bounds: &'a [f64]) -> CapacityPlot<'a> {
        CapacityPlot { capacities: caps, stack_heights: heights, boundaries: bounds, unit: "MW", title: "electricity" }
    }

    #[test]
    fn bins_follow_boundaries() {
        let caps = [10.0, 30.0, 60.0, 90.0, 150.0];
        let heights = [20.0, 25.0, 40.0, 45.0, 80.0];
        let a = capacity_artifact(&request(&caps, &heights, &[0.0, 25.0, 50.0, 75.0, 100.0])).unwrap();

        assert_eq!(a.schema_version, "stackstat_capacity_v0");
        assert_eq!(a.meta.title, "electricity");
        let labels: Vec<&str> = a.bins.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["0-25 MW", "25-50 MW", "50-75 MW", "75-100 MW", ">100 MW"]);
        let counts: Vec<usize> = a.bins.iter().map(|b| b.count).collect();
        assert_eq!(counts, vec![1, 1, 1, 1, 1]);
        assert_eq!(a.bins[4].upper, None);
        assert_eq!(a.bins[4].box_stats.as_ref().map(|b| b.median), Some(80.0));
    }

    #[test]
    fn empty_bin_has_no_box() {
        let a = capacity_artifact(&request(&[10.0], &[5.0], &[0.0, 50.0, 100.0])).unwrap();
        assert!(a.bins[1].box_stats.is_none());
        assert_eq!(a.bins[1].count, 0);
    }

    #[test]
    fn misaligned_input_is_rejected() {
        let err = capacity_artifact(&request(&[1.0, 2.0], &[1.0], &[0.0, 10.0])).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn json_shape_uses_box_key() {
        let a = capacity_artifact(&request(&[10.0], &[5.0], &[0.0, 50.0])).unwrap();
        let v = serde_json::to_value(&a).unwrap();
        assert!(v["bins"][0]["box"].is_object());
        assert!(v["bins"][1]["box"].is_null());
    }
}
