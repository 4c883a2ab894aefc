//! Stack-height distribution artifact: a fixed-width histogram of all
//! heights and box summaries per height category.

use serde::{Deserialize, Serialize};
use ss_core::{HeightPlot, Result};
use ss_stats::{BinScheme, partition};

use crate::{ArtifactMeta, BoxStats};

/// Nominal histogram bar width, meters.
pub const HISTOGRAM_BIN_WIDTH_M: f64 = 10.0;

/// Bars are widened (20, 50, 100 m, ...) until at most this many cover the data.
pub const MAX_HISTOGRAM_BARS: usize = 200;

/// Plot-ready height distribution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeightArtifact {
    /// Schema identifier.
    pub schema_version: String,
    /// Provenance.
    pub meta: ArtifactMeta,
    /// Category boundaries (last category open-ended).
    pub boundaries: Vec<f64>,
    /// Histogram of all finite heights.
    pub histogram: HistogramArtifact,
    /// Box summary over every height.
    pub all_box: Option<BoxStats>,
    /// Category labels, ascending.
    pub category_labels: Vec<String>,
    /// Box summary per category; `None` when the category is empty.
    pub category_boxes: Vec<Option<BoxStats>>,
}

/// Equal-width histogram.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistogramArtifact {
    /// Bar edges, `counts.len() + 1` values.
    pub edges: Vec<f64>,
    /// Count per bar.
    pub counts: Vec<u64>,
}

fn histogram(values: &[f64], width: f64) -> HistogramArtifact {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() {
        return HistogramArtifact { edges: vec![0.0, width], counts: vec![0] };
    }
    let lo = finite.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let bars = |w: f64| ((hi - (lo / w).floor() * w) / w).floor() + 1.0;

    let mut width = width;
    for factor in [2.0, 2.5, 2.0].into_iter().cycle() {
        if bars(width) <= MAX_HISTOGRAM_BARS as f64 || !width.is_finite() {
            break;
        }
        width *= factor;
    }
    let start = (lo / width).floor() * width;
    let n = (bars(width) as usize).clamp(1, MAX_HISTOGRAM_BARS);

    let edges: Vec<f64> = (0..=n).map(|i| start + i as f64 * width).collect();
    let mut counts = vec![0u64; n];
    for v in finite {
        let idx = (((v - start) / width).floor() as usize).min(n - 1);
        counts[idx] += 1;
    }
    HistogramArtifact { edges, counts }
}

/// Build the artifact from a plot request.
pub fn height_artifact(plot: &HeightPlot<'_>) -> Result<HeightArtifact> {
    let scheme = BinScheme::custom(plot.boundaries.to_vec())?;
    let part = partition(plot.stack_heights.iter().map(|&h| (h, h)), &scheme);
    let bins = scheme.bins("m");

    Ok(HeightArtifact {
        schema_version: "stackstat_heights_v0".to_string(),
        meta: ArtifactMeta::new(plot.title),
        boundaries: plot.boundaries.to_vec(),
        histogram: histogram(plot.stack_heights, HISTOGRAM_BIN_WIDTH_M),
        all_box: BoxStats::from_values(plot.stack_heights),
        category_labels: bins.into_iter().map(|b| b.label).collect(),
        category_boxes: (0..scheme.bin_count()).map(|i| BoxStats::from_values(part.bin_values(i))).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn histogram_uses_ten_meter_bars() {
        let h = histogram(&[3.0, 9.9, 10.0, 25.0], 10.0);
        assert_eq!(h.edges, vec![0.0, 10.0, 20.0, 30.0]);
        assert_eq!(h.counts, vec![2, 1, 1]);
    }

    #[test]
    fn far_outlier_widens_bars() {
        let h = histogram(&[12.0, 2.5e7], 10.0);
        assert!(h.counts.len() <= MAX_HISTOGRAM_BARS);
        assert_eq!(h.edges.len(), h.counts.len() + 1);
        assert_eq!(h.counts.iter().sum::<u64>(), 2);
        let width = h.edges[1] - h.edges[0];
        assert!(width >= 10.0);
        // Widths stay on the 1-2-5 ladder.
        let mantissa = width / 10f64.powf(width.log10().floor());
        assert!([1.0, 2.0, 5.0].iter().any(|m| (mantissa - m).abs() < 1e-9), "{width}");
        assert!(*h.edges.last().unwrap() > 2.5e7);
    }

    #[test]
    fn bar_count_is_bounded_for_absurd_heights() {
        let heights = [12.0, 1.0e13];
        let plot = HeightPlot { stack_heights: &heights, boundaries: &[0.0, 10.0, 100.0], title: "all" };
        let a = height_artifact(&plot).unwrap();
        assert!(a.histogram.counts.len() <= MAX_HISTOGRAM_BARS);
        assert_eq!(a.histogram.counts.iter().sum::<u64>(), 2);
    }

    #[test]
    fn histogram_of_nothing_is_one_empty_bar() {
        let h = histogram(&[], 10.0);
        assert_eq!(h.counts, vec![0]);
    }

    #[test]
    fn categories_are_lower_inclusive() {
        let heights = [5.0, 10.0, 50.0, 150.0, 300.0];
        let plot = HeightPlot { stack_heights: &heights, boundaries: &[0.0, 10.0, 100.0], title: "all" };
        let a = height_artifact(&plot).unwrap();
        assert_eq!(a.category_labels, vec!["0-10 m", "10-100 m", ">100 m"]);
        let ns: Vec<usize> = a.category_boxes.iter().map(|b| b.as_ref().map_or(0, |b| b.n)).collect();
        assert_eq!(ns, vec![1, 2, 2]);
        assert_eq!(a.histogram.counts.iter().sum::<u64>(), 5);
        assert_eq!(a.all_box.map(|b| b.n), Some(5));
    }
}
