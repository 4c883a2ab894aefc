use serde::{Deserialize, Serialize};
use ss_stats::quantile_linear_sorted;

/// Tukey box-plot summary: quartiles, 1.5 IQR whiskers and outliers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxStats {
    /// Number of values.
    pub n: usize,
    /// Lowest value inside the lower fence.
    pub whisker_lo: f64,
    /// 25th percentile.
    pub q1: f64,
    /// Median.
    pub median: f64,
    /// 75th percentile.
    pub q3: f64,
    /// Highest value inside the upper fence.
    pub whisker_hi: f64,
    /// Values outside the fences, ascending.
    pub outliers: Vec<f64>,
}

impl BoxStats {
    /// Summarize `values`. `None` when there is nothing finite to summarize.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        if sorted.is_empty() {
            return None;
        }
        sorted.sort_by(f64::total_cmp);

        let q1 = quantile_linear_sorted(&sorted, 0.25);
        let median = quantile_linear_sorted(&sorted, 0.5);
        let q3 = quantile_linear_sorted(&sorted, 0.75);
        let iqr = q3 - q1;
        let lo_fence = q1 - 1.5 * iqr;
        let hi_fence = q3 + 1.5 * iqr;

        let inside = || sorted.iter().copied().filter(|&v| v >= lo_fence && v <= hi_fence);
        let whisker_lo = inside().next().unwrap_or(q1);
        let whisker_hi = inside().last().unwrap_or(q3);
        let outliers =
            sorted.iter().copied().filter(|&v| v < lo_fence || v > hi_fence).collect();

        Some(Self { n: sorted.len(), whisker_lo, q1, median, q3, whisker_hi, outliers })
    }
}
