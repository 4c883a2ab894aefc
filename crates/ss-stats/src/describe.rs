//! Descriptive statistics over one category of stack heights.

use serde::{Deserialize, Serialize};

/// Summary statistics of one category.
///
/// Every numeric field is `None` when the category is empty. `std` is also
/// `None` when fewer than two values are present: "not computable" is kept
/// distinct from "zero variance".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryStats {
    /// Category label, e.g. `"All MW"` or `"100-200 MW"`.
    pub category: String,
    /// Number of values.
    pub count: usize,
    /// Minimum.
    pub min: Option<f64>,
    /// 25th percentile (linear interpolation).
    #[serde(rename = "25th_percentile")]
    pub p25: Option<f64>,
    /// Median.
    pub median: Option<f64>,
    /// Arithmetic mean.
    pub mean: Option<f64>,
    /// 75th percentile (linear interpolation).
    #[serde(rename = "75th_percentile")]
    pub p75: Option<f64>,
    /// Maximum.
    pub max: Option<f64>,
    /// Sample standard deviation (denominator n-1).
    pub std: Option<f64>,
}

impl CategoryStats {
    /// Row for a category with no values.
    pub fn empty(category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            count: 0,
            min: None,
            p25: None,
            median: None,
            mean: None,
            p75: None,
            max: None,
            std: None,
        }
    }

    /// `true` when no value fell into this category.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// Quantile of pre-sorted data, `pos = q * (n - 1)` with linear interpolation.
///
/// Returns NaN for empty input.
pub fn quantile_linear_sorted(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }
    if sorted.len() == 1 {
        return sorted[0];
    }

    let q = q.clamp(0.0, 1.0);
    let pos = q * (sorted.len() - 1) as f64;
    let i = pos.floor() as usize;
    let j = pos.ceil() as usize;
    if i == j {
        return sorted[i];
    }
    let t = pos - i as f64;
    (1.0 - t) * sorted[i] + t * sorted[j]
}

/// Summarize `values` under `category`.
pub fn describe(category: impl Into<String>, values: &[f64]) -> CategoryStats {
    let category = category.into();
    if values.is_empty() {
        return CategoryStats::empty(category);
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let n = sorted.len();
    let mean = sorted.iter().sum::<f64>() / n as f64;
    let std = if n < 2 {
        None
    } else {
        let ss: f64 = sorted.iter().map(|x| (x - mean) * (x - mean)).sum();
        Some((ss / (n - 1) as f64).sqrt())
    };

    CategoryStats {
        category,
        count: n,
        min: Some(sorted[0]),
        p25: Some(quantile_linear_sorted(&sorted, 0.25)),
        median: Some(quantile_linear_sorted(&sorted, 0.5)),
        mean: Some(mean),
        p75: Some(quantile_linear_sorted(&sorted, 0.75)),
        max: Some(sorted[n - 1]),
        std,
    }
}
