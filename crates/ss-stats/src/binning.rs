//! Bin schemes: preset selection by observed range, custom boundaries, and
//! value-to-bin lookup.
//!
//! A scheme is a strictly increasing boundary list starting at 0. With `n`
//! boundaries it has `n` bins: `n - 1` half-open intervals `[b_i, b_{i+1})`
//! plus the terminal interval `[b_{n-1}, +inf)`.

use serde::{Deserialize, Serialize};
use ss_core::{Error, Result};

const SMALL: &[f64] = &[0.0, 25.0, 50.0, 75.0, 100.0];
const MEDIUM: &[f64] = &[0.0, 50.0, 100.0, 200.0, 300.0, 500.0];
const LARGE: &[f64] = &[0.0, 100.0, 200.0, 400.0, 600.0, 800.0, 1000.0];
const VERY_LARGE: &[f64] = &[0.0, 200.0, 500.0, 1000.0, 2000.0, 5000.0];

/// Scale tag of a scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scale {
    /// max <= 100
    Small,
    /// 100 < max <= 500
    Medium,
    /// 500 < max <= 1000
    Large,
    /// max > 1000
    VeryLarge,
    /// Caller-supplied boundaries.
    Custom,
}

impl Scale {
    /// Preset for an observed maximum.
    pub fn for_max(max_value: f64) -> Self {
        if max_value <= 100.0 {
            Scale::Small
        } else if max_value <= 500.0 {
            Scale::Medium
        } else if max_value <= 1000.0 {
            Scale::Large
        } else {
            Scale::VeryLarge
        }
    }

    /// Snake-case name, as serialized.
    pub fn as_str(&self) -> &'static str {
        match self {
            Scale::Small => "small",
            Scale::Medium => "medium",
            Scale::Large => "large",
            Scale::VeryLarge => "very_large",
            Scale::Custom => "custom",
        }
    }
}

/// One labelled interval of a scheme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bin {
    /// Human-readable label, e.g. `"100-200 MW"` or `">500 MW"`.
    pub label: String,
    /// Inclusive lower bound.
    pub lower: f64,
    /// Exclusive upper bound; `None` for the terminal bin.
    pub upper: Option<f64>,
}

impl Bin {
    /// Half-open containment test.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower && self.upper.is_none_or(|hi| value < hi)
    }
}

/// Ordered bin boundaries with their scale tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinScheme {
    scale: Scale,
    boundaries: Vec<f64>,
}

impl BinScheme {
    /// Preset boundaries for a scale. `Scale::Custom` has no preset.
    pub fn preset(scale: Scale) -> Option<Self> {
        let boundaries = match scale {
            Scale::Small => SMALL,
            Scale::Medium => MEDIUM,
            Scale::Large => LARGE,
            Scale::VeryLarge => VERY_LARGE,
            Scale::Custom => return None,
        };
        Some(Self { scale, boundaries: boundaries.to_vec() })
    }

    /// Pick the preset from the maximum of the binnable values.
    ///
    /// Negative and non-finite values are ignored here (the partitioner
    /// reports them). With nothing left, or a maximum of 0, the small preset
    /// is used.
    pub fn select(values: &[f64]) -> Self {
        let max_value = values
            .iter()
            .copied()
            .filter(|v| v.is_finite() && *v >= 0.0)
            .fold(0.0_f64, f64::max);
        let scale = Scale::for_max(max_value);
        tracing::debug!(max_value, scale = scale.as_str(), "selected capacity bin preset");
        Self::preset(scale).unwrap_or_else(|| Self { scale: Scale::Small, boundaries: SMALL.to_vec() })
    }

    /// Caller-supplied boundaries: finite, starting at 0, strictly increasing,
    /// at least two entries.
    pub fn custom(boundaries: Vec<f64>) -> Result<Self> {
        if boundaries.len() < 2 {
            return Err(Error::Validation(format!(
                "bin boundaries need at least 2 entries, got {}",
                boundaries.len()
            )));
        }
        if boundaries.iter().any(|b| !b.is_finite()) {
            return Err(Error::Validation("bin boundaries must be finite".to_string()));
        }
        if boundaries[0] != 0.0 {
            return Err(Error::Validation(format!(
                "first bin boundary must be 0, got {}",
                boundaries[0]
            )));
        }
        if let Some(w) = boundaries.windows(2).find(|w| w[1] <= w[0]) {
            return Err(Error::Validation(format!(
                "bin boundaries must be strictly increasing ({} then {})",
                w[0], w[1]
            )));
        }
        Ok(Self { scale: Scale::Custom, boundaries })
    }

    /// Scale tag.
    pub fn scale(&self) -> Scale {
        self.scale
    }

    /// Explicit boundaries; the terminal bin starts at the last one.
    pub fn boundaries(&self) -> &[f64] {
        &self.boundaries
    }

    /// Lower bound of the open-ended terminal bin.
    pub fn last_boundary(&self) -> f64 {
        self.boundaries[self.boundaries.len() - 1]
    }

    /// Number of bins, terminal included.
    pub fn bin_count(&self) -> usize {
        self.boundaries.len()
    }

    /// Labelled bins in ascending order.
    pub fn bins(&self, unit: &str) -> Vec<Bin> {
        let mut out: Vec<Bin> = self
            .boundaries
            .windows(2)
            .map(|w| Bin {
                label: with_unit(format!("{}-{}", w[0], w[1]), unit),
                lower: w[0],
                upper: Some(w[1]),
            })
            .collect();
        let last = self.last_boundary();
        out.push(Bin { label: with_unit(format!(">{last}"), unit), lower: last, upper: None });
        out
    }

    /// Index of the bin containing `value` (lower-inclusive, upper-exclusive).
    pub fn locate(&self, value: f64) -> Result<usize> {
        if !value.is_finite() || value < 0.0 {
            return Err(Error::InvalidCapacity { value });
        }
        // boundaries[0] == 0 <= value, so at least one boundary is <= value.
        Ok(self.boundaries.partition_point(|&b| b <= value) - 1)
    }
}

fn with_unit(range: String, unit: &str) -> String {
    if unit.is_empty() { range } else { format!("{range} {unit}") }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preset_thresholds() {
        assert_eq!(BinScheme::select(&[0.0, 100.0]).scale(), Scale::Small);
        assert_eq!(BinScheme::select(&[100.5]).scale(), Scale::Medium);
        assert_eq!(BinScheme::select(&[500.0]).scale(), Scale::Medium);
        assert_eq!(BinScheme::select(&[500.01]).scale(), Scale::Large);
        assert_eq!(BinScheme::select(&[1000.0]).scale(), Scale::Large);
        assert_eq!(BinScheme::select(&[1000.1]).scale(), Scale::VeryLarge);
    }

    #[test]
    fn degenerate_inputs_pick_small() {
        assert_eq!(BinScheme::select(&[]).scale(), Scale::Small);
        assert_eq!(BinScheme::select(&[0.0, 0.0]).scale(), Scale::Small);
        assert_eq!(BinScheme::select(&[7.0, 7.0, 7.0]).scale(), Scale::Small);
        assert_eq!(BinScheme::select(&[-5.0, f64::NAN]).scale(), Scale::Small);
    }

    #[test]
    fn invalid_values_do_not_drive_selection() {
        let s = BinScheme::select(&[10.0, f64::INFINITY, -2000.0]);
        assert_eq!(s.scale(), Scale::Small);
    }

    #[test]
    fn presets_are_strictly_increasing_from_zero() {
        for scale in [Scale::Small, Scale::Medium, Scale::Large, Scale::VeryLarge] {
            let s = BinScheme::preset(scale).unwrap();
            assert_eq!(s.boundaries()[0], 0.0);
            assert!(s.boundaries().windows(2).all(|w| w[0] < w[1]), "{scale:?}");
            let bins = s.bins("MW");
            assert_eq!(bins.len(), s.bin_count());
            let terminal = bins.last().unwrap();
            assert_eq!(terminal.upper, None);
            assert_eq!(terminal.lower, s.last_boundary());
            // contiguous
            for w in bins.windows(2) {
                assert_eq!(w[0].upper, Some(w[1].lower));
            }
        }
        assert!(BinScheme::preset(Scale::Custom).is_none());
    }

    #[test]
    fn medium_labels() {
        let s = BinScheme::preset(Scale::Medium).unwrap();
        let labels: Vec<String> = s.bins("MW").into_iter().map(|b| b.label).collect();
        assert_eq!(
            labels,
            ["0-50 MW", "50-100 MW", "100-200 MW", "200-300 MW", "300-500 MW", ">500 MW"]
        );
    }

    #[test]
    fn labels_without_unit_and_fractional_bounds() {
        let s = BinScheme::custom(vec![0.0, 2.5, 10.0]).unwrap();
        let labels: Vec<String> = s.bins("").into_iter().map(|b| b.label).collect();
        assert_eq!(labels, ["0-2.5", "2.5-10", ">10"]);
    }

    #[test]
    fn locate_is_lower_inclusive() {
        let s = BinScheme::preset(Scale::Medium).unwrap();
        assert_eq!(s.locate(0.0).unwrap(), 0);
        assert_eq!(s.locate(49.999).unwrap(), 0);
        assert_eq!(s.locate(50.0).unwrap(), 1);
        assert_eq!(s.locate(100.0).unwrap(), 2);
        assert_eq!(s.locate(499.0).unwrap(), 4);
        assert_eq!(s.locate(500.0).unwrap(), 5);
        assert_eq!(s.locate(1.0e9).unwrap(), 5);
    }

    #[test]
    fn locate_rejects_negative_and_non_finite() {
        let s = BinScheme::preset(Scale::Small).unwrap();
        for v in [-0.1, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            match s.locate(v) {
                Err(Error::InvalidCapacity { .. }) => {}
                other => panic!("expected InvalidCapacity for {v}, got {other:?}"),
            }
        }
    }

    #[test]
    fn locate_agrees_with_bin_contains() {
        let s = BinScheme::preset(Scale::Large).unwrap();
        let bins = s.bins("MW");
        for v in [0.0, 99.0, 100.0, 250.0, 600.0, 999.9, 1000.0, 12345.0] {
            let idx = s.locate(v).unwrap();
            let hits: Vec<usize> =
                bins.iter().enumerate().filter(|(_, b)| b.contains(v)).map(|(i, _)| i).collect();
            assert_eq!(hits, vec![idx], "value {v}");
        }
    }

    #[test]
    fn custom_validation() {
        assert!(BinScheme::custom(vec![0.0]).is_err());
        assert!(BinScheme::custom(vec![1.0, 2.0]).is_err());
        assert!(BinScheme::custom(vec![0.0, 5.0, 5.0]).is_err());
        assert!(BinScheme::custom(vec![0.0, f64::INFINITY]).is_err());
        let s = BinScheme::custom(vec![0.0, 10.0, 100.0]).unwrap();
        assert_eq!(s.scale(), Scale::Custom);
        assert_eq!(s.bin_count(), 3);
    }

    #[test]
    fn scale_serializes_snake_case() {
        assert_eq!(Scale::VeryLarge.as_str(), "very_large");
        let s = BinScheme::preset(Scale::VeryLarge).unwrap();
        let json = serde_json::to_string(&s).unwrap();
        assert!(json.contains("\"very_large\""));
    }
}
