//! Assignment of `(key, value)` rows to the bins of a scheme.
//!
//! The key decides the bin (design capacity, or the height itself for the
//! height categories); the value is what gets summarized (stack height).

use serde::Serialize;

use crate::binning::{Bin, BinScheme};

/// A row that could not be binned.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Excluded {
    /// Row index in the partitioned input.
    pub row: usize,
    /// The offending key.
    pub value: f64,
    /// Rendered `InvalidCapacity` error.
    pub reason: String,
}

/// Result of partitioning: per-bin values, per-row assignment, exclusions.
#[derive(Debug, Clone)]
pub struct Partition {
    values: Vec<Vec<f64>>,
    assignments: Vec<Option<usize>>,
    excluded: Vec<Excluded>,
}

impl Partition {
    /// Values that fell into bin `idx`, in input order.
    pub fn bin_values(&self, idx: usize) -> &[f64] {
        self.values.get(idx).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Count of values per bin.
    pub fn counts(&self) -> Vec<usize> {
        self.values.iter().map(Vec::len).collect()
    }

    /// Bin of each input row; `None` for excluded rows.
    pub fn assignments(&self) -> &[Option<usize>] {
        &self.assignments
    }

    /// Label of each input row given the scheme's bins.
    pub fn labels<'b>(&self, bins: &'b [Bin]) -> Vec<Option<&'b str>> {
        self.assignments.iter().map(|a| a.and_then(|i| bins.get(i)).map(|b| b.label.as_str())).collect()
    }

    /// Rows rejected because their key was negative or non-finite.
    pub fn excluded(&self) -> &[Excluded] {
        &self.excluded
    }

    /// Number of rows that received a bin.
    pub fn assigned(&self) -> usize {
        self.values.iter().map(Vec::len).sum()
    }

    /// Number of bins.
    pub fn bin_count(&self) -> usize {
        self.values.len()
    }
}

/// Place every `(key, value)` row into exactly one bin of `scheme`.
pub fn partition<I>(rows: I, scheme: &BinScheme) -> Partition
where
    I: IntoIterator<Item = (f64, f64)>,
{
    let mut values = vec![Vec::new(); scheme.bin_count()];
    let mut assignments = Vec::new();
    let mut excluded = Vec::new();

    for (row, (key, value)) in rows.into_iter().enumerate() {
        match scheme.locate(key) {
            Ok(idx) => {
                values[idx].push(value);
                assignments.push(Some(idx));
            }
            Err(e) => {
                excluded.push(Excluded { row, value: key, reason: e.to_string() });
                assignments.push(None);
            }
        }
    }

    if !excluded.is_empty() {
        tracing::warn!(excluded = excluded.len(), "rows with unusable bin key were excluded");
    }

    Partition { values, assignments, excluded }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binning::Scale;

    fn medium() -> BinScheme {
        BinScheme::preset(Scale::Medium).unwrap()
    }

    #[test]
    fn scenario_medium_population() {
        let caps = [10.0, 30.0, 60.0, 90.0, 150.0];
        let heights = [1.0, 2.0, 3.0, 4.0, 5.0];
        let p = partition(caps.iter().copied().zip(heights.iter().copied()), &medium());
        assert_eq!(p.counts(), vec![2, 2, 1, 0, 0, 0]);
        assert_eq!(p.bin_values(0), &[1.0, 2.0]);
        assert_eq!(p.bin_values(1), &[3.0, 4.0]);
        assert_eq!(p.bin_values(2), &[5.0]);
        assert!(p.excluded().is_empty());
    }

    #[test]
    fn boundary_value_goes_to_higher_bin() {
        let scheme = medium();
        let p = partition([(100.0, 9.0)], &scheme);
        let bins = scheme.bins("MW");
        assert_eq!(p.labels(&bins), vec![Some("100-200 MW")]);
    }

    #[test]
    fn every_valid_row_gets_exactly_one_bin() {
        let keys = [0.0, 0.5, 49.9, 50.0, 499.9, 500.0, 750.0, 3.0e6];
        let p = partition(keys.iter().map(|&k| (k, 1.0)), &medium());
        assert_eq!(p.assigned(), keys.len());
        assert!(p.assignments().iter().all(Option::is_some));
    }

    #[test]
    fn invalid_keys_are_reported_not_dropped() {
        let rows = [(10.0, 1.0), (-1.0, 2.0), (f64::NAN, 3.0), (60.0, 4.0)];
        let p = partition(rows, &medium());
        assert_eq!(p.assigned(), 2);
        let excluded: Vec<usize> = p.excluded().iter().map(|e| e.row).collect();
        assert_eq!(excluded, vec![1, 2]);
        assert_eq!(p.excluded()[0].value, -1.0);
        assert!(p.excluded()[0].reason.contains("invalid design capacity"));
        assert_eq!(p.assignments()[1], None);
    }

    #[test]
    fn out_of_range_bin_index_is_empty() {
        let p = partition(std::iter::empty(), &medium());
        assert_eq!(p.bin_count(), 6);
        assert!(p.bin_values(99).is_empty());
    }
}
