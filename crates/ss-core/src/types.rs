//! Common data types for stackstat

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// One emissions source measurement that survived ingestion.
///
/// `stack_height` is validated at construction (finite, strictly positive).
/// `design_capacity` is carried as-is: whether it can be binned is decided by
/// the partitioner, which reports unusable values instead of dropping them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    stack_height: f64,
    design_capacity: f64,
    design_capacity_unit: String,
}

impl Record {
    /// Build a record, rejecting non-finite or non-positive stack heights.
    pub fn new(
        stack_height: f64,
        design_capacity: f64,
        design_capacity_unit: impl Into<String>,
    ) -> Result<Self> {
        if !(stack_height.is_finite() && stack_height > 0.0) {
            return Err(Error::Validation(format!(
                "stack_height must be finite and > 0, got {stack_height}"
            )));
        }
        Ok(Self { stack_height, design_capacity, design_capacity_unit: design_capacity_unit.into() })
    }

    /// Stack height in meters.
    pub fn stack_height(&self) -> f64 {
        self.stack_height
    }

    /// Rated design capacity, in `design_capacity_unit`.
    pub fn design_capacity(&self) -> f64 {
        self.design_capacity
    }

    /// Unit token of the design capacity (e.g. `"MW"`).
    pub fn design_capacity_unit(&self) -> &str {
        &self.design_capacity_unit
    }
}

/// Column-oriented view of the ingested inventory: three row-aligned columns.
///
/// Missing cells are `None`. The only construction-time check is that the
/// columns have the same length; row-level cleaning happens in the filter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CapacityTable {
    stack_height: Vec<Option<f64>>,
    design_capacity: Vec<Option<f64>>,
    design_capacity_unit: Vec<Option<String>>,
}

impl CapacityTable {
    /// Create a table from aligned columns.
    pub fn new(
        stack_height: Vec<Option<f64>>,
        design_capacity: Vec<Option<f64>>,
        design_capacity_unit: Vec<Option<String>>,
    ) -> Result<Self> {
        let n = stack_height.len();
        if design_capacity.len() != n || design_capacity_unit.len() != n {
            return Err(Error::Validation(format!(
                "column length mismatch: stack_height={}, design_capacity={}, design_capacity_unit={}",
                n,
                design_capacity.len(),
                design_capacity_unit.len()
            )));
        }
        Ok(Self { stack_height, design_capacity, design_capacity_unit })
    }

    /// Append one row. Keeps the columns aligned by construction.
    pub fn push(
        &mut self,
        stack_height: Option<f64>,
        design_capacity: Option<f64>,
        design_capacity_unit: Option<String>,
    ) {
        self.stack_height.push(stack_height);
        self.design_capacity.push(design_capacity);
        self.design_capacity_unit.push(design_capacity_unit);
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.stack_height.len()
    }

    /// `true` when the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.stack_height.is_empty()
    }

    /// Iterate rows as `(stack_height, design_capacity, design_capacity_unit)`.
    pub fn rows(&self) -> impl Iterator<Item = (Option<f64>, Option<f64>, Option<&str>)> + '_ {
        self.stack_height
            .iter()
            .zip(&self.design_capacity)
            .zip(&self.design_capacity_unit)
            .map(|((h, c), u)| (*h, *c, u.as_deref()))
    }

    /// Stack-height column.
    pub fn stack_heights(&self) -> &[Option<f64>] {
        &self.stack_height
    }

    /// Design-capacity unit column.
    pub fn units(&self) -> &[Option<String>] {
        &self.design_capacity_unit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_rejects_bad_stack_height() {
        assert!(Record::new(0.0, 10.0, "MW").is_err());
        assert!(Record::new(-3.0, 10.0, "MW").is_err());
        assert!(Record::new(f64::NAN, 10.0, "MW").is_err());
        let r = Record::new(12.5, 10.0, "MW").unwrap();
        assert_eq!(r.design_capacity_unit(), "MW");
    }

    #[test]
    fn table_requires_aligned_columns() {
        let err = CapacityTable::new(vec![Some(1.0)], vec![], vec![Some("MW".into())]).unwrap_err();
        assert!(err.to_string().contains("length mismatch"));

        let t = CapacityTable::new(vec![Some(1.0)], vec![None], vec![Some("MW".into())]).unwrap();
        assert_eq!(t.len(), 1);
        let row: Vec<_> = t.rows().collect();
        assert_eq!(row[0], (Some(1.0), None, Some("MW")));
    }

    #[test]
    fn push_keeps_alignment() {
        let mut t = CapacityTable::default();
        assert!(t.is_empty());
        t.push(Some(30.0), Some(150.0), Some("MW".into()));
        t.push(None, Some(5.0), None);
        assert_eq!(t.len(), 2);
        assert_eq!(t.stack_heights(), &[Some(30.0), None]);
        assert_eq!(t.units()[1], None);
    }
}
