//! Capacity-unit filter.

use ss_core::{CapacityTable, Error, Record, Result};

/// Keep the rows whose unit equals `target_unit` (case-sensitive).
///
/// Rows without a stack height or a design capacity are dropped first, as
/// are rows whose stack height is not a positive finite number. An empty
/// result is an error: there is nothing to bin.
pub fn filter_capacity(table: &CapacityTable, target_unit: &str) -> Result<Vec<Record>> {
    let mut missing = 0usize;
    let mut bad_height = 0usize;
    let mut records = Vec::new();

    for (stack_height, capacity, unit) in table.rows() {
        let (Some(stack_height), Some(capacity)) = (stack_height, capacity) else {
            missing += 1;
            continue;
        };
        if unit != Some(target_unit) {
            continue;
        }
        match Record::new(stack_height, capacity, target_unit) {
            Ok(r) => records.push(r),
            Err(_) => bad_height += 1,
        }
    }

    tracing::info!(
        rows = table.len(),
        missing,
        bad_height,
        kept = records.len(),
        unit = target_unit,
        "capacity filter"
    );

    if records.is_empty() {
        return Err(Error::EmptyResult { unit: target_unit.to_string() });
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> CapacityTable {
        let mut t = CapacityTable::default();
        t.push(Some(30.0), Some(10.0), Some("MW".into()));
        t.push(Some(45.0), Some(150.0), Some("MW".into()));
        t.push(None, Some(60.0), Some("MW".into()));
        t.push(Some(12.0), None, Some("MW".into()));
        t.push(Some(12.0), Some(3.0), Some("mw".into()));
        t.push(Some(18.0), Some(4.0), Some("KW".into()));
        t.push(Some(0.0), Some(4.0), Some("MW".into()));
        t.push(Some(22.0), Some(7.0), None);
        t
    }

    #[test]
    fn keeps_exact_unit_matches_only() {
        let recs = filter_capacity(&table(), "MW").unwrap();
        let caps: Vec<f64> = recs.iter().map(|r| r.design_capacity()).collect();
        assert_eq!(caps, vec![10.0, 150.0]);
        assert!(recs.iter().all(|r| r.design_capacity_unit() == "MW"));
    }

    #[test]
    fn case_sensitive() {
        let recs = filter_capacity(&table(), "mw").unwrap();
        assert_eq!(recs.len(), 1);
    }

    #[test]
    fn empty_result_is_an_error() {
        match filter_capacity(&table(), "HP") {
            Err(Error::EmptyResult { unit }) => assert_eq!(unit, "HP"),
            other => panic!("expected EmptyResult, got {other:?}"),
        }
        match filter_capacity(&CapacityTable::default(), "MW") {
            Err(Error::EmptyResult { .. }) => {}
            other => panic!("expected EmptyResult, got {other:?}"),
        }
    }
}
