//! # ss-ingest
//!
//! Ingestion for stackstat: emissions inventory CSVs and the SCC catalog.
//!
//! Supports:
//! - recursive discovery of inventory files
//! - inventory CSVs with leading `#` comment lines
//! - SCC catalog keyword filtering by level
//! - pollutant / SCC filtering into a `CapacityTable`

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod discover;
pub mod inventory;
pub mod scc;

pub use discover::discover_csv_files;
pub use inventory::{
    EmissionRow, EmissionsFile, Inventory, PollutantSelection, filter_pollutant,
    read_capacity_table, read_emissions_csv, read_inventory, unit_counts,
};
pub use scc::{SccCatalog, SccEntry, filter_scc, read_scc_catalog};

/// Canonical form of an SCC code: trimmed, integral floats without `.0`.
pub fn normalize_scc(raw: &str) -> Option<String> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(v) = s.parse::<f64>() {
        if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e18 {
            return Some(format!("{}", v as i64));
        }
    }
    Some(s.to_string())
}
