//! # ss-stats
//!
//! Capacity binning and descriptive statistics for stackstat.
//!
//! Pipeline, leaf first:
//! - capacity filter (`filter_capacity`)
//! - range binner (`BinScheme::select`)
//! - bin partitioner (`partition`)
//! - statistics aggregator (`aggregate`, `describe`)
//! - report emitter (`emit_report`)
//!
//! `analyze_capacity` and `analyze_heights` run the whole chain for one
//! invocation. Every stage is a synchronous pure computation over data
//! already in memory; only the emitter touches the filesystem.

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Per-category aggregation.
pub mod aggregate;
/// Bin schemes and presets.
pub mod binning;
/// Top-level capacity analysis.
pub mod capacity;
/// Descriptive statistics (percentiles, sample std).
pub mod describe;
/// Capacity-unit filter.
pub mod filter;
/// Fixed-category stack-height analysis.
pub mod heights;
/// Assignment of values to bins.
pub mod partition;
/// Statistics table I/O and report emission.
pub mod report;

pub use aggregate::aggregate;
pub use binning::{Bin, BinScheme, Scale};
pub use capacity::{CapacityOptions, CapacityReport, analyze_capacity};
pub use describe::{CategoryStats, describe, quantile_linear_sorted};
pub use filter::filter_capacity;
pub use heights::{HEIGHT_CATEGORIES, HeightOptions, HeightReport, analyze_heights};
pub use partition::{Excluded, Partition, partition};
pub use report::{STATS_HEADER, emit_report, read_stats_csv, write_stats_csv};
