//! # ss-core
//!
//! Core types for stackstat.
//!
//! This crate holds the pieces every other crate agrees on:
//! - the error taxonomy (`Error`, `Result`)
//! - the validated data model (`Record`, `CapacityTable`)
//! - the plotting seam (`CapacityPlotter`, `HeightPlotter`)
//!
//! Nothing here performs I/O beyond what the error conversions need.

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Error types.
pub mod error;
/// Rendering collaborator traits.
pub mod traits;
/// Record and table types.
pub mod types;

pub use error::{Error, Result};
pub use traits::{CapacityPlot, CapacityPlotter, HeightPlot, HeightPlotter};
pub use types::{CapacityTable, Record};

/// Crate version, shared by artifacts and the CLI.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
