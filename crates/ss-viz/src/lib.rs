//! # ss-viz
//!
//! Visualization data artifacts for stackstat.
//!
//! This crate is intentionally dependency-light and focuses on emitting
//! plot-friendly JSON structures (arrays instead of nested objects). The
//! renderer consumes these artifacts; they can also be written to disk and
//! re-rendered later.

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Box-plot summaries shared by the artifacts.
pub mod boxplot;

/// Stack height vs design capacity artifact.
pub mod capacity;

/// Stack-height distribution artifact.
pub mod heights;

pub use boxplot::BoxStats;
pub use capacity::{CapacityArtifact, CapacityBinArtifact, capacity_artifact};
pub use heights::{HeightArtifact, HistogramArtifact, height_artifact};

use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Provenance block carried by every artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactMeta {
    /// Producing tool name.
    pub tool: String,
    /// Producing tool version.
    pub tool_version: String,
    /// Creation time, milliseconds since the Unix epoch.
    pub created_unix_ms: u128,
    /// Plot title (analysis category).
    pub title: String,
}

impl ArtifactMeta {
    pub(crate) fn new(title: &str) -> Self {
        // A clock before 1970 only loses the timestamp, not the artifact.
        let created_unix_ms =
            SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_millis()).unwrap_or(0);
        Self {
            tool: "stackstat".to_string(),
            tool_version: ss_core::VERSION.to_string(),
            created_unix_ms,
            title: title.to_string(),
        }
    }
}
