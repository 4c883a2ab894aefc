//! Plotter wrapper that also saves the plot artifact as JSON next to the
//! image, so `stackstat render` can restyle it later.

use std::path::Path;

use ss_core::{CapacityPlot, CapacityPlotter, HeightPlot, HeightPlotter, Result};

pub struct ArtifactTee<P> {
    inner: P,
    enabled: bool,
}

impl<P> ArtifactTee<P> {
    pub fn new(inner: P, enabled: bool) -> Self {
        Self { inner, enabled }
    }
}

fn write_artifact<T: serde::Serialize>(artifact: &T, plot_path: &Path) -> Result<()> {
    let path = plot_path.with_extension("json");
    std::fs::write(&path, serde_json::to_string_pretty(artifact)?)?;
    tracing::info!(path = %path.display(), "artifact written");
    Ok(())
}

impl<P: CapacityPlotter> CapacityPlotter for ArtifactTee<P> {
    fn plot_capacity(&self, plot: &CapacityPlot<'_>, path: &Path) -> Result<()> {
        if self.enabled {
            write_artifact(&ss_viz::capacity_artifact(plot)?, path)?;
        }
        self.inner.plot_capacity(plot, path)
    }
}

impl<P: HeightPlotter> HeightPlotter for ArtifactTee<P> {
    fn plot_heights(&self, plot: &HeightPlot<'_>, path: &Path) -> Result<()> {
        if self.enabled {
            write_artifact(&ss_viz::height_artifact(plot)?, path)?;
        }
        self.inner.plot_heights(plot, path)
    }
}
