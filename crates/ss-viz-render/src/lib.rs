//! # ss-viz-render
//!
//! Renders `ss-viz` artifacts to SVG (and PNG with the `png` feature).
//! [`SvgPlotter`] plugs the renderer into the statistics pipeline.

pub mod canvas;
pub mod color;
pub mod config;
pub mod header;
pub mod layout;
pub mod output;
pub mod plots;
pub mod style;
pub mod text;
pub mod theme;

use std::path::Path;

use config::VizConfig;
use ss_core::{CapacityPlot, CapacityPlotter, HeightPlot, HeightPlotter};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("unknown artifact kind: {0}")]
    UnknownKind(String),
    #[error("unsupported output format: {0}")]
    UnknownFormat(String),
    #[error("deserialization error: {0}")]
    Deserialize(#[from] serde_json::Error),
    #[error("config error: {0}")]
    Config(String),
    #[error("layout error: {0}")]
    Layout(String),
    #[error("artifact error: {0}")]
    Artifact(#[from] ss_core::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[cfg(feature = "png")]
    #[error("PNG encoding error: {0}")]
    Png(String),
}

pub type Result<T> = std::result::Result<T, RenderError>;

impl From<RenderError> for ss_core::Error {
    fn from(e: RenderError) -> Self {
        match e {
            RenderError::Artifact(inner) => inner,
            RenderError::Io(io) => ss_core::Error::Io(io),
            other => ss_core::Error::Render(other.to_string()),
        }
    }
}

/// Render an artifact JSON to SVG string.
pub fn render_svg(artifact_json: &str, kind: &str, config: &VizConfig) -> Result<String> {
    let svg = match kind {
        "capacity" => {
            let art: ss_viz::CapacityArtifact = serde_json::from_str(artifact_json)?;
            plots::capacity::render(&art, config)?
        }
        "heights" => {
            let art: ss_viz::HeightArtifact = serde_json::from_str(artifact_json)?;
            plots::heights::render(&art, config)?
        }
        other => return Err(RenderError::UnknownKind(other.to_string())),
    };
    Ok(svg)
}

/// Encode a rendered SVG in the requested format.
pub fn encode(svg: String, format: &str, config: &VizConfig) -> Result<Vec<u8>> {
    match format.to_ascii_lowercase().as_str() {
        "svg" => Ok(svg.into_bytes()),
        #[cfg(feature = "png")]
        "png" => output::png::svg_to_png(&svg, config.output.dpi),
        other => {
            let _ = config;
            Err(RenderError::UnknownFormat(other.to_string()))
        }
    }
}

/// Render an artifact JSON to bytes in the specified format.
pub fn render_to_bytes(artifact_json: &str, kind: &str, format: &str, config: &VizConfig) -> Result<Vec<u8>> {
    let svg = render_svg(artifact_json, kind, config)?;
    encode(svg, format, config)
}

/// Render an artifact JSON to a file (format inferred from extension).
pub fn render_to_file(artifact_json: &str, kind: &str, path: &Path, config: &VizConfig) -> Result<()> {
    let bytes = render_to_bytes(artifact_json, kind, &format_for(path, config), config)?;
    std::fs::write(path, bytes)?;
    Ok(())
}

fn format_for(path: &Path, config: &VizConfig) -> String {
    path.extension().and_then(|e| e.to_str()).map(str::to_string).unwrap_or_else(|| config.output.format.clone())
}

/// Pipeline plotter: builds the artifact, renders it and writes `path`.
#[derive(Debug, Clone, Default)]
pub struct SvgPlotter {
    pub config: VizConfig,
}

impl SvgPlotter {
    pub fn new(config: VizConfig) -> Self {
        Self { config }
    }

    fn write(&self, svg: String, path: &Path) -> Result<()> {
        let bytes = encode(svg, &format_for(path, &self.config), &self.config)?;
        std::fs::write(path, bytes)?;
        tracing::info!(path = %path.display(), "plot written");
        Ok(())
    }
}

impl CapacityPlotter for SvgPlotter {
    fn plot_capacity(&self, plot: &CapacityPlot<'_>, path: &Path) -> ss_core::Result<()> {
        let artifact = ss_viz::capacity_artifact(plot)?;
        let svg = plots::capacity::render(&artifact, &self.config)?;
        self.write(svg, path)?;
        Ok(())
    }
}

impl HeightPlotter for SvgPlotter {
    fn plot_heights(&self, plot: &HeightPlot<'_>, path: &Path) -> ss_core::Result<()> {
        let artifact = ss_viz::height_artifact(plot)?;
        let svg = plots::heights::render(&artifact, &self.config)?;
        self.write(svg, path)?;
        Ok(())
    }
}
