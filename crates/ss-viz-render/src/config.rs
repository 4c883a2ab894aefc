use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::theme::BuiltinTheme;

/// Top-level visualization configuration (YAML or programmatic).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VizConfig {
    pub theme: String,
    pub figure: FigureConfig,
    pub font: FontConfig,
    pub axes: AxesConfig,
    pub grid: GridConfig,
    pub header: HeaderConfig,
    pub colors: ColorsConfig,
    pub palette: String,
    pub output: OutputConfig,
    pub capacity: CapacityPlotConfig,
    pub heights: HeightsPlotConfig,
}

impl Default for VizConfig {
    fn default() -> Self {
        BuiltinTheme::Stackstat.base_config()
    }
}

impl VizConfig {
    pub fn palette_colors(&self) -> Vec<Color> {
        crate::color::palette_colors(&self.palette)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FigureConfig {
    pub width: f64,
    pub height: f64,
}

impl Default for FigureConfig {
    fn default() -> Self {
        Self {
            width: 720.0,  // 10" * 72
            height: 648.0, // 9" * 72
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    pub size: f64,
    pub label_size: f64,
    pub tick_size: f64,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self { size: 10.0, label_size: 11.0, tick_size: 8.5 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AxesConfig {
    pub tick_direction: String,
    pub show_top_ticks: bool,
    pub show_right_ticks: bool,
    pub tick_length: f64,
    pub minor_tick_length: f64,
}

impl Default for AxesConfig {
    fn default() -> Self {
        Self {
            tick_direction: "out".into(),
            show_top_ticks: false,
            show_right_ticks: false,
            tick_length: 5.0,
            minor_tick_length: 3.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub show: bool,
    pub color: Color,
    pub alpha: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self { show: true, color: Color::hex("#CBD5E1"), alpha: 0.55 }
    }
}

/// Header line drawn above each panel set: bold name, italic plot title,
/// right-aligned record count.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderConfig {
    pub name: String,
    pub show_title: bool,
    pub show_count: bool,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self { name: "STACKSTAT".into(), show_title: true, show_count: true }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorsConfig {
    pub points: Color,
    pub boundary: Color,
    pub box_fill: Color,
    pub box_edge: Color,
    pub median: Color,
    pub outlier: Color,
    pub histogram: Color,
}

impl Default for ColorsConfig {
    fn default() -> Self {
        Self {
            points: Color::hex("#2563EB"),
            boundary: Color::hex("#6B7280"),
            box_fill: Color::hex("#BFDBFE"),
            box_edge: Color::hex("#1E3A8A"),
            median: Color::hex("#EA580C"),
            outlier: Color::hex("#111827"),
            histogram: Color::hex("#60A5FA"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: String,
    pub dpi: u32,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { format: "svg".into(), dpi: 300 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CapacityPlotConfig {
    /// Logarithmic capacity axis (falls back to linear without positive data).
    pub log_x: bool,
    pub point_size: f64,
    pub point_alpha: f64,
    pub show_boundaries: bool,
    /// Annotate each box with `n = ...`.
    pub show_counts: bool,
    /// Fraction of the figure height given to the scatter panel.
    pub scatter_frac: f64,
}

impl Default for CapacityPlotConfig {
    fn default() -> Self {
        Self {
            log_x: false,
            point_size: 2.5,
            point_alpha: 0.6,
            show_boundaries: true,
            show_counts: true,
            scatter_frac: 0.5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HeightsPlotConfig {
    pub log_y: bool,
    pub show_counts: bool,
    pub histogram_frac: f64,
}

impl Default for HeightsPlotConfig {
    fn default() -> Self {
        Self { log_y: false, show_counts: true, histogram_frac: 0.45 }
    }
}

/// Resolve a VizConfig from optional YAML string.
///
/// The `theme` key picks the base; every other key present overrides it.
pub fn resolve_config(user_yaml: Option<&str>) -> crate::Result<VizConfig> {
    let Some(yaml) = user_yaml else {
        return Ok(VizConfig::default());
    };
    let user: serde_yaml_ng::Value =
        serde_yaml_ng::from_str(yaml).map_err(|e| crate::RenderError::Config(e.to_string()))?;
    let theme = user.get("theme").and_then(|t| t.as_str()).map(BuiltinTheme::parse).unwrap_or_default();

    let base = serde_yaml_ng::to_value(theme.base_config())
        .map_err(|e| crate::RenderError::Config(e.to_string()))?;
    let merged = merge_yaml(base, user);
    serde_yaml_ng::from_value(merged).map_err(|e| crate::RenderError::Config(e.to_string()))
}

fn merge_yaml(base: serde_yaml_ng::Value, over: serde_yaml_ng::Value) -> serde_yaml_ng::Value {
    use serde_yaml_ng::Value;
    match (base, over) {
        (Value::Mapping(mut b), Value::Mapping(o)) => {
            for (k, v) in o {
                let merged = match b.remove(&k) {
                    Some(bv) => merge_yaml(bv, v),
                    None => v,
                };
                b.insert(k, merged);
            }
            Value::Mapping(b)
        }
        (_, o) => o,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_when_absent() {
        let c = resolve_config(None).unwrap();
        assert_eq!(c.theme, "stackstat");
        assert!(c.capacity.show_boundaries);
    }

    #[test]
    fn partial_override_keeps_theme_values() {
        let c = resolve_config(Some("theme: classic\ncapacity:\n  log_x: true\n")).unwrap();
        assert_eq!(c.theme, "classic");
        assert!(c.capacity.log_x);
        assert!(!c.grid.show);
        assert_eq!(c.capacity.point_size, CapacityPlotConfig::default().point_size);
    }

    #[test]
    fn color_override() {
        let c = resolve_config(Some("colors:\n  median: '#000000'\n")).unwrap();
        assert_eq!(c.colors.median, Color::rgb(0, 0, 0));
        assert_eq!(c.colors.points, ColorsConfig::default().points);
    }

    #[test]
    fn bad_yaml_is_config_error() {
        let err = resolve_config(Some("figure: [1, 2")).unwrap_err();
        assert!(matches!(err, crate::RenderError::Config(_)));
    }
}
