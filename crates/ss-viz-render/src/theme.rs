use crate::color::Color;
use crate::config::*;

/// Built-in theme presets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BuiltinTheme {
    #[default]
    Stackstat,
    /// Boxed axes, inward ticks, no grid.
    Classic,
    Minimal,
}

impl BuiltinTheme {
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "classic" => Self::Classic,
            "minimal" => Self::Minimal,
            _ => Self::Stackstat,
        }
    }

    pub fn base_config(self) -> VizConfig {
        match self {
            Self::Stackstat => stackstat(),
            Self::Classic => classic(),
            Self::Minimal => minimal(),
        }
    }
}

fn stackstat() -> VizConfig {
    VizConfig {
        theme: "stackstat".into(),
        figure: FigureConfig::default(),
        font: FontConfig::default(),
        axes: AxesConfig::default(),
        grid: GridConfig::default(),
        header: HeaderConfig::default(),
        colors: ColorsConfig::default(),
        palette: "stackstat".into(),
        output: OutputConfig::default(),
        capacity: CapacityPlotConfig::default(),
        heights: HeightsPlotConfig::default(),
    }
}

fn classic() -> VizConfig {
    VizConfig {
        theme: "classic".into(),
        font: FontConfig { size: 11.0, label_size: 12.0, tick_size: 9.5 },
        axes: AxesConfig {
            tick_direction: "in".into(),
            show_top_ticks: true,
            show_right_ticks: true,
            tick_length: 6.0,
            minor_tick_length: 3.0,
        },
        grid: GridConfig { show: false, ..GridConfig::default() },
        colors: ColorsConfig {
            points: Color::hex("#0000FF"),
            boundary: Color::hex("#FF0000"),
            box_fill: Color::rgb(255, 255, 255),
            box_edge: Color::hex("#0000FF"),
            median: Color::hex("#FF0000"),
            outlier: Color::hex("#0000FF"),
            histogram: Color::hex("#0000FF"),
        },
        palette: "tableau10".into(),
        ..stackstat()
    }
}

fn minimal() -> VizConfig {
    VizConfig {
        theme: "minimal".into(),
        figure: FigureConfig { width: 576.0, height: 518.4 },
        font: FontConfig { size: 9.0, label_size: 10.0, tick_size: 8.0 },
        axes: AxesConfig { tick_length: 4.0, minor_tick_length: 2.0, ..AxesConfig::default() },
        grid: GridConfig { show: false, ..GridConfig::default() },
        header: HeaderConfig { name: String::new(), show_title: true, show_count: false },
        palette: "wong".into(),
        ..stackstat()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive_with_fallback() {
        assert_eq!(BuiltinTheme::parse("Classic"), BuiltinTheme::Classic);
        assert_eq!(BuiltinTheme::parse("MINIMAL"), BuiltinTheme::Minimal);
        assert_eq!(BuiltinTheme::parse("neon"), BuiltinTheme::Stackstat);
    }

    #[test]
    fn themes_differ_where_expected() {
        let classic = BuiltinTheme::Classic.base_config();
        assert_eq!(classic.axes.tick_direction, "in");
        assert!(!classic.grid.show);
        let minimal = BuiltinTheme::Minimal.base_config();
        assert!(minimal.header.name.is_empty());
        assert_eq!(minimal.capacity.point_size, CapacityPlotConfig::default().point_size);
    }
}
