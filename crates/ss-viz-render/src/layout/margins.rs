use crate::canvas::Canvas;
use crate::config::VizConfig;
use crate::layout::axes::Axis;
use crate::style::Font;

const EDGE_PAD: f64 = 15.0;

/// Rectangular plot area within the canvas.
#[derive(Debug, Clone, Copy)]
pub struct PlotArea {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PlotArea {
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Area left after reserving room for tick labels, axis titles and the header.
    ///
    /// All of `y_axes` share one label column, so the widest tick label among
    /// them sets the left margin and stacked panels stay aligned.
    pub fn auto(canvas: &Canvas, y_axes: &[&Axis], x_axis: Option<&Axis>, config: &VizConfig) -> Self {
        let title_room = config.font.label_size + 6.0;

        let mut left = EDGE_PAD + widest_tick_label(canvas, y_axes, config) + 8.0;
        if y_axes.iter().any(|y| !y.label.is_empty()) {
            left += title_room;
        }

        let bottom = EDGE_PAD
            + x_axis.map_or(0.0, |x| {
                let ticks = config.font.tick_size + 6.0;
                if x.label.is_empty() { ticks } else { ticks + title_room }
            });

        let has_header = !config.header.name.is_empty() || config.header.show_title;
        let top = if has_header { config.font.label_size * 1.3 + 20.0 } else { 12.0 };

        Self {
            left,
            top,
            width: (canvas.width - left - EDGE_PAD).max(50.0),
            height: (canvas.height - top - bottom).max(50.0),
        }
    }

    pub fn manual(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }
}

/// Rendered width of the longest tick label across `axes`.
pub fn widest_tick_label(canvas: &Canvas, axes: &[&Axis], config: &VizConfig) -> f64 {
    let font = Font::sized(config.font.tick_size);
    axes.iter()
        .flat_map(|a| &a.tick_labels)
        .map(|l| canvas.measure_text(l, &font).width)
        .fold(0.0, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wider_ticks_push_the_frame_right() {
        let canvas = Canvas::new(600.0, 400.0).unwrap();
        let config = VizConfig::default();
        let narrow = Axis::auto_linear(0.0, 10.0, 5);
        let wide = Axis::auto_linear(0.0, 100000.0, 5);
        let a = PlotArea::auto(&canvas, &[&narrow], None, &config);
        let b = PlotArea::auto(&canvas, &[&narrow, &wide], None, &config);
        assert!(b.left > a.left);
        assert!((b.right() - a.right()).abs() < 1e-9);
    }
}
