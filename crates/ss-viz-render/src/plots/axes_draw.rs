use crate::canvas::Canvas;
use crate::color::Color;
use crate::config::VizConfig;
use crate::layout::axes::Axis;
use crate::layout::margins::{PlotArea, widest_tick_label};
use crate::style::{Align, Dash, Font, Stroke, VAlign};

#[derive(Clone, Copy, PartialEq)]
enum Side {
    Bottom,
    Left,
}

struct TickPens {
    major: Stroke,
    minor: Stroke,
    grid: Option<Stroke>,
    /// +1 when ticks point out of the frame, -1 when inward.
    dir: f64,
}

/// Frame, ticks, grid, tick labels and axis titles for one panel.
///
/// `y_label_offset` is the distance from the frame to the rotated y title;
/// stacked panels pass the same value so their titles line up.
pub fn draw_axes(
    canvas: &mut Canvas,
    area: &PlotArea,
    x_axis: &Axis,
    y_axis: &Axis,
    y_label_offset: f64,
    config: &VizConfig,
) {
    let black = Color::rgb(0, 0, 0);
    let pens = TickPens {
        major: Stroke::solid(black, 0.6),
        minor: Stroke::solid(black, 0.4),
        grid: config.grid.show.then(|| Stroke {
            color: config.grid.color.with_alpha(config.grid.alpha),
            width: 0.5,
            dash: Dash::Short,
        }),
        dir: if config.axes.tick_direction == "in" { -1.0 } else { 1.0 },
    };

    draw_frame(canvas, area);
    draw_side(canvas, area, x_axis, Side::Bottom, &pens, config);
    draw_side(canvas, area, y_axis, Side::Left, &pens, config);

    let title = Font::sized(config.font.label_size).aligned(Align::Middle, VAlign::Baseline);
    if !x_axis.label.is_empty() {
        let y = area.bottom() + outside_len(config) + config.font.tick_size + 14.0;
        canvas.text(area.left + area.width / 2.0, y, &x_axis.label, &title);
    }
    if !y_axis.label.is_empty() {
        let y = area.top + area.height / 2.0;
        canvas.text_rotated(area.left - y_label_offset, y, &y_axis.label, &title, -90.0);
    }
}

fn outside_len(config: &VizConfig) -> f64 {
    if config.axes.tick_direction == "in" { 0.0 } else { config.axes.tick_length }
}

/// Ticks, grid lines and tick labels along one edge, mirrored ticks on the
/// opposite edge when the config asks for them.
fn draw_side(canvas: &mut Canvas, area: &PlotArea, axis: &Axis, side: Side, pens: &TickPens, config: &VizConfig) {
    let (lo, hi) = match side {
        Side::Bottom => (area.left, area.right()),
        Side::Left => (area.bottom(), area.top),
    };
    let in_range = |p: f64| p >= lo.min(hi) - 0.5 && p <= lo.max(hi) + 0.5;
    let mirror = match side {
        Side::Bottom => config.axes.show_top_ticks,
        Side::Left => config.axes.show_right_ticks,
    };
    let major_len = pens.dir * config.axes.tick_length;
    let minor_len = pens.dir * config.axes.minor_tick_length;

    let label_font = match side {
        Side::Bottom => Font::sized(config.font.tick_size).aligned(Align::Middle, VAlign::Top),
        Side::Left => Font::sized(config.font.tick_size).aligned(Align::End, VAlign::Center),
    };

    for (i, &val) in axis.tick_positions.iter().enumerate() {
        let p = axis.data_to_pixel(val, lo, hi);
        if !in_range(p) {
            continue;
        }
        match side {
            Side::Bottom => {
                if let Some(g) = &pens.grid {
                    canvas.line(p, area.top, p, area.bottom(), g);
                }
                canvas.line(p, area.bottom(), p, area.bottom() + major_len, &pens.major);
                if mirror {
                    canvas.line(p, area.top, p, area.top - major_len, &pens.major);
                }
                if let Some(label) = axis.tick_labels.get(i) {
                    canvas.text(p, area.bottom() + outside_len(config) + 3.0, label, &label_font);
                }
            }
            Side::Left => {
                if let Some(g) = &pens.grid {
                    canvas.line(area.left, p, area.right(), p, g);
                }
                canvas.line(area.left, p, area.left - major_len, p, &pens.major);
                if mirror {
                    canvas.line(area.right(), p, area.right() + major_len, p, &pens.major);
                }
                if let Some(label) = axis.tick_labels.get(i) {
                    canvas.text(area.left - outside_len(config) - 4.0, p, label, &label_font);
                }
            }
        }
    }

    for p in axis.minor_ticks.iter().map(|&v| axis.data_to_pixel(v, lo, hi)).filter(|&p| in_range(p)) {
        match side {
            Side::Bottom => canvas.line(p, area.bottom(), p, area.bottom() + minor_len, &pens.minor),
            Side::Left => canvas.line(area.left, p, area.left - minor_len, p, &pens.minor),
        }
    }
}

/// Horizontal offset of the y title that clears the widest tick label.
pub fn y_label_offset(canvas: &Canvas, y_axes: &[&Axis], config: &VizConfig) -> f64 {
    widest_tick_label(canvas, y_axes, config) + outside_len(config) + 4.0 + config.font.label_size * 0.8
}

/// Plain rectangular frame around the plot area.
pub fn draw_frame(canvas: &mut Canvas, area: &PlotArea) {
    let pen = Stroke::solid(Color::rgb(0, 0, 0), 0.8);
    let (l, t, r, b) = (area.left, area.top, area.right(), area.bottom());
    for (x1, y1, x2, y2) in [(l, t, r, t), (l, b, r, b), (l, t, l, b), (r, t, r, b)] {
        canvas.line(x1, y1, x2, y2, &pen);
    }
}
