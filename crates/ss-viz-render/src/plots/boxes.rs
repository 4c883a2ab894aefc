use ss_viz::BoxStats;

use crate::canvas::Canvas;
use crate::config::VizConfig;
use crate::layout::axes::Axis;
use crate::layout::margins::PlotArea;
use crate::color::Color;
use crate::style::{Align, Font, Marker, Paint, Stroke, VAlign};

/// Draw one Tukey box at category slot `slot` of `x_axis`.
pub fn draw_box(
    canvas: &mut Canvas,
    area: &PlotArea,
    x_axis: &Axis,
    y_axis: &Axis,
    slot: usize,
    stats: &BoxStats,
    config: &VizConfig,
) {
    let cx = x_axis.data_to_pixel(slot as f64, area.left, area.right());
    let w = x_axis.slot_width(area.left, area.right()) * 0.5;
    let y = |v: f64| y_axis.data_to_pixel(v, area.bottom(), area.top);

    let edge = Stroke::solid(config.colors.box_edge, 1.0);
    let (y_q1, y_q3) = (y(stats.q1), y(stats.q3));

    canvas.error_bar(cx, y(stats.whisker_lo), y_q1, w * 0.5, &edge);
    canvas.error_bar(cx, y_q3, y(stats.whisker_hi), w * 0.5, &edge);
    canvas.rect(
        cx - w / 2.0,
        y_q3,
        w,
        (y_q1 - y_q3).max(0.5),
        &Paint::outlined(config.colors.box_fill, config.colors.box_edge, 1.0),
    );
    let y_med = y(stats.median);
    canvas.line(cx - w / 2.0, y_med, cx + w / 2.0, y_med, &Stroke::solid(config.colors.median, 1.6));

    let outlier = Marker { radius: 2.0, color: config.colors.outlier, hollow: true };
    for &v in &stats.outliers {
        canvas.marker(cx, y(v), &outlier);
    }
}

/// `n = ...` under each category, just inside the panel's lower edge.
pub fn draw_counts(canvas: &mut Canvas, area: &PlotArea, x_axis: &Axis, counts: &[usize], config: &VizConfig) {
    let font = Font::sized(config.font.tick_size * 0.9)
        .aligned(Align::Middle, VAlign::Baseline)
        .colored(Color::rgb(80, 80, 80));
    for (i, n) in counts.iter().enumerate() {
        let cx = x_axis.data_to_pixel(i as f64, area.left, area.right());
        canvas.text(cx, area.bottom() - 4.0, &format!("n = {n}"), &font);
    }
}
