//! Stack-height distribution: height histogram above, box plots for all
//! heights and each height category below.

use ss_viz::HeightArtifact;

use crate::canvas::Canvas;
use crate::config::VizConfig;
use crate::header::draw_header;
use crate::layout::axes::Axis;
use crate::layout::legend::{self, LegendEntry};
use crate::layout::margins::PlotArea;
use crate::layout::panels::StackedLayout;
use crate::plots::axes_draw::{draw_axes, y_label_offset};
use crate::plots::boxes::{draw_box, draw_counts};
use crate::style::{Paint, Stroke};

pub fn render(artifact: &HeightArtifact, config: &VizConfig) -> crate::Result<String> {
    let hist = &artifact.histogram;
    if hist.edges.len() != hist.counts.len() + 1 {
        return Err(crate::RenderError::Layout(format!(
            "histogram has {} edges for {} counts",
            hist.edges.len(),
            hist.counts.len()
        )));
    }

    let mut canvas = Canvas::new(config.figure.width, config.figure.height)?;
    let n_total: u64 = hist.counts.iter().sum();

    let x_min = hist.edges.first().copied().unwrap_or(0.0);
    let x_max = hist.edges.last().copied().unwrap_or(10.0);
    let x_axis = Axis::auto_linear(x_min, x_max, 8).with_label("Stack height (m)");
    let c_max = hist.counts.iter().copied().max().unwrap_or(0) as f64;
    let count_axis = if config.heights.log_y && c_max > 0.0 {
        Axis::auto_log(1.0, c_max).with_label("Count")
    } else {
        Axis::auto_linear(0.0, c_max.max(1.0) * 1.1, 5).with_label("Count")
    };

    let mut labels = vec!["All m".to_string()];
    labels.extend(artifact.category_labels.iter().cloned());
    let mut boxes = vec![artifact.all_box.as_ref()];
    boxes.extend(artifact.category_boxes.iter().map(Option::as_ref));

    let h_max = boxes.iter().flatten().map(|b| b.whisker_hi.max(b.outliers.last().copied().unwrap_or(0.0))).fold(0.0_f64, f64::max);
    let height_axis = Axis::auto_linear(0.0, h_max.max(1.0) * 1.05, 6).with_label("Stack height (m)");
    let cat_axis = Axis::categorical(&labels).with_label("Height category");

    let outer = PlotArea::auto(&canvas, &[&count_axis, &height_axis], Some(&cat_axis), config);
    let gap = config.font.tick_size + config.font.label_size + 30.0;
    let layout = StackedLayout::new(&outer, gap, config.heights.histogram_frac);
    let y_off = y_label_offset(&canvas, &[&count_axis, &height_axis], config);

    draw_header(&mut canvas, &outer, &artifact.meta.title, n_total as usize, config);

    // --- Histogram panel ---
    let top = layout.upper;
    draw_axes(&mut canvas, &top, &x_axis, &count_axis, y_off, config);
    canvas.push_clip(top.left, top.top, top.width, top.height);
    let bar = Paint::outlined(config.colors.histogram.lighten(0.3), config.colors.histogram, 0.6);
    let base = count_axis.data_to_pixel(count_axis.min, top.bottom(), top.top);
    for (i, &c) in hist.counts.iter().enumerate() {
        if c == 0 {
            continue;
        }
        let px_lo = x_axis.data_to_pixel(hist.edges[i], top.left, top.right());
        let px_hi = x_axis.data_to_pixel(hist.edges[i + 1], top.left, top.right());
        let py = count_axis.data_to_pixel(c as f64, top.bottom(), top.top);
        canvas.rect(px_lo, py, px_hi - px_lo, base - py, &bar);
    }
    let boundary = Stroke::dashed(config.colors.boundary, 0.8);
    for &b in artifact.boundaries.iter().filter(|&&b| b > x_axis.min && b < x_axis.max) {
        let px = x_axis.data_to_pixel(b, top.left, top.right());
        canvas.line(px, top.top, px, top.bottom(), &boundary);
    }
    canvas.pop_clip();
    let bar_width = match hist.edges.as_slice() {
        [a, b, ..] => b - a,
        _ => 10.0,
    };
    legend::draw_legend(
        &mut canvas,
        &top,
        &[
            LegendEntry::filled(format!("Stacks per {bar_width} m"), config.colors.histogram),
            LegendEntry::dashed("Category boundary", config.colors.boundary),
        ],
        config.font.size,
        true,
    );

    // --- Category box panel ---
    let bottom = layout.lower;
    draw_axes(&mut canvas, &bottom, &cat_axis, &height_axis, y_off, config);
    for (slot, b) in boxes.iter().enumerate() {
        if let Some(stats) = b {
            draw_box(&mut canvas, &bottom, &cat_axis, &height_axis, slot, stats, config);
        }
    }
    if config.heights.show_counts {
        let counts: Vec<usize> = boxes.iter().map(|b| b.map_or(0, |b| b.n)).collect();
        draw_counts(&mut canvas, &bottom, &cat_axis, &counts, config);
    }

    Ok(canvas.finish_svg())
}
