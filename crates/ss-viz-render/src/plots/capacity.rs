//! Stack height vs design capacity: scatter with bin boundaries on top,
//! one box per capacity bin below.

use ss_viz::CapacityArtifact;

use crate::canvas::Canvas;
use crate::config::VizConfig;
use crate::header::draw_header;
use crate::layout::axes::Axis;
use crate::layout::legend::{self, LegendEntry};
use crate::layout::margins::PlotArea;
use crate::layout::panels::StackedLayout;
use crate::plots::axes_draw::{draw_axes, y_label_offset};
use crate::plots::boxes::{draw_box, draw_counts};
use crate::style::{Marker, Stroke};

fn capacity_axis(artifact: &CapacityArtifact, config: &VizConfig) -> Axis {
    let last = artifact.boundaries.last().copied().unwrap_or(0.0);
    let data_max = artifact.capacity.iter().copied().fold(last, f64::max);
    let label = format!("Design capacity ({})", artifact.unit);

    let min_positive = artifact.capacity.iter().copied().filter(|&c| c > 0.0).fold(f64::INFINITY, f64::min);
    if config.capacity.log_x && min_positive.is_finite() {
        return Axis::auto_log(min_positive, data_max).with_label(label);
    }
    // Keep the open last bin visible even when nothing falls in it.
    Axis::auto_linear(0.0, data_max.max(last * 1.1), 6).with_label(label)
}

pub fn render(artifact: &CapacityArtifact, config: &VizConfig) -> crate::Result<String> {
    if artifact.boundaries.len() < 2 {
        return Err(crate::RenderError::Layout("capacity artifact needs at least two boundaries".into()));
    }

    let mut canvas = Canvas::new(config.figure.width, config.figure.height)?;

    let h_max = artifact.stack_height.iter().copied().fold(0.0_f64, f64::max);
    let x_axis = capacity_axis(artifact, config);
    let y_axis = Axis::auto_linear(0.0, h_max.max(1.0) * 1.05, 6).with_label("Stack height (m)");
    let labels: Vec<String> = artifact.bins.iter().map(|b| b.label.clone()).collect();
    let cat_axis = Axis::categorical(&labels).with_label("Capacity bin");

    let outer = PlotArea::auto(&canvas, &[&y_axis], Some(&cat_axis), config);
    let gap = config.font.tick_size + config.font.label_size + 30.0;
    let layout = StackedLayout::new(&outer, gap, config.capacity.scatter_frac);
    let y_off = y_label_offset(&canvas, &[&y_axis], config);

    draw_header(&mut canvas, &outer, &artifact.meta.title, artifact.capacity.len(), config);

    // --- Scatter panel ---
    let top = layout.upper;
    draw_axes(&mut canvas, &top, &x_axis, &y_axis, y_off, config);
    canvas.push_clip(top.left, top.top, top.width, top.height);
    if config.capacity.show_boundaries {
        let boundary = Stroke::dashed(config.colors.boundary, 0.8);
        for &b in &artifact.boundaries {
            if x_axis.is_log() && b <= 0.0 {
                continue;
            }
            let px = x_axis.data_to_pixel(b, top.left, top.right());
            canvas.line(px, top.top, px, top.bottom(), &boundary);
        }
    }
    let point = Marker {
        radius: config.capacity.point_size,
        color: config.colors.points.with_alpha(config.capacity.point_alpha),
        hollow: false,
    };
    for (&c, &h) in artifact.capacity.iter().zip(&artifact.stack_height) {
        if x_axis.is_log() && c <= 0.0 {
            continue;
        }
        let px = x_axis.data_to_pixel(c, top.left, top.right());
        let py = y_axis.data_to_pixel(h, top.bottom(), top.top);
        canvas.marker(px, py, &point);
    }
    canvas.pop_clip();

    let mut entries = vec![LegendEntry::marker("Sources", config.colors.points)];
    if config.capacity.show_boundaries {
        entries.push(LegendEntry::dashed("Bin boundary", config.colors.boundary));
    }
    legend::draw_legend(&mut canvas, &top, &entries, config.font.size, true);

    // --- Box panel ---
    let bottom = layout.lower;
    draw_axes(&mut canvas, &bottom, &cat_axis, &y_axis, y_off, config);
    for (slot, bin) in artifact.bins.iter().enumerate() {
        if let Some(stats) = &bin.box_stats {
            draw_box(&mut canvas, &bottom, &cat_axis, &y_axis, slot, stats, config);
        }
    }
    if config.capacity.show_counts {
        let counts: Vec<usize> = artifact.bins.iter().map(|b| b.count).collect();
        draw_counts(&mut canvas, &bottom, &cat_axis, &counts, config);
    }

    Ok(canvas.finish_svg())
}
