use crate::canvas::Canvas;
use crate::color::Color;
use crate::config::VizConfig;
use crate::layout::margins::PlotArea;
use crate::style::{Align, Font, VAlign};

/// Draw the figure header: **STACKSTAT** *electricity* on the left,
/// `n = 1234` on the right.
pub fn draw_header(canvas: &mut Canvas, area: &PlotArea, title: &str, n: usize, config: &VizConfig) {
    let header_size = config.font.label_size * 1.3;
    let x = area.left;
    let y = area.top - 8.0;
    let mut cursor = x;

    if !config.header.name.is_empty() {
        let name_font = Font { bold: true, ..Font::sized(header_size) };
        canvas.text(cursor, y, &config.header.name, &name_font);
        cursor += canvas.measure_text(&config.header.name, &name_font).width + 5.0;
    }

    if config.header.show_title && !title.is_empty() {
        canvas.text(cursor, y, title, &Font { italic: true, ..Font::sized(header_size * 0.85) });
    }

    if config.header.show_count {
        let count_font = Font::sized(config.font.tick_size)
            .aligned(Align::End, VAlign::Baseline)
            .colored(Color::rgb(80, 80, 80));
        canvas.text(area.right(), y, &format!("n = {n}"), &count_font);
    }
}
