use crate::canvas::Canvas;
use crate::color::Color;
use crate::layout::margins::PlotArea;
use crate::style::{Align, Font, Marker, Paint, Stroke, VAlign};

const SWATCH_W: f64 = 14.0;
const PAD: f64 = 6.0;

/// What a legend row shows left of its label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Swatch {
    /// Filled box, for bars.
    Block,
    /// Dashed rule, for boundary lines.
    Dashed,
    /// Filled dot, for scatter points.
    Dot,
}

pub struct LegendEntry {
    pub label: String,
    pub color: Color,
    pub swatch: Swatch,
}

impl LegendEntry {
    pub fn marker(label: impl Into<String>, color: Color) -> Self {
        Self { label: label.into(), color, swatch: Swatch::Dot }
    }

    pub fn dashed(label: impl Into<String>, color: Color) -> Self {
        Self { label: label.into(), color, swatch: Swatch::Dashed }
    }

    pub fn filled(label: impl Into<String>, color: Color) -> Self {
        Self { label: label.into(), color, swatch: Swatch::Block }
    }

    /// Draw the swatch with its left edge at `x`, vertically centred on `cy`.
    fn draw_swatch(&self, canvas: &mut Canvas, x: f64, cy: f64, font_size: f64) {
        match self.swatch {
            Swatch::Block => {
                let h = font_size - 2.0;
                canvas.rect(x, cy - h / 2.0, SWATCH_W, h, &Paint::fill(self.color));
            }
            Swatch::Dashed => canvas.line(x, cy, x + SWATCH_W, cy, &Stroke::dashed(self.color, 1.5)),
            Swatch::Dot => canvas.marker(
                x + SWATCH_W / 2.0,
                cy,
                &Marker { radius: 3.0, color: self.color, hollow: false },
            ),
        }
    }
}

/// Legend box anchored at the top-left corner of `area`, one row per entry.
pub fn draw_legend(canvas: &mut Canvas, area: &PlotArea, entries: &[LegendEntry], font_size: f64, frame: bool) {
    if entries.is_empty() {
        return;
    }

    let label_font = Font::sized(font_size * 0.85).aligned(Align::Start, VAlign::Center);
    let row_h = font_size + 4.0;
    let label_w = entries
        .iter()
        .map(|e| canvas.measure_text(&e.label, &label_font).width)
        .fold(0.0, f64::max);

    let (x0, y0) = (area.left + 5.0, area.top + 5.0);
    canvas.rect(
        x0,
        y0,
        2.0 * PAD + SWATCH_W + PAD + label_w,
        2.0 * PAD + entries.len() as f64 * row_h,
        &Paint {
            fill: Some(Color::rgba(255, 255, 255, 0.9)),
            outline: frame.then(|| (Color::rgb(200, 200, 200), 0.5)),
            opacity: 1.0,
        },
    );

    for (row, entry) in entries.iter().enumerate() {
        let cy = y0 + PAD + (row as f64 + 0.5) * row_h;
        entry.draw_swatch(canvas, x0 + PAD, cy, font_size);
        canvas.text(x0 + PAD + SWATCH_W + PAD, cy, &entry.label, &label_font);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_label_per_entry() {
        let mut canvas = Canvas::new(300.0, 200.0).unwrap();
        let area = PlotArea::manual(20.0, 20.0, 260.0, 160.0);
        let entries = [
            LegendEntry::marker("Sources", Color::rgb(0, 0, 255)),
            LegendEntry::dashed("Bin boundary", Color::rgb(128, 128, 128)),
        ];
        draw_legend(&mut canvas, &area, &entries, 10.0, true);
        let svg = canvas.finish_svg();
        assert!(svg.contains(">Sources</text>"));
        assert!(svg.contains(">Bin boundary</text>"));
        assert!(svg.contains(r#"stroke-dasharray="6 3""#));
        assert!(svg.contains("<circle"));
    }

    #[test]
    fn block_swatch_is_a_filled_rect() {
        let mut canvas = Canvas::new(300.0, 200.0).unwrap();
        let area = PlotArea::manual(0.0, 0.0, 300.0, 200.0);
        draw_legend(&mut canvas, &area, &[LegendEntry::filled("Bars", Color::hex("#123456"))], 10.0, false);
        assert!(canvas.finish_svg().contains(r##"fill="#123456""##));
    }

    #[test]
    fn empty_legend_draws_nothing() {
        let mut canvas = Canvas::new(100.0, 100.0).unwrap();
        let area = PlotArea::manual(0.0, 0.0, 100.0, 100.0);
        draw_legend(&mut canvas, &area, &[], 10.0, true);
        assert!(!canvas.finish_svg().contains("<text"));
    }
}
