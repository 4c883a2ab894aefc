use std::fmt::Write as FmtWrite;

use crate::style::{Font, Marker, Paint, Stroke};
use crate::text::{TextMetrics, measure_styled};

const FONT_FAMILY: &str = "Helvetica, Arial, sans-serif";

#[derive(Debug, Clone, Copy)]
struct ClipRect {
    x: f64,
    y: f64,
    w: f64,
    h: f64,
}

#[derive(Debug, Clone)]
enum SvgElement {
    Rect { x: f64, y: f64, w: f64, h: f64, paint: Paint },
    Line { x1: f64, y1: f64, x2: f64, y2: f64, stroke: Stroke },
    Circle { cx: f64, cy: f64, r: f64, paint: Paint },
    Text { x: f64, y: f64, content: String, font: Font, rotate: Option<f64> },
    Clipped { clip: usize, children: Vec<SvgElement> },
}

/// Writes ` name="value"` pairs onto an open tag.
struct Tag<'a> {
    out: &'a mut String,
}

impl<'a> Tag<'a> {
    fn open(out: &'a mut String, name: &str) -> Self {
        out.push('<');
        out.push_str(name);
        Self { out }
    }

    fn attr(self, name: &str, value: impl std::fmt::Display) -> Self {
        write!(self.out, r#" {name}="{value}""#).unwrap();
        self
    }

    fn num(self, name: &str, value: f64) -> Self {
        write!(self.out, r#" {name}="{value:.2}""#).unwrap();
        self
    }

    fn paint(self, paint: &Paint) -> Self {
        let mut tag = match paint.fill {
            Some(fill) => self.attr("fill", fill.to_svg_fill()),
            None => self.attr("fill", "none"),
        };
        if let Some((edge, width)) = paint.outline {
            tag = tag.attr("stroke", edge.to_svg_fill()).num("stroke-width", width);
        }
        if (paint.opacity - 1.0).abs() > 1e-4 {
            tag = tag.attr("opacity", format_args!("{:.3}", paint.opacity));
        }
        tag
    }

    fn stroke(self, stroke: &Stroke) -> Self {
        let tag = self.attr("stroke", stroke.color.to_svg_fill()).num("stroke-width", stroke.width);
        match stroke.dash.pattern() {
            Some(dash) => tag.attr("stroke-dasharray", dash),
            None => tag,
        }
    }

    fn close_empty(self) {
        self.out.push_str(" />\n");
    }
}

impl SvgElement {
    fn write_svg(&self, out: &mut String) {
        match self {
            Self::Rect { x, y, w, h, paint } => Tag::open(out, "rect")
                .num("x", *x)
                .num("y", *y)
                .num("width", *w)
                .num("height", *h)
                .paint(paint)
                .close_empty(),
            Self::Line { x1, y1, x2, y2, stroke } => Tag::open(out, "line")
                .num("x1", *x1)
                .num("y1", *y1)
                .num("x2", *x2)
                .num("y2", *y2)
                .stroke(stroke)
                .close_empty(),
            Self::Circle { cx, cy, r, paint } => Tag::open(out, "circle")
                .num("cx", *cx)
                .num("cy", *cy)
                .num("r", *r)
                .paint(paint)
                .close_empty(),
            Self::Text { x, y, content, font, rotate } => {
                let mut tag = Tag::open(out, "text")
                    .num("x", *x)
                    .num("y", *y)
                    .attr("font-family", FONT_FAMILY)
                    .attr("font-size", format_args!("{:.1}", font.size))
                    .attr("fill", font.color.to_svg_fill())
                    .attr("text-anchor", font.align.svg())
                    .attr("dominant-baseline", font.valign.svg());
                if font.bold {
                    tag = tag.attr("font-weight", "bold");
                }
                if font.italic {
                    tag = tag.attr("font-style", "italic");
                }
                if let Some(angle) = rotate {
                    tag = tag.attr("transform", format_args!("rotate({angle:.1},{x:.2},{y:.2})"));
                }
                tag.out.push('>');
                escape_xml(out, content);
                out.push_str("</text>\n");
            }
            Self::Clipped { clip, children } => {
                writeln!(out, r#"<g clip-path="url(#clip{clip})">"#).unwrap();
                for child in children {
                    child.write_svg(out);
                }
                out.push_str("</g>\n");
            }
        }
    }
}

fn escape_xml(out: &mut String, content: &str) {
    for ch in content.chars() {
        match ch {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
}

/// Retained SVG canvas in points. Elements are serialized by [`Canvas::finish_svg`].
pub struct Canvas {
    pub width: f64,
    pub height: f64,
    elements: Vec<SvgElement>,
    clips: Vec<ClipRect>,
    /// Open clip regions; drawing while one is open lands in its group.
    open_clips: Vec<(usize, Vec<SvgElement>)>,
}

impl Canvas {
    pub fn new(width: f64, height: f64) -> crate::Result<Self> {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(crate::RenderError::Layout(format!("invalid canvas size {width}x{height}")));
        }
        Ok(Self { width, height, elements: Vec::new(), clips: Vec::new(), open_clips: Vec::new() })
    }

    fn push(&mut self, elem: SvgElement) {
        match self.open_clips.last_mut() {
            Some((_, children)) => children.push(elem),
            None => self.elements.push(elem),
        }
    }

    pub fn rect(&mut self, x: f64, y: f64, w: f64, h: f64, paint: &Paint) {
        self.push(SvgElement::Rect { x, y, w, h, paint: *paint });
    }

    pub fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, stroke: &Stroke) {
        self.push(SvgElement::Line { x1, y1, x2, y2, stroke: *stroke });
    }

    pub fn circle(&mut self, cx: f64, cy: f64, r: f64, paint: &Paint) {
        self.push(SvgElement::Circle { cx, cy, r, paint: *paint });
    }

    pub fn text(&mut self, x: f64, y: f64, content: &str, font: &Font) {
        self.push(SvgElement::Text { x, y, content: content.to_string(), font: *font, rotate: None });
    }

    /// Text rotated by `angle` degrees around its anchor point.
    pub fn text_rotated(&mut self, x: f64, y: f64, content: &str, font: &Font, angle: f64) {
        self.push(SvgElement::Text { x, y, content: content.to_string(), font: *font, rotate: Some(angle) });
    }

    /// Vertical segment from `y_lo` to `y_hi` with horizontal caps `cap_width` wide.
    pub fn error_bar(&mut self, x: f64, y_lo: f64, y_hi: f64, cap_width: f64, stroke: &Stroke) {
        self.line(x, y_lo, x, y_hi, stroke);
        let half = cap_width / 2.0;
        if half > 0.0 {
            for y in [y_lo, y_hi] {
                self.line(x - half, y, x + half, y, stroke);
            }
        }
    }

    pub fn marker(&mut self, x: f64, y: f64, marker: &Marker) {
        self.circle(x, y, marker.radius, &marker.paint());
    }

    /// Start clipping subsequent drawing to a rectangle. Returns the clip id.
    pub fn push_clip(&mut self, x: f64, y: f64, w: f64, h: f64) -> String {
        let idx = self.clips.len();
        self.clips.push(ClipRect { x, y, w, h });
        self.open_clips.push((idx, Vec::new()));
        format!("clip{idx}")
    }

    pub fn pop_clip(&mut self) {
        if let Some((clip, children)) = self.open_clips.pop() {
            self.push(SvgElement::Clipped { clip, children });
        }
    }

    pub fn measure_text(&self, content: &str, font: &Font) -> TextMetrics {
        measure_styled(content, font)
    }

    /// Serialize the canvas. Clip regions still open are closed first.
    pub fn finish_svg(mut self) -> String {
        while !self.open_clips.is_empty() {
            self.pop_clip();
        }

        let (w, h) = (self.width, self.height);
        let mut out = String::with_capacity(32 * 1024);
        writeln!(out, r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#)
            .unwrap();

        if !self.clips.is_empty() {
            out.push_str("<defs>\n");
            for (i, c) in self.clips.iter().enumerate() {
                write!(out, r#"<clipPath id="clip{i}">"#).unwrap();
                Tag::open(&mut out, "rect").num("x", c.x).num("y", c.y).num("width", c.w).num("height", c.h).close_empty();
                out.push_str("</clipPath>\n");
            }
            out.push_str("</defs>\n");
        }

        writeln!(out, r#"<rect width="{w}" height="{h}" fill="white" />"#).unwrap();
        for elem in &self.elements {
            elem.write_svg(&mut out);
        }
        out.push_str("</svg>\n");
        out
    }
}
