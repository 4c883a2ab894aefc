//! Drawing settings the canvas understands: area paint, line strokes, fonts
//! and scatter markers. All of them are small `Copy` values built inline at
//! the call site.

use crate::color::Color;

const BLACK: Color = Color::rgb(0, 0, 0);

/// Fill and optional outline of a rect or circle.
#[derive(Debug, Clone, Copy)]
pub struct Paint {
    pub fill: Option<Color>,
    /// Outline colour and width.
    pub outline: Option<(Color, f64)>,
    pub opacity: f64,
}

impl Paint {
    pub const fn fill(color: Color) -> Self {
        Self { fill: Some(color), outline: None, opacity: 1.0 }
    }

    pub const fn outlined(fill: Color, edge: Color, width: f64) -> Self {
        Self { fill: Some(fill), outline: Some((edge, width)), opacity: 1.0 }
    }
}

/// Dash pattern of a stroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dash {
    Solid,
    /// Boundary lines.
    Long,
    /// Grid lines.
    Short,
}

impl Dash {
    /// `stroke-dasharray` value; `None` for solid lines.
    pub fn pattern(self) -> Option<&'static str> {
        match self {
            Dash::Solid => None,
            Dash::Long => Some("6 3"),
            Dash::Short => Some("3 3"),
        }
    }
}

/// Line colour, width and dash.
#[derive(Debug, Clone, Copy)]
pub struct Stroke {
    pub color: Color,
    pub width: f64,
    pub dash: Dash,
}

impl Stroke {
    pub const fn solid(color: Color, width: f64) -> Self {
        Self { color, width, dash: Dash::Solid }
    }

    pub const fn dashed(color: Color, width: f64) -> Self {
        Self { color, width, dash: Dash::Long }
    }
}

impl Default for Stroke {
    fn default() -> Self {
        Self::solid(BLACK, 1.0)
    }
}

/// Where the anchor point sits horizontally within the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Start,
    Middle,
    End,
}

/// Where the anchor point sits vertically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VAlign {
    Baseline,
    Center,
    /// Anchor at the top of the glyphs (tick labels under an axis).
    Top,
}

impl Align {
    pub fn svg(self) -> &'static str {
        match self {
            Align::Start => "start",
            Align::Middle => "middle",
            Align::End => "end",
        }
    }
}

impl VAlign {
    pub fn svg(self) -> &'static str {
        match self {
            VAlign::Baseline => "auto",
            VAlign::Center => "central",
            VAlign::Top => "hanging",
        }
    }
}

/// Size, colour, emphasis and alignment of one text run.
#[derive(Debug, Clone, Copy)]
pub struct Font {
    pub size: f64,
    pub color: Color,
    pub bold: bool,
    pub italic: bool,
    pub align: Align,
    pub valign: VAlign,
}

impl Font {
    /// Black, upright, start-aligned text of `size` points.
    pub const fn sized(size: f64) -> Self {
        Self { size, color: BLACK, bold: false, italic: false, align: Align::Start, valign: VAlign::Baseline }
    }

    pub const fn aligned(mut self, align: Align, valign: VAlign) -> Self {
        self.align = align;
        self.valign = valign;
        self
    }

    pub const fn colored(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}

/// Circular scatter or outlier marker.
#[derive(Debug, Clone, Copy)]
pub struct Marker {
    pub radius: f64,
    pub color: Color,
    /// White centre with a coloured ring.
    pub hollow: bool,
}

impl Marker {
    /// The paint the canvas uses for this marker.
    pub fn paint(&self) -> Paint {
        if self.hollow {
            Paint::outlined(Color::rgb(255, 255, 255), self.color, 1.0)
        } else {
            Paint::outlined(self.color, self.color, 0.5)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dash_patterns() {
        assert_eq!(Dash::Solid.pattern(), None);
        assert_eq!(Stroke::dashed(BLACK, 1.0).dash.pattern(), Some("6 3"));
    }

    #[test]
    fn hollow_marker_keeps_its_colour_on_the_ring() {
        let red = Color::rgb(255, 0, 0);
        let p = Marker { radius: 2.0, color: red, hollow: true }.paint();
        assert_eq!(p.fill, Some(Color::rgb(255, 255, 255)));
        assert_eq!(p.outline.map(|(c, _)| c), Some(red));
    }

    #[test]
    fn font_builders() {
        let f = Font::sized(9.0).aligned(Align::End, VAlign::Center);
        assert_eq!(f.align.svg(), "end");
        assert_eq!(f.valign.svg(), "central");
        assert!(!f.bold);
    }
}
