use crate::style::Font;

#[derive(Debug, Clone, Copy)]
pub struct TextMetrics {
    pub width: f64,
    pub height: f64,
    pub ascent: f64,
}

/// Advance width of one character in ems, for a generic sans-serif face.
fn char_advance_em(ch: char) -> f64 {
    match ch {
        'i' | 'j' | 'l' | '|' | '\'' | '.' | ',' | ':' | ';' | '!' => 0.28,
        'f' | 't' | 'r' | 'I' | '(' | ')' | '[' | ']' | ' ' | '-' => 0.36,
        'm' | 'w' | 'M' | 'W' | '%' | '@' => 0.86,
        '0'..='9' => 0.56,
        c if c.is_ascii_uppercase() => 0.68,
        c if c.is_ascii_lowercase() => 0.54,
        _ => 0.6,
    }
}

/// Estimate text extent in points.
///
/// SVG output leaves glyph shaping to the viewer, so layout only needs a
/// stable estimate. Bold text is assumed 7% wider.
pub fn measure_text(text: &str, size_pt: f64, bold: bool) -> TextMetrics {
    let em: f64 = text.chars().map(char_advance_em).sum();
    let widen = if bold { 1.07 } else { 1.0 };
    TextMetrics { width: em * size_pt * widen, height: size_pt * 1.2, ascent: size_pt * 0.93 }
}

pub fn measure_styled(text: &str, font: &Font) -> TextMetrics {
    measure_text(text, font.size, font.bold)
}
