use crate::layout::margins::PlotArea;

/// Two panels stacked vertically, sharing left and right edges.
/// The upper panel gets `upper_frac` of the height left after the gap.
#[derive(Debug, Clone)]
pub struct StackedLayout {
    pub upper: PlotArea,
    pub lower: PlotArea,
}

impl StackedLayout {
    pub fn new(outer: &PlotArea, gap: f64, upper_frac: f64) -> Self {
        let usable = (outer.height - gap).max(0.0);
        let upper_h = usable * upper_frac.clamp(0.1, 0.9);
        let lower_h = usable - upper_h;

        Self {
            upper: PlotArea::manual(outer.left, outer.top, outer.width, upper_h),
            lower: PlotArea::manual(outer.left, outer.top + upper_h + gap, outer.width, lower_h),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panels_tile_the_outer_area() {
        let outer = PlotArea::manual(10.0, 20.0, 300.0, 400.0);
        let l = StackedLayout::new(&outer, 40.0, 0.5);
        assert_eq!(l.upper.top, 20.0);
        assert!((l.upper.height - 180.0).abs() < 1e-9);
        assert!((l.lower.top - 240.0).abs() < 1e-9);
        assert!((l.lower.bottom() - outer.bottom()).abs() < 1e-9);
        assert_eq!(l.lower.width, 300.0);
    }

    #[test]
    fn fraction_is_clamped() {
        let outer = PlotArea::manual(0.0, 0.0, 100.0, 100.0);
        let l = StackedLayout::new(&outer, 0.0, 5.0);
        assert!((l.upper.height - 90.0).abs() < 1e-9);
    }
}
