//! Rendering collaborator traits
//!
//! The statistics pipeline never links a graphics library. It hands the
//! numbers a plot needs to an implementation of these traits, which lives in
//! a rendering crate (or a test double).

use std::path::Path;

use crate::Result;

/// Inputs of one capacity plot: capacities and stack heights are row-aligned.
#[derive(Debug, Clone, Copy)]
pub struct CapacityPlot<'a> {
    /// Design capacity of each record.
    pub capacities: &'a [f64],
    /// Stack height of each record, meters.
    pub stack_heights: &'a [f64],
    /// Explicit bin boundaries; the last bin is open-ended above the final value.
    pub boundaries: &'a [f64],
    /// Capacity unit token used in labels.
    pub unit: &'a str,
    /// Free-form title (category name).
    pub title: &'a str,
}

/// Inputs of one stack-height distribution plot.
#[derive(Debug, Clone, Copy)]
pub struct HeightPlot<'a> {
    /// Stack heights, meters.
    pub stack_heights: &'a [f64],
    /// Height category boundaries (last category open-ended).
    pub boundaries: &'a [f64],
    /// Free-form title (category name).
    pub title: &'a str,
}

/// Renders a capacity plot to `path`. Each call is independent.
pub trait CapacityPlotter {
    /// Render one plot file.
    fn plot_capacity(&self, plot: &CapacityPlot<'_>, path: &Path) -> Result<()>;
}

/// Renders a stack-height distribution plot to `path`.
pub trait HeightPlotter {
    /// Render one plot file.
    fn plot_heights(&self, plot: &HeightPlot<'_>, path: &Path) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct CountingPlotter {
        calls: Cell<usize>,
    }

    impl CapacityPlotter for CountingPlotter {
        fn plot_capacity(&self, plot: &CapacityPlot<'_>, _path: &Path) -> Result<()> {
            assert_eq!(plot.capacities.len(), plot.stack_heights.len());
            self.calls.set(self.calls.get() + 1);
            Ok(())
        }
    }

    #[test]
    fn test_counting_plotter() {
        let p = CountingPlotter { calls: Cell::new(0) };
        let plot = CapacityPlot {
            capacities: &[1.0, 2.0],
            stack_heights: &[10.0, 20.0],
            boundaries: &[0.0, 25.0],
            unit: "MW",
            title: "t",
        };
        p.plot_capacity(&plot, Path::new("unused.svg")).unwrap();
        assert_eq!(p.calls.get(), 1);
    }
}
