/// How data values map onto an axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisScale {
    Linear,
    Log10,
    /// One unit-wide slot per category, centred on `0..n`.
    Category,
}

/// Axis range, ticks and data-to-pixel mapping.
#[derive(Debug, Clone)]
pub struct Axis {
    pub min: f64,
    pub max: f64,
    pub scale: AxisScale,
    pub label: String,
    pub tick_positions: Vec<f64>,
    pub tick_labels: Vec<String>,
    pub minor_ticks: Vec<f64>,
}

impl Axis {
    fn bare(min: f64, max: f64, scale: AxisScale) -> Self {
        Self {
            min,
            max,
            scale,
            label: String::new(),
            tick_positions: Vec::new(),
            tick_labels: Vec::new(),
            minor_ticks: Vec::new(),
        }
    }

    /// Linear axis widened to round tick values around `[lo, hi]`.
    pub fn auto_linear(lo: f64, hi: f64, target_ticks: usize) -> Self {
        let step = if (hi - lo).abs() < 1e-15 {
            1.0
        } else {
            round_step((hi - lo) / (target_ticks.max(2) - 1) as f64)
        };
        let (start, end) = if (hi - lo).abs() < 1e-15 {
            (lo - 1.0, hi + 1.0)
        } else {
            ((lo / step).floor() * step, (hi / step).ceil() * step)
        };

        let majors = ((end - start) / step).round() as usize;
        let mut axis = Self::bare(start, end, AxisScale::Linear);
        axis.tick_positions = (0..=majors).map(|i| start + i as f64 * step).collect();
        axis.tick_labels = axis.tick_positions.iter().map(|&v| linear_label(v, step)).collect();
        // Four minor ticks between consecutive majors.
        axis.minor_ticks = (0..majors * 5)
            .filter(|i| i % 5 != 0)
            .map(|i| start + i as f64 * step / 5.0)
            .collect();
        axis
    }

    /// Log10 axis spanning whole decades around `[lo, hi]` (positive data).
    pub fn auto_log(lo: f64, hi: f64) -> Self {
        let first = lo.max(1e-20).log10().floor() as i32;
        let last = (hi.max(1e-20).log10().ceil() as i32).max(first + 1);

        let mut axis = Self::bare(10f64.powi(first), 10f64.powi(last), AxisScale::Log10);
        axis.tick_positions = (first..=last).map(|e| 10f64.powi(e)).collect();
        axis.tick_labels = (first..=last).map(decade_label).collect();
        axis.minor_ticks = (first..last)
            .flat_map(|e| (2..=9).map(move |m| m as f64 * 10f64.powi(e)))
            .collect();
        axis
    }

    pub fn categorical(labels: &[String]) -> Self {
        let slots = labels.len().max(1) as f64;
        let mut axis = Self::bare(-0.5, slots - 0.5, AxisScale::Category);
        axis.tick_positions = (0..labels.len()).map(|i| i as f64).collect();
        axis.tick_labels = labels.to_vec();
        axis
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn is_log(&self) -> bool {
        self.scale == AxisScale::Log10
    }

    /// Pixel coordinate of `value` when the axis spans `[px_min, px_max]`.
    pub fn data_to_pixel(&self, value: f64, px_min: f64, px_max: f64) -> f64 {
        let frac = match self.scale {
            AxisScale::Log10 => {
                let lg = |v: f64| v.max(1e-20).log10();
                (lg(value) - lg(self.min)) / (lg(self.max) - lg(self.min))
            }
            AxisScale::Linear | AxisScale::Category => (value - self.min) / (self.max - self.min),
        };
        px_min + frac * (px_max - px_min)
    }

    /// Pixels per data unit; on a category axis, the width of one slot.
    pub fn slot_width(&self, px_min: f64, px_max: f64) -> f64 {
        (px_max - px_min).abs() / (self.max - self.min)
    }
}

/// Round a raw step to 1, 2, 5 or 10 times a power of ten.
fn round_step(raw: f64) -> f64 {
    let magnitude = 10f64.powf(raw.abs().log10().floor());
    let mantissa = raw / magnitude;
    let rounded = match mantissa {
        m if m <= 1.5 => 1.0,
        m if m <= 3.5 => 2.0,
        m if m <= 7.5 => 5.0,
        _ => 10.0,
    };
    rounded * magnitude
}

fn linear_label(value: f64, step: f64) -> String {
    if step >= 1.0 {
        // Snap values that are zero up to rounding error, so "-0" never shows.
        let v = if value.abs() < step * 0.01 { 0.0 } else { value };
        (v.round() as i64).to_string()
    } else {
        let decimals = (-step.log10().floor()) as usize;
        format!("{value:.decimals$}")
    }
}

/// Capacities read better as plain numbers than as powers of ten.
fn decade_label(exp: i32) -> String {
    if exp >= 0 { 10_i64.pow(exp as u32).to_string() } else { 10f64.powi(exp).to_string() }
}
