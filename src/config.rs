use std::path::PathBuf;

// ---------------------------------------------------------------------------
// Dashboard configuration
// ---------------------------------------------------------------------------

/// Payload slider domain in kilograms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderConfig {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 10_000.0,
            step: 1_000.0,
        }
    }
}

impl SliderConfig {
    /// Grow the domain (in whole steps) so it contains `[low, high]`.
    pub fn widened_to(self, low: f64, high: f64) -> Self {
        let mut out = self;
        if low < out.min {
            out.min = (low / out.step).floor() * out.step;
        }
        if high > out.max {
            out.max = (high / out.step).ceil() * out.step;
        }
        out
    }

    /// Tick mark positions, one per step.
    pub fn marks(&self) -> Vec<f64> {
        if self.step <= 0.0 {
            return vec![self.min, self.max];
        }
        let n = ((self.max - self.min) / self.step).round() as usize;
        (0..=n).map(|i| self.min + i as f64 * self.step).collect()
    }
}

#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub window_title: String,
    pub inner_size: [f32; 2],
    pub min_inner_size: [f32; 2],
    pub slider: SliderConfig,
    /// Launch table to load instead of the built-in sample.
    pub data_path: Option<PathBuf>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            window_title: "Launch Dash – Falcon 9 Landings".to_string(),
            inner_size: [1280.0, 860.0],
            min_inner_size: [720.0, 480.0],
            slider: SliderConfig::default(),
            data_path: None,
        }
    }
}

impl DashboardConfig {
    /// Defaults plus an optional data file as the first positional argument.
    pub fn from_args<I: IntoIterator<Item = String>>(args: I) -> Self {
        let data_path = args.into_iter().nth(1).map(PathBuf::from);
        Self {
            data_path,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_slider_has_eleven_marks() {
        let marks = SliderConfig::default().marks();
        assert_eq!(marks.len(), 11);
        assert_eq!(marks[0], 0.0);
        assert_eq!(marks[10], 10_000.0);
    }

    #[test]
    fn widening_rounds_to_whole_steps() {
        let s = SliderConfig::default().widened_to(500.0, 15_600.0);
        assert_eq!(s.min, 0.0);
        assert_eq!(s.max, 16_000.0);
    }

    #[test]
    fn first_argument_is_data_path() {
        let cfg = DashboardConfig::from_args(["launch-dash".to_string(), "launches.csv".to_string()]);
        assert_eq!(cfg.data_path, Some(PathBuf::from("launches.csv")));
        assert!(DashboardConfig::from_args(["launch-dash".to_string()]).data_path.is_none());
    }
}
