// ── Summary statistics ────────────────────────────────────────────────────────

/// Mean / min / max / standard deviation over a set of session durations.
#[derive(Debug, Clone, PartialEq)]
pub struct DurationStats {
    /// Number of values summarised.
    pub count: usize,
    /// Arithmetic mean.
    pub mean: f64,
    /// Smallest value.
    pub min: f64,
    /// Largest value.
    pub max: f64,
    /// Sample standard deviation (n − 1 denominator); `0.0` when fewer
    /// than two values exist.
    pub std_dev: f64,
}

impl DurationStats {
    /// Summarise `values`. Returns `None` for an empty slice so that
    /// callers surface "no sessions" explicitly instead of a zero row.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let count = values.len();
        let sum: f64 = values.iter().sum();
        let mean = sum / count as f64;

        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for &v in values {
            if v < min {
                min = v;
            }
            if v > max {
                max = v;
            }
        }

        let std_dev = if count < 2 {
            0.0
        } else {
            let variance: f64 = values
                .iter()
                .map(|v| {
                    let d = v - mean;
                    d * d
                })
                .sum::<f64>()
                / (count - 1) as f64;
            variance.sqrt()
        };

        Some(Self {
            count,
            mean,
            min,
            max,
            std_dev,
        })
    }
}
