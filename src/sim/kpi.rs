//! Post-hoc KPI computation from recorded histories.

use std::fmt;

/// Aggregate indicators derived from one recorded series.
///
/// Computed post-hoc from append-only histories so the reported metrics
/// always agree with the exported data.
#[derive(Debug, Clone)]
pub struct KpiReport {
    /// Number of completed steps in the series.
    pub steps: usize,
    /// Mean absolute value of the series.
    pub mean_abs: f32,
    /// Largest absolute value of the series.
    pub peak_abs: f32,
}

impl KpiReport {
    /// Computes indicators over a recorded series (e.g. residual demand or
    /// grid balance per step).
    pub fn from_series(series: &[f32]) -> Self {
        if series.is_empty() {
            return Self {
                steps: 0,
                mean_abs: 0.0,
                peak_abs: 0.0,
            };
        }

        let mut sum_abs = 0.0f32;
        let mut peak_abs = 0.0f32;
        for value in series {
            let abs = value.abs();
            sum_abs += abs;
            peak_abs = peak_abs.max(abs);
        }

        Self {
            steps: series.len(),
            mean_abs: sum_abs / series.len() as f32,
            peak_abs,
        }
    }
}

impl fmt::Display for KpiReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} steps | mean |value| = {:.3} | peak |value| = {:.3}",
            self.steps, self.mean_abs, self.peak_abs
        )
    }
}

#[cfg(test)]
mod tests {
    use super::KpiReport;

    #[test]
    fn empty_series_reports_zeros() {
        let report = KpiReport::from_series(&[]);
        assert_eq!(report.steps, 0);
        assert_eq!(report.mean_abs, 0.0);
        assert_eq!(report.peak_abs, 0.0);
    }

    #[test]
    fn mean_and_peak_use_absolute_values() {
        let report = KpiReport::from_series(&[1.0, -3.0, 2.0]);
        assert_eq!(report.steps, 3);
        assert!((report.mean_abs - 2.0).abs() < 1e-6);
        assert_eq!(report.peak_abs, 3.0);
    }

    #[test]
    fn display_does_not_panic() {
        let report = KpiReport::from_series(&[0.5, -0.5]);
        let s = format!("{report}");
        assert!(!s.is_empty());
    }
}
