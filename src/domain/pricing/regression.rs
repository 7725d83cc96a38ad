use super::errors::RegressionError;

// ============================================================================
// Simple Linear Regression (ordinary least squares, one feature)
// ============================================================================
//
//   slope     = Σ(x - x̄)(y - ȳ) / Σ(x - x̄)²
//   intercept = ȳ - slope · x̄
//
// With no variance in x the line is flat through the mean of y.
//
// ============================================================================

/// A fitted line `y = slope · x + intercept`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearModel {
    pub slope: f64,
    pub intercept: f64,
    pub observations: usize,
}

impl LinearModel {
    /// Fit over `(x, y)` samples
    pub fn fit(samples: &[(f64, f64)]) -> Result<Self, RegressionError> {
        if samples.is_empty() {
            return Err(RegressionError::EmptySample);
        }

        let n = samples.len() as f64;
        let mean_x = samples.iter().map(|(x, _)| x).sum::<f64>() / n;
        let mean_y = samples.iter().map(|(_, y)| y).sum::<f64>() / n;

        let (covariance, variance) = samples.iter().fold((0.0, 0.0), |(cov, var), (x, y)| {
            let dx = x - mean_x;
            (cov + dx * (y - mean_y), var + dx * dx)
        });

        let slope = if variance.abs() <= f64::EPSILON {
            0.0
        } else {
            covariance / variance
        };

        Ok(Self {
            slope,
            intercept: mean_y - slope * mean_x,
            observations: samples.len(),
        })
    }

    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Round to two decimal places, ties to even on the exact binary value.
///
/// Goes through the exact decimal formatter instead of scaling by 100, which
/// would round twice (`1.115` is stored just below the tie and must give
/// `1.11`).
pub fn round_to_cents(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    format!("{value:.2}").parse().unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_empty_sample_is_rejected() {
        assert_eq!(LinearModel::fit(&[]), Err(RegressionError::EmptySample));
    }

    #[test]
    fn test_exact_line_extrapolates() {
        let model = LinearModel::fit(&[(10.0, 100.0), (20.0, 150.0), (30.0, 200.0)]).unwrap();

        assert_close(model.slope, 5.0);
        assert_close(model.intercept, 50.0);
        assert_close(model.predict(40.0), 250.0);
        assert_eq!(model.observations, 3);
    }

    #[test]
    fn test_identical_quantities_predict_mean_price() {
        let model = LinearModel::fit(&[(10.0, 5.0), (10.0, 7.0), (10.0, 9.0)]).unwrap();

        assert_eq!(model.slope, 0.0);
        for x in [0.0, 10.0, 1_000.0, -5.0] {
            assert_close(model.predict(x), 7.0);
        }
    }

    #[test]
    fn test_single_observation_is_flat() {
        let model = LinearModel::fit(&[(3.0, 42.5)]).unwrap();

        assert_eq!(model.slope, 0.0);
        assert_close(model.intercept, 42.5);
        assert_close(model.predict(100.0), 42.5);
    }

    #[test]
    fn test_noisy_fit_matches_closed_form() {
        // x̄ = 2.5, ȳ = 4.0, Sxy = 6.5, Sxx = 5.0
        let model = LinearModel::fit(&[(1.0, 2.0), (2.0, 3.5), (3.0, 4.5), (4.0, 6.0)]).unwrap();

        assert_close(model.slope, 1.3);
        assert_close(model.intercept, 0.75);
    }

    #[test]
    fn test_negative_slope() {
        let model = LinearModel::fit(&[(1.0, 10.0), (2.0, 8.0), (3.0, 6.0)]).unwrap();
        assert_close(model.slope, -2.0);
        assert_close(model.predict(10.0), -8.0);
    }

    #[test]
    fn test_round_to_cents() {
        assert_eq!(round_to_cents(7.0), 7.0);
        assert_eq!(round_to_cents(1.234), 1.23);
        assert_eq!(round_to_cents(1.236), 1.24);
        assert_eq!(round_to_cents(-3.14159), -3.14);
    }

    #[test]
    fn test_round_to_cents_ties_go_to_even() {
        assert_eq!(round_to_cents(0.125), 0.12);
        assert_eq!(round_to_cents(0.375), 0.38);
        assert_eq!(round_to_cents(-0.125), -0.12);
        assert_eq!(round_to_cents(2.5), 2.5);
    }

    #[test]
    fn test_round_to_cents_uses_the_stored_value() {
        assert_eq!(round_to_cents(1.115), 1.11);
        assert_eq!(round_to_cents(2.675), 2.67);
        assert_eq!(round_to_cents(1.005), 1.0);
    }

    #[test]
    fn test_round_to_cents_passes_non_finite_through() {
        assert!(round_to_cents(f64::NAN).is_nan());
        assert_eq!(round_to_cents(f64::INFINITY), f64::INFINITY);
    }
}
