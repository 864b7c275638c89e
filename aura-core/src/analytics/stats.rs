//! Statistical primitives
//!
//! Every analyzer goes through these functions; none of them re-derives a
//! mean or a correlation inline. Variance is the population variance
//! (divide by `n`) everywhere.
//!
//! | Function | Degenerate input | Result |
//! |----------|------------------|--------|
//! | [`mean`], [`variance`], [`std_dev`] | empty | `None` |
//! | [`pearson`] | zero variance in either series | `0.0` |
//! | [`linear_regression`] | all `x` equal | slope `0`, intercept `mean(y)` |
//! | [`r_squared`] | constant `y` | `0.0` |

use serde::Serialize;

/// Sums of squares below this are treated as zero.
const ZERO_SPREAD: f64 = 1e-12;

/// Arithmetic mean. `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Population variance. `None` for an empty slice.
pub fn variance(values: &[f64]) -> Option<f64> {
    let m = mean(values)?;
    let sum_sq: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    Some(sum_sq / values.len() as f64)
}

/// Population standard deviation. `None` for an empty slice.
pub fn std_dev(values: &[f64]) -> Option<f64> {
    variance(values).map(f64::sqrt)
}

/// Means and centered sums `(x̄, ȳ, Σ(x-x̄)², Σ(y-ȳ)², Σ(x-x̄)(y-ȳ))` over the common prefix.
fn centered_sums(xs: &[f64], ys: &[f64]) -> Option<(f64, f64, f64, f64, f64)> {
    let n = xs.len().min(ys.len());
    let mx = mean(&xs[..n])?;
    let my = mean(&ys[..n])?;

    let (mut sxx, mut syy, mut sxy) = (0.0, 0.0, 0.0);
    for (x, y) in xs.iter().zip(ys.iter()) {
        let dx = x - mx;
        let dy = y - my;
        sxx += dx * dx;
        syy += dy * dy;
        sxy += dx * dy;
    }
    Some((mx, my, sxx, syy, sxy))
}

/// Pearson correlation coefficient in `[-1, 1]`.
///
/// Zero variance in either series (or empty input) yields `0.0`.
/// Series of unequal length are compared over their common prefix.
pub fn pearson(xs: &[f64], ys: &[f64]) -> f64 {
    let Some((_, _, sxx, syy, sxy)) = centered_sums(xs, ys) else {
        return 0.0;
    };
    if sxx <= ZERO_SPREAD || syy <= ZERO_SPREAD {
        return 0.0;
    }
    (sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0)
}

/// A fitted line `y = slope * x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearFit {
    /// Value of the line at `x`.
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Least-squares line through `(xs[i], ys[i])`.
///
/// `None` for empty input. When every `x` is equal the slope is `0` and the
/// intercept is `mean(y)`.
pub fn linear_regression(xs: &[f64], ys: &[f64]) -> Option<LinearFit> {
    let (mx, my, sxx, _, sxy) = centered_sums(xs, ys)?;
    if sxx <= ZERO_SPREAD {
        return Some(LinearFit {
            slope: 0.0,
            intercept: my,
        });
    }
    let slope = sxy / sxx;
    Some(LinearFit {
        slope,
        intercept: my - slope * mx,
    })
}

/// Coefficient of determination of `fit` over the data.
///
/// A constant `y` (nothing to explain) yields `0.0`.
pub fn r_squared(xs: &[f64], ys: &[f64], fit: &LinearFit) -> f64 {
    let n = xs.len().min(ys.len());
    let Some(my) = mean(&ys[..n]) else {
        return 0.0;
    };

    let ss_total: f64 = ys[..n].iter().map(|y| (y - my).powi(2)).sum();
    if ss_total <= ZERO_SPREAD {
        return 0.0;
    }
    let ss_residual: f64 = xs
        .iter()
        .zip(ys.iter())
        .map(|(x, y)| (y - fit.predict(*x)).powi(2))
        .sum();

    1.0 - ss_residual / ss_total
}

/// Round to one decimal place.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Fraction in `[0, 1]` as a whole percent.
pub fn percent(fraction: f64) -> u8 {
    (fraction * 100.0).round().clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_empty_inputs() {
        assert_eq!(mean(&[]), None);
        assert_eq!(variance(&[]), None);
        assert_eq!(std_dev(&[]), None);
        assert_eq!(linear_regression(&[], &[]), None);
        assert_eq!(pearson(&[], &[]), 0.0);
    }

    #[test]
    fn test_population_variance() {
        // Population variance of 2,4,4,4,5,5,7,9 is exactly 4
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_eq!(mean(&values), Some(5.0));
        assert!((variance(&values).unwrap() - 4.0).abs() < EPS);
        assert!((std_dev(&values).unwrap() - 2.0).abs() < EPS);
    }

    #[test]
    fn test_variance_never_negative() {
        let samples: [&[f64]; 4] = [
            &[5.0],
            &[1.0, 10.0],
            &[0.1, 0.1, 0.1],
            &[3.3, 7.7, 1.1, 9.9, 4.4],
        ];
        for values in samples {
            assert!(variance(values).unwrap() >= 0.0);
        }
    }

    #[test]
    fn test_pearson_bounds_and_symmetry() {
        let xs = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let ys = [2.0, 1.0, 4.0, 3.0, 7.0, 5.0];
        let r = pearson(&xs, &ys);
        assert!((-1.0..=1.0).contains(&r));
        assert_eq!(r, pearson(&ys, &xs));

        let inverted: Vec<f64> = xs.iter().map(|x| 10.0 - 2.0 * x).collect();
        assert!((pearson(&xs, &inverted) + 1.0).abs() < EPS);
        assert!((pearson(&xs, &xs) - 1.0).abs() < EPS);
    }

    #[test]
    fn test_pearson_constant_series_is_zero() {
        let constant = [5.0, 5.0, 5.0, 5.0];
        let ys = [1.0, 7.0, 3.0, 9.0];
        assert_eq!(pearson(&constant, &ys), 0.0);
        assert_eq!(pearson(&ys, &constant), 0.0);

        let tenths = [0.1, 0.1, 0.1];
        assert_eq!(pearson(&tenths, &[1.0, 2.0, 3.0]), 0.0);
    }

    #[test]
    fn test_regression_recovers_line() {
        let xs: Vec<f64> = (0..10).map(f64::from).collect();
        let ys: Vec<f64> = xs.iter().map(|x| 1.5 * x - 2.0).collect();

        let fit = linear_regression(&xs, &ys).unwrap();
        assert!((fit.slope - 1.5).abs() < EPS);
        assert!((fit.intercept + 2.0).abs() < EPS);
        assert!((r_squared(&xs, &ys, &fit) - 1.0).abs() < EPS);
    }

    #[test]
    fn test_regression_degenerate_x() {
        let xs = [3.0, 3.0, 3.0];
        let ys = [1.0, 2.0, 6.0];
        let fit = linear_regression(&xs, &ys).unwrap();
        assert_eq!(fit.slope, 0.0);
        assert!((fit.intercept - 3.0).abs() < EPS);
    }

    #[test]
    fn test_r_squared_constant_y_is_zero() {
        let xs = [0.0, 1.0, 2.0, 3.0];
        let ys = [4.0, 4.0, 4.0, 4.0];
        let fit = linear_regression(&xs, &ys).unwrap();
        assert_eq!(fit.slope, 0.0);
        assert_eq!(r_squared(&xs, &ys, &fit), 0.0);
    }

    #[test]
    fn test_rounding_helpers() {
        assert_eq!(round1(6.44), 6.4);
        assert_eq!(round1(6.46), 6.5);
        assert_eq!(percent(0.456), 46);
        assert_eq!(percent(1.3), 100);
        assert_eq!(percent(-0.2), 0);
    }
}
