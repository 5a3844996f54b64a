//! Shapiro-Wilk test of normality.
//!
//! Implements Royston's approximation (algorithm AS R94) for the coefficients
//! of the W statistic and for its null distribution. Valid for sample sizes
//! from 3 upward; the approximation was calibrated up to 5000 observations.

use serde::Serialize;
use statrs::distribution::{ContinuousCDF, Normal};

use crate::StatsError;

/// Smallest sample the test accepts.
pub const MIN_SAMPLE_SIZE: usize = 3;

const SMALL: f64 = 1e-19;

// Polynomial coefficients of AS R94, lowest degree first.
const C1: [f64; 6] = [0.0, 0.221_157, -0.147_981, -2.071_190, 4.434_685, -2.706_056];
const C2: [f64; 6] = [0.0, 0.042_981, -0.293_762, -1.752_461, 5.682_633, -3.582_633];
const C3: [f64; 4] = [0.544, -0.399_78, 0.025_054, -6.714e-4];
const C4: [f64; 4] = [1.3822, -0.778_57, 0.062_767, -0.002_032_2];
const C5: [f64; 4] = [-1.5861, -0.310_82, -0.083_751, 0.003_891_5];
const C6: [f64; 3] = [-0.4803, -0.082_676, 0.003_030_2];
const G: [f64; 2] = [-2.273, 0.459];

/// Result of a Shapiro-Wilk test.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShapiroWilk {
    /// The W statistic, in `(0, 1]`. Values close to 1 indicate normality.
    pub statistic: f64,
    pub p_value: f64,
    pub n: usize,
}

impl ShapiroWilk {
    /// Runs the test on unsorted values.
    ///
    /// # Errors
    ///
    /// * [`StatsError::TooFewObservations`] - fewer than three values
    /// * [`StatsError::ZeroRange`] - all values are identical
    ///
    /// # Examples
    ///
    /// ```
    /// use egfr_stats::shapiro::ShapiroWilk;
    ///
    /// let test = ShapiroWilk::test(&[1.0, 2.0, 3.0]).unwrap();
    /// assert!((test.statistic - 1.0).abs() < 1e-9);
    /// assert!((test.p_value - 1.0).abs() < 1e-6);
    /// ```
    #[expect(clippy::cast_precision_loss)]
    pub fn test(values: &[f64]) -> Result<Self, StatsError> {
        let n = values.len();
        if n < MIN_SAMPLE_SIZE {
            return Err(StatsError::TooFewObservations {
                required: MIN_SAMPLE_SIZE,
                actual: n,
            });
        }

        let mut x = values.to_vec();
        x.sort_by(f64::total_cmp);
        if x[n - 1] - x[0] < SMALL {
            return Err(StatsError::ZeroRange);
        }

        let a = coefficients(n);
        let mean = x.iter().sum::<f64>() / n as f64;
        let ssq = x.iter().map(|v| (v - mean).powi(2)).sum::<f64>();
        let numerator = a
            .iter()
            .enumerate()
            .map(|(i, ai)| ai * (x[n - 1 - i] - x[i]))
            .sum::<f64>();
        let w = (numerator * numerator / ssq).min(1.0);

        Ok(Self {
            statistic: w,
            p_value: p_value(w, n),
            n,
        })
    }
}

/// Evaluates `c[0] + c[1] x + c[2] x² + ...`.
fn poly(c: &[f64], x: f64) -> f64 {
    c.iter().rev().fold(0.0, |acc, &ci| acc * x + ci)
}

/// The first `n / 2` antisymmetric weights of the W statistic.
#[expect(clippy::cast_precision_loss)]
fn coefficients(n: usize) -> Vec<f64> {
    let half = n / 2;
    if n == 3 {
        return vec![std::f64::consts::FRAC_1_SQRT_2];
    }

    let std_normal = Normal::standard();
    let an25 = n as f64 + 0.25;
    let m = (1..=half)
        .map(|i| std_normal.inverse_cdf((i as f64 - 0.375) / an25))
        .collect::<Vec<_>>();
    let summ2 = 2.0 * m.iter().map(|mi| mi * mi).sum::<f64>();
    let ssumm2 = summ2.sqrt();
    let rsn = 1.0 / (n as f64).sqrt();

    let mut a = vec![0.0; half];
    a[0] = poly(&C1, rsn) - m[0] / ssumm2;
    let (first, fac) = if n > 5 {
        a[1] = -m[1] / ssumm2 + poly(&C2, rsn);
        let fac = ((summ2 - 2.0 * m[0].powi(2) - 2.0 * m[1].powi(2))
            / (1.0 - 2.0 * a[0].powi(2) - 2.0 * a[1].powi(2)))
        .sqrt();
        (2, fac)
    } else {
        let fac = ((summ2 - 2.0 * m[0].powi(2)) / (1.0 - 2.0 * a[0].powi(2))).sqrt();
        (1, fac)
    };
    for i in first..half {
        a[i] = -m[i] / fac;
    }
    a
}

/// Upper-tail p-value of W under normality.
#[expect(clippy::cast_precision_loss)]
fn p_value(w: f64, n: usize) -> f64 {
    if n == 3 {
        const PI6: f64 = 6.0 / std::f64::consts::PI;
        const STQR: f64 = std::f64::consts::FRAC_PI_3;
        return (PI6 * (w.sqrt().asin() - STQR)).clamp(0.0, 1.0);
    }

    let an = n as f64;
    let mut y = (1.0 - w).ln();
    let (mean, sd) = if n <= 11 {
        let gamma = poly(&G, an);
        if y >= gamma {
            return 1e-99;
        }
        y = -(gamma - y).ln();
        (poly(&C3, an), poly(&C4, an).exp())
    } else {
        let xx = an.ln();
        (poly(&C5, xx), poly(&C6, xx).exp())
    };
    Normal::standard().sf((y - mean) / sd)
}

#[cfg(test)]
mod tests {
    use rand::{Rng as _, SeedableRng as _};
    use rand_distr::{Exp, Normal as NormalDistr};
    use rand_pcg::Pcg64Mcg;

    use super::*;

    #[test]
    fn test_too_few_observations() {
        assert_eq!(
            ShapiroWilk::test(&[1.0, 2.0]),
            Err(StatsError::TooFewObservations {
                required: 3,
                actual: 2
            })
        );
    }

    #[test]
    fn test_constant_sample_is_error() {
        assert_eq!(ShapiroWilk::test(&[5.0; 10]), Err(StatsError::ZeroRange));
    }

    #[test]
    fn test_poly_evaluates_lowest_degree_first() {
        assert_eq!(poly(&[1.0, 2.0, 3.0], 2.0), 1.0 + 4.0 + 12.0);
    }

    #[test]
    fn test_coefficients_are_normalized() {
        // Full weight vector (antisymmetric) has unit length
        for n in [4, 5, 6, 10, 25, 101] {
            let a = coefficients(n);
            let norm = 2.0 * a.iter().map(|v| v * v).sum::<f64>();
            assert!((norm - 1.0).abs() < 1e-6, "n = {n}: |a|^2 = {norm}");
            assert!(a.windows(2).all(|w| w[0] >= w[1]), "n = {n}: {a:?}");
        }
    }

    #[test]
    fn test_three_points_skewed() {
        let test = ShapiroWilk::test(&[1.0, 2.0, 4.0]).unwrap();
        // W = (sqrt(1/2) * 3)^2 / (42 / 9)
        assert!((test.statistic - 4.5 / (42.0 / 9.0)).abs() < 1e-12);
        assert!(test.p_value > 0.0 && test.p_value < 1.0);
    }

    #[test]
    fn test_order_does_not_matter() {
        let a = ShapiroWilk::test(&[61.0, 45.0, 70.0, 58.0, 52.0, 66.0, 49.0]).unwrap();
        let b = ShapiroWilk::test(&[45.0, 49.0, 52.0, 58.0, 61.0, 66.0, 70.0]).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_normal_sample_is_not_rejected() {
        let mut rng = Pcg64Mcg::seed_from_u64(2024);
        let dist = NormalDistr::new(60.0, 10.0).unwrap();
        let ages = (0..150).map(|_| rng.sample(dist)).collect::<Vec<f64>>();
        let test = ShapiroWilk::test(&ages).unwrap();
        assert!(test.statistic > 0.95, "W = {}", test.statistic);
        assert!(test.p_value > 0.001, "p = {}", test.p_value);
    }

    #[test]
    fn test_exponential_sample_is_rejected() {
        let mut rng = Pcg64Mcg::seed_from_u64(2024);
        let dist = Exp::new(0.1).unwrap();
        let values = (0..150).map(|_| rng.sample(dist)).collect::<Vec<f64>>();
        let test = ShapiroWilk::test(&values).unwrap();
        assert!(test.p_value < 1e-4, "p = {}", test.p_value);
    }

    #[test]
    fn test_uniform_grid_reference_values() {
        // R shapiro.test(0:9): W = 0.97016, p-value = 0.8924
        let values = (0..10).map(f64::from).collect::<Vec<_>>();
        let test = ShapiroWilk::test(&values).unwrap();
        assert_eq!(test.n, 10);
        assert!((test.statistic - 0.970_164_6).abs() < 1e-6, "W = {}", test.statistic);
        assert!((test.p_value - 0.892_367_3).abs() < 1e-6, "p = {}", test.p_value);
    }
}
