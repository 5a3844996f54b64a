//! Two-sided Mann-Whitney U test.
//!
//! The test compares the distributions of two independent samples using the
//! ranks of the pooled observations. It is the standard way of comparing ages
//! between two patient subgroups without assuming normality.
//!
//! # Method selection
//!
//! With [`Method::Auto`] the exact null distribution is used when there are no
//! ties, at least one sample has at most [`EXACT_MAX_SIZE`] observations and
//! `n1 * n2` does not exceed [`EXACT_MAX_PRODUCT`]. Otherwise the normal
//! approximation with tie correction and continuity correction is used.

use serde::Serialize;
use statrs::distribution::{ContinuousCDF, Normal};

use crate::{StatsError, rank::Ranking};

/// Largest size of the smaller sample for which `Auto` picks the exact method.
pub const EXACT_MAX_SIZE: usize = 8;

/// Largest `n1 * n2` for which `Auto` picks the exact method.
///
/// Building the exact distribution costs `O((n1 * n2)^2)` operations.
pub const EXACT_MAX_PRODUCT: usize = 4_000;

/// How the p-value is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, derive_more::Display)]
pub enum Method {
    /// Exact when feasible, asymptotic otherwise.
    #[default]
    #[display("auto")]
    Auto,
    /// Exact null distribution of U. Ties are not accounted for.
    #[display("exact")]
    Exact,
    /// Normal approximation with tie and continuity corrections.
    #[display("asymptotic")]
    Asymptotic,
}

/// Result of a two-sided Mann-Whitney U test.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MannWhitneyU {
    /// U statistic of the first sample: `R1 - n1 (n1 + 1) / 2`.
    pub statistic: f64,
    pub p_value: f64,
    /// Method that was actually used (never `Auto`).
    pub method: Method,
    pub n1: usize,
    pub n2: usize,
}

impl MannWhitneyU {
    /// Runs the test with automatic method selection.
    pub fn test(x: &[f64], y: &[f64]) -> Result<Self, StatsError> {
        Self::test_with_method(x, y, Method::Auto)
    }

    /// Runs the test with an explicit method.
    ///
    /// # Examples
    ///
    /// ```
    /// use egfr_stats::mann_whitney::{MannWhitneyU, Method};
    ///
    /// let males = [19.0, 22.0, 16.0, 29.0, 24.0];
    /// let females = [20.0, 11.0, 17.0, 12.0];
    /// let test = MannWhitneyU::test_with_method(&males, &females, Method::Exact).unwrap();
    /// assert_eq!(test.statistic, 17.0);
    /// assert!((test.p_value - 0.111_111).abs() < 1e-6);
    /// ```
    #[expect(clippy::cast_precision_loss)]
    pub fn test_with_method(x: &[f64], y: &[f64], method: Method) -> Result<Self, StatsError> {
        if x.is_empty() || y.is_empty() {
            return Err(StatsError::EmptySample);
        }
        let (n1, n2) = (x.len(), y.len());

        let pooled = x.iter().chain(y).copied().collect::<Vec<_>>();
        let ranking = Ranking::new(&pooled);
        let r1 = ranking.ranks[..n1].iter().sum::<f64>();
        let (n1f, n2f) = (n1 as f64, n2 as f64);
        let u1 = r1 - n1f * (n1f + 1.0) / 2.0;
        let u2 = n1f * n2f - u1;
        let u = f64::max(u1, u2);

        let method = match method {
            Method::Auto
                if !ranking.has_ties()
                    && n1.min(n2) <= EXACT_MAX_SIZE
                    && n1 * n2 <= EXACT_MAX_PRODUCT =>
            {
                Method::Exact
            }
            Method::Auto => Method::Asymptotic,
            method => method,
        };

        let p_value = match method {
            Method::Exact => 2.0 * exact_sf(u, n1, n2),
            _ => {
                let n = n1f + n2f;
                let mu = n1f * n2f / 2.0;
                let variance =
                    n1f * n2f / 12.0 * ((n + 1.0) - ranking.tie_term() / (n * (n - 1.0)));
                if variance <= 0.0 {
                    1.0
                } else {
                    let z = (u - mu - 0.5) / variance.sqrt();
                    2.0 * Normal::standard().sf(z)
                }
            }
        };

        Ok(Self {
            statistic: u1,
            p_value: p_value.clamp(0.0, 1.0),
            method,
            n1,
            n2,
        })
    }
}

/// `P(U >= u)` under the exact null distribution for sample sizes `n1`, `n2`.
#[expect(
    clippy::cast_sign_loss,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss
)]
fn exact_sf(u: f64, n1: usize, n2: usize) -> f64 {
    let counts = exact_counts(n1.min(n2), n1.max(n2));
    let total = counts.iter().sum::<f64>();
    let start = (u.ceil().max(0.0) as usize).min(counts.len());
    counts[start..].iter().sum::<f64>() / total
}

/// Number of sample arrangements yielding each value of U, for `u` in `0..=m*n`.
///
/// Uses the recurrence `f(i, j, u) = f(i - 1, j, u - j) + f(i, j - 1, u)`:
/// the largest pooled observation either belongs to the first sample (and
/// beats all `j` observations of the second) or to the second.
fn exact_counts(m: usize, n: usize) -> Vec<f64> {
    let max_u = m * n;
    let mut rows = vec![vec![0.0; max_u + 1]; m + 1];
    for row in &mut rows {
        row[0] = 1.0;
    }
    for j in 1..=n {
        for i in 1..=m {
            let (done, rest) = rows.split_at_mut(i);
            let lower = &done[i - 1];
            let row = &mut rest[0];
            // f(i - 1, j, u - j) vanishes for u > i * j
            for u in j..=(i * j).min(max_u) {
                row[u] += lower[u - j];
            }
        }
    }
    rows.pop().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use rand::{Rng as _, SeedableRng as _};
    use rand_distr::Normal as NormalDistr;
    use rand_pcg::Pcg64Mcg;

    use super::*;

    const MALES: [f64; 5] = [19.0, 22.0, 16.0, 29.0, 24.0];
    const FEMALES: [f64; 4] = [20.0, 11.0, 17.0, 12.0];

    #[test]
    fn test_empty_sample_is_error() {
        assert_eq!(
            MannWhitneyU::test(&[], &[1.0]),
            Err(StatsError::EmptySample)
        );
        assert_eq!(
            MannWhitneyU::test(&[1.0], &[]),
            Err(StatsError::EmptySample)
        );
    }

    #[test]
    fn test_exact_counts_small_table() {
        // m = 2, n = 2: U takes values 0..=4 with counts 1, 1, 2, 1, 1
        assert_eq!(exact_counts(2, 2), vec![1.0, 1.0, 2.0, 1.0, 1.0]);
    }

    #[test]
    fn test_exact_counts_total_is_binomial() {
        let total = exact_counts(4, 5).iter().sum::<f64>();
        assert_eq!(total, 126.0);
    }

    #[test]
    fn test_auto_selects_exact_without_ties() {
        let test = MannWhitneyU::test(&MALES, &FEMALES).unwrap();
        assert_eq!(test.method, Method::Exact);
        assert_eq!(test.statistic, 17.0);
        assert!((test.p_value - 2.0 * 7.0 / 126.0).abs() < 1e-12);
    }

    #[test]
    fn test_asymptotic_matches_normal_approximation() {
        let test =
            MannWhitneyU::test_with_method(&MALES, &FEMALES, Method::Asymptotic).unwrap();
        assert_eq!(test.method, Method::Asymptotic);
        assert!((test.p_value - 0.111_347).abs() < 1e-4);
    }

    #[test]
    fn test_statistic_is_for_first_sample() {
        let forward = MannWhitneyU::test(&MALES, &FEMALES).unwrap();
        let backward = MannWhitneyU::test(&FEMALES, &MALES).unwrap();
        assert_eq!(forward.statistic + backward.statistic, 20.0);
        assert!((forward.p_value - backward.p_value).abs() < 1e-12);
    }

    #[test]
    fn test_ties_force_asymptotic() {
        let test = MannWhitneyU::test(&[50.0, 60.0, 60.0], &[60.0, 70.0]).unwrap();
        assert_eq!(test.method, Method::Asymptotic);
    }

    #[test]
    fn test_large_second_sample_uses_asymptotic() {
        let x = [40.5, 55.25, 71.75];
        let y = (0..2_000).map(|i| 30.003 + f64::from(i) * 0.02).collect::<Vec<_>>();
        let test = MannWhitneyU::test(&x, &y).unwrap();
        assert_eq!(test.method, Method::Asymptotic);
        assert!(test.p_value > 0.05, "p = {}", test.p_value);

        let y = &y[..EXACT_MAX_PRODUCT / x.len()];
        let test = MannWhitneyU::test(&x, y).unwrap();
        assert_eq!(test.method, Method::Exact);
    }

    #[test]
    fn test_exact_counts_match_full_recurrence() {
        // Counts are symmetric and sum to C(m + n, m)
        let counts = exact_counts(3, 7);
        assert_eq!(counts.len(), 22);
        assert_eq!(counts.iter().sum::<f64>(), 120.0);
        assert!(counts.iter().eq(counts.iter().rev()));
    }

    #[test]
    fn test_identical_samples_have_p_value_one() {
        let test = MannWhitneyU::test(&[65.0; 4], &[65.0; 6]).unwrap();
        assert_eq!(test.statistic, 12.0);
        assert_eq!(test.p_value, 1.0);
    }

    #[test]
    fn test_shifted_samples_are_significant() {
        let mut rng = Pcg64Mcg::seed_from_u64(0x5eed);
        let young = NormalDistr::new(45.0, 8.0).unwrap();
        let old = NormalDistr::new(65.0, 8.0).unwrap();
        let x = (0..60).map(|_| rng.sample(young)).collect::<Vec<f64>>();
        let y = (0..60).map(|_| rng.sample(old)).collect::<Vec<f64>>();
        let test = MannWhitneyU::test(&x, &y).unwrap();
        assert_eq!(test.method, Method::Asymptotic);
        assert!(test.p_value < 1e-6, "p = {}", test.p_value);
    }
}
