//! Tests of association on contingency tables of counts.
//!
//! - [`ContingencyTable::fisher_exact`]: two-sided Fisher's exact test (2×2 only)
//! - [`ContingencyTable::chi_square`]: chi-square test of independence (r×c),
//!   with Yates' continuity correction when there is one degree of freedom

use serde::Serialize;
use statrs::distribution::{ChiSquared, ContinuousCDF, Discrete, Hypergeometric};

use crate::StatsError;

/// Relative tolerance used when comparing table probabilities in Fisher's test.
const FISHER_RELATIVE_TOLERANCE: f64 = 1e-7;

/// A rectangular table of observed counts.
///
/// Rows and columns are two categorical variables; cell `(i, j)` counts
/// observations falling in row category `i` and column category `j`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContingencyTable {
    cells: Vec<Vec<u64>>,
}

/// Result of Fisher's exact test.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FisherExact {
    /// Sample odds ratio `a·d / (b·c)`.
    ///
    /// Infinite when `b·c = 0`; `NaN` when a row or column is empty.
    pub odds_ratio: f64,
    pub p_value: f64,
}

/// Result of the chi-square test of independence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChiSquare {
    pub statistic: f64,
    pub p_value: f64,
    pub dof: usize,
    /// Expected frequencies under independence, same shape as the table.
    pub expected: Vec<Vec<f64>>,
    /// Whether Yates' continuity correction was applied.
    pub yates_corrected: bool,
}

impl ContingencyTable {
    /// Creates a table from rows of counts.
    ///
    /// # Errors
    ///
    /// Returns [`StatsError::MalformedTable`] if there are no rows, no columns,
    /// or rows of different lengths.
    pub fn new(cells: Vec<Vec<u64>>) -> Result<Self, StatsError> {
        let cols = cells.first().map_or(0, Vec::len);
        if cols == 0 || cells.iter().any(|row| row.len() != cols) {
            return Err(StatsError::MalformedTable);
        }
        Ok(Self { cells })
    }

    /// Creates a 2×2 table `[[a, b], [c, d]]`.
    #[must_use]
    pub fn two_by_two(a: u64, b: u64, c: u64, d: u64) -> Self {
        Self {
            cells: vec![vec![a, b], vec![c, d]],
        }
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.cells[0].len()
    }

    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> u64 {
        self.cells[row][col]
    }

    #[must_use]
    pub fn as_rows(&self) -> &[Vec<u64>] {
        &self.cells
    }

    #[must_use]
    pub fn row_sums(&self) -> Vec<u64> {
        self.cells.iter().map(|row| row.iter().sum()).collect()
    }

    #[must_use]
    pub fn col_sums(&self) -> Vec<u64> {
        (0..self.cols())
            .map(|j| self.cells.iter().map(|row| row[j]).sum())
            .collect()
    }

    #[must_use]
    pub fn total(&self) -> u64 {
        self.row_sums().iter().sum()
    }

    /// Two-sided Fisher's exact test.
    ///
    /// The p-value sums the hypergeometric probabilities of every table with the
    /// observed margins that is no more likely than the observed table.
    ///
    /// # Errors
    ///
    /// Returns [`StatsError::NotTwoByTwo`] for tables of any other shape.
    ///
    /// # Examples
    ///
    /// ```
    /// use egfr_stats::contingency::ContingencyTable;
    ///
    /// // Lady tasting tea
    /// let table = ContingencyTable::two_by_two(3, 1, 1, 3);
    /// let test = table.fisher_exact().unwrap();
    /// assert_eq!(test.odds_ratio, 9.0);
    /// assert!((test.p_value - 0.485_714).abs() < 1e-6);
    /// ```
    #[expect(clippy::cast_precision_loss)]
    pub fn fisher_exact(&self) -> Result<FisherExact, StatsError> {
        if self.rows() != 2 || self.cols() != 2 {
            return Err(StatsError::NotTwoByTwo {
                rows: self.rows(),
                cols: self.cols(),
            });
        }
        let [a, b, c, d] = [self.get(0, 0), self.get(0, 1), self.get(1, 0), self.get(1, 1)];

        if self.row_sums().contains(&0) || self.col_sums().contains(&0) {
            return Ok(FisherExact {
                odds_ratio: f64::NAN,
                p_value: 1.0,
            });
        }

        let odds_ratio = if b > 0 && c > 0 {
            (a as f64 * d as f64) / (b as f64 * c as f64)
        } else {
            f64::INFINITY
        };

        let row1 = a + b;
        let col1 = a + c;
        let total = a + b + c + d;
        // Margins are non-zero and consistent, so the distribution is well defined.
        let Ok(dist) = Hypergeometric::new(total, row1, col1) else {
            return Ok(FisherExact {
                odds_ratio,
                p_value: 1.0,
            });
        };
        // Work with log probabilities relative to the observed table; the
        // binomial coefficients overflow f64 for totals above about a thousand.
        let ln_observed = dist.ln_pmf(a);
        let ln_threshold = FISHER_RELATIVE_TOLERANCE.ln_1p();
        let lo = (row1 + col1).saturating_sub(total);
        let hi = row1.min(col1);
        let relative_mass = (lo..=hi)
            .map(|x| dist.ln_pmf(x) - ln_observed)
            .filter(|&d| d <= ln_threshold)
            .map(f64::exp)
            .sum::<f64>();
        let p_value = relative_mass * ln_observed.exp();

        Ok(FisherExact {
            odds_ratio,
            p_value: p_value.min(1.0),
        })
    }

    /// Chi-square test of independence.
    ///
    /// With one degree of freedom each observed count is moved towards its
    /// expected value by at most 0.5 (Yates' correction) before the statistic
    /// is computed.
    ///
    /// # Errors
    ///
    /// Returns [`StatsError::ZeroExpectedFrequency`] if any expected frequency is
    /// zero, i.e. a whole row or column of the table is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use egfr_stats::contingency::ContingencyTable;
    ///
    /// let table = ContingencyTable::two_by_two(10, 10, 10, 10);
    /// let test = table.chi_square().unwrap();
    /// assert_eq!(test.statistic, 0.0);
    /// assert!((test.p_value - 1.0).abs() < 1e-12);
    /// assert_eq!(test.dof, 1);
    /// ```
    #[expect(clippy::cast_precision_loss)]
    pub fn chi_square(&self) -> Result<ChiSquare, StatsError> {
        let row_sums = self.row_sums();
        let col_sums = self.col_sums();
        let total = self.total() as f64;

        let expected = row_sums
            .iter()
            .map(|&r| {
                col_sums
                    .iter()
                    .map(|&c| r as f64 * c as f64 / total)
                    .collect::<Vec<_>>()
            })
            .collect::<Vec<_>>();
        if expected.iter().flatten().any(|&e| e == 0.0 || e.is_nan()) {
            return Err(StatsError::ZeroExpectedFrequency);
        }

        let dof = (self.rows() - 1) * (self.cols() - 1);
        if dof == 0 {
            return Ok(ChiSquare {
                statistic: 0.0,
                p_value: 1.0,
                dof,
                expected,
                yates_corrected: false,
            });
        }

        let yates_corrected = dof == 1;
        let statistic = self
            .cells
            .iter()
            .flatten()
            .zip(expected.iter().flatten())
            .map(|(&o, &e)| {
                let mut diff = o as f64 - e;
                if yates_corrected {
                    diff = diff.signum() * (diff.abs() - 0.5).max(0.0);
                }
                diff * diff / e
            })
            .sum::<f64>();

        let p_value = match ChiSquared::new(dof as f64) {
            Ok(dist) => dist.sf(statistic),
            Err(_) => f64::NAN,
        };

        Ok(ChiSquare {
            statistic,
            p_value,
            dof,
            expected,
            yates_corrected,
        })
    }
}
