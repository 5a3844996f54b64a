//! Statistical routines for the EGFR cohort analysis.
//!
//! This crate is the numerical layer of the workspace. It knows nothing about
//! patients or mutations; it works on plain slices of `f64` values and count
//! tables.
//!
//! - **Descriptive statistics**: count, mean, median, range, standard deviation
//! - **Percentiles**: linearly interpolated quantiles
//! - **Box plots**: quartiles, 1.5·IQR whiskers and outliers
//! - **Mann-Whitney U**: two-sided rank-sum test with exact and asymptotic p-values
//! - **Shapiro-Wilk**: normality test (Royston's AS R94 algorithm)
//! - **Contingency tables**: Fisher's exact test and the chi-square test of independence
//!
//! # Modules
//!
//! - [`descriptive`]: Descriptive statistics for summarizing datasets
//! - [`percentiles`]: Quantile computation
//! - [`box_plot`]: Box-plot summaries
//! - [`rank`]: Tie-aware ranking shared by the rank-based tests
//! - [`mann_whitney`]: Mann-Whitney U test
//! - [`shapiro`]: Shapiro-Wilk normality test
//! - [`contingency`]: Fisher's exact and chi-square tests on count tables
//!
//! # Examples
//!
//! ## Comparing two samples
//!
//! ```
//! use egfr_stats::mann_whitney::MannWhitneyU;
//!
//! let young = [34.0, 41.0, 45.0, 52.0];
//! let old = [61.0, 66.0, 70.0, 74.0];
//! let test = MannWhitneyU::test(&young, &old).unwrap();
//! assert_eq!(test.statistic, 0.0);
//! assert!(test.p_value < 0.05);
//! ```
//!
//! ## Testing association in a 2×2 table
//!
//! ```
//! use egfr_stats::contingency::ContingencyTable;
//!
//! let table = ContingencyTable::new(vec![vec![8, 2], vec![1, 5]]).unwrap();
//! let fisher = table.fisher_exact().unwrap();
//! assert_eq!(fisher.odds_ratio, 20.0);
//! ```

pub mod box_plot;
pub mod contingency;
pub mod descriptive;
pub mod mann_whitney;
pub mod percentiles;
pub mod rank;
pub mod shapiro;

/// Errors raised when a test cannot be computed for the given input.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum StatsError {
    #[display("sample is empty")]
    EmptySample,
    #[display("at least {required} observations are required, got {actual}")]
    TooFewObservations { required: usize, actual: usize },
    #[display("all observations are identical")]
    ZeroRange,
    #[display("contingency table must be a non-empty rectangle")]
    MalformedTable,
    #[display("test requires a 2x2 table, got {rows}x{cols}")]
    NotTwoByTwo { rows: usize, cols: usize },
    #[display("expected frequency table has a zero element")]
    ZeroExpectedFrequency,
}
