use serde::Serialize;

use crate::percentiles;

/// Whisker reach as a multiple of the interquartile range.
pub const WHISKER_IQR_FACTOR: f64 = 1.5;

/// Summary needed to draw one box of a box plot.
///
/// The box spans Q1..Q3 with a line at the median. Whiskers extend to the most
/// extreme observations still within `1.5 * IQR` of the box; anything beyond
/// is listed as an outlier.
///
/// # Examples
///
/// ```
/// use egfr_stats::box_plot::BoxPlotStats;
///
/// let ages = [45.0, 52.0, 55.0, 58.0, 61.0, 63.0, 90.0];
/// let summary = BoxPlotStats::new(ages).unwrap();
/// assert_eq!(summary.median, 58.0);
/// assert_eq!(summary.outliers, vec![90.0]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxPlotStats {
    pub count: usize,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub whisker_low: f64,
    pub whisker_high: f64,
    pub outliers: Vec<f64>,
}

impl BoxPlotStats {
    /// Computes the summary from unsorted values. Returns `None` for empty input.
    #[must_use]
    pub fn new<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut sorted = values.into_iter().collect::<Vec<_>>();
        sorted.sort_by(f64::total_cmp);
        Self::from_sorted(&sorted)
    }

    /// Computes the summary from values sorted in ascending order.
    #[must_use]
    pub fn from_sorted(sorted_values: &[f64]) -> Option<Self> {
        let (q1, median, q3) = percentiles::quartiles(sorted_values)?;
        let reach = WHISKER_IQR_FACTOR * (q3 - q1);
        let low_fence = q1 - reach;
        let high_fence = q3 + reach;

        let inside = || {
            sorted_values
                .iter()
                .copied()
                .filter(|v| (low_fence..=high_fence).contains(v))
        };
        // Fall back to the box edges for NaN-contaminated input.
        let whisker_low = inside().next().unwrap_or(q1);
        let whisker_high = inside().last().unwrap_or(q3);
        let outliers = sorted_values
            .iter()
            .copied()
            .filter(|v| !(low_fence..=high_fence).contains(v))
            .collect();

        Some(Self {
            count: sorted_values.len(),
            q1,
            median,
            q3,
            whisker_low,
            whisker_high,
            outliers,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        assert!(BoxPlotStats::new([]).is_none());
    }

    #[test]
    fn test_no_outliers() {
        let summary = BoxPlotStats::new([1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        assert_eq!(summary.q1, 2.0);
        assert_eq!(summary.q3, 4.0);
        assert_eq!(summary.whisker_low, 1.0);
        assert_eq!(summary.whisker_high, 5.0);
        assert!(summary.outliers.is_empty());
    }

    #[test]
    fn test_outliers_on_both_sides() {
        let summary = BoxPlotStats::new([-50.0, 10.0, 11.0, 12.0, 13.0, 14.0, 80.0]).unwrap();
        assert_eq!(summary.outliers, vec![-50.0, 80.0]);
        assert_eq!(summary.whisker_low, 10.0);
        assert_eq!(summary.whisker_high, 14.0);
    }

    #[test]
    fn test_constant_sample() {
        let summary = BoxPlotStats::new([60.0; 4]).unwrap();
        assert_eq!(summary.whisker_low, 60.0);
        assert_eq!(summary.whisker_high, 60.0);
        assert!(summary.outliers.is_empty());
    }
}
