/// Computes a quantile from sorted data.
///
/// Uses linear interpolation between the closest ranks: for `n` values the
/// quantile `q` sits at fractional position `h = (n - 1) * q`, and the result
/// interpolates between `sorted_values[floor(h)]` and `sorted_values[ceil(h)]`.
///
/// # Arguments
///
/// * `sorted_values` - Values sorted in ascending order
/// * `q` - The quantile to compute (0.0 to 1.0)
///
/// # Returns
///
/// The value at the specified quantile. Returns `f64::NAN` if the input is empty.
///
/// # Examples
///
/// ```
/// use egfr_stats::percentiles::compute_quantile;
///
/// let values = [1.0, 2.0, 3.0, 4.0];
/// assert_eq!(compute_quantile(&values, 0.5), 2.5);
/// assert_eq!(compute_quantile(&values, 0.25), 1.75);
/// assert_eq!(compute_quantile(&values, 1.0), 4.0);
/// ```
#[expect(
    clippy::cast_sign_loss,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss
)]
#[must_use]
pub fn compute_quantile(sorted_values: &[f64], q: f64) -> f64 {
    debug_assert!(
        sorted_values.is_sorted_by(|a, b| a <= b),
        "values must be sorted in ascending order"
    );
    if sorted_values.is_empty() {
        return f64::NAN;
    }
    let q = q.clamp(0.0, 1.0);
    let h = (sorted_values.len() - 1) as f64 * q;
    let lower = h.floor() as usize;
    let upper = h.ceil() as usize;
    let frac = h - h.floor();
    sorted_values[lower] + (sorted_values[upper] - sorted_values[lower]) * frac
}

/// Quartiles (Q1, median, Q3) of sorted data.
///
/// Returns `None` for empty input.
#[must_use]
pub fn quartiles(sorted_values: &[f64]) -> Option<(f64, f64, f64)> {
    if sorted_values.is_empty() {
        return None;
    }
    Some((
        compute_quantile(sorted_values, 0.25),
        compute_quantile(sorted_values, 0.5),
        compute_quantile(sorted_values, 0.75),
    ))
}
