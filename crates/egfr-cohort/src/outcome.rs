use egfr_stats::StatsError;
use serde::Serialize;

/// Result of a statistical test inside a report.
///
/// A test that cannot be computed (empty subgroup, degenerate table) does not
/// abort the report; it is recorded as unavailable together with the reason.
#[derive(Debug, Clone, PartialEq, Serialize, derive_more::IsVariant)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome<T> {
    Computed(T),
    Unavailable { reason: String },
}

impl<T> Outcome<T> {
    #[must_use]
    pub fn as_computed(&self) -> Option<&T> {
        match self {
            Outcome::Computed(value) => Some(value),
            Outcome::Unavailable { .. } => None,
        }
    }
}

impl<T> From<Result<T, StatsError>> for Outcome<T> {
    fn from(result: Result<T, StatsError>) -> Self {
        match result {
            Ok(value) => Outcome::Computed(value),
            Err(err) => Outcome::Unavailable {
                reason: err.to_string(),
            },
        }
    }
}

/// Percentage of `count` in `total`, or `None` when `total` is zero.
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn percentage(count: usize, total: usize) -> Option<f64> {
    (total > 0).then(|| count as f64 / total as f64 * 100.0)
}
