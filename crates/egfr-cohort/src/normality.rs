use egfr_stats::shapiro::ShapiroWilk;
use serde::Serialize;

use crate::{dataset::Dataset, outcome::Outcome, subgroup::Subgroup};

/// Shapiro-Wilk test of the ages in one subgroup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalityCheck {
    pub subgroup: Subgroup,
    pub n: usize,
    pub shapiro: Outcome<ShapiroWilk>,
}

impl NormalityCheck {
    #[must_use]
    pub fn run(dataset: &Dataset, subgroup: Subgroup) -> Self {
        let ages = dataset.ages(&subgroup);
        let shapiro = Outcome::from(ShapiroWilk::test(&ages));
        if let Outcome::Unavailable { reason } = &shapiro {
            log::warn!("Shapiro-Wilk unavailable for {subgroup}: {reason}");
        }
        Self {
            subgroup,
            n: ages.len(),
            shapiro,
        }
    }

    /// Returns `true` when normality is rejected at level `alpha`.
    #[must_use]
    pub fn rejects_normality(&self, alpha: f64) -> Option<bool> {
        self.shapiro.as_computed().map(|sw| sw.p_value < alpha)
    }
}

#[cfg(test)]
mod tests {
    use crate::config::DatasetConfig;

    use super::*;

    fn dataset(rows: &[(&str, f64)]) -> Dataset {
        let mut text = "EGFR type;Возр;Пол;Статус курения\n".to_owned();
        for (mutation, age) in rows {
            text.push_str(&format!("{mutation};{age};м;\n"));
        }
        Dataset::from_reader(text.as_bytes(), &DatasetConfig::default()).unwrap()
    }

    #[test]
    fn test_small_subgroup_is_unavailable() {
        let data = dataset(&[("ex20ins", 50.0), ("ex20ins", 60.0), ("WT", 70.0)]);
        let check = NormalityCheck::run(&data, Subgroup::Ex20Ins);
        assert_eq!(check.n, 2);
        assert!(check.shapiro.is_unavailable());
        assert_eq!(check.rejects_normality(0.05), None);
    }

    #[test]
    fn test_symmetric_ages_are_not_rejected() {
        let ages = [48.0, 52.0, 55.0, 57.0, 58.0, 60.0, 61.0, 63.0, 65.0, 68.0, 72.0];
        let rows = ages.iter().map(|a| ("L858R", *a)).collect::<Vec<_>>();
        let check = NormalityCheck::run(&dataset(&rows), Subgroup::L858R);
        assert_eq!(check.n, ages.len());
        assert_eq!(check.rejects_normality(0.05), Some(false));
    }

    #[test]
    fn test_skewed_ages_are_rejected() {
        let mut ages = vec![50.0; 6];
        ages.extend([51.0, 51.0, 52.0, 53.0, 55.0, 60.0, 75.0, 90.0]);
        let rows = ages.iter().map(|a| ("WT", *a)).collect::<Vec<_>>();
        let check = NormalityCheck::run(&dataset(&rows), Subgroup::WildType);
        assert_eq!(check.rejects_normality(0.05), Some(true));
    }
}
