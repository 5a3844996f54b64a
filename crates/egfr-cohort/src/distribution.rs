//! Age distributions for box plots.

use egfr_stats::box_plot::BoxPlotStats;
use serde::Serialize;

use crate::{dataset::Dataset, subgroup::Subgroup};

/// Box-plot summary of the ages in one subgroup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgeDistribution {
    pub subgroup: Subgroup,
    /// `None` when the subgroup is empty.
    pub summary: Option<BoxPlotStats>,
}

impl AgeDistribution {
    #[must_use]
    pub fn new(dataset: &Dataset, subgroup: Subgroup) -> Self {
        let summary = BoxPlotStats::new(dataset.ages(&subgroup));
        Self { subgroup, summary }
    }
}

/// Several age distributions drawn side by side.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotPanel {
    pub title: String,
    pub groups: Vec<AgeDistribution>,
}

impl PlotPanel {
    /// Summarizes each of `subgroups`; the title lists their labels.
    #[must_use]
    pub fn new<I>(dataset: &Dataset, subgroups: I) -> Self
    where
        I: IntoIterator<Item = Subgroup>,
    {
        let groups = subgroups
            .into_iter()
            .map(|g| AgeDistribution::new(dataset, g))
            .collect::<Vec<_>>();
        let title = groups
            .iter()
            .map(|g| g.subgroup.label())
            .collect::<Vec<_>>()
            .join(" vs ");
        Self { title, groups }
    }

    /// Smallest and largest value drawn in the panel, including outliers.
    #[must_use]
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.groups
            .iter()
            .filter_map(|g| g.summary.as_ref())
            .flat_map(|s| {
                s.outliers
                    .iter()
                    .copied()
                    .chain([s.whisker_low, s.whisker_high])
            })
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((f64::min(lo, v), f64::max(hi, v))),
            })
    }
}

#[cfg(test)]
mod tests {
    use crate::config::DatasetConfig;

    use super::*;

    const SAMPLE: &str = "\
EGFR type;Возр;Пол;Статус курения
WT;45;м;
WT;60;м;
WT;62;м;
WT;64;м;
WT;95;м;
L858R;50;ж;
L858R;52;ж;
";

    #[test]
    fn test_panel() {
        let dataset = Dataset::from_reader(SAMPLE.as_bytes(), &DatasetConfig::default()).unwrap();
        let panel = PlotPanel::new(
            &dataset,
            [Subgroup::WildType, Subgroup::L858R, Subgroup::Ex20Ins],
        );
        assert_eq!(panel.title, "Wild type vs L858R vs ex20ins");
        assert_eq!(panel.groups.len(), 3);
        assert!(panel.groups[2].summary.is_none());

        let wild_type = panel.groups[0].summary.as_ref().unwrap();
        assert_eq!(wild_type.median, 62.0);
        assert_eq!(wild_type.outliers, vec![45.0, 95.0]);
        assert_eq!(panel.value_range(), Some((45.0, 95.0)));
    }

    #[test]
    fn test_empty_panel_has_no_range() {
        let dataset = Dataset::from_reader(SAMPLE.as_bytes(), &DatasetConfig::default()).unwrap();
        let panel = PlotPanel::new(&dataset, [Subgroup::Ex20Ins]);
        assert_eq!(panel.value_range(), None);
    }
}
