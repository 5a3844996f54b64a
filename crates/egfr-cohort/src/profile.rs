//! Age, sex and smoking profile of a subgroup.

use std::ops::RangeInclusive;

use egfr_stats::descriptive::DescriptiveStats;
use serde::Serialize;

use crate::{dataset::Dataset, outcome, subgroup::Subgroup};

/// Age bands used in profiles, inclusive on both ends.
pub const AGE_BANDS: [RangeInclusive<u32>; 5] = [0..=40, 41..=50, 51..=60, 61..=70, 71..=999];

/// Number of patients in one age band.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgeBandCount {
    pub low: u32,
    pub high: u32,
    pub count: usize,
    /// Share of the subgroup, `None` when the subgroup is empty.
    pub percentage: Option<f64>,
}

impl AgeBandCount {
    /// Band label such as `"41-50"`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{}-{}", self.low, self.high)
    }
}

/// A count together with its share of the subgroup.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Share {
    pub count: usize,
    pub percentage: Option<f64>,
}

impl Share {
    fn new(count: usize, total: usize) -> Self {
        Self {
            count,
            percentage: outcome::percentage(count, total),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Profile {
    pub subgroup: Subgroup,
    pub total: usize,
    /// `None` when the subgroup is empty.
    pub ages: Option<DescriptiveStats>,
    pub age_bands: Vec<AgeBandCount>,
    pub men: Share,
    pub women: Share,
    pub smokers: Share,
    pub non_smokers: Share,
    pub unknown_smoking: Share,
}

impl Profile {
    /// Builds the profile of `subgroup`.
    ///
    /// Fractional ages fall into the band containing their whole part, so a
    /// patient aged 40.5 is counted in `0-40`.
    #[must_use]
    pub fn build(dataset: &Dataset, subgroup: Subgroup) -> Self {
        let ages = dataset.ages(&subgroup);
        let total = ages.len();

        let age_bands = AGE_BANDS
            .iter()
            .map(|band| {
                let count = ages
                    .iter()
                    .filter(|age| in_band(band, **age))
                    .count();
                AgeBandCount {
                    low: *band.start(),
                    high: *band.end(),
                    count,
                    percentage: outcome::percentage(count, total),
                }
            })
            .collect();

        let share = |other: Subgroup| Share::new(dataset.count_both(&subgroup, &other), total);
        Self {
            men: share(Subgroup::Men),
            women: share(Subgroup::Women),
            smokers: share(Subgroup::Smokers),
            non_smokers: share(Subgroup::NonSmokers),
            unknown_smoking: share(Subgroup::UnknownSmoking),
            ages: DescriptiveStats::new(ages),
            age_bands,
            total,
            subgroup,
        }
    }
}

#[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn in_band(band: &RangeInclusive<u32>, age: f64) -> bool {
    age >= 0.0 && band.contains(&(age.floor() as u32))
}

#[cfg(test)]
mod tests {
    use crate::config::DatasetConfig;

    use super::*;

    const SAMPLE: &str = "\
EGFR type;Возр;Пол;Статус курения
G719X;38;м;курит
L861Q;40,5;ж;не курит
S768I;41;ж;
G719A+S768I;50;м;курит
ex20ins;66;ж;бросил
E709K;71;м;не курит
ex19del;55;ж;не курит
WT;62;м;курит
";

    fn dataset() -> Dataset {
        Dataset::from_reader(SAMPLE.as_bytes(), &DatasetConfig::default()).unwrap()
    }

    #[test]
    fn test_rare_profile() {
        let profile = Profile::build(&dataset(), Subgroup::Rare);
        assert_eq!(profile.total, 6);

        let counts = profile.age_bands.iter().map(|b| b.count).collect::<Vec<_>>();
        assert_eq!(counts, [2, 2, 0, 1, 1]);
        assert_eq!(profile.age_bands[1].label(), "41-50");

        assert_eq!(profile.men.count, 3);
        assert_eq!(profile.women.count, 3);
        assert_eq!(profile.men.percentage, Some(50.0));
        assert_eq!(profile.smokers.count, 2);
        assert_eq!(profile.non_smokers.count, 2);
        assert_eq!(profile.unknown_smoking.count, 1);

        let ages = profile.ages.unwrap();
        assert_eq!(ages.min, 38.0);
        assert_eq!(ages.max, 71.0);
        assert_eq!(ages.median, 45.5);
    }

    #[test]
    fn test_band_counts_cover_subgroup() {
        let profile = Profile::build(&dataset(), Subgroup::All);
        let covered: usize = profile.age_bands.iter().map(|b| b.count).sum();
        assert_eq!(covered, profile.total);
    }

    #[test]
    fn test_empty_profile() {
        let profile = Profile::build(&dataset(), Subgroup::L858R);
        assert_eq!(profile.total, 0);
        assert!(profile.ages.is_none());
        assert!(profile.age_bands.iter().all(|b| b.percentage.is_none()));
        assert_eq!(profile.men.percentage, None);
    }
}
