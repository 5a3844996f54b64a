//! Pairwise comparison of two subgroups.
//!
//! A comparison runs three analyses on subgroups `A` and `B`:
//!
//! 1. Mann-Whitney U on the ages of `A` vs `B`
//! 2. a 2×2 table of sex (men/women) × subgroup, with Fisher's exact and
//!    chi-square tests
//! 3. the same table for smoking status (smokers/non-smokers)
//!
//! Each table cell is also reported as a percentage of its column's subgroup
//! size. Patients whose smoking status is unknown appear in neither smoking
//! row, so those percentages need not add up to 100.

use egfr_stats::{
    contingency::{ChiSquare, ContingencyTable, FisherExact},
    mann_whitney::MannWhitneyU,
};
use serde::Serialize;

use crate::{
    dataset::Dataset,
    outcome::{self, Outcome},
    subgroup::Subgroup,
};

/// A 2×2 cross-tabulation of two row subgroups against two column subgroups.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrossTab {
    pub rows: [Subgroup; 2],
    pub columns: [Subgroup; 2],
    /// `table[i][j]` counts records in both `rows[i]` and `columns[j]`.
    pub table: ContingencyTable,
    /// Size of each column subgroup, regardless of row membership.
    pub column_totals: [usize; 2],
    pub fisher: Outcome<FisherExact>,
    pub chi_square: Outcome<ChiSquare>,
}

impl CrossTab {
    /// Counts the cells and runs both association tests.
    #[must_use]
    pub fn new(dataset: &Dataset, rows: [Subgroup; 2], columns: [Subgroup; 2]) -> Self {
        let cell = |r: &Subgroup, c: &Subgroup| dataset.count_both(r, c) as u64;
        let table = ContingencyTable::two_by_two(
            cell(&rows[0], &columns[0]),
            cell(&rows[0], &columns[1]),
            cell(&rows[1], &columns[0]),
            cell(&rows[1], &columns[1]),
        );
        let column_totals = [dataset.count(&columns[0]), dataset.count(&columns[1])];

        let fisher = Outcome::from(table.fisher_exact());
        let chi_square = Outcome::from(table.chi_square());
        if let Outcome::Unavailable { reason } = &chi_square {
            log::debug!(
                "chi-square unavailable for {} vs {} by {}/{}: {reason}",
                columns[0],
                columns[1],
                rows[0],
                rows[1]
            );
        }

        Self {
            rows,
            columns,
            table,
            column_totals,
            fisher,
            chi_square,
        }
    }

    /// Cell count as a percentage of its column total.
    #[expect(clippy::cast_possible_truncation)]
    #[must_use]
    pub fn column_percentage(&self, row: usize, col: usize) -> Option<f64> {
        outcome::percentage(self.table.get(row, col) as usize, self.column_totals[col])
    }
}

/// Full comparison of two subgroups.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    pub first: Subgroup,
    pub second: Subgroup,
    pub first_size: usize,
    pub second_size: usize,
    pub mann_whitney: Outcome<MannWhitneyU>,
    pub by_sex: CrossTab,
    pub by_smoking: CrossTab,
}

impl Comparison {
    /// Runs all analyses for `first` vs `second`.
    ///
    /// # Examples
    ///
    /// ```
    /// use egfr_cohort::{
    ///     comparison::Comparison, config::DatasetConfig, dataset::Dataset, subgroup::Subgroup,
    /// };
    ///
    /// let text = "EGFR type;Возр;Пол;Статус курения\n\
    ///             WT;70;м;курит\n\
    ///             WT;66;м;курит\n\
    ///             L858R;52;ж;не курит\n\
    ///             ex19del;48;ж;не курит\n";
    /// let dataset = Dataset::from_reader(text.as_bytes(), &DatasetConfig::default()).unwrap();
    /// let cmp = Comparison::run(&dataset, Subgroup::WildType, Subgroup::Mutated);
    /// assert_eq!((cmp.first_size, cmp.second_size), (2, 2));
    /// assert_eq!(cmp.by_sex.table.as_rows(), &[vec![2, 0], vec![0, 2]]);
    /// assert!(cmp.mann_whitney.is_computed());
    /// ```
    #[must_use]
    pub fn run(dataset: &Dataset, first: Subgroup, second: Subgroup) -> Self {
        let first_ages = dataset.ages(&first);
        let second_ages = dataset.ages(&second);
        let mann_whitney = Outcome::from(MannWhitneyU::test(&first_ages, &second_ages));
        if let Outcome::Unavailable { reason } = &mann_whitney {
            log::warn!("Mann-Whitney U unavailable for {first} vs {second}: {reason}");
        }

        let columns = [first.clone(), second.clone()];
        let by_sex = CrossTab::new(dataset, [Subgroup::Men, Subgroup::Women], columns.clone());
        let by_smoking = CrossTab::new(
            dataset,
            [Subgroup::Smokers, Subgroup::NonSmokers],
            columns,
        );

        Self {
            first_size: first_ages.len(),
            second_size: second_ages.len(),
            first,
            second,
            mann_whitney,
            by_sex,
            by_smoking,
        }
    }
}
