//! Tie-aware ranking for rank-based tests.

/// Ranks of a pooled sample, with tied values sharing their average rank.
#[derive(Debug, Clone)]
pub struct Ranking {
    /// 1-based ranks, in the order of the input values.
    pub ranks: Vec<f64>,
    /// Sizes of every group of tied values (groups of size 1 are omitted).
    pub tie_groups: Vec<usize>,
}

impl Ranking {
    /// Ranks `values`, assigning the average rank to ties.
    ///
    /// # Examples
    ///
    /// ```
    /// use egfr_stats::rank::Ranking;
    ///
    /// let ranking = Ranking::new(&[10.0, 30.0, 20.0, 20.0]);
    /// assert_eq!(ranking.ranks, vec![1.0, 4.0, 2.5, 2.5]);
    /// assert_eq!(ranking.tie_groups, vec![2]);
    /// ```
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn new(values: &[f64]) -> Self {
        let mut order = (0..values.len()).collect::<Vec<_>>();
        order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));

        let mut ranks = vec![0.0; values.len()];
        let mut tie_groups = vec![];
        let mut start = 0;
        while start < order.len() {
            let mut end = start + 1;
            while end < order.len() && values[order[end]] == values[order[start]] {
                end += 1;
            }
            // positions start..end hold ranks start+1..=end
            let avg_rank = (start + 1 + end) as f64 / 2.0;
            for &idx in &order[start..end] {
                ranks[idx] = avg_rank;
            }
            if end - start > 1 {
                tie_groups.push(end - start);
            }
            start = end;
        }

        Self { ranks, tie_groups }
    }

    /// Returns `true` if any values were tied.
    #[must_use]
    pub fn has_ties(&self) -> bool {
        !self.tie_groups.is_empty()
    }

    /// Tie-correction term `Σ (t³ - t)` over all tie groups.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn tie_term(&self) -> f64 {
        self.tie_groups
            .iter()
            .map(|&t| {
                let t = t as f64;
                t.powi(3) - t
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_ties() {
        let ranking = Ranking::new(&[3.0, 1.0, 2.0]);
        assert_eq!(ranking.ranks, vec![3.0, 1.0, 2.0]);
        assert!(!ranking.has_ties());
        assert_eq!(ranking.tie_term(), 0.0);
    }

    #[test]
    fn test_all_tied() {
        let ranking = Ranking::new(&[5.0; 4]);
        assert_eq!(ranking.ranks, vec![2.5; 4]);
        assert_eq!(ranking.tie_term(), 60.0);
    }

    #[test]
    fn test_multiple_tie_groups() {
        let ranking = Ranking::new(&[1.0, 1.0, 2.0, 3.0, 3.0, 3.0]);
        assert_eq!(ranking.ranks, vec![1.5, 1.5, 3.0, 5.0, 5.0, 5.0]);
        assert_eq!(ranking.tie_groups, vec![2, 3]);
        assert_eq!(ranking.tie_term(), 6.0 + 24.0);
    }

    #[test]
    fn test_rank_sum_is_invariant() {
        let values = [4.0, 4.0, 1.0, 9.0, 9.0, 9.0, 2.0];
        let ranking = Ranking::new(&values);
        let n = values.len() as f64;
        assert_eq!(ranking.ranks.iter().sum::<f64>(), n * (n + 1.0) / 2.0);
    }
}
