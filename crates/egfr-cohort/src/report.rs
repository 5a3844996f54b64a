use serde::Serialize;

use crate::{
    comparison::Comparison,
    dataset::{Dataset, SkippedRows},
    normality::NormalityCheck,
    presets,
};

/// Everything the standard analysis computes, in presentation order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub records: usize,
    pub skipped: SkippedRows,
    pub comparisons: Vec<Comparison>,
    pub normality: Vec<NormalityCheck>,
}

impl Report {
    /// Runs every preset comparison, then every preset normality check.
    #[must_use]
    pub fn standard(dataset: &Dataset) -> Self {
        let comparisons = presets::comparisons()
            .into_iter()
            .map(|(first, second)| Comparison::run(dataset, first, second))
            .collect();
        let normality = presets::normality()
            .into_iter()
            .map(|group| NormalityCheck::run(dataset, group))
            .collect();
        Self {
            records: dataset.records.len(),
            skipped: dataset.skipped,
            comparisons,
            normality,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::DatasetConfig;

    use super::*;

    const SAMPLE: &str = "\
EGFR type;Возр;Пол;Статус курения
WT;71;м;курит
WT;68;м;курит
WT;63;ж;
ex19del;54;ж;не курит
L858R;61;ж;не курит
G719X;58;м;курит
;60;м;курит
";

    #[test]
    fn test_standard_report_never_aborts() {
        let dataset = Dataset::from_reader(SAMPLE.as_bytes(), &DatasetConfig::default()).unwrap();
        let report = Report::standard(&dataset);
        assert_eq!(report.records, 6);
        assert_eq!(report.skipped.missing_mutation, 1);
        assert_eq!(report.comparisons.len(), presets::comparisons().len());
        assert_eq!(report.normality.len(), presets::normality().len());

        // ex20ins is absent from the sample
        let ex20ins = &report.comparisons[3];
        assert_eq!(ex20ins.second_size, 0);
        assert!(ex20ins.mann_whitney.is_unavailable());
    }

    #[test]
    fn test_report_serializes_to_json() {
        let dataset = Dataset::from_reader(SAMPLE.as_bytes(), &DatasetConfig::default()).unwrap();
        let json = serde_json::to_value(Report::standard(&dataset)).unwrap();
        let first = &json["comparisons"][0];
        assert_eq!(first["first"], "wild-type");
        assert_eq!(first["second"], "mutated");
        assert_eq!(first["mann_whitney"]["status"], "computed");
        assert_eq!(json["normality"][0]["shapiro"]["status"], "computed");
        assert_eq!(json["comparisons"][3]["mann_whitney"]["status"], "unavailable");
    }
}
