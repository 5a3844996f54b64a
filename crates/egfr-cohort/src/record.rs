use serde::Serialize;

/// Patient sex as classified by the coding scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, derive_more::IsVariant)]
pub enum Sex {
    Male,
    Female,
}

/// Smoking status as classified by the coding scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, derive_more::IsVariant)]
pub enum SmokingStatus {
    Smoker,
    NonSmoker,
    /// The smoking column was empty.
    Unknown,
    /// Non-empty text that matches neither marker.
    Other,
}

/// One row of the dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatientRecord {
    /// 1-based line number in the source file (header is line 1).
    pub line: u64,
    pub age: f64,
    pub sex: Sex,
    pub smoking: SmokingStatus,
    /// EGFR mutation descriptor, e.g. `"ex19del"`, `"G719X+S768I"` or `"WT"`.
    pub mutation: String,
    /// Every field of the source row, in header order.
    pub fields: Vec<String>,
}

impl PatientRecord {
    /// Returns `true` if the mutation descriptor contains `marker`.
    #[must_use]
    pub fn mutation_contains(&self, marker: &str) -> bool {
        self.mutation.contains(marker)
    }
}

/// Parses an age cell. Accepts a decimal comma; returns `None` for blank or
/// non-numeric text.
#[must_use]
pub fn parse_age(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    text.replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|age| age.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_age() {
        assert_eq!(parse_age("65"), Some(65.0));
        assert_eq!(parse_age(" 65 "), Some(65.0));
        assert_eq!(parse_age("65.5"), Some(65.5));
        assert_eq!(parse_age("65,5"), Some(65.5));
        assert_eq!(parse_age(""), None);
        assert_eq!(parse_age("n/a"), None);
        assert_eq!(parse_age("inf"), None);
    }

    #[test]
    fn test_mutation_contains_is_case_sensitive() {
        let record = PatientRecord {
            line: 2,
            age: 60.0,
            sex: Sex::Female,
            smoking: SmokingStatus::Unknown,
            mutation: "L858R".to_owned(),
            fields: vec![],
        };
        assert!(record.mutation_contains("L858R"));
        assert!(!record.mutation_contains("l858r"));
    }
}
