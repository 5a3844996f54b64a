//! Dataset layout and coding configuration.
//!
//! Every field has a default matching the registry export the tool was written
//! for, so a configuration file only needs to name what differs:
//!
//! ```
//! use egfr_cohort::config::DatasetConfig;
//!
//! let config: DatasetConfig =
//!     serde_json::from_str(r#"{ "columns": { "age": "Age" }, "min_age": 18 }"#).unwrap();
//! assert_eq!(config.columns.age, "Age");
//! assert_eq!(config.columns.sex, "Пол");
//! assert_eq!(config.delimiter, ';');
//! assert_eq!(config.min_age, 18.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::record::{Sex, SmokingStatus};

/// How to read a dataset file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    /// Field delimiter. Must be a single-byte (ASCII) character.
    pub delimiter: char,
    /// Rows with an age less than or equal to this value are dropped.
    pub min_age: f64,
    pub columns: ColumnMap,
    pub coding: CodingScheme,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            delimiter: ';',
            min_age: 1.0,
            columns: ColumnMap::default(),
            coding: CodingScheme::default(),
        }
    }
}

/// Header names of the columns the analysis needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnMap {
    /// Free-text EGFR mutation descriptor.
    pub mutation: String,
    pub age: String,
    pub sex: String,
    /// Free-text smoking status.
    pub smoking: String,
}

impl Default for ColumnMap {
    fn default() -> Self {
        Self {
            mutation: "EGFR type".to_owned(),
            age: "Возр".to_owned(),
            sex: "Пол".to_owned(),
            smoking: "Статус курения".to_owned(),
        }
    }
}

/// Substring markers that classify the free-text sex and smoking columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodingScheme {
    pub male_marker: String,
    pub smoker_marker: String,
    /// Checked before `smoker_marker`, which it usually contains.
    pub non_smoker_marker: String,
}

impl Default for CodingScheme {
    fn default() -> Self {
        Self {
            male_marker: "м".to_owned(),
            smoker_marker: "кур".to_owned(),
            non_smoker_marker: "не кур".to_owned(),
        }
    }
}

impl CodingScheme {
    /// Anything not marked male is counted as female, including empty text.
    #[must_use]
    pub fn classify_sex(&self, text: &str) -> Sex {
        if text.contains(&self.male_marker) {
            Sex::Male
        } else {
            Sex::Female
        }
    }

    /// Only an empty cell is `Unknown`; whitespace-only text counts as recorded.
    #[must_use]
    pub fn classify_smoking(&self, text: &str) -> SmokingStatus {
        if text.is_empty() {
            SmokingStatus::Unknown
        } else if text.contains(&self.non_smoker_marker) {
            SmokingStatus::NonSmoker
        } else if text.contains(&self.smoker_marker) {
            SmokingStatus::Smoker
        } else {
            SmokingStatus::Other
        }
    }
}
