//! Loading patient records from delimited text.

use std::{fs::File, io, path::Path};

use serde::Serialize;

use crate::{
    config::{ColumnMap, DatasetConfig},
    record::{self, PatientRecord},
    subgroup::Subgroup,
};

/// Errors raised while loading a dataset.
#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum LoadError {
    #[display("failed to open dataset file")]
    Io(io::Error),
    #[display("failed to read delimited data")]
    Csv(csv::Error),
    #[display("delimiter {_0:?} is not a single-byte character")]
    InvalidDelimiter(#[error(not(source))] char),
    #[display("required {role} column '{name}' not found in header")]
    MissingColumn { role: &'static str, name: String },
}

/// Why rows were left out of the dataset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SkippedRows {
    /// Age cell blank or not a number.
    pub invalid_age: usize,
    /// Age not above the configured minimum.
    pub below_min_age: usize,
    /// Mutation descriptor blank.
    pub missing_mutation: usize,
}

impl SkippedRows {
    #[must_use]
    pub fn total(&self) -> usize {
        self.invalid_age + self.below_min_age + self.missing_mutation
    }
}

/// All usable records of a dataset file.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// Header row of the source file.
    pub headers: Vec<String>,
    pub records: Vec<PatientRecord>,
    pub skipped: SkippedRows,
}

#[derive(Debug, Clone, Copy)]
struct ColumnIndices {
    mutation: usize,
    age: usize,
    sex: usize,
    smoking: usize,
}

impl ColumnIndices {
    fn locate(headers: &[String], columns: &ColumnMap) -> Result<Self, LoadError> {
        let find = |role: &'static str, name: &str| {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or_else(|| LoadError::MissingColumn {
                    role,
                    name: name.to_owned(),
                })
        };
        Ok(Self {
            mutation: find("mutation", &columns.mutation)?,
            age: find("age", &columns.age)?,
            sex: find("sex", &columns.sex)?,
            smoking: find("smoking", &columns.smoking)?,
        })
    }
}

impl Dataset {
    /// Reads a dataset file.
    pub fn from_path<P>(path: P, config: &DatasetConfig) -> Result<Self, LoadError>
    where
        P: AsRef<Path>,
    {
        let file = File::open(path).map_err(LoadError::Io)?;
        Self::from_reader(io::BufReader::new(file), config)
    }

    /// Reads a dataset from any reader.
    ///
    /// # Examples
    ///
    /// ```
    /// use egfr_cohort::{config::DatasetConfig, dataset::Dataset};
    ///
    /// let text = "EGFR type;Возр;Пол;Статус курения\n\
    ///             ex19del;64;ж;не курит\n\
    ///             WT;0;м;\n";
    /// let dataset = Dataset::from_reader(text.as_bytes(), &DatasetConfig::default()).unwrap();
    /// assert_eq!(dataset.records.len(), 1);
    /// assert_eq!(dataset.skipped.below_min_age, 1);
    /// ```
    pub fn from_reader<R>(reader: R, config: &DatasetConfig) -> Result<Self, LoadError>
    where
        R: io::Read,
    {
        let delimiter = u8::try_from(config.delimiter)
            .ok()
            .filter(u8::is_ascii)
            .ok_or(LoadError::InvalidDelimiter(config.delimiter))?;

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .flexible(true)
            .from_reader(reader);

        let headers = reader
            .headers()
            .map_err(LoadError::Csv)?
            .iter()
            .map(str::to_owned)
            .collect::<Vec<_>>();
        let columns = ColumnIndices::locate(&headers, &config.columns)?;

        let mut records = vec![];
        let mut skipped = SkippedRows::default();
        for row in reader.records() {
            let row = row.map_err(LoadError::Csv)?;
            let line = row.position().map_or(0, csv::Position::line);
            let field = |idx: usize| row.get(idx).unwrap_or("");

            let Some(age) = record::parse_age(field(columns.age)) else {
                log::debug!("line {line}: skipping row with invalid age {:?}", field(columns.age));
                skipped.invalid_age += 1;
                continue;
            };
            if age <= config.min_age {
                log::debug!("line {line}: skipping row with age {age}");
                skipped.below_min_age += 1;
                continue;
            }
            let mutation = field(columns.mutation).trim();
            if mutation.is_empty() {
                log::debug!("line {line}: skipping row without mutation descriptor");
                skipped.missing_mutation += 1;
                continue;
            }

            records.push(PatientRecord {
                line,
                age,
                sex: config.coding.classify_sex(field(columns.sex)),
                smoking: config.coding.classify_smoking(field(columns.smoking)),
                mutation: mutation.to_owned(),
                fields: row.iter().map(str::to_owned).collect(),
            });
        }

        Ok(Self {
            headers,
            records,
            skipped,
        })
    }

    /// Records belonging to `subgroup`.
    pub fn select<'a>(
        &'a self,
        subgroup: &'a Subgroup,
    ) -> impl Iterator<Item = &'a PatientRecord> + 'a {
        self.records.iter().filter(move |r| subgroup.matches(r))
    }

    /// Number of records belonging to `subgroup`.
    #[must_use]
    pub fn count(&self, subgroup: &Subgroup) -> usize {
        self.select(subgroup).count()
    }

    /// Number of records belonging to both subgroups.
    #[must_use]
    pub fn count_both(&self, a: &Subgroup, b: &Subgroup) -> usize {
        self.records
            .iter()
            .filter(|r| a.matches(r) && b.matches(r))
            .count()
    }

    /// Ages of the records belonging to `subgroup`, in file order.
    #[must_use]
    pub fn ages(&self, subgroup: &Subgroup) -> Vec<f64> {
        self.select(subgroup).map(|r| r.age).collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::record::{Sex, SmokingStatus};

    use super::*;

    const SAMPLE: &str = "\
№;EGFR type;Возр;Пол;Статус курения
1;ex19del;64;ж;не курит
2;L858R;71;м;курит
3;WT;55,5;м;
4;G719X+S768I;48;ж;нет данных
5;WT;;ж;не курит
6;ex20ins;1;м;курит
7;;60;м;курит
";

    fn load(text: &str) -> Dataset {
        Dataset::from_reader(text.as_bytes(), &DatasetConfig::default()).unwrap()
    }

    #[test]
    fn test_load_and_classify() {
        let dataset = load(SAMPLE);
        assert_eq!(dataset.headers.len(), 5);
        assert_eq!(dataset.records.len(), 4);

        let first = &dataset.records[0];
        assert_eq!(first.line, 2);
        assert_eq!(first.age, 64.0);
        assert_eq!(first.sex, Sex::Female);
        assert_eq!(first.smoking, SmokingStatus::NonSmoker);
        assert_eq!(first.mutation, "ex19del");
        assert_eq!(first.fields[0], "1");

        let third = &dataset.records[2];
        assert_eq!(third.age, 55.5);
        assert_eq!(third.smoking, SmokingStatus::Unknown);

        assert_eq!(dataset.records[3].smoking, SmokingStatus::Other);
    }

    #[test]
    fn test_skipped_rows_are_counted() {
        let dataset = load(SAMPLE);
        assert_eq!(
            dataset.skipped,
            SkippedRows {
                invalid_age: 1,
                below_min_age: 1,
                missing_mutation: 1,
            }
        );
        assert_eq!(dataset.skipped.total(), 3);
    }

    #[test]
    fn test_missing_column() {
        let err = Dataset::from_reader(
            "EGFR type;Возр;Пол\nWT;50;м\n".as_bytes(),
            &DatasetConfig::default(),
        )
        .unwrap_err();
        assert!(
            matches!(&err, LoadError::MissingColumn { role: "smoking", .. }),
            "{err}"
        );
    }

    #[test]
    fn test_custom_delimiter_and_columns() {
        let mut config = DatasetConfig {
            delimiter: ',',
            min_age: 17.0,
            ..DatasetConfig::default()
        };
        config.columns.mutation = "egfr".to_owned();
        config.columns.age = "age".to_owned();
        config.columns.sex = "sex".to_owned();
        config.columns.smoking = "smoking".to_owned();

        let text = "age,sex,smoking,egfr\n45,м,курит,L861Q\n17,ж,,WT\n";
        let dataset = Dataset::from_reader(text.as_bytes(), &config).unwrap();
        assert_eq!(dataset.records.len(), 1);
        assert_eq!(dataset.records[0].mutation, "L861Q");
        assert_eq!(dataset.skipped.below_min_age, 1);
    }

    #[test]
    fn test_non_ascii_delimiter_is_rejected() {
        let config = DatasetConfig {
            delimiter: '→',
            ..DatasetConfig::default()
        };
        let err = Dataset::from_reader("".as_bytes(), &config).unwrap_err();
        assert!(matches!(err, LoadError::InvalidDelimiter('→')));
    }

    #[test]
    fn test_short_rows_are_tolerated() {
        let dataset = load("EGFR type;Возр;Пол;Статус курения\nL858R;66;м\n");
        assert_eq!(dataset.records.len(), 1);
        assert_eq!(dataset.records[0].smoking, SmokingStatus::Unknown);
    }

    #[test]
    fn test_counts() {
        let dataset = load(SAMPLE);
        assert_eq!(dataset.count(&Subgroup::WildType), 1);
        assert_eq!(dataset.count(&Subgroup::Mutated), 3);
        assert_eq!(dataset.count_both(&Subgroup::Mutated, &Subgroup::Men), 1);
        assert_eq!(dataset.ages(&Subgroup::Frequent), vec![64.0, 71.0]);
    }
}
