//! Patient cohort model and subgroup analyses for EGFR mutation data.
//!
//! This crate turns a delimited clinical dataset into typed
//! [`PatientRecord`](record::PatientRecord)s and runs the analyses of the
//! standard report on top of [`egfr_stats`].
//!
//! # Modules
//!
//! - [`config`]: column names and coding markers of a dataset file
//! - [`dataset`]: loading and filtering rows
//! - [`record`]: classified patient rows
//! - [`subgroup`]: mutation, sex and smoking subgroups
//! - [`comparison`]: pairwise subgroup comparisons (Mann-Whitney U, Fisher, chi-square)
//! - [`profile`]: age bands, sex and smoking breakdown of a subgroup
//! - [`normality`]: Shapiro-Wilk on subgroup ages
//! - [`distribution`]: box-plot summaries of subgroup ages
//! - [`presets`]: subgroup lists of the standard analysis
//! - [`report`]: the standard analysis as one serializable value
//!
//! # Example
//!
//! ```
//! use egfr_cohort::{config::DatasetConfig, dataset::Dataset, report::Report};
//!
//! let text = "EGFR type;Возр;Пол;Статус курения\n\
//!             WT;67;м;курит\n\
//!             L858R;59;ж;не курит\n";
//! let dataset = Dataset::from_reader(text.as_bytes(), &DatasetConfig::default()).unwrap();
//! let report = Report::standard(&dataset);
//! assert_eq!(report.records, 2);
//! ```

pub mod comparison;
pub mod config;
pub mod dataset;
pub mod distribution;
pub mod normality;
pub mod outcome;
pub mod presets;
pub mod profile;
pub mod record;
pub mod report;
pub mod subgroup;
