use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use egfr_cohort::{config::DatasetConfig, dataset::Dataset};

use crate::util;

use self::{
    compare::CompareArg, export::ExportArg, normality::NormalityArg, plot::PlotArg,
    profile::ProfileArg, report::ReportArg,
};

mod compare;
mod export;
mod normality;
mod plot;
mod profile;
mod report;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What analysis to run
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Run every standard comparison and normality check
    Report(#[clap(flatten)] ReportArg),
    /// Compare the ages, sex and smoking status of two subgroups
    Compare(#[clap(flatten)] CompareArg),
    /// Test subgroup ages for normality (Shapiro-Wilk)
    Normality(#[clap(flatten)] NormalityArg),
    /// Show age, sex and smoking profiles of subgroups
    Profile(#[clap(flatten)] ProfileArg),
    /// Browse box plots of subgroup ages in the terminal
    Plot(#[clap(flatten)] PlotArg),
    /// Write the rows of each subgroup to its own spreadsheet
    Export(#[clap(flatten)] ExportArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Report(arg) => report::run(&arg)?,
        Mode::Compare(arg) => compare::run(&arg)?,
        Mode::Normality(arg) => normality::run(&arg)?,
        Mode::Profile(arg) => profile::run(&arg)?,
        Mode::Plot(arg) => plot::run(&arg)?,
        Mode::Export(arg) => export::run(&arg)?,
    }
    Ok(())
}

/// Options shared by every subcommand for locating and reading the dataset.
#[derive(Debug, Clone, Args)]
pub(crate) struct DatasetArg {
    /// Path to the delimited dataset file
    data: PathBuf,
    /// Field delimiter [default: ;]
    #[arg(long)]
    delimiter: Option<char>,
    /// Drop rows whose age is less than or equal to this value [default: 1]
    #[arg(long)]
    min_age: Option<f64>,
    /// JSON file with column names and coding markers
    #[arg(long)]
    config: Option<PathBuf>,
}

impl DatasetArg {
    /// Builds the dataset configuration. Command-line flags override the
    /// configuration file, which overrides the defaults.
    fn dataset_config(&self) -> anyhow::Result<DatasetConfig> {
        let mut config = match &self.config {
            Some(path) => util::read_json_file::<DatasetConfig, _>("dataset config", path)?,
            None => DatasetConfig::default(),
        };
        if let Some(delimiter) = self.delimiter {
            config.delimiter = delimiter;
        }
        if let Some(min_age) = self.min_age {
            config.min_age = min_age;
        }
        Ok(config)
    }

    pub(crate) fn load(&self) -> anyhow::Result<Dataset> {
        let config = self.dataset_config()?;
        log::info!("Loading dataset from {}", self.data.display());
        let dataset = Dataset::from_path(&self.data, &config)
            .with_context(|| format!("Failed to load dataset: {}", self.data.display()))?;

        let skipped = &dataset.skipped;
        log::info!(
            "Kept {} rows, skipped {} (invalid age: {}, age <= {}: {}, no mutation: {})",
            dataset.records.len(),
            skipped.total(),
            skipped.invalid_age,
            config.min_age,
            skipped.below_min_age,
            skipped.missing_mutation,
        );
        if dataset.records.is_empty() {
            log::warn!("No usable rows in {}", self.data.display());
        }
        Ok(dataset)
    }
}
