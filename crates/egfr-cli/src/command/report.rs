use std::path::PathBuf;

use egfr_cohort::report::Report;

use crate::{command::DatasetArg, table, util};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ReportArg {
    #[clap(flatten)]
    pub(crate) dataset: DatasetArg,
    /// Also save the full report as JSON to this path
    #[arg(long)]
    pub(crate) json_output: Option<PathBuf>,
}

pub(crate) fn run(arg: &ReportArg) -> anyhow::Result<()> {
    let dataset = arg.dataset.load()?;
    let report = Report::standard(&dataset);

    for comparison in &report.comparisons {
        table::print_comparison(comparison);
    }
    table::print_normality_table(&report.normality);

    if let Some(path) = &arg.json_output {
        util::write_json_file("report", &report, path)?;
    }
    Ok(())
}
