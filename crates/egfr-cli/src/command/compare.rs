use egfr_cohort::{comparison::Comparison, subgroup::Subgroup};

use crate::{command::DatasetArg, table};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct CompareArg {
    #[clap(flatten)]
    pub(crate) dataset: DatasetArg,
    /// First subgroup, e.g. `wild-type` or `marker:T790M`
    #[arg(long)]
    pub(crate) first: Subgroup,
    /// Second subgroup
    #[arg(long)]
    pub(crate) second: Subgroup,
}

pub(crate) fn run(arg: &CompareArg) -> anyhow::Result<()> {
    let dataset = arg.dataset.load()?;
    let comparison = Comparison::run(&dataset, arg.first.clone(), arg.second.clone());
    table::print_comparison(&comparison);
    Ok(())
}
