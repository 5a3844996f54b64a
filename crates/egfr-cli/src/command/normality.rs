use egfr_cohort::{normality::NormalityCheck, presets, subgroup::Subgroup};

use crate::{command::DatasetArg, table};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct NormalityArg {
    #[clap(flatten)]
    pub(crate) dataset: DatasetArg,
    /// Subgroups to test [default: the standard normality list]
    pub(crate) subgroups: Vec<Subgroup>,
}

pub(crate) fn run(arg: &NormalityArg) -> anyhow::Result<()> {
    let dataset = arg.dataset.load()?;
    let subgroups = if arg.subgroups.is_empty() {
        presets::normality()
    } else {
        arg.subgroups.clone()
    };
    let checks = subgroups
        .into_iter()
        .map(|group| NormalityCheck::run(&dataset, group))
        .collect::<Vec<_>>();
    table::print_normality_table(&checks);
    Ok(())
}
