use std::path::PathBuf;

use egfr_cohort::{presets, profile::Profile, subgroup::Subgroup};

use crate::{command::DatasetArg, table, util};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ProfileArg {
    #[clap(flatten)]
    pub(crate) dataset: DatasetArg,
    /// Subgroups to profile [default: the standard profile list]
    pub(crate) subgroups: Vec<Subgroup>,
    /// Also save the profiles as JSON to this path
    #[arg(long)]
    pub(crate) json_output: Option<PathBuf>,
}

pub(crate) fn run(arg: &ProfileArg) -> anyhow::Result<()> {
    let dataset = arg.dataset.load()?;
    let subgroups = if arg.subgroups.is_empty() {
        presets::profiles()
    } else {
        arg.subgroups.clone()
    };
    let profiles = subgroups
        .into_iter()
        .map(|group| Profile::build(&dataset, group))
        .collect::<Vec<_>>();

    for profile in &profiles {
        table::print_profile(profile);
    }
    if let Some(path) = &arg.json_output {
        util::write_json_file("profiles", &profiles, path)?;
    }
    Ok(())
}
