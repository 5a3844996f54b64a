use egfr_cohort::{distribution::PlotPanel, presets};

use crate::command::DatasetArg;

use self::app::PlotApp;

mod app;
mod widgets;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlotArg {
    #[clap(flatten)]
    pub(crate) dataset: DatasetArg,
}

pub(crate) fn run(arg: &PlotArg) -> anyhow::Result<()> {
    let dataset = arg.dataset.load()?;
    let panels = presets::plot_panels()
        .into_iter()
        .map(|groups| PlotPanel::new(&dataset, groups))
        .collect::<Vec<_>>();

    let mut app = PlotApp::new(panels);
    ratatui::run(|terminal| app.run(terminal))?;
    Ok(())
}
