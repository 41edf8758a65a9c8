use std::path::PathBuf;

use crate::{
    setup::{SimulationArg, SimulationSetup},
    util,
};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct RunArg {
    #[clap(flatten)]
    simulation: SimulationArg,
    /// Print the summary as JSON instead of the text report
    #[clap(long)]
    json: bool,
    /// Write the JSON summary to a file
    #[clap(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &RunArg) -> anyhow::Result<()> {
    let RunArg {
        simulation,
        json,
        output,
    } = arg;

    let setup = SimulationSetup::from_arg(simulation)?;
    let mut simulation = setup.simulation(&setup.config)?;
    simulation.run_to_end();
    let summary = simulation.summary();

    if *json || output.is_some() {
        util::save_json(&summary, output.as_deref())?;
    } else {
        print!("{summary}");
    }
    Ok(())
}
