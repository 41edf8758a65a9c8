use crate::{
    command::play::app::PlayApp,
    setup::{SimulationArg, SimulationSetup},
    tui::Runtime,
};

mod app;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    #[clap(flatten)]
    simulation: SimulationArg,
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg { simulation } = arg;

    let setup = SimulationSetup::from_arg(simulation)?;
    let mut app = PlayApp::new(setup.simulation(&setup.config)?);
    Runtime::new().run(&mut app)?;

    print!("{}", app.into_simulation().summary());
    Ok(())
}
