use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use self::{
    batch::BatchArg, generate_dataset::GenerateDatasetArg, play::PlayArg, run::RunArg,
};

mod batch;
mod generate_dataset;
mod play;
mod run;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Log per-cell diagnostics to stderr
    #[clap(long, short, global = true)]
    verbose: bool,
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Run one simulation to the end and print its report
    Run(#[clap(flatten)] RunArg),
    /// Run seeded simulations and summarize accuracy and survivors
    Batch(#[clap(flatten)] BatchArg),
    /// Watch a simulation cell by cell in the terminal
    Play(#[clap(flatten)] PlayArg),
    /// Write an augmented dataset as JSON
    GenerateDataset(#[clap(flatten)] GenerateDatasetArg),
}

fn init_tracing(verbose: bool) {
    let default_directive = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    // the terminal is owned by the playback screen
    if !matches!(args.mode, Mode::Play(_)) {
        init_tracing(args.verbose);
    }
    match args.mode {
        Mode::Run(arg) => run::run(&arg)?,
        Mode::Batch(arg) => batch::run(&arg)?,
        Mode::Play(arg) => play::run(&arg)?,
        Mode::GenerateDataset(arg) => generate_dataset::run(&arg)?,
    }
    Ok(())
}
