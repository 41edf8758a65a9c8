use std::path::PathBuf;

use aifield_dataset::{PoolOptions, iris};
use anyhow::Context as _;

use crate::util;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct GenerateDatasetArg {
    /// Synthetic samples generated per class
    #[clap(long, default_value_t = PoolOptions::default().samples_per_class)]
    samples_per_class: usize,
    /// Noise relative to each class's feature standard deviation
    #[clap(long, default_value_t = PoolOptions::default().noise_scale)]
    noise_scale: f64,
    /// Share of each class kept after augmentation
    #[clap(long, default_value_t = PoolOptions::default().reduce_fraction)]
    reduce_fraction: f64,
    /// Seed of the augmentation
    #[clap(long, default_value_t = PoolOptions::default().seed)]
    seed: u64,
    /// Output file path
    #[clap(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &GenerateDatasetArg) -> anyhow::Result<()> {
    let GenerateDatasetArg {
        samples_per_class,
        noise_scale,
        reduce_fraction,
        seed,
        output,
    } = arg;

    let options = PoolOptions {
        samples_per_class: *samples_per_class,
        noise_scale: *noise_scale,
        reduce_fraction: *reduce_fraction,
        seed: *seed,
        ..PoolOptions::default()
    };
    let dataset = options
        .prepare(&iris())
        .context("Failed to generate the dataset")?;
    let [empty, mine, bomb] = dataset.class_counts();
    eprintln!(
        "Generated {} samples (empty: {empty}, mine: {mine}, bomb: {bomb})",
        dataset.len()
    );

    util::save_json(&dataset, output.as_deref())?;
    Ok(())
}
