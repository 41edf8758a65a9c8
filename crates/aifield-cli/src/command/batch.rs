use std::path::PathBuf;

use aifield_engine::{PathKind, SimulationConfig, SimulationSeed};
use aifield_stats::{descriptive::DescriptiveStats, percentiles::Percentiles};
use chrono::{DateTime, Utc};
use rand::Rng as _;
use serde::Serialize;

use crate::{
    setup::{SimulationArg, SimulationSetup},
    util,
};

const PERCENTILE_POINTS: [f64; 5] = [10.0, 25.0, 50.0, 75.0, 90.0];

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct BatchArg {
    #[clap(flatten)]
    simulation: SimulationArg,
    /// Number of simulations to run
    #[clap(long, default_value_t = 10)]
    runs: usize,
    /// Write the batch report as JSON to a file
    #[clap(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize)]
struct RunResult {
    seed: SimulationSeed,
    accuracy: f64,
    survivors: u32,
    disarmed_mines: usize,
    disarmed_bombs: usize,
}

#[derive(Debug, Clone, Serialize)]
struct MetricSummary {
    stats: DescriptiveStats,
    percentiles: Percentiles,
}

impl MetricSummary {
    fn new(values: &[f64]) -> Option<Self> {
        Some(Self {
            stats: DescriptiveStats::new(values.iter().copied())?,
            percentiles: Percentiles::new(values, &PERCENTILE_POINTS),
        })
    }
}

#[derive(Debug, Clone, Serialize)]
struct BatchReport {
    created_at: DateTime<Utc>,
    classifier: String,
    path: PathKind,
    size: usize,
    mine_probability: f64,
    headcount: u32,
    base_seed: SimulationSeed,
    accuracy: Option<MetricSummary>,
    survivors: Option<MetricSummary>,
    runs: Vec<RunResult>,
}

pub(crate) fn run(arg: &BatchArg) -> anyhow::Result<()> {
    let BatchArg {
        simulation,
        runs,
        output,
    } = arg;

    let setup = SimulationSetup::from_arg(simulation)?;
    let base_seed = setup.config.seed.unwrap_or_else(|| rand::rng().random());

    let mut results = Vec::with_capacity(*runs);
    for index in 0..*runs {
        let seed = base_seed.derive(index as u64);
        let config = SimulationConfig {
            seed: Some(seed),
            ..setup.config.clone()
        };
        let mut simulation = setup.simulation(&config)?;
        let accuracy = simulation.run_to_end();
        let stats = simulation.stats();
        eprintln!(
            "Run {}/{}: seed {seed}, accuracy {:.2}%, survivors {}",
            index + 1,
            runs,
            accuracy * 100.0,
            stats.survivors()
        );
        results.push(RunResult {
            seed,
            accuracy,
            survivors: stats.survivors(),
            disarmed_mines: stats.disarmed_mines(),
            disarmed_bombs: stats.disarmed_bombs(),
        });
    }

    let accuracies = results.iter().map(|r| r.accuracy).collect::<Vec<_>>();
    let survivors = results
        .iter()
        .map(|r| f64::from(r.survivors))
        .collect::<Vec<_>>();
    let report = BatchReport {
        created_at: Utc::now(),
        classifier: setup.config.classifier.clone(),
        path: setup.config.path,
        size: setup.config.size,
        mine_probability: setup.config.mine_probability,
        headcount: setup.config.headcount,
        base_seed,
        accuracy: MetricSummary::new(&accuracies),
        survivors: MetricSummary::new(&survivors),
        runs: results,
    };

    print_report(&report);
    if output.is_some() {
        util::save_json(&report, output.as_deref())?;
    }
    Ok(())
}

fn print_report(report: &BatchReport) {
    println!(
        "{} runs of {} on a {}x{} {} board (base seed {})",
        report.runs.len(),
        report.classifier,
        report.size,
        report.size,
        report.path,
        report.base_seed
    );
    for (label, metric, scale) in [
        ("Accuracy (%)", &report.accuracy, 100.0),
        ("Survivors", &report.survivors, 1.0),
    ] {
        let Some(metric) = metric else {
            continue;
        };
        let stats = &metric.stats;
        println!();
        println!("{label}");
        println!(
            "  mean {:.2}  median {:.2}  std dev {:.2}  min {:.2}  max {:.2}",
            stats.mean * scale,
            stats.median * scale,
            stats.std_dev * scale,
            stats.min * scale,
            stats.max * scale
        );
        let percentiles = metric
            .percentiles
            .iter()
            .map(|(point, value)| format!("p{point:.0} {:.2}", value * scale))
            .collect::<Vec<_>>();
        println!("  {}", percentiles.join("  "));
    }
}
