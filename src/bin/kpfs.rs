//! Command-line driver: load an instance, run one engine, print the result.
#![forbid(unsafe_code)]

use std::path::{Path, PathBuf};

use clap::Parser;
use kpfs_metaheur::{open_trace, run_batch, Engine, Instance, NullTrace, TraceSink};

/// Solve a Knapsack Problem with Forfeit Sets instance.
#[derive(Debug, Parser)]
#[command(
    name = "kpfs",
    version,
    about = "Solve a Knapsack Problem with Forfeit Sets instance",
    long_about = "Solve a Knapsack Problem with Forfeit Sets instance with one of \
                  the GRASP, Tabu Search, genetic algorithm or VNS engines and \
                  print the best selection found, or solve a whole directory of \
                  instances with --batch."
)]
struct Cli {
    /// Instance file in the whitespace-separated KPFS text format.
    #[arg(
        value_name = "path",
        required_unless_present = "batch",
        conflicts_with = "batch"
    )]
    instance: Option<PathBuf>,

    /// Solve every instance file under this directory instead.
    #[arg(long, short, value_name = "dir")]
    batch: Option<PathBuf>,

    /// Directory that receives one summary file per batch instance.
    #[arg(long, short, value_name = "dir", default_value = "outputs")]
    output: PathBuf,

    /// Engine to run: grasp, tabu, genetic or vns.
    #[arg(long, short, value_name = "name", default_value = "genetic")]
    engine: String,

    /// Seed for reproducible runs of the stochastic engines.
    #[arg(long, short, value_name = "n")]
    seed: Option<u64>,

    /// Write a semicolon-separated per-iteration trace to this file.
    #[arg(long, short, value_name = "path", conflicts_with = "batch")]
    trace: Option<PathBuf>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(err) = run(Cli::parse()) {
        eprintln!("kpfs: {err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let engine: Engine = cli.engine.parse()?;

    match (&cli.instance, &cli.batch) {
        (_, Some(dir)) => run_batch_mode(engine, dir, &cli.output, cli.seed),
        (Some(path), None) => run_single(engine, path, cli.trace.as_deref(), cli.seed),
        (None, None) => Err("missing instance path".into()),
    }
}

fn run_single(
    engine: Engine,
    path: &Path,
    trace: Option<&Path>,
    seed: Option<u64>,
) -> Result<(), Box<dyn std::error::Error>> {
    let instance = Instance::load(path)?;

    let mut csv = trace.and_then(open_trace);
    let mut null = NullTrace;
    let sink: &mut dyn TraceSink = match csv.as_mut() {
        Some(csv) => csv,
        None => &mut null,
    };

    let result = engine.run(&instance, seed, sink);

    println!("Engine: {engine}");
    println!("Capacity: {}", instance.capacity());
    println!("{result}");
    Ok(())
}

fn run_batch_mode(
    engine: Engine,
    input: &Path,
    output: &Path,
    seed: Option<u64>,
) -> Result<(), Box<dyn std::error::Error>> {
    let report = run_batch(engine, input, output, seed)?;

    for entry in &report.completed {
        println!(
            "{}: objective {} -> {}",
            entry.instance.display(),
            entry.result.objective_value,
            entry.summary.display()
        );
    }
    for (path, err) in &report.failed {
        eprintln!("kpfs: {}: {err}", path.display());
    }
    println!(
        "Processed {} instances, {} failed",
        report.completed.len() + report.failed.len(),
        report.failed.len()
    );
    Ok(())
}
