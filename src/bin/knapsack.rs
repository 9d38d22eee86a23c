//! Packs the hiking sample (or an instance file) for the chosen goal and
//! prints what goes into each bag.

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use u_knapsack::engine::MicroLpEngine;
use u_knapsack::{Goal, ModelComposer, PackConfig, PackError, PackingInstance};

#[derive(Debug, Parser)]
#[command(name = "knapsack", version, about = "Distribute items over bags with a MILP model")]
struct Cli {
    /// Quantity to maximize: volume, weight or value. Overrides the config
    /// file's `goal`.
    #[arg(value_name = "volume|weight|value")]
    goal: Goal,

    /// Instance TOML; defaults to the built-in hiking trip.
    #[arg(long)]
    instance: Option<PathBuf>,

    /// Run configuration TOML.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(PackError::Infeasible) => {
            println!("no valid packing exists");
            ExitCode::from(1)
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> Result<(), PackError> {
    let mut config = match &cli.config {
        Some(path) => PackConfig::load(path)?,
        None => PackConfig::default(),
    }
    .with_goal(cli.goal);
    if let Some(path) = cli.instance {
        config = config.with_instance(path);
    }

    let instance = match &config.instance {
        Some(path) => PackingInstance::from_toml_file(path)?,
        None => PackingInstance::hiking_trip(),
    };

    let solution = ModelComposer::base()
        .build(&instance, MicroLpEngine::new(), config.goal)?
        .optimize()?;

    println!("{}", solution.plan(config.report_threshold));
    Ok(())
}
