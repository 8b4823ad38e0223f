//! Ising MC command-line driver.
//!
//! Builds an ensemble, randomizes it, runs N^2 Metropolis steps (or
//! `--steps`) and reports energies and timing.

use std::time::Instant;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use tracing::info;

use ising_mc::{read_config, render_lattice, Ensemble, Params};

#[derive(Parser, Debug)]
#[command(version, about = "2D Ising model Metropolis Monte Carlo", long_about = None)]
struct Args {
    /// Dimension for the NxN lattice
    #[arg(short, long, default_value_t = 10)]
    dimension: usize,

    /// YAML file with `params` (and optional dimension/steps/seed)
    #[arg(short, long)]
    config: Option<String>,

    /// Number of single-spin updates (default N^2)
    #[arg(short, long)]
    steps: Option<usize>,

    /// Seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Print the lattice before and after the run
    #[arg(short, long)]
    render: bool,

    /// Log per-sweep progress
    #[arg(short, long)]
    verbose: bool,
}

fn setup_output(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt().with_max_level(level).init();
}

fn print_lattice(label: &str, ensemble: &Ensemble) -> Result<()> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    println!("{}", label);
    render_lattice(&ensemble.snapshot(), &mut handle).wrap_err("Failed to render lattice")?;
    Ok(())
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    setup_output(args.verbose);

    let (params, dim, steps, seed) = match &args.config {
        Some(path) => {
            info!("Reading configuration from: {}", path);
            let config = read_config(path)
                .wrap_err_with(|| format!("Unable to load configuration: {}", path))?;
            (
                config.params,
                config.dimension.unwrap_or(args.dimension),
                args.steps.or(config.steps),
                args.seed.or(config.seed),
            )
        }
        None => (Params::default(), args.dimension, args.steps, args.seed),
    };

    let mut ensemble = match seed {
        Some(seed) => Ensemble::with_seed(dim, params, seed),
        None => Ensemble::new(dim, params),
    }
    .wrap_err("Failed to build ensemble")?;

    info!("Ensemble {} x {} with {:?}", dim, dim, ensemble.params());

    ensemble.randomize();
    if args.render {
        print_lattice("Init", &ensemble)?;
    }
    let initial_energy = ensemble.total_state_energy()?;

    let n_steps = steps.unwrap_or(dim * dim);
    let t_start = Instant::now();
    let summary = ensemble.run(n_steps).wrap_err("Simulation aborted")?;
    let duration = t_start.elapsed();

    if args.render {
        print_lattice("Finished", &ensemble)?;
    }

    println!("Initial energy: {:.4}", initial_energy);
    println!("Final energy:   {:.4}", summary.energy);
    println!("Magnetization:  {}", summary.magnetization);
    println!(
        "Accepted {} of {} steps ({:.2}%)",
        summary.accepted,
        summary.n_steps,
        100.0 * summary.acceptance_rate
    );
    println!("Duration: {:?} for {} steps", duration, summary.n_steps);

    Ok(())
}
