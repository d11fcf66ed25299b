use std::process::ExitCode;

use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use rushmore_seeder::config::DbConfig;
use rushmore_seeder::error::SeedError;
use rushmore_seeder::fake::FakeData;
use rushmore_seeder::pipeline::{PopulateOptions, Populator};
use rushmore_seeder::run_migrations;

/// Populate the RushMore Pizzeria database with synthetic data
#[derive(Parser)]
#[command(version)]
struct Cli {
    /// Keep existing data (default: clear all data first)
    #[arg(long)]
    keep_existing: bool,

    /// Number of customers to generate
    #[arg(long, default_value_t = 1000)]
    customers: usize,

    /// Number of orders to generate
    #[arg(long, default_value_t = 5000)]
    orders: usize,

    /// Number of stores to generate
    #[arg(long, default_value_t = 5)]
    stores: usize,

    /// Seed for reproducible data (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Create the tables from the embedded migrations before populating
    #[arg(long)]
    run_migrations: bool,
}

fn run(cli: Cli) -> Result<(), SeedError> {
    let config = DbConfig::from_env()?;
    let rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let options = PopulateOptions {
        clear_existing: !cli.keep_existing,
        stores: cli.stores,
        customers: cli.customers,
        orders: cli.orders,
    };

    let mut populator = Populator::connect(&config, FakeData::new(rng), options)?;
    if cli.run_migrations {
        run_migrations(populator.conn())?;
        info!("Migrations applied");
    }
    populator.populate_all()?;
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("Error during population: {}", err);
            ExitCode::FAILURE
        }
    }
}
