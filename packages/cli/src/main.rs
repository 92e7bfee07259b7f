#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI tool for building the gun-violence dashboard statistics.
//!
//! Loads incident data through a provider chain (URL, then local file,
//! then the embedded sample), aggregates it against the reference tables
//! and either writes the full JSON snapshot the static dashboard reads or
//! prints a single result to stdout.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use gun_violence_aggregate::{Aggregator, AggregatorConfig};
use gun_violence_reference::ReferenceTables;
use gun_violence_source::{JsonFileProvider, JsonUrlProvider, ProviderChain, SampleProvider};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "gun_violence", about = "Dashboard statistics builder")]
struct Cli {
    /// Reference tables TOML (defaults to the built-in tables)
    #[arg(long, global = true)]
    reference: Option<PathBuf>,

    /// Local incident dataset JSON
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Remote incident dataset JSON, tried before `--data`
    #[arg(long, global = true)]
    url: Option<String>,

    /// Moving average window, in months
    #[arg(long, global = true, default_value_t = 3)]
    window: usize,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the full dashboard snapshot as JSON
    Snapshot {
        /// Output file
        #[arg(long, default_value = "data/dashboard.json")]
        output: PathBuf,
    },
    /// Print per-category totals and rates
    Categories,
    /// Print the gun-law score vs violence rate correlation
    Correlation,
    /// Print monthly trend statistics
    Trend,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    let tables = load_tables(cli.reference.as_deref())?;
    let chain = build_chain(cli.url.as_deref(), cli.data.as_deref())?;
    let fetched = chain.fetch().await?;
    log::info!("Using data from provider '{}'", fetched.provider_id);

    let aggregator = Aggregator::with_config(
        &tables,
        AggregatorConfig {
            moving_average_window: cli.window,
        },
    );
    let dataset = fetched.dataset;

    match cli.command {
        Commands::Snapshot { output } => {
            let snapshot = aggregator.snapshot(&dataset.states, &dataset.monthly);
            write_json(&output, &snapshot)?;
            log::info!("Snapshot written: {}", output.display());
        }
        Commands::Categories => {
            print_json(&aggregator.aggregate_by_category(&dataset.states))?;
        }
        Commands::Correlation => print_json(&aggregator.correlate(&dataset.states))?,
        Commands::Trend => print_json(&aggregator.monthly_trend(&dataset.monthly))?,
    }

    Ok(())
}

fn load_tables(path: Option<&Path>) -> Result<ReferenceTables, Box<dyn std::error::Error>> {
    Ok(match path {
        Some(path) => ReferenceTables::from_path(path)?,
        None => ReferenceTables::builtin(),
    })
}

/// Providers in priority order: remote URL, local file, embedded sample.
fn build_chain(
    url: Option<&str>,
    data: Option<&Path>,
) -> Result<ProviderChain, Box<dyn std::error::Error>> {
    let mut chain = ProviderChain::new();
    if let Some(url) = url {
        chain.push(Box::new(JsonUrlProvider::new(url)?));
    }
    if let Some(data) = data {
        chain.push(Box::new(JsonFileProvider::new(data)));
    }
    Ok(chain.with(SampleProvider))
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, serde_json::to_string_pretty(value)?)?;
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
