//! StationBench CLI — size the wind-vane divider from the bench.
//!
//! # Usage
//!
//! ```bash
//! # Rank standard values for the divider's series resistor
//! stationbench select
//!
//! # Try a tighter ceiling without touching the config
//! stationbench select --target 2.4 -n 5
//!
//! # Expected ADC voltage per bearing for a chosen R1
//! stationbench table 47000
//!
//! # Write the default config for editing
//! stationbench init
//! ```

use clap::{Parser, Subcommand};
use colored::Colorize;
use stationbench::catalog::format_ohms;
use stationbench::config::BenchConfig;
use stationbench::divider::voltage_table;
use stationbench::select::select_resistors;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "stationbench")]
#[command(about = "Weather-station bench utilities — vane divider sizing")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Path to bench config YAML (built-in defaults when absent)
    #[arg(short, long, default_value = "stationbench.yaml")]
    config: PathBuf,
}

#[derive(Subcommand)]
enum Command {
    /// Rank standard resistor values for the divider's series leg
    Select {
        /// How many values to list
        #[arg(short, default_value = "10")]
        n: usize,

        /// Override the supply voltage from the config
        #[arg(long)]
        vin: Option<f64>,

        /// Override the output ceiling from the config
        #[arg(long)]
        target: Option<f64>,
    },

    /// Print the expected ADC voltage per compass bearing for an R1
    Table {
        /// Series resistor value in ohms
        r1: f64,
    },

    /// Write the default config YAML for editing
    Init,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Select { n, vin, target } => run_select(&cli, n, vin, target),
        Command::Table { r1 } => run_table(&cli, r1),
        Command::Init => run_init(&cli),
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<BenchConfig> {
    if cli.config.exists() {
        Ok(BenchConfig::load(&cli.config)?)
    } else {
        Ok(BenchConfig::default())
    }
}

fn run_select(cli: &Cli, n: usize, vin: Option<f64>, target: Option<f64>) -> anyhow::Result<()> {
    let mut config = load_config(cli)?;
    if let Some(vin) = vin {
        config.vin = vin;
    }
    if let Some(target) = target {
        config.target = target;
    }

    let picks = select_resistors(
        &config.vane_table,
        config.vin,
        config.target,
        &config.catalog,
        n,
    )?;

    if picks.is_empty() {
        println!(
            "{} no standard value holds every bearing under {:.2}V at Vin={:.2}V",
            "✗".red(),
            config.target,
            config.vin
        );
        return Ok(());
    }

    println!(
        "{} standard values keeping every bearing at or under {:.2}V (Vin={:.2}V):",
        "▶".blue(),
        config.target,
        config.vin
    );
    for (i, r1) in picks.iter().enumerate() {
        println!("  {:>2}. {}", i + 1, format_ohms(*r1).green());
    }
    Ok(())
}

fn run_table(cli: &Cli, r1: f64) -> anyhow::Result<()> {
    let config = load_config(cli)?;
    println!(
        "{} ADC voltages for R1 = {} at Vin={:.2}V:",
        "▶".blue(),
        format_ohms(r1),
        config.vin
    );
    // Brace-pair lines, ready to paste into the firmware lookup table.
    for (volts, degrees) in voltage_table(&config.vane_table, config.vin, r1) {
        println!("{{{volts}, {degrees}}},");
    }
    Ok(())
}

fn run_init(cli: &Cli) -> anyhow::Result<()> {
    if cli.config.exists() {
        println!(
            "{} {} already exists, not overwriting",
            "⚠".yellow(),
            cli.config.display()
        );
        return Ok(());
    }
    BenchConfig::default().save(&cli.config)?;
    println!("{} wrote {}", "✓".green(), cli.config.display());
    Ok(())
}
