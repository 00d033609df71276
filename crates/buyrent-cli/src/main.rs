mod commands;
mod input;
mod output;
mod telemetry;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::analyze::AnalyzeArgs;
use commands::mortgage::MortgageArgs;
use commands::sensitivity::SensitivityArgs;

/// Buy-versus-rent decision calculator
#[derive(Parser)]
#[command(
    name = "buyrent",
    version,
    about = "Decide whether buying a property or renting and investing leaves you better off",
    long_about = "Compares buying a property with a fixed-rate mortgage against renting \
                  and investing the difference. Reports net positions, the break-even \
                  year, affordability ratios and a Buy / Rent / Consider verdict."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log filter used when RUST_LOG is unset (e.g. "debug", "buyrent_core=trace")
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare buying against renting and investing
    Analyze(AnalyzeArgs),
    /// Monthly payment and amortization schedule for a fixed-rate mortgage
    Mortgage(MortgageArgs),
    /// Sweep one or two assumptions and re-run the comparison
    Sensitivity(SensitivityArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = telemetry::init(&cli.log_level) {
        eprintln!("{}: {}", "error".red().bold(), e);
        process::exit(1);
    }

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Analyze(args) => commands::analyze::run_analyze(args),
        Commands::Mortgage(args) => commands::mortgage::run_mortgage(args),
        Commands::Sensitivity(args) => commands::sensitivity::run_sensitivity(args),
        Commands::Version => {
            println!("buyrent {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
