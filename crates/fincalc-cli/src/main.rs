mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::edgar::FilingArgs;
use commands::fixed_income::BondValueArgs;
use commands::portfolio::CapmArgs;

/// Quick financial calculators
#[derive(Parser)]
#[command(
    name = "fincalc",
    version,
    about = "Quick financial calculators with decimal precision",
    long_about = "A CLI for quick financial calculations with decimal precision. \
                  Values coupon bond orders at four payment frequencies, solves the \
                  CAPM relation for any of its variables, and locates SEC EDGAR \
                  filings by ticker, form type, and year."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Value a bond order (PV of coupons and principal, profit vs market)
    BondValue(BondValueArgs),
    /// Solve the CAPM relation for one of its variables
    Capm(CapmArgs),
    /// Locate an SEC EDGAR filing and open it in the browser
    Filing(FilingArgs),
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

fn run(command: Commands) -> Result<serde_json::Value, Box<dyn std::error::Error>> {
    match command {
        Commands::BondValue(args) => commands::fixed_income::run_bond_value(args),
        Commands::Capm(args) => commands::portfolio::run_capm(args),
        Commands::Filing(args) => commands::edgar::run_filing(args),
        Commands::Version => {
            println!("fincalc {}", env!("CARGO_PKG_VERSION"));
            Ok(serde_json::Value::Null)
        }
    }
}

fn main() {
    let cli = Cli::parse();

    match run(cli.command) {
        // Null means the command already printed its own output
        Ok(value) if !value.is_null() => output::render(&cli.output, &value),
        Ok(_) => {}
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
