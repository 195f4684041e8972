use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use fincalc_core::portfolio::capm::{self, CapmInput, CapmTarget};

use crate::input;

/// Arguments for the CAPM solver
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct CapmArgs {
    /// Risk-free rate as a percentage (6 = 6%)
    #[arg(long, alias = "rf")]
    pub risk_free: Option<Decimal>,

    /// Beta of the asset
    #[arg(long)]
    pub beta: Option<Decimal>,

    /// Expected market return as a percentage
    #[arg(long, alias = "rm")]
    pub market_return: Option<Decimal>,

    /// Expected investment return as a percentage
    #[arg(long, alias = "er")]
    pub investment_return: Option<Decimal>,

    /// Variable to solve for: risk-free, beta, market-return, investment-return
    #[arg(long, default_value = "investment-return")]
    pub solve_for: String,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_capm(args: CapmArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let capm_input: CapmInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        let solve_for = parse_target(&args.solve_for)?;
        CapmInput {
            risk_free_pct: known(args.risk_free, "--risk-free", CapmTarget::RiskFree, solve_for)?,
            beta: known(args.beta, "--beta", CapmTarget::Beta, solve_for)?,
            market_return_pct: known(
                args.market_return,
                "--market-return",
                CapmTarget::MarketReturn,
                solve_for,
            )?,
            investment_return_pct: known(
                args.investment_return,
                "--investment-return",
                CapmTarget::InvestmentReturn,
                solve_for,
            )?,
            solve_for,
        }
    };

    let result = capm::solve_capm(&capm_input)?;
    Ok(serde_json::to_value(&result)?)
}

/// The solved-for variable may be omitted; every other one is required.
fn known(
    value: Option<Decimal>,
    flag: &str,
    variable: CapmTarget,
    solve_for: CapmTarget,
) -> Result<Decimal, Box<dyn std::error::Error>> {
    if variable == solve_for {
        return Ok(value.unwrap_or_default());
    }
    value.ok_or_else(|| format!("{flag} is required (or provide --input)").into())
}

fn parse_target(s: &str) -> Result<CapmTarget, Box<dyn std::error::Error>> {
    match s.to_lowercase().as_str() {
        "risk-free" | "risk_free" | "rf" => Ok(CapmTarget::RiskFree),
        "beta" => Ok(CapmTarget::Beta),
        "market-return" | "market_return" | "rm" => Ok(CapmTarget::MarketReturn),
        "investment-return" | "investment_return" | "er" => Ok(CapmTarget::InvestmentReturn),
        _ => Err(format!(
            "Unknown solve target '{s}'. Use: risk-free, beta, market-return, investment-return"
        )
        .into()),
    }
}
