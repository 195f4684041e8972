use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use fincalc_core::fixed_income::bond_value::{self, BondOrderInput, PaymentFrequency, ProfitBasis};

use crate::input;

/// Arguments for bond order valuation
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct BondValueArgs {
    /// Number of bonds purchased
    #[arg(long)]
    pub quantity: Option<u32>,

    /// Quoted market price per bond in tens of dollars (101 = $1,010)
    #[arg(long)]
    pub market_price: Option<Decimal>,

    /// Annual coupon rate as a percentage of face value (5 = 5%)
    #[arg(long, alias = "coupon")]
    pub coupon_rate: Option<Decimal>,

    /// Annual yield to maturity as a percentage
    #[arg(long)]
    pub ytm: Option<Decimal>,

    /// Whole years until maturity
    #[arg(long)]
    pub years: Option<u32>,

    /// Coupon schedule: annual, semi, quarterly, monthly
    #[arg(long, default_value = "annual")]
    pub frequency: String,

    /// Profit formula: legacy or standard
    #[arg(long, default_value = "legacy")]
    pub profit_basis: String,

    /// Print the classic six-line report instead of structured output
    #[arg(long)]
    pub report: bool,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_bond_value(args: BondValueArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let order: BondOrderInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        BondOrderInput {
            quantity: args
                .quantity
                .ok_or("--quantity is required (or provide --input)")?,
            market_price: args
                .market_price
                .ok_or("--market-price is required (or provide --input)")?,
            coupon_rate_pct: args
                .coupon_rate
                .ok_or("--coupon-rate is required (or provide --input)")?,
            ytm_pct: args.ytm.ok_or("--ytm is required (or provide --input)")?,
            years_to_maturity: args.years.ok_or("--years is required (or provide --input)")?,
            frequency: parse_frequency(&args.frequency)?,
            profit_basis: parse_profit_basis(&args.profit_basis)?,
        }
    };

    let result = bond_value::value_bond_order(&order)?;

    if args.report {
        for line in result.result.report_lines() {
            println!("{line}");
        }
        return Ok(Value::Null);
    }

    Ok(serde_json::to_value(&result)?)
}

fn parse_frequency(s: &str) -> Result<PaymentFrequency, Box<dyn std::error::Error>> {
    match s.to_lowercase().as_str() {
        "annual" | "annually" => Ok(PaymentFrequency::Annual),
        "semi" | "semiannual" | "semi-annual" => Ok(PaymentFrequency::Semiannual),
        "quarterly" => Ok(PaymentFrequency::Quarterly),
        "monthly" => Ok(PaymentFrequency::Monthly),
        _ => Err(format!("Unknown frequency '{s}'. Use: annual, semi, quarterly, monthly").into()),
    }
}

fn parse_profit_basis(s: &str) -> Result<ProfitBasis, Box<dyn std::error::Error>> {
    match s.to_lowercase().as_str() {
        "legacy" => Ok(ProfitBasis::Legacy),
        "standard" => Ok(ProfitBasis::Standard),
        _ => Err(format!("Unknown profit basis '{s}'. Use: legacy, standard").into()),
    }
}
