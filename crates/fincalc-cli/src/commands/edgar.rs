use clap::Args;
use serde_json::Value;

use fincalc_core::edgar::filings::{self, EdgarIdentity, FilingQuery};

/// Arguments for the EDGAR filing lookup
#[derive(Args)]
pub struct FilingArgs {
    /// Your full name (the SEC requires requester identification)
    #[arg(long)]
    pub name: String,

    /// Your contact email (the SEC requires requester identification)
    #[arg(long)]
    pub email: String,

    /// Ticker symbol, e.g. AAPL
    #[arg(long)]
    pub ticker: String,

    /// Form type prefix, e.g. 10-K, 10-Q, 8-K
    #[arg(long)]
    pub form: String,

    /// Filing year, e.g. 2022
    #[arg(long)]
    pub year: String,

    /// Print the match without launching the browser
    #[arg(long)]
    pub no_open: bool,
}

pub fn run_filing(args: FilingArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let identity = EdgarIdentity {
        name: args.name,
        email: args.email,
    };
    let query = FilingQuery {
        ticker: args.ticker,
        form: args.form,
        year: args.year,
    };

    let filing = filings::locate_filing(&identity, &query)?;
    if !args.no_open {
        filings::open_filing(&filing)?;
    }

    Ok(serde_json::to_value(&filing)?)
}
