use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use buyrent_core::mortgage::{self, MortgageInput};

use crate::input;

/// Arguments for a mortgage amortization
#[derive(Args)]
pub struct MortgageArgs {
    /// Amount borrowed
    #[arg(long)]
    pub loan_amount: Option<Decimal>,

    /// Annual interest rate in percent (e.g. 8.5)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Loan term in years
    #[arg(long, default_value = "20")]
    pub term: u32,

    /// Path to JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_mortgage(args: MortgageArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let mortgage_input: MortgageInput = match input::read_structured(args.input.as_deref())? {
        Some(structured) => structured,
        None => MortgageInput {
            loan_amount: args
                .loan_amount
                .ok_or("--loan-amount is required (or provide --input)")?,
            annual_interest_rate_pct: args
                .rate
                .ok_or("--rate is required (or provide --input)")?,
            loan_term_years: args.term,
        },
    };
    let result = mortgage::build_amortization_schedule(&mortgage_input)?;
    Ok(serde_json::to_value(result)?)
}
