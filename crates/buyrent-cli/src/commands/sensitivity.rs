use clap::Args;
use serde_json::Value;

use buyrent_core::buy_vs_rent::BuyVsRentInput;
use buyrent_core::scenarios::{self, BuyVsRentSensitivityInput, SensitivityVariable};

use crate::input;

/// Arguments for sensitivity analysis
#[derive(Args)]
pub struct SensitivityArgs {
    /// First sweep in format parameter:min:max:step
    /// (e.g. "interest_rate:6:12:0.5"). Parameters: interest_rate, down_payment,
    /// appreciation, rent_inflation, investment_return, monthly_rent,
    /// monthly_income, analysis_years
    #[arg(long)]
    pub var1: String,

    /// Second sweep (optional, evaluates the full grid)
    #[arg(long)]
    pub var2: Option<String>,

    /// Path to JSON or YAML file with the base scenario (defaults to the reference scenario)
    #[arg(long)]
    pub base_inputs: Option<String>,
}

fn parse_sens_var(raw: &str) -> Result<SensitivityVariable, Box<dyn std::error::Error>> {
    let parts: Vec<&str> = raw.split(':').collect();
    if parts.len() != 4 {
        return Err(format!(
            "Sensitivity variable must be parameter:min:max:step, got '{}'",
            raw
        )
        .into());
    }
    Ok(SensitivityVariable {
        parameter: parts[0].parse()?,
        min: parts[1].parse()?,
        max: parts[2].parse()?,
        step: parts[3].parse()?,
    })
}

pub fn run_sensitivity(args: SensitivityArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let base: BuyVsRentInput = match args.base_inputs {
        Some(ref path) => input::file::read_input(path)?,
        None => BuyVsRentInput::default(),
    };

    let sens_input = BuyVsRentSensitivityInput {
        base,
        variable_1: parse_sens_var(&args.var1)?,
        variable_2: args.var2.as_deref().map(parse_sens_var).transpose()?,
    };

    let result = scenarios::run_sensitivity(&sens_input)?;
    Ok(serde_json::to_value(result)?)
}
