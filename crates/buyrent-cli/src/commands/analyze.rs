use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use buyrent_core::buy_vs_rent::{self, BuyVsRentInput};

use crate::input;

/// Arguments for a buy-versus-rent comparison.
///
/// Flags override the reference scenario; `--input` or piped JSON replaces it.
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct AnalyzeArgs {
    /// Path to JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Purchase price
    #[arg(long)]
    pub price: Option<Decimal>,

    /// Down payment in percent of price (e.g. 30)
    #[arg(long)]
    pub down_payment: Option<Decimal>,

    /// Loan term in years
    #[arg(long)]
    pub term: Option<u32>,

    /// Annual mortgage rate in percent (e.g. 8.5)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Current monthly rent
    #[arg(long)]
    pub rent: Option<Decimal>,

    /// Annual rent inflation in percent
    #[arg(long)]
    pub rent_inflation: Option<Decimal>,

    /// Annual property appreciation in percent
    #[arg(long)]
    pub appreciation: Option<Decimal>,

    /// Annual return on invested savings in percent
    #[arg(long, alias = "return")]
    pub investment_return: Option<Decimal>,

    /// Household monthly income
    #[arg(long)]
    pub income: Option<Decimal>,

    /// Analysis horizon in years
    #[arg(long)]
    pub years: Option<u32>,

    /// Debt-to-income ceiling in percent
    #[arg(long)]
    pub max_dti: Option<Decimal>,

    /// Price-to-annual-rent ceiling
    #[arg(long)]
    pub max_price_to_rent: Option<Decimal>,

    /// Latest break-even year that still recommends buying
    #[arg(long)]
    pub max_break_even: Option<u32>,
}

impl AnalyzeArgs {
    fn into_input(self) -> BuyVsRentInput {
        let mut input = BuyVsRentInput::default();
        if let Some(v) = self.price {
            input.loan.property_price = v;
        }
        if let Some(v) = self.down_payment {
            input.loan.down_payment_pct = v;
        }
        if let Some(v) = self.term {
            input.loan.loan_term_years = v;
        }
        if let Some(v) = self.rate {
            input.loan.annual_interest_rate_pct = v;
        }
        if let Some(v) = self.rent {
            input.rent.monthly_rent = v;
        }
        if let Some(v) = self.rent_inflation {
            input.rent.rent_inflation_pct = v;
        }
        if let Some(v) = self.appreciation {
            input.ownership.property_appreciation_pct = v;
        }
        if let Some(v) = self.investment_return {
            input.investment.annual_investment_return_pct = v;
        }
        if let Some(v) = self.income {
            input.household.monthly_income = v;
        }
        if let Some(v) = self.years {
            input.window.analysis_years = v;
        }
        if let Some(v) = self.max_dti {
            input.policy.max_debt_to_income_pct = v;
        }
        if let Some(v) = self.max_price_to_rent {
            input.policy.max_price_to_rent = v;
        }
        if let Some(v) = self.max_break_even {
            input.policy.max_break_even_years = v;
        }
        input
    }
}

pub fn run_analyze(args: AnalyzeArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let analysis_input: BuyVsRentInput = match input::read_structured(args.input.as_deref())? {
        Some(structured) => structured,
        None => args.into_input(),
    };
    let result = buy_vs_rent::analyze_buy_vs_rent(&analysis_input)?;
    Ok(serde_json::to_value(result)?)
}
