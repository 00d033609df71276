use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::recommendation::RecommendationPolicy;
use crate::error::BuyRentError;
use crate::types::{pct_to_rate, Money, Percent, Rate};
use crate::BuyRentResult;

/// Longest span covered by the year-by-year comparison.
pub const MAX_SERIES_YEARS: u32 = 30;

const MAX_ANALYSIS_YEARS: u32 = 100;
const MAX_LOAN_TERM_YEARS: u32 = 50;
const MAX_MONEY: Decimal = dec!(1000000000000000000);

// ---------------------------------------------------------------------------
// Parameter records
// ---------------------------------------------------------------------------

/// Purchase price and financing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoanTerms {
    pub property_price: Money,
    /// Share of the price paid up front, in percentage points (0–100)
    pub down_payment_pct: Percent,
    pub loan_term_years: u32,
    /// Annual nominal mortgage rate, percentage points
    pub annual_interest_rate_pct: Percent,
}

impl LoanTerms {
    pub fn down_payment(&self) -> Money {
        self.property_price * pct_to_rate(self.down_payment_pct)
    }

    pub fn loan_amount(&self) -> Money {
        self.property_price - self.down_payment()
    }
}

impl Default for LoanTerms {
    fn default() -> Self {
        Self {
            property_price: dec!(3000000000),
            down_payment_pct: dec!(30),
            loan_term_years: 20,
            annual_interest_rate_pct: dec!(8.5),
        }
    }
}

/// Costs of owning, all expressed against the purchase price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OwnershipCostAssumptions {
    /// Annual price appreciation, percentage points
    pub property_appreciation_pct: Percent,
    /// One-off purchase costs as a fraction of price
    pub transaction_cost_rate: Rate,
    /// Yearly upkeep as a fraction of price
    pub annual_maintenance_rate: Rate,
    /// Yearly property tax as a fraction of price
    pub annual_property_tax_rate: Rate,
}

impl OwnershipCostAssumptions {
    pub fn transaction_cost(&self, property_price: Money) -> Money {
        property_price * self.transaction_cost_rate
    }

    pub fn annual_maintenance(&self, property_price: Money) -> Money {
        property_price * self.annual_maintenance_rate
    }

    pub fn annual_property_tax(&self, property_price: Money) -> Money {
        property_price * self.annual_property_tax_rate
    }
}

impl Default for OwnershipCostAssumptions {
    fn default() -> Self {
        Self {
            property_appreciation_pct: dec!(5),
            transaction_cost_rate: dec!(0.035),
            annual_maintenance_rate: dec!(0.01),
            annual_property_tax_rate: dec!(0.0003),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RentAssumptions {
    pub monthly_rent: Money,
    /// Annual rent increase, applied at each year boundary
    pub rent_inflation_pct: Percent,
}

impl RentAssumptions {
    pub fn annual_rent(&self) -> Money {
        self.monthly_rent * dec!(12)
    }
}

impl Default for RentAssumptions {
    fn default() -> Self {
        Self {
            monthly_rent: dec!(15000000),
            rent_inflation_pct: dec!(5),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvestmentAssumptions {
    pub annual_investment_return_pct: Percent,
}

impl Default for InvestmentAssumptions {
    fn default() -> Self {
        Self {
            annual_investment_return_pct: dec!(10),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HouseholdAssumptions {
    pub monthly_income: Money,
}

impl Default for HouseholdAssumptions {
    fn default() -> Self {
        Self {
            monthly_income: dec!(50000000),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisWindow {
    pub analysis_years: u32,
}

impl AnalysisWindow {
    /// Number of rows in the yearly comparison.
    pub fn series_years(&self) -> u32 {
        self.analysis_years.min(MAX_SERIES_YEARS)
    }
}

impl Default for AnalysisWindow {
    fn default() -> Self {
        Self { analysis_years: 20 }
    }
}

/// Everything the engine needs for one buy-versus-rent comparison.
///
/// Missing sections or fields deserialize to the reference scenario
/// (3bn property, 30% down, 20 years at 8.5%, 15m rent, 50m income).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuyVsRentInput {
    pub loan: LoanTerms,
    pub ownership: OwnershipCostAssumptions,
    pub rent: RentAssumptions,
    pub investment: InvestmentAssumptions,
    pub household: HouseholdAssumptions,
    pub window: AnalysisWindow,
    pub policy: RecommendationPolicy,
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Reject inputs the engine cannot price and note unusual-but-valid ones.
pub fn validate_input(input: &BuyVsRentInput, warnings: &mut Vec<String>) -> BuyRentResult<()> {
    positive_money("property_price", input.loan.property_price)?;
    positive_money("monthly_rent", input.rent.monthly_rent)?;
    positive_money("monthly_income", input.household.monthly_income)?;

    if input.loan.down_payment_pct < Decimal::ZERO || input.loan.down_payment_pct > dec!(100) {
        return Err(BuyRentError::InvalidInput {
            field: "down_payment_pct".into(),
            reason: "Down payment must be between 0% and 100%".into(),
        });
    }

    if input.loan.loan_term_years == 0 || input.loan.loan_term_years > MAX_LOAN_TERM_YEARS {
        return Err(BuyRentError::InvalidInput {
            field: "loan_term_years".into(),
            reason: format!("Loan term must be between 1 and {MAX_LOAN_TERM_YEARS} years"),
        });
    }

    if input.window.analysis_years == 0 || input.window.analysis_years > MAX_ANALYSIS_YEARS {
        return Err(BuyRentError::InvalidInput {
            field: "analysis_years".into(),
            reason: format!("Analysis window must be between 1 and {MAX_ANALYSIS_YEARS} years"),
        });
    }

    if input.loan.annual_interest_rate_pct < Decimal::ZERO
        || input.loan.annual_interest_rate_pct > dec!(100)
    {
        return Err(BuyRentError::InvalidInput {
            field: "annual_interest_rate_pct".into(),
            reason: "Interest rate must be between 0% and 100%".into(),
        });
    }

    growth_pct(
        "property_appreciation_pct",
        input.ownership.property_appreciation_pct,
    )?;
    growth_pct("rent_inflation_pct", input.rent.rent_inflation_pct)?;
    growth_pct(
        "annual_investment_return_pct",
        input.investment.annual_investment_return_pct,
    )?;

    cost_rate("transaction_cost_rate", input.ownership.transaction_cost_rate)?;
    cost_rate("annual_maintenance_rate", input.ownership.annual_maintenance_rate)?;
    cost_rate("annual_property_tax_rate", input.ownership.annual_property_tax_rate)?;

    input.policy.validate()?;

    // --- Warnings for unusual but valid inputs ---
    if input.window.analysis_years > MAX_SERIES_YEARS {
        warnings.push(format!(
            "Analysis window of {} years exceeds {MAX_SERIES_YEARS}; yearly comparison is truncated",
            input.window.analysis_years
        ));
    }
    if input.loan.loan_term_years < input.window.analysis_years {
        warnings.push(format!(
            "Loan is repaid after {} years, before the {}-year horizon",
            input.loan.loan_term_years, input.window.analysis_years
        ));
    }
    if input.loan.down_payment_pct == dec!(100) {
        warnings.push("100% down payment: no mortgage is taken".into());
    } else if input.loan.annual_interest_rate_pct.is_zero() {
        warnings.push("Zero interest rate: mortgage amortizes linearly".into());
    }
    if input.investment.annual_investment_return_pct.is_zero() {
        warnings.push("Zero investment return: renter's savings do not grow".into());
    }

    Ok(())
}

fn positive_money(field: &str, value: Money) -> BuyRentResult<()> {
    if value <= Decimal::ZERO {
        return Err(BuyRentError::InvalidInput {
            field: field.into(),
            reason: "Must be positive".into(),
        });
    }
    if value > MAX_MONEY {
        return Err(BuyRentError::InvalidInput {
            field: field.into(),
            reason: format!("Must not exceed {MAX_MONEY}"),
        });
    }
    Ok(())
}

fn growth_pct(field: &str, value: Percent) -> BuyRentResult<()> {
    if value <= dec!(-100) || value > dec!(100) {
        return Err(BuyRentError::InvalidInput {
            field: field.into(),
            reason: "Annual rate must be above -100% and at most 100%".into(),
        });
    }
    Ok(())
}

fn cost_rate(field: &str, value: Rate) -> BuyRentResult<()> {
    if value < Decimal::ZERO || value > Decimal::ONE {
        return Err(BuyRentError::InvalidInput {
            field: field.into(),
            reason: "Cost rate must be a fraction between 0 and 1".into(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invalid_field(input: &BuyVsRentInput) -> String {
        let mut warnings = Vec::new();
        match validate_input(input, &mut warnings) {
            Err(BuyRentError::InvalidInput { field, .. }) => field,
            other => panic!("expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_defaults_are_valid_and_quiet() {
        let mut warnings = Vec::new();
        validate_input(&BuyVsRentInput::default(), &mut warnings).unwrap();
        assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");
    }

    #[test]
    fn test_derived_loan_amounts() {
        let loan = LoanTerms::default();
        assert_eq!(loan.down_payment(), dec!(900000000));
        assert_eq!(loan.loan_amount(), dec!(2100000000));
    }

    #[test]
    fn test_rejects_non_positive_money() {
        let mut input = BuyVsRentInput::default();
        input.loan.property_price = Decimal::ZERO;
        assert_eq!(invalid_field(&input), "property_price");

        let mut input = BuyVsRentInput::default();
        input.rent.monthly_rent = dec!(-1);
        assert_eq!(invalid_field(&input), "monthly_rent");

        let mut input = BuyVsRentInput::default();
        input.household.monthly_income = Decimal::ZERO;
        assert_eq!(invalid_field(&input), "monthly_income");
    }

    #[test]
    fn test_rejects_out_of_range_terms() {
        let mut input = BuyVsRentInput::default();
        input.loan.down_payment_pct = dec!(101);
        assert_eq!(invalid_field(&input), "down_payment_pct");

        let mut input = BuyVsRentInput::default();
        input.loan.loan_term_years = 0;
        assert_eq!(invalid_field(&input), "loan_term_years");

        let mut input = BuyVsRentInput::default();
        input.window.analysis_years = 0;
        assert_eq!(invalid_field(&input), "analysis_years");

        let mut input = BuyVsRentInput::default();
        input.ownership.property_appreciation_pct = dec!(-100);
        assert_eq!(invalid_field(&input), "property_appreciation_pct");

        let mut input = BuyVsRentInput::default();
        input.ownership.annual_maintenance_rate = dec!(1.5);
        assert_eq!(invalid_field(&input), "annual_maintenance_rate");
    }

    #[test]
    fn test_long_window_warns() {
        let mut input = BuyVsRentInput::default();
        input.window.analysis_years = 35;
        let mut warnings = Vec::new();
        validate_input(&input, &mut warnings).unwrap();
        assert!(warnings.iter().any(|w| w.contains("truncated")));
        assert!(warnings.iter().any(|w| w.contains("before the 35-year horizon")));
        assert_eq!(input.window.series_years(), 30);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let input: BuyVsRentInput =
            serde_json::from_str(r#"{ "rent": { "monthly_rent": "12000000" } }"#).unwrap();
        assert_eq!(input.rent.monthly_rent, dec!(12000000));
        assert_eq!(input.rent.rent_inflation_pct, dec!(5));
        assert_eq!(input.loan, LoanTerms::default());
    }
}
