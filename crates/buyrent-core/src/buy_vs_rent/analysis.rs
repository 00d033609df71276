use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::assumptions::{validate_input, BuyVsRentInput};
use super::buy::project_buy;
use super::comparison::{simulate_years, YearlyComparisonRow};
use super::investment::{project_investment, CarryingCost};
use super::recommendation::{
    debt_to_income_ratio_pct, price_to_rent_ratio, recommend, Recommendation,
    RecommendationSignals,
};
use super::rent::project_rent;
use crate::error::BuyRentError;
use crate::mortgage::AmortizingLoan;
use crate::types::{with_metadata, ComputationOutput, Money, Multiple, Percent};
use crate::BuyRentResult;

/// Full result of one buy-versus-rent comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuyVsRentOutput {
    pub down_payment: Money,
    pub loan_amount: Money,
    pub monthly_mortgage: Money,
    // --- buy path at the horizon ---
    pub future_property_value: Money,
    pub remaining_loan_balance: Money,
    pub total_buy_cost: Money,
    pub net_buy_position: Money,
    // --- rent path at the horizon ---
    pub total_rent_cost: Money,
    pub final_year_monthly_rent: Money,
    pub monthly_savings: Money,
    pub total_investment_value: Money,
    pub net_rent_position: Money,
    // --- comparison ---
    /// Buy net position minus rent net position at the horizon
    pub buy_vs_rent_difference: Money,
    /// `None` when buying never overtakes renting within the series
    pub break_even_year: Option<u32>,
    pub yearly_comparison: Vec<YearlyComparisonRow>,
    pub debt_to_income_ratio_pct: Percent,
    pub price_to_rent_ratio: Multiple,
    pub recommendation: Recommendation,
}

/// Compare buying against renting and investing the difference.
///
/// Pure: reads no clock and no randomness, so identical inputs give
/// identical outputs. Use [`analyze_buy_vs_rent`] for the envelope with
/// warnings and timing.
pub fn compute_buy_vs_rent(input: &BuyVsRentInput) -> BuyRentResult<BuyVsRentOutput> {
    let mut warnings = Vec::new();
    run_analysis(input, &mut warnings)
}

/// [`compute_buy_vs_rent`] wrapped in a `ComputationOutput` with
/// methodology, echoed assumptions, warnings and metadata.
pub fn analyze_buy_vs_rent(
    input: &BuyVsRentInput,
) -> BuyRentResult<ComputationOutput<BuyVsRentOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let output = run_analysis(input, &mut warnings)?;

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Buy vs Rent: amortized mortgage against rent plus invested savings",
        input,
        warnings,
        elapsed,
        output,
    ))
}

fn run_analysis(input: &BuyVsRentInput, warnings: &mut Vec<String>) -> BuyRentResult<BuyVsRentOutput> {
    validate_input(input, warnings)?;

    let terms = &input.loan;
    let price = terms.property_price;
    let down_payment = terms.down_payment();
    let loan_amount = terms.loan_amount();

    let loan = AmortizingLoan::new(
        loan_amount,
        terms.annual_interest_rate_pct,
        terms.loan_term_years,
    )?;
    tracing::debug!(
        %loan_amount,
        monthly_payment = %loan.monthly_payment,
        "mortgage resolved"
    );

    let carrying = CarryingCost::new(
        loan.monthly_payment,
        input.ownership.annual_maintenance(price),
        input.ownership.annual_property_tax(price),
        input.rent.monthly_rent,
        down_payment + input.ownership.transaction_cost(price),
    );
    if carrying.investable_savings().is_none() {
        warnings.push(
            "Owning costs no more per month than renting: renter has no monthly savings to invest"
                .into(),
        );
    }

    // --- Horizon projections ---
    let buy = project_buy(terms, &input.ownership, &input.window, &loan)?;
    let rent = project_rent(&input.rent, &input.window)?;
    let investment = project_investment(
        &carrying,
        &input.investment,
        &input.window,
        rent.total_rent_cost,
    )?;

    let buy_vs_rent_difference = buy
        .net_buy_position
        .checked_sub(investment.net_rent_position)
        .ok_or_else(|| BuyRentError::overflow("buy_vs_rent_difference"))?;

    // --- Year-by-year series ---
    let comparison = simulate_years(input, &loan, &carrying)?;

    // --- Recommendation ---
    let signals = RecommendationSignals {
        debt_to_income_ratio_pct: debt_to_income_ratio_pct(
            loan.monthly_payment,
            input.household.monthly_income,
        )?,
        price_to_rent_ratio: price_to_rent_ratio(price, input.rent.monthly_rent)?,
        net_position_difference: buy_vs_rent_difference,
        break_even_year: comparison.break_even_year,
    };
    let recommendation = recommend(&signals, &input.policy);

    tracing::debug!(
        verdict = ?recommendation.verdict,
        reason = ?recommendation.reason,
        break_even_year = ?comparison.break_even_year,
        %buy_vs_rent_difference,
        "buy vs rent analysed"
    );

    Ok(BuyVsRentOutput {
        down_payment,
        loan_amount,
        monthly_mortgage: loan.monthly_payment,
        future_property_value: buy.future_property_value,
        remaining_loan_balance: buy.remaining_loan_balance,
        total_buy_cost: buy.total_buy_cost,
        net_buy_position: buy.net_buy_position,
        total_rent_cost: rent.total_rent_cost,
        final_year_monthly_rent: rent.final_year_monthly_rent,
        monthly_savings: carrying.monthly_savings,
        total_investment_value: investment.total_investment_value,
        net_rent_position: investment.net_rent_position,
        buy_vs_rent_difference,
        break_even_year: comparison.break_even_year,
        yearly_comparison: comparison.rows,
        debt_to_income_ratio_pct: signals.debt_to_income_ratio_pct,
        price_to_rent_ratio: signals.price_to_rent_ratio,
        recommendation,
    })
}
