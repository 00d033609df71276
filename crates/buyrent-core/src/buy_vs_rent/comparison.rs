use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::assumptions::BuyVsRentInput;
use super::investment::CarryingCost;
use crate::error::BuyRentError;
use crate::mortgage::AmortizingLoan;
use crate::types::{pct_to_rate, Money};
use crate::BuyRentResult;

/// Both paths' standing at the end of one elapsed year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearlyComparisonRow {
    pub year: u32,
    pub property_value: Money,
    pub investment_value: Money,
    pub buy_net_position: Money,
    pub rent_net_position: Money,
    pub remaining_loan_balance: Money,
    pub cumulative_buy_cost: Money,
    pub cumulative_rent_cost: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearlyComparison {
    pub rows: Vec<YearlyComparisonRow>,
    /// First year buying's net position exceeds renting's
    pub break_even_year: Option<u32>,
}

/// Walk both paths forward one year at a time for up to 30 years.
///
/// Annual contributions from monthly savings are credited with half a
/// year's return, so this series does not match the monthly-compounded
/// horizon totals exactly.
///
/// The break-even year is the first crossing only. A later year in which
/// renting pulls ahead again does not clear it.
pub fn simulate_years(
    input: &BuyVsRentInput,
    loan: &AmortizingLoan,
    carrying: &CarryingCost,
) -> BuyRentResult<YearlyComparison> {
    let price = input.loan.property_price;
    let appreciation = Decimal::ONE + pct_to_rate(input.ownership.property_appreciation_pct);
    let rent_growth = Decimal::ONE + pct_to_rate(input.rent.rent_inflation_pct);
    let investment_return = pct_to_rate(input.investment.annual_investment_return_pct);
    let annual_upkeep =
        input.ownership.annual_maintenance(price) + input.ownership.annual_property_tax(price);
    let annual_contribution = match carrying.investable_savings() {
        Some(savings) => savings * dec!(12) * (Decimal::ONE + investment_return / dec!(2)),
        None => Decimal::ZERO,
    };

    let mut cumulative_buy_cost = carrying.upfront_capital;
    let mut cumulative_rent_cost = Decimal::ZERO;
    let mut cumulative_investment = carrying.upfront_capital;
    let mut property_value = price;
    let mut year_rent = input.rent.annual_rent();

    let series_years = input.window.series_years();
    let mut rows = Vec::with_capacity(series_years as usize);
    let mut break_even_year = None;

    for year in 1..=series_years {
        let mortgage_this_year = if year <= input.loan.loan_term_years {
            loan.monthly_payment * dec!(12)
        } else {
            Decimal::ZERO
        };
        cumulative_buy_cost = cumulative_buy_cost
            .checked_add(mortgage_this_year)
            .and_then(|v| v.checked_add(annual_upkeep))
            .ok_or_else(|| BuyRentError::overflow("cumulative_buy_cost"))?;

        property_value = property_value
            .checked_mul(appreciation)
            .ok_or_else(|| BuyRentError::overflow("property_value"))?;
        cumulative_rent_cost = cumulative_rent_cost
            .checked_add(year_rent)
            .ok_or_else(|| BuyRentError::overflow("cumulative_rent_cost"))?;
        cumulative_investment = cumulative_investment
            .checked_mul(Decimal::ONE + investment_return)
            .and_then(|v| v.checked_add(annual_contribution))
            .ok_or_else(|| BuyRentError::overflow("investment_value"))?;

        let remaining_loan_balance = loan.balance_after(loan.payments_within(year))?;
        let buy_net_position = property_value
            .checked_sub(remaining_loan_balance)
            .and_then(|v| v.checked_sub(cumulative_buy_cost))
            .ok_or_else(|| BuyRentError::overflow("buy_net_position"))?;
        let rent_net_position = cumulative_investment
            .checked_sub(cumulative_rent_cost)
            .ok_or_else(|| BuyRentError::overflow("rent_net_position"))?;

        if break_even_year.is_none() && buy_net_position > rent_net_position {
            break_even_year = Some(year);
        }

        rows.push(YearlyComparisonRow {
            year,
            property_value,
            investment_value: cumulative_investment,
            buy_net_position,
            rent_net_position,
            remaining_loan_balance,
            cumulative_buy_cost,
            cumulative_rent_cost,
        });

        year_rent = year_rent
            .checked_mul(rent_growth)
            .ok_or_else(|| BuyRentError::overflow("cumulative_rent_cost"))?;
    }

    Ok(YearlyComparison {
        rows,
        break_even_year,
    })
}
