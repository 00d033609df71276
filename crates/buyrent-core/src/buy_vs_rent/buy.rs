use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::assumptions::{AnalysisWindow, LoanTerms, OwnershipCostAssumptions};
use crate::error::BuyRentError;
use crate::mortgage::AmortizingLoan;
use crate::time_value;
use crate::types::{pct_to_rate, Money};
use crate::BuyRentResult;

/// Position of the buying household at the end of the analysis window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuyProjection {
    pub future_property_value: Money,
    pub transaction_cost: Money,
    pub mortgage_paid_in_period: Money,
    pub remaining_loan_balance: Money,
    pub total_maintenance_cost: Money,
    pub total_property_tax: Money,
    /// Down payment + transaction cost + mortgage paid + upkeep + tax
    pub total_buy_cost: Money,
    /// Property value net of debt, minus every cash outlay
    pub net_buy_position: Money,
}

pub fn project_buy(
    terms: &LoanTerms,
    ownership: &OwnershipCostAssumptions,
    window: &AnalysisWindow,
    loan: &AmortizingLoan,
) -> BuyRentResult<BuyProjection> {
    let years = window.analysis_years;
    let price = terms.property_price;

    let future_property_value = time_value::compound(
        price,
        pct_to_rate(ownership.property_appreciation_pct),
        years,
        "future_property_value",
    )?;

    let transaction_cost = ownership.transaction_cost(price);
    let mortgage_paid_in_period = loan.paid_within(years);
    let remaining_loan_balance = loan.balance_after(loan.payments_within(years))?;

    let years_dec = Decimal::from(years);
    let total_maintenance_cost = ownership.annual_maintenance(price) * years_dec;
    let total_property_tax = ownership.annual_property_tax(price) * years_dec;

    let total_buy_cost = terms.down_payment()
        + transaction_cost
        + mortgage_paid_in_period
        + total_maintenance_cost
        + total_property_tax;

    let net_buy_position = future_property_value
        .checked_sub(remaining_loan_balance)
        .and_then(|v| v.checked_sub(total_buy_cost))
        .ok_or_else(|| BuyRentError::overflow("net_buy_position"))?;

    Ok(BuyProjection {
        future_property_value,
        transaction_cost,
        mortgage_paid_in_period,
        remaining_loan_balance,
        total_maintenance_cost,
        total_property_tax,
        total_buy_cost,
        net_buy_position,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn project(terms: &LoanTerms, years: u32) -> BuyProjection {
        let ownership = OwnershipCostAssumptions::default();
        let loan = AmortizingLoan::new(
            terms.loan_amount(),
            terms.annual_interest_rate_pct,
            terms.loan_term_years,
        )
        .unwrap();
        project_buy(terms, &ownership, &AnalysisWindow { analysis_years: years }, &loan).unwrap()
    }

    #[test]
    fn test_default_buy_projection() {
        let terms = LoanTerms::default();
        let p = project(&terms, 20);

        // 3bn * 1.05^20 ≈ 7.96bn
        assert!((p.future_property_value - dec!(7959893115)).abs() < dec!(1000));
        assert_eq!(p.transaction_cost, dec!(105000000));
        assert_eq!(p.total_maintenance_cost, dec!(600000000));
        assert_eq!(p.total_property_tax, dec!(18000000));
        // Loan fully repaid at the horizon
        assert_eq!(p.remaining_loan_balance, Decimal::ZERO);

        let expected_cost = dec!(900000000)
            + p.transaction_cost
            + p.mortgage_paid_in_period
            + p.total_maintenance_cost
            + p.total_property_tax;
        assert_eq!(p.total_buy_cost, expected_cost);
        assert_eq!(p.net_buy_position, p.future_property_value - p.total_buy_cost);
    }

    #[test]
    fn test_short_window_leaves_balance() {
        let terms = LoanTerms::default();
        let p = project(&terms, 5);
        assert!(p.remaining_loan_balance > Decimal::ZERO);
        assert!(p.remaining_loan_balance < terms.loan_amount());
    }

    #[test]
    fn test_window_longer_than_term_caps_payments() {
        let terms = LoanTerms {
            loan_term_years: 10,
            ..LoanTerms::default()
        };
        let short = project(&terms, 10);
        let long = project(&terms, 15);
        assert_eq!(short.mortgage_paid_in_period, long.mortgage_paid_in_period);
        assert_eq!(long.remaining_loan_balance, Decimal::ZERO);
    }
}
