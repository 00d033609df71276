use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::payment::AmortizingLoan;
use crate::error::BuyRentError;
use crate::types::{with_metadata, ComputationOutput, Money, Percent};
use crate::BuyRentResult;

const MAX_TERM_YEARS: u32 = 50;
const MAX_LOAN_AMOUNT: Money = dec!(1000000000000000000);

/// Input for a standalone mortgage amortization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MortgageInput {
    /// Principal borrowed
    pub loan_amount: Money,
    /// Annual nominal interest rate in percentage points (8.5 = 8.5%)
    pub annual_interest_rate_pct: Percent,
    /// Loan term in whole years
    pub loan_term_years: u32,
}

/// One year of the amortization schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationYear {
    pub year: u32,
    pub interest_paid: Money,
    pub principal_paid: Money,
    pub ending_balance: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MortgageOutput {
    pub monthly_payment: Money,
    pub total_payments: u32,
    pub total_paid: Money,
    pub total_interest: Money,
    pub schedule: Vec<AmortizationYear>,
}

/// Amortize a fixed-rate mortgage and summarise it year by year.
pub fn build_amortization_schedule(
    input: &MortgageInput,
) -> BuyRentResult<ComputationOutput<MortgageOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_mortgage_input(input)?;

    if input.annual_interest_rate_pct.is_zero() {
        warnings.push("Zero interest rate: principal is repaid in equal instalments".into());
    }

    let loan = AmortizingLoan::new(
        input.loan_amount,
        input.annual_interest_rate_pct,
        input.loan_term_years,
    )?;

    let mut schedule = Vec::with_capacity(input.loan_term_years as usize);
    let mut opening = loan.principal;
    for year in 1..=input.loan_term_years {
        let ending = loan.balance_after(year * 12)?;
        let principal_paid = opening - ending;
        let interest_paid = (loan.monthly_payment * dec!(12) - principal_paid).max(Decimal::ZERO);
        schedule.push(AmortizationYear {
            year,
            interest_paid,
            principal_paid,
            ending_balance: ending,
        });
        opening = ending;
    }

    let total_paid = loan.paid_within(input.loan_term_years);
    let output = MortgageOutput {
        monthly_payment: loan.monthly_payment,
        total_payments: loan.total_payments,
        total_paid,
        total_interest: (total_paid - loan.principal).max(Decimal::ZERO),
        schedule,
    };

    tracing::debug!(
        monthly_payment = %output.monthly_payment,
        total_interest = %output.total_interest,
        "amortization schedule built"
    );

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Fixed-Rate Mortgage Amortization (Annuity Formula)",
        input,
        warnings,
        elapsed,
        output,
    ))
}

fn validate_mortgage_input(input: &MortgageInput) -> BuyRentResult<()> {
    if input.loan_amount < Decimal::ZERO || input.loan_amount > MAX_LOAN_AMOUNT {
        return Err(BuyRentError::InvalidInput {
            field: "loan_amount".into(),
            reason: format!("Loan amount must be between 0 and {MAX_LOAN_AMOUNT}"),
        });
    }
    if input.loan_term_years == 0 || input.loan_term_years > MAX_TERM_YEARS {
        return Err(BuyRentError::InvalidInput {
            field: "loan_term_years".into(),
            reason: format!("Loan term must be between 1 and {MAX_TERM_YEARS} years"),
        });
    }
    if input.annual_interest_rate_pct < Decimal::ZERO
        || input.annual_interest_rate_pct > dec!(100)
    {
        return Err(BuyRentError::InvalidInput {
            field: "annual_interest_rate_pct".into(),
            reason: "Interest rate must be between 0% and 100%".into(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_input() -> MortgageInput {
        MortgageInput {
            loan_amount: dec!(2100000000),
            annual_interest_rate_pct: dec!(8.5),
            loan_term_years: 20,
        }
    }

    #[test]
    fn test_schedule_covers_term_and_closes() {
        let out = build_amortization_schedule(&sample_input()).unwrap().result;
        assert_eq!(out.schedule.len(), 20);
        assert_eq!(out.total_payments, 240);
        assert_eq!(out.schedule.last().unwrap().ending_balance, Decimal::ZERO);

        let principal: Money = out.schedule.iter().map(|y| y.principal_paid).sum();
        assert!((principal - dec!(2100000000)).abs() < Decimal::ONE);
    }

    #[test]
    fn test_interest_front_loaded() {
        let out = build_amortization_schedule(&sample_input()).unwrap().result;
        let first = &out.schedule[0];
        let last = &out.schedule[19];
        assert!(first.interest_paid > first.principal_paid);
        assert!(last.interest_paid < last.principal_paid);
        assert!(out.total_interest > Decimal::ZERO);
    }

    #[test]
    fn test_zero_rate_warns_and_has_no_interest() {
        let mut input = sample_input();
        input.annual_interest_rate_pct = Decimal::ZERO;
        let out = build_amortization_schedule(&input).unwrap();
        assert_eq!(out.warnings.len(), 1);
        assert_eq!(out.result.total_interest, Decimal::ZERO);
        assert_eq!(out.result.schedule[0].principal_paid, dec!(105000000));
    }

    #[test]
    fn test_rejects_bad_terms() {
        let mut input = sample_input();
        input.loan_term_years = 0;
        assert!(build_amortization_schedule(&input).is_err());

        let mut input = sample_input();
        input.loan_amount = dec!(-1);
        assert!(build_amortization_schedule(&input).is_err());
    }
}
