use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::time_value;
use crate::types::{pct_to_rate, Money, Percent, Rate};
use crate::BuyRentResult;

/// Monthly rate from an annual nominal rate in percentage points.
pub fn monthly_rate(annual_rate_pct: Percent) -> Rate {
    pct_to_rate(annual_rate_pct) / dec!(12)
}

/// Fixed monthly payment for a fully amortizing loan.
///
/// `payment = L·r·(1+r)^n / ((1+r)^n − 1)` with `r` the monthly rate and
/// `n = term_years × 12`; `L / n` when the rate is zero.
pub fn monthly_payment(
    loan_amount: Money,
    annual_rate_pct: Percent,
    term_years: u32,
) -> BuyRentResult<Money> {
    time_value::pmt(monthly_rate(annual_rate_pct), term_years.saturating_mul(12), loan_amount)
}

/// A fixed-rate loan with its level payment resolved.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AmortizingLoan {
    pub principal: Money,
    pub monthly_rate: Rate,
    pub total_payments: u32,
    pub monthly_payment: Money,
}

impl AmortizingLoan {
    pub fn new(loan_amount: Money, annual_rate_pct: Percent, term_years: u32) -> BuyRentResult<Self> {
        let monthly_payment = monthly_payment(loan_amount, annual_rate_pct, term_years)?;
        Ok(Self {
            principal: loan_amount,
            monthly_rate: monthly_rate(annual_rate_pct),
            total_payments: term_years.saturating_mul(12),
            monthly_payment,
        })
    }

    /// Principal still owed after `payments_elapsed` payments; zero at or past term.
    pub fn balance_after(&self, payments_elapsed: u32) -> BuyRentResult<Money> {
        time_value::remaining_balance(
            self.principal,
            self.monthly_rate,
            self.total_payments,
            payments_elapsed,
            self.monthly_payment,
        )
    }

    /// Payments actually made within a window of `years`, capped at the term.
    pub fn payments_within(&self, years: u32) -> u32 {
        (years.saturating_mul(12)).min(self.total_payments)
    }

    /// Sum of payments made within the first `years`.
    pub fn paid_within(&self, years: u32) -> Money {
        self.monthly_payment * Decimal::from(self.payments_within(years))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scenario_payment() {
        // 2.1bn over 20 years at 8.5% ≈ 18.23m / month
        let p = monthly_payment(dec!(2100000000), dec!(8.5), 20).unwrap();
        let expected = dec!(18230000);
        assert!(
            (p - expected).abs() < expected * dec!(0.01),
            "Expected ~18.23m, got {p}"
        );
    }

    #[test]
    fn test_zero_rate_payment_exact() {
        let p = monthly_payment(dec!(2100000000), Decimal::ZERO, 20).unwrap();
        assert_eq!(p, dec!(2100000000) / dec!(240));
    }

    #[test]
    fn test_vanishing_positive_rate_is_accepted() {
        let p = monthly_payment(dec!(2100000000), dec!(0.0000000000000000000000001), 20).unwrap();
        assert!((p - dec!(8750000)).abs() < dec!(1), "got {p}");
    }

    #[test]
    fn test_higher_rate_costs_more() {
        let low = monthly_payment(dec!(1000000), dec!(4), 30).unwrap();
        let high = monthly_payment(dec!(1000000), dec!(4.25), 30).unwrap();
        assert!(high > low);
    }

    #[test]
    fn test_no_loan_no_payment() {
        let loan = AmortizingLoan::new(Decimal::ZERO, dec!(7), 25).unwrap();
        assert_eq!(loan.monthly_payment, Decimal::ZERO);
        assert_eq!(loan.balance_after(12).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_balance_closes_within_one_unit() {
        let loan = AmortizingLoan::new(dec!(2100000000), dec!(8.5), 20).unwrap();
        assert_eq!(loan.balance_after(240).unwrap(), Decimal::ZERO);
        // The last scheduled payment retires what remains after 239
        let before_last = loan.balance_after(239).unwrap();
        let interest = before_last * loan.monthly_rate;
        assert!((before_last + interest - loan.monthly_payment).abs() <= Decimal::ONE);
    }

    #[test]
    fn test_payments_within_window() {
        let loan = AmortizingLoan::new(dec!(100000), dec!(5), 10).unwrap();
        assert_eq!(loan.payments_within(5), 60);
        assert_eq!(loan.payments_within(20), 120);
        assert_eq!(loan.paid_within(20), loan.monthly_payment * dec!(120));
    }
}
