use buyrent_core::mortgage::{build_amortization_schedule, monthly_payment, AmortizingLoan, MortgageInput};
use proptest::prelude::{prop_assert, proptest};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

#[test]
fn test_zero_rate_payment_is_exact_division() {
    for term in [1u32, 15, 20, 30] {
        let p = monthly_payment(dec!(2100000000), Decimal::ZERO, term).unwrap();
        assert_eq!(p, dec!(2100000000) / Decimal::from(term * 12));
    }
}

#[test]
fn test_balance_closes_at_term() {
    let loan = AmortizingLoan::new(dec!(2100000000), dec!(8.5), 20).unwrap();
    assert_eq!(loan.balance_after(loan.total_payments).unwrap(), Decimal::ZERO);
    assert_eq!(loan.balance_after(loan.total_payments + 12).unwrap(), Decimal::ZERO);
    // The balance a month before the end is one payment less its interest
    let last = loan.balance_after(loan.total_payments - 1).unwrap();
    assert!((last * (Decimal::ONE + loan.monthly_rate) - loan.monthly_payment).abs() <= Decimal::ONE);
}

#[test]
fn test_schedule_matches_loan() {
    let out = build_amortization_schedule(&MortgageInput {
        loan_amount: dec!(300000),
        annual_interest_rate_pct: dec!(6),
        loan_term_years: 30,
    })
    .unwrap();
    let loan = AmortizingLoan::new(dec!(300000), dec!(6), 30).unwrap();

    // 300k at 6% over 30 years ≈ 1,798.65 / month
    assert!((out.result.monthly_payment - dec!(1798.65)).abs() < dec!(0.01));
    assert_eq!(out.result.monthly_payment, loan.monthly_payment);
    assert_eq!(
        out.result.schedule[4].ending_balance,
        loan.balance_after(60).unwrap()
    );
    assert_eq!(out.methodology, "Fixed-Rate Mortgage Amortization (Annuity Formula)");
}

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(64))]

    #[test]
    fn prop_payment_strictly_increases_with_rate(
        loan_k in 1u32..5_000_000,
        term in 1u32..=50,
        rate_bp in 0u32..2_000,
        bump_bp in 1u32..200,
    ) {
        let loan = Decimal::from(loan_k) * dec!(1000);
        let low = monthly_payment(loan, Decimal::new(i64::from(rate_bp), 2), term).unwrap();
        let high = monthly_payment(loan, Decimal::new(i64::from(rate_bp + bump_bp), 2), term).unwrap();
        prop_assert!(high > low, "rate {} -> {}: {} !> {}", rate_bp, rate_bp + bump_bp, high, low);
    }

    #[test]
    fn prop_balance_never_increases(
        loan_k in 1u32..5_000_000,
        term in 1u32..=40,
        rate_bp in 0u32..1_500,
    ) {
        let loan = AmortizingLoan::new(Decimal::from(loan_k) * dec!(1000), Decimal::new(i64::from(rate_bp), 2), term).unwrap();
        let mut previous = loan.principal;
        for year in 1..=term {
            let balance = loan.balance_after(year * 12).unwrap();
            prop_assert!(balance >= Decimal::ZERO);
            prop_assert!(balance <= previous);
            previous = balance;
        }
        prop_assert!(previous == Decimal::ZERO);
    }
}
