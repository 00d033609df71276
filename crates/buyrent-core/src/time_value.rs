use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;

use crate::error::BuyRentError;
use crate::types::{Money, Rate};
use crate::BuyRentResult;

/// Compound growth factor `(1 + rate)^periods`.
///
/// Fails closed with `InvalidInput` on `field` when the factor cannot be
/// represented.
pub fn growth_factor(rate: Rate, periods: u32, field: &str) -> BuyRentResult<Decimal> {
    (Decimal::ONE + rate)
        .checked_powu(u64::from(periods))
        .ok_or_else(|| BuyRentError::overflow(field))
}

/// Future value of a lump sum compounded for `periods` at `rate`.
pub fn compound(amount: Money, rate: Rate, periods: u32, field: &str) -> BuyRentResult<Money> {
    let factor = growth_factor(rate, periods, field)?;
    amount
        .checked_mul(factor)
        .ok_or_else(|| BuyRentError::overflow(field))
}

/// Level payment that retires `present_value` over `nper` periods.
///
/// Returned as a positive outflow. A zero rate, or one too small to move
/// `(1 + rate)^nper` off 1, degenerates to straight-line repayment
/// (`present_value / nper`).
pub fn pmt(rate: Rate, nper: u32, present_value: Money) -> BuyRentResult<Money> {
    if nper == 0 {
        return Err(BuyRentError::InvalidInput {
            field: "nper".into(),
            reason: "Number of periods must be > 0".into(),
        });
    }

    let factor = growth_factor(rate, nper, "payment")?;
    let annuity_factor = factor - Decimal::ONE;
    if annuity_factor.is_zero() {
        return Ok(present_value / Decimal::from(nper));
    }

    rate.checked_mul(factor)
        .and_then(|v| v.checked_div(annuity_factor))
        .and_then(|v| v.checked_mul(present_value))
        .ok_or_else(|| BuyRentError::overflow("payment"))
}

/// Future value of an ordinary annuity: `payment` deposited at the end of
/// each of `nper` periods, growing at `rate` per period.
pub fn fv_annuity(payment: Money, rate: Rate, nper: u32, field: &str) -> BuyRentResult<Money> {
    let factor = growth_factor(rate, nper, field)?;
    if factor == Decimal::ONE {
        return payment
            .checked_mul(Decimal::from(nper))
            .ok_or_else(|| BuyRentError::overflow(field));
    }

    payment
        .checked_mul(factor - Decimal::ONE)
        .and_then(|v| v.checked_div(rate))
        .ok_or_else(|| BuyRentError::overflow(field))
}

/// Outstanding principal after `elapsed` level payments.
///
/// Uses `P·((1+r)^n − (1+r)^k) / ((1+r)^n − 1)` so the intermediate stays
/// within range for large principals. `payment` is only consulted at a zero
/// rate (or one that leaves `(1+r)^n` at 1). Zero once `elapsed >= nper`.
/// Never negative.
pub fn remaining_balance(
    principal: Money,
    rate: Rate,
    nper: u32,
    elapsed: u32,
    payment: Money,
) -> BuyRentResult<Money> {
    if elapsed >= nper {
        return Ok(Decimal::ZERO);
    }

    let full = growth_factor(rate, nper, "remaining_loan_balance")?;
    let balance = if full == Decimal::ONE {
        principal - payment * Decimal::from(elapsed)
    } else {
        let done = growth_factor(rate, elapsed, "remaining_loan_balance")?;
        (full - done)
            .checked_div(full - Decimal::ONE)
            .and_then(|share| share.checked_mul(principal))
            .ok_or_else(|| BuyRentError::overflow("remaining_loan_balance"))?
    };

    Ok(balance.max(Decimal::ZERO))
}
