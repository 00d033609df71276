use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::assumptions::{AnalysisWindow, InvestmentAssumptions};
use crate::error::BuyRentError;
use crate::time_value;
use crate::types::{pct_to_rate, Money};
use crate::BuyRentResult;

/// Monthly figures that decide how much the renter can set aside.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CarryingCost {
    /// Mortgage payment + monthly share of maintenance and property tax
    pub monthly_buy_cost: Money,
    /// `monthly_buy_cost - monthly_rent`; negative when owning is cheaper
    pub monthly_savings: Money,
    /// Down payment plus transaction cost, the renter's starting capital
    pub upfront_capital: Money,
}

impl CarryingCost {
    pub fn new(
        monthly_payment: Money,
        annual_maintenance: Money,
        annual_property_tax: Money,
        monthly_rent: Money,
        upfront_capital: Money,
    ) -> Self {
        let monthly_buy_cost =
            monthly_payment + annual_maintenance / dec!(12) + annual_property_tax / dec!(12);
        Self {
            monthly_buy_cost,
            monthly_savings: monthly_buy_cost - monthly_rent,
            upfront_capital,
        }
    }

    /// Only a positive difference funds the renter's monthly contributions.
    pub fn investable_savings(&self) -> Option<Money> {
        (self.monthly_savings > Decimal::ZERO).then_some(self.monthly_savings)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentProjection {
    pub down_payment_invested: Money,
    pub monthly_savings_invested: Money,
    pub total_investment_value: Money,
    pub net_rent_position: Money,
}

/// Grow the renter's upfront capital and monthly savings over the window,
/// then net off the rent paid.
pub fn project_investment(
    carrying: &CarryingCost,
    investment: &InvestmentAssumptions,
    window: &AnalysisWindow,
    total_rent_cost: Money,
) -> BuyRentResult<InvestmentProjection> {
    let annual_rate = pct_to_rate(investment.annual_investment_return_pct);
    let monthly_rate = annual_rate / dec!(12);

    let down_payment_invested = time_value::compound(
        carrying.upfront_capital,
        annual_rate,
        window.analysis_years,
        "down_payment_invested",
    )?;

    let monthly_savings_invested = match carrying.investable_savings() {
        Some(savings) => time_value::fv_annuity(
            savings,
            monthly_rate,
            window.analysis_years.saturating_mul(12),
            "monthly_savings_invested",
        )?,
        None => Decimal::ZERO,
    };

    let total_investment_value = down_payment_invested
        .checked_add(monthly_savings_invested)
        .ok_or_else(|| BuyRentError::overflow("total_investment_value"))?;

    Ok(InvestmentProjection {
        down_payment_invested,
        monthly_savings_invested,
        total_investment_value,
        net_rent_position: total_investment_value - total_rent_cost,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn carrying(savings_rent: Money) -> CarryingCost {
        CarryingCost::new(dec!(1000), dec!(1200), dec!(0), savings_rent, dec!(10000))
    }

    #[test]
    fn test_carrying_cost_components() {
        let c = carrying(dec!(900));
        assert_eq!(c.monthly_buy_cost, dec!(1100));
        assert_eq!(c.monthly_savings, dec!(200));
        assert_eq!(c.investable_savings(), Some(dec!(200)));
    }

    #[test]
    fn test_negative_savings_contribute_nothing() {
        let c = carrying(dec!(1500));
        assert_eq!(c.monthly_savings, dec!(-400));
        assert_eq!(c.investable_savings(), None);

        let p = project_investment(
            &c,
            &InvestmentAssumptions {
                annual_investment_return_pct: dec!(10),
            },
            &AnalysisWindow { analysis_years: 2 },
            dec!(36000),
        )
        .unwrap();
        assert_eq!(p.monthly_savings_invested, Decimal::ZERO);
        assert_eq!(p.down_payment_invested, dec!(12100));
        assert_eq!(p.net_rent_position, dec!(12100) - dec!(36000));
    }

    #[test]
    fn test_zero_return_accumulates_linearly() {
        let c = carrying(dec!(900));
        let p = project_investment(
            &c,
            &InvestmentAssumptions {
                annual_investment_return_pct: Decimal::ZERO,
            },
            &AnalysisWindow { analysis_years: 5 },
            Decimal::ZERO,
        )
        .unwrap();
        assert_eq!(p.down_payment_invested, dec!(10000));
        assert_eq!(p.monthly_savings_invested, dec!(12000));
        assert_eq!(p.total_investment_value, dec!(22000));
    }

    #[test]
    fn test_savings_compound_monthly() {
        let c = carrying(dec!(900));
        let p = project_investment(
            &c,
            &InvestmentAssumptions {
                annual_investment_return_pct: dec!(12),
            },
            &AnalysisWindow { analysis_years: 1 },
            Decimal::ZERO,
        )
        .unwrap();
        // 200/month for 12 months at 1%: 200 * (1.01^12 - 1) / 0.01 ≈ 2,536.50
        assert!((p.monthly_savings_invested - dec!(2536.50)).abs() < dec!(0.01));
    }
}
