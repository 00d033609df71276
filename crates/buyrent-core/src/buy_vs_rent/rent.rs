use serde::{Deserialize, Serialize};

use super::assumptions::{AnalysisWindow, RentAssumptions};
use crate::error::BuyRentError;
use crate::time_value;
use crate::types::{pct_to_rate, Money};
use crate::BuyRentResult;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RentProjection {
    pub total_rent_cost: Money,
    pub final_year_monthly_rent: Money,
}

/// Cumulative rent with inflation compounded once per year.
pub fn project_rent(rent: &RentAssumptions, window: &AnalysisWindow) -> BuyRentResult<RentProjection> {
    let growth = pct_to_rate(rent.rent_inflation_pct);

    let mut current_monthly_rent = rent.monthly_rent;
    let mut total_rent_cost = Money::ZERO;
    for _ in 0..window.analysis_years {
        let yearly_rent = current_monthly_rent
            .checked_mul(Money::from(12))
            .ok_or_else(|| BuyRentError::overflow("total_rent_cost"))?;
        total_rent_cost = total_rent_cost
            .checked_add(yearly_rent)
            .ok_or_else(|| BuyRentError::overflow("total_rent_cost"))?;
        current_monthly_rent = current_monthly_rent
            .checked_mul(Money::ONE + growth)
            .ok_or_else(|| BuyRentError::overflow("total_rent_cost"))?;
    }

    let final_year_monthly_rent = time_value::compound(
        rent.monthly_rent,
        growth,
        window.analysis_years.saturating_sub(1),
        "final_year_monthly_rent",
    )?;

    Ok(RentProjection {
        total_rent_cost,
        final_year_monthly_rent,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_inflation_applies_at_year_boundaries() {
        let rent = RentAssumptions {
            monthly_rent: dec!(1000),
            rent_inflation_pct: dec!(10),
        };
        let p = project_rent(&rent, &AnalysisWindow { analysis_years: 3 }).unwrap();
        // 12,000 + 13,200 + 14,520
        assert_eq!(p.total_rent_cost, dec!(39720));
        assert_eq!(p.final_year_monthly_rent, dec!(1210));
    }

    #[test]
    fn test_zero_inflation_is_flat() {
        let rent = RentAssumptions {
            monthly_rent: dec!(15000000),
            rent_inflation_pct: dec!(0),
        };
        let p = project_rent(&rent, &AnalysisWindow { analysis_years: 20 }).unwrap();
        assert_eq!(p.total_rent_cost, dec!(3600000000));
        assert_eq!(p.final_year_monthly_rent, dec!(15000000));
    }

    #[test]
    fn test_single_year() {
        let rent = RentAssumptions::default();
        let p = project_rent(&rent, &AnalysisWindow { analysis_years: 1 }).unwrap();
        assert_eq!(p.total_rent_cost, rent.annual_rent());
        assert_eq!(p.final_year_monthly_rent, rent.monthly_rent);
    }
}
