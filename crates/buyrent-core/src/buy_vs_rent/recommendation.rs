use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::BuyRentError;
use crate::types::{Money, Multiple, Percent};
use crate::BuyRentResult;

const COMFORTABLE_DTI_PCT: Decimal = dec!(30);
const BUYING_FAVOURED_PRICE_TO_RENT: Decimal = dec!(15);
const RENTING_FAVOURED_PRICE_TO_RENT: Decimal = dec!(20);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Buy,
    Rent,
    Consider,
}

/// Which rule of the decision table produced the verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecommendationReason {
    /// Mortgage payment takes more of income than the policy allows
    AffordabilityExceeded,
    /// Price is rich relative to annual rent
    PriceToRentTooHigh,
    /// Buying pulls ahead early and stays ahead at the horizon
    EarlyBreakEven,
    /// Buying ends ahead, but only after a slow crossover
    SlowBreakEven,
    /// Renting and investing ends ahead at the horizon
    RentingAheadAtHorizon,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AffordabilityBand {
    Comfortable,
    Affordable,
    Unaffordable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PriceToRentBand {
    FavorsBuying,
    Balanced,
    FavorsRenting,
}

/// Thresholds of the decision table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommendationPolicy {
    /// Debt-to-income ceiling in percent
    pub max_debt_to_income_pct: Percent,
    /// Price-to-annual-rent ceiling
    pub max_price_to_rent: Multiple,
    /// Latest break-even year that still earns a Buy
    pub max_break_even_years: u32,
}

impl Default for RecommendationPolicy {
    fn default() -> Self {
        Self {
            max_debt_to_income_pct: dec!(40),
            max_price_to_rent: dec!(25),
            max_break_even_years: 7,
        }
    }
}

impl RecommendationPolicy {
    pub fn validate(&self) -> BuyRentResult<()> {
        if self.max_debt_to_income_pct <= Decimal::ZERO {
            return Err(BuyRentError::InvalidInput {
                field: "max_debt_to_income_pct".into(),
                reason: "Debt-to-income ceiling must be positive".into(),
            });
        }
        if self.max_price_to_rent <= Decimal::ZERO {
            return Err(BuyRentError::InvalidInput {
                field: "max_price_to_rent".into(),
                reason: "Price-to-rent ceiling must be positive".into(),
            });
        }
        if self.max_break_even_years == 0 {
            return Err(BuyRentError::InvalidInput {
                field: "max_break_even_years".into(),
                reason: "Break-even limit must be at least 1 year".into(),
            });
        }
        Ok(())
    }
}

/// The scalar signals the decision table reads.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RecommendationSignals {
    pub debt_to_income_ratio_pct: Percent,
    pub price_to_rent_ratio: Multiple,
    /// Buy net position minus rent net position at the horizon
    pub net_position_difference: Money,
    pub break_even_year: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub verdict: Verdict,
    pub reason: RecommendationReason,
    pub affordability: AffordabilityBand,
    pub price_to_rent_band: PriceToRentBand,
}

// ---------------------------------------------------------------------------
// Ratios
// ---------------------------------------------------------------------------

/// Full-term monthly mortgage payment as a percentage of monthly income.
pub fn debt_to_income_ratio_pct(
    monthly_payment: Money,
    monthly_income: Money,
) -> BuyRentResult<Percent> {
    monthly_payment
        .checked_div(monthly_income)
        .and_then(|v| v.checked_mul(dec!(100)))
        .ok_or_else(|| BuyRentError::overflow("debt_to_income_ratio_pct"))
}

/// Purchase price over one year of current rent.
pub fn price_to_rent_ratio(property_price: Money, monthly_rent: Money) -> BuyRentResult<Multiple> {
    property_price
        .checked_div(monthly_rent * dec!(12))
        .ok_or_else(|| BuyRentError::overflow("price_to_rent_ratio"))
}

// ---------------------------------------------------------------------------
// Decision table
// ---------------------------------------------------------------------------

/// Classify a scenario. Rules are checked in order and the first match wins:
///
/// 1. DTI above the ceiling → Rent
/// 2. price-to-rent above the ceiling → Rent
/// 3. buying ahead at the horizon and break-even within the limit → Buy
/// 4. buying ahead at the horizon → Consider
/// 5. otherwise → Rent
pub fn recommend(signals: &RecommendationSignals, policy: &RecommendationPolicy) -> Recommendation {
    let (verdict, reason) = if signals.debt_to_income_ratio_pct > policy.max_debt_to_income_pct {
        (Verdict::Rent, RecommendationReason::AffordabilityExceeded)
    } else if signals.price_to_rent_ratio > policy.max_price_to_rent {
        (Verdict::Rent, RecommendationReason::PriceToRentTooHigh)
    } else if signals.net_position_difference > Decimal::ZERO
        && signals
            .break_even_year
            .is_some_and(|y| y <= policy.max_break_even_years)
    {
        (Verdict::Buy, RecommendationReason::EarlyBreakEven)
    } else if signals.net_position_difference > Decimal::ZERO {
        (Verdict::Consider, RecommendationReason::SlowBreakEven)
    } else {
        (Verdict::Rent, RecommendationReason::RentingAheadAtHorizon)
    };

    Recommendation {
        verdict,
        reason,
        affordability: affordability_band(signals.debt_to_income_ratio_pct, policy),
        price_to_rent_band: price_to_rent_band(signals.price_to_rent_ratio),
    }
}

pub fn affordability_band(dti_pct: Percent, policy: &RecommendationPolicy) -> AffordabilityBand {
    if dti_pct > policy.max_debt_to_income_pct {
        AffordabilityBand::Unaffordable
    } else if dti_pct > COMFORTABLE_DTI_PCT {
        AffordabilityBand::Affordable
    } else {
        AffordabilityBand::Comfortable
    }
}

pub fn price_to_rent_band(ratio: Multiple) -> PriceToRentBand {
    if ratio < BUYING_FAVOURED_PRICE_TO_RENT {
        PriceToRentBand::FavorsBuying
    } else if ratio <= RENTING_FAVOURED_PRICE_TO_RENT {
        PriceToRentBand::Balanced
    } else {
        PriceToRentBand::FavorsRenting
    }
}
