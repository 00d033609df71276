use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Instant;

use crate::buy_vs_rent::{compute_buy_vs_rent, BuyVsRentInput, Verdict};
use crate::error::BuyRentError;
use crate::types::{with_metadata, ComputationOutput, Money};
use crate::BuyRentResult;

const MAX_POINTS: usize = 500;

/// An input of the buy-vs-rent model that can be swept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensitivityParameter {
    InterestRate,
    DownPayment,
    Appreciation,
    RentInflation,
    InvestmentReturn,
    MonthlyRent,
    MonthlyIncome,
    AnalysisYears,
}

impl SensitivityParameter {
    pub fn name(self) -> &'static str {
        match self {
            SensitivityParameter::InterestRate => "interest_rate",
            SensitivityParameter::DownPayment => "down_payment",
            SensitivityParameter::Appreciation => "appreciation",
            SensitivityParameter::RentInflation => "rent_inflation",
            SensitivityParameter::InvestmentReturn => "investment_return",
            SensitivityParameter::MonthlyRent => "monthly_rent",
            SensitivityParameter::MonthlyIncome => "monthly_income",
            SensitivityParameter::AnalysisYears => "analysis_years",
        }
    }

    /// Overwrite this parameter on `input`. Percent parameters take
    /// percentage points.
    fn apply(self, input: &mut BuyVsRentInput, value: Decimal) -> BuyRentResult<()> {
        match self {
            SensitivityParameter::InterestRate => input.loan.annual_interest_rate_pct = value,
            SensitivityParameter::DownPayment => input.loan.down_payment_pct = value,
            SensitivityParameter::Appreciation => {
                input.ownership.property_appreciation_pct = value
            }
            SensitivityParameter::RentInflation => input.rent.rent_inflation_pct = value,
            SensitivityParameter::InvestmentReturn => {
                input.investment.annual_investment_return_pct = value
            }
            SensitivityParameter::MonthlyRent => input.rent.monthly_rent = value,
            SensitivityParameter::MonthlyIncome => input.household.monthly_income = value,
            SensitivityParameter::AnalysisYears => {
                input.window.analysis_years = value
                    .fract()
                    .is_zero()
                    .then(|| value.to_u32())
                    .flatten()
                    .ok_or_else(|| BuyRentError::InvalidInput {
                        field: "analysis_years".into(),
                        reason: format!("{value} is not a whole number of years"),
                    })?
            }
        }
        Ok(())
    }
}

impl fmt::Display for SensitivityParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SensitivityParameter {
    type Err = BuyRentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parameter = match s {
            "interest_rate" => SensitivityParameter::InterestRate,
            "down_payment" => SensitivityParameter::DownPayment,
            "appreciation" => SensitivityParameter::Appreciation,
            "rent_inflation" => SensitivityParameter::RentInflation,
            "investment_return" => SensitivityParameter::InvestmentReturn,
            "monthly_rent" => SensitivityParameter::MonthlyRent,
            "monthly_income" => SensitivityParameter::MonthlyIncome,
            "analysis_years" => SensitivityParameter::AnalysisYears,
            other => {
                return Err(BuyRentError::InvalidInput {
                    field: "parameter".into(),
                    reason: format!("Unknown sensitivity parameter '{other}'"),
                })
            }
        };
        Ok(parameter)
    }
}

/// Sweep specification for one parameter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensitivityVariable {
    pub parameter: SensitivityParameter,
    pub min: Decimal,
    pub max: Decimal,
    pub step: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuyVsRentSensitivityInput {
    /// Scenario every sweep point starts from
    #[serde(default)]
    pub base: BuyVsRentInput,
    pub variable_1: SensitivityVariable,
    /// Optional second sweep; points cover the full grid
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variable_2: Option<SensitivityVariable>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensitivityPoint {
    pub variable_1_value: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variable_2_value: Option<Decimal>,
    pub verdict: Verdict,
    pub net_position_difference: Money,
    pub break_even_year: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensitivityOutput {
    pub variable_1: SensitivityParameter,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variable_2: Option<SensitivityParameter>,
    pub base_verdict: Verdict,
    pub base_net_position_difference: Money,
    pub points: Vec<SensitivityPoint>,
}

/// Generate the sweep values for a sensitivity variable from min to max with step.
fn generate_sweep_values(var: &SensitivityVariable) -> BuyRentResult<Vec<Decimal>> {
    if var.step <= Decimal::ZERO {
        return Err(BuyRentError::InvalidInput {
            field: format!("variable:{}", var.parameter),
            reason: "Step must be positive".into(),
        });
    }
    if var.min > var.max {
        return Err(BuyRentError::InvalidInput {
            field: format!("variable:{}", var.parameter),
            reason: "Min must be <= max".into(),
        });
    }

    let mut values = Vec::new();
    let mut current = var.min;
    while current <= var.max {
        values.push(current);
        if values.len() > MAX_POINTS {
            return Err(too_many_points());
        }
        current = match current.checked_add(var.step) {
            Some(next) => next,
            None => break,
        };
    }
    // Ensure max is included if step doesn't land exactly on it
    if let Some(&last) = values.last() {
        if last < var.max {
            values.push(var.max);
        }
    }

    Ok(values)
}

fn too_many_points() -> BuyRentError {
    BuyRentError::InvalidInput {
        field: "variable".into(),
        reason: format!("Sweep exceeds {MAX_POINTS} points"),
    }
}

fn evaluate_point(
    base: &BuyVsRentInput,
    sweeps: &[(SensitivityParameter, Decimal)],
) -> BuyRentResult<(Verdict, Money, Option<u32>)> {
    let mut input = base.clone();
    for (parameter, value) in sweeps {
        parameter.apply(&mut input, *value)?;
    }
    let out = compute_buy_vs_rent(&input)?;
    Ok((
        out.recommendation.verdict,
        out.buy_vs_rent_difference,
        out.break_even_year,
    ))
}

/// Re-run the buy-vs-rent comparison across one or two parameter sweeps.
///
/// Points whose inputs fail validation are skipped and reported as warnings.
pub fn run_sensitivity(
    input: &BuyVsRentSensitivityInput,
) -> BuyRentResult<ComputationOutput<SensitivityOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let v1_values = generate_sweep_values(&input.variable_1)?;
    let v2_values = match &input.variable_2 {
        Some(var) => Some(generate_sweep_values(var)?),
        None => None,
    };
    let grid_size = v1_values.len() * v2_values.as_ref().map_or(1, Vec::len);
    if grid_size > MAX_POINTS {
        return Err(too_many_points());
    }

    let (base_verdict, base_net_position_difference, _) = evaluate_point(&input.base, &[])?;

    let p1 = input.variable_1.parameter;
    let mut points = Vec::with_capacity(grid_size);
    for v1 in &v1_values {
        let v2_iter: Vec<Option<Decimal>> = match &v2_values {
            Some(values) => values.iter().copied().map(Some).collect(),
            None => vec![None],
        };
        for v2 in v2_iter {
            let mut sweeps = vec![(p1, *v1)];
            if let (Some(var2), Some(value)) = (&input.variable_2, v2) {
                sweeps.push((var2.parameter, value));
            }
            match evaluate_point(&input.base, &sweeps) {
                Ok((verdict, net_position_difference, break_even_year)) => {
                    points.push(SensitivityPoint {
                        variable_1_value: *v1,
                        variable_2_value: v2,
                        verdict,
                        net_position_difference,
                        break_even_year,
                    })
                }
                Err(e) => {
                    let at = match v2 {
                        Some(v2) => format!("({v1}, {v2})"),
                        None => format!("{v1}"),
                    };
                    warnings.push(format!("Skipped {at}: {e}"));
                }
            }
        }
    }

    tracing::debug!(
        evaluated = points.len(),
        skipped = warnings.len(),
        "sensitivity sweep complete"
    );

    let output = SensitivityOutput {
        variable_1: p1,
        variable_2: input.variable_2.as_ref().map(|v| v.parameter),
        base_verdict,
        base_net_position_difference,
        points,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Buy vs Rent Sensitivity Sweep",
        &serde_json::json!({
            "variable_1": input.variable_1,
            "variable_2": input.variable_2,
            "analysis_years": input.base.window.analysis_years,
        }),
        warnings,
        elapsed,
        output,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sweep(parameter: SensitivityParameter, min: Decimal, max: Decimal, step: Decimal) -> SensitivityVariable {
        SensitivityVariable {
            parameter,
            min,
            max,
            step,
        }
    }

    #[test]
    fn test_sweep_values_include_max() {
        let values =
            generate_sweep_values(&sweep(SensitivityParameter::InterestRate, dec!(6), dec!(7), dec!(0.4)))
                .unwrap();
        assert_eq!(values, vec![dec!(6), dec!(6.4), dec!(6.8), dec!(7)]);
    }

    #[test]
    fn test_sweep_rejects_bad_step() {
        let var = sweep(SensitivityParameter::InterestRate, dec!(6), dec!(7), Decimal::ZERO);
        assert!(generate_sweep_values(&var).is_err());
        let var = sweep(SensitivityParameter::InterestRate, dec!(8), dec!(7), dec!(1));
        assert!(generate_sweep_values(&var).is_err());
    }

    #[test]
    fn test_higher_rate_never_helps_buying() {
        let input = BuyVsRentSensitivityInput {
            base: BuyVsRentInput::default(),
            variable_1: sweep(SensitivityParameter::InterestRate, dec!(4), dec!(12), dec!(2)),
            variable_2: None,
        };
        let out = run_sensitivity(&input).unwrap();
        assert_eq!(out.result.points.len(), 5);
        for pair in out.result.points.windows(2) {
            assert!(pair[1].net_position_difference < pair[0].net_position_difference);
        }
    }

    #[test]
    fn test_invalid_points_skipped_with_warning() {
        let input = BuyVsRentSensitivityInput {
            base: BuyVsRentInput::default(),
            variable_1: sweep(SensitivityParameter::DownPayment, dec!(90), dec!(110), dec!(10)),
            variable_2: None,
        };
        let out = run_sensitivity(&input).unwrap();
        assert_eq!(out.result.points.len(), 2);
        assert_eq!(out.warnings.len(), 1);
        assert!(out.warnings[0].contains("down_payment_pct"));
    }

    #[test]
    fn test_two_way_grid() {
        let input = BuyVsRentSensitivityInput {
            base: BuyVsRentInput::default(),
            variable_1: sweep(SensitivityParameter::Appreciation, dec!(3), dec!(7), dec!(2)),
            variable_2: Some(sweep(SensitivityParameter::AnalysisYears, dec!(10), dec!(30), dec!(10))),
        };
        let out = run_sensitivity(&input).unwrap();
        assert_eq!(out.result.points.len(), 9);
        assert_eq!(out.result.variable_2, Some(SensitivityParameter::AnalysisYears));
    }

    #[test]
    fn test_fractional_years_rejected_per_point() {
        let input = BuyVsRentSensitivityInput {
            base: BuyVsRentInput::default(),
            variable_1: sweep(SensitivityParameter::AnalysisYears, dec!(10), dec!(11), dec!(0.5)),
            variable_2: None,
        };
        let out = run_sensitivity(&input).unwrap();
        assert_eq!(out.result.points.len(), 2);
        assert_eq!(out.warnings.len(), 1);
    }

    #[test]
    fn test_parameter_names_round_trip() {
        for p in [
            SensitivityParameter::InterestRate,
            SensitivityParameter::MonthlyIncome,
            SensitivityParameter::AnalysisYears,
        ] {
            assert_eq!(p.name().parse::<SensitivityParameter>().unwrap(), p);
        }
        assert!("mortgage".parse::<SensitivityParameter>().is_err());
    }

    #[test]
    fn test_grid_size_limit() {
        let input = BuyVsRentSensitivityInput {
            base: BuyVsRentInput::default(),
            variable_1: sweep(SensitivityParameter::MonthlyRent, dec!(1), dec!(1000), dec!(1)),
            variable_2: None,
        };
        assert!(run_sensitivity(&input).is_err());
    }
}
