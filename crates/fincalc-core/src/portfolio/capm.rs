//! Capital Asset Pricing Model solver.
//!
//! `er = rf + β (rm − rf)` relates an investment's expected return to its
//! systematic risk. Given any three of the variables the fourth follows by
//! rearrangement; the target is selected with [`CapmTarget`].

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::FinCalcError;
use crate::types::{with_metadata, ComputationOutput, Percent};
use crate::FinCalcResult;

/// Which variable of the CAPM relation to solve for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapmTarget {
    RiskFree,
    Beta,
    MarketReturn,
    InvestmentReturn,
}

/// Input for the CAPM solver. All four variables are supplied; the one
/// named by `solve_for` is ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapmInput {
    /// Risk-free rate as a percentage (6 = 6%).
    pub risk_free_pct: Percent,
    /// Beta of the asset.
    pub beta: Decimal,
    /// Expected market return as a percentage.
    pub market_return_pct: Percent,
    /// Expected investment return as a percentage.
    pub investment_return_pct: Percent,
    /// Target variable.
    pub solve_for: CapmTarget,
}

/// Output of the CAPM solver.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapmOutput {
    /// Target echoed from the input.
    pub solve_for: CapmTarget,
    /// Solved value: a percentage for the three rates, a plain ratio for beta.
    pub value: Decimal,
}

/// Solve the CAPM relation for the selected variable.
///
/// Rates cross the boundary as percentages and are solved as decimals.
/// Degenerate denominators (market return equal to the risk-free rate when
/// solving for beta, beta of exactly 1 when solving for the risk-free rate,
/// beta of 0 when solving for the market return) are rejected rather than
/// divided through.
pub fn solve_capm(input: &CapmInput) -> FinCalcResult<ComputationOutput<CapmOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let hundred = dec!(100);
    let rf = input.risk_free_pct / hundred;
    let b = input.beta;
    let rm = input.market_return_pct / hundred;
    let er = input.investment_return_pct / hundred;

    let value = match input.solve_for {
        CapmTarget::InvestmentReturn => (rf + b * (rm - rf)) * hundred,
        CapmTarget::Beta => {
            if rm == rf {
                return Err(FinCalcError::DivisionByZero {
                    context: "beta solve with market return equal to risk-free rate".into(),
                });
            }
            (er - rf) / (rm - rf)
        }
        CapmTarget::RiskFree => {
            if b == Decimal::ONE {
                return Err(FinCalcError::DivisionByZero {
                    context: "risk-free solve with beta of exactly 1".into(),
                });
            }
            (er - b * rm) / (Decimal::ONE - b) * hundred
        }
        CapmTarget::MarketReturn => {
            if b.is_zero() {
                return Err(FinCalcError::DivisionByZero {
                    context: "market-return solve with beta of 0".into(),
                });
            }
            ((er - rf) / b + rf) * hundred
        }
    };

    if input.solve_for != CapmTarget::Beta && b.abs() > dec!(3.0) {
        warnings.push(format!(
            "High beta ({b}): verify market data; betas above 3.0 are unusual"
        ));
    }

    let output = CapmOutput {
        solve_for: input.solve_for,
        value,
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "CAPM — er = rf + beta * (rm - rf), rearranged for the target",
        input,
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn base_input(solve_for: CapmTarget) -> CapmInput {
        CapmInput {
            risk_free_pct: dec!(5),
            beta: dec!(1),
            market_return_pct: dec!(10),
            investment_return_pct: dec!(20),
            solve_for,
        }
    }

    // -----------------------------------------------------------------------
    // 1. Beta of 1 collapses CAPM to the market return
    // -----------------------------------------------------------------------
    #[test]
    fn test_unit_beta_returns_market_return() {
        let result = solve_capm(&base_input(CapmTarget::InvestmentReturn)).unwrap();
        assert_eq!(result.result.value, dec!(10));
    }

    // -----------------------------------------------------------------------
    // 2. Beta solve recovers the beta that produced the return
    // -----------------------------------------------------------------------
    #[test]
    fn test_beta_roundtrip() {
        let mut input = base_input(CapmTarget::InvestmentReturn);
        input.beta = dec!(1.5);
        let er = solve_capm(&input).unwrap().result.value;
        assert_eq!(er, dec!(12.5)); // 5 + 1.5 * (10 - 5)

        let back = CapmInput {
            investment_return_pct: er,
            solve_for: CapmTarget::Beta,
            ..input
        };
        assert_eq!(solve_capm(&back).unwrap().result.value, dec!(1.5));
    }

    // -----------------------------------------------------------------------
    // 3. Risk-free and market-return rearrangements
    // -----------------------------------------------------------------------
    #[test]
    fn test_solve_risk_free() {
        let mut input = base_input(CapmTarget::RiskFree);
        input.beta = dec!(2);
        // rf = (er - b*rm) / (1 - b) = (0.20 - 2*0.10) / (1 - 2) = 0
        let result = solve_capm(&input).unwrap();
        assert_eq!(result.result.value, dec!(0));
    }

    #[test]
    fn test_solve_market_return() {
        let mut input = base_input(CapmTarget::MarketReturn);
        input.beta = dec!(2);
        // rm = (er - rf)/b + rf = (0.20 - 0.05)/2 + 0.05 = 0.125
        let result = solve_capm(&input).unwrap();
        assert_eq!(result.result.value, dec!(12.5));
    }

    // -----------------------------------------------------------------------
    // 4. Degenerate denominators are rejected, not divided through
    // -----------------------------------------------------------------------
    #[test]
    fn test_beta_solve_with_flat_market_rejected() {
        let mut input = base_input(CapmTarget::Beta);
        input.market_return_pct = input.risk_free_pct;

        match solve_capm(&input).unwrap_err() {
            FinCalcError::DivisionByZero { context } => {
                assert!(context.contains("beta solve"));
            }
            other => panic!("Expected DivisionByZero, got {other:?}"),
        }
    }

    #[test]
    fn test_risk_free_solve_with_unit_beta_rejected() {
        let input = base_input(CapmTarget::RiskFree);
        assert!(matches!(
            solve_capm(&input).unwrap_err(),
            FinCalcError::DivisionByZero { .. }
        ));
    }

    #[test]
    fn test_market_return_solve_with_zero_beta_rejected() {
        let mut input = base_input(CapmTarget::MarketReturn);
        input.beta = dec!(0);
        assert!(matches!(
            solve_capm(&input).unwrap_err(),
            FinCalcError::DivisionByZero { .. }
        ));
    }

    // -----------------------------------------------------------------------
    // 5. High-beta warning
    // -----------------------------------------------------------------------
    #[test]
    fn test_high_beta_warning() {
        let mut input = base_input(CapmTarget::InvestmentReturn);
        input.beta = dec!(4);
        let result = solve_capm(&input).unwrap();
        assert!(result.warnings.iter().any(|w| w.contains("High beta")));
    }

    // -----------------------------------------------------------------------
    // 6. Envelope metadata
    // -----------------------------------------------------------------------
    #[test]
    fn test_metadata_populated() {
        let result = solve_capm(&base_input(CapmTarget::InvestmentReturn)).unwrap();
        assert!(result.methodology.contains("CAPM"));
        assert_eq!(result.metadata.precision, "rust_decimal_128bit");
    }
}
