//! Coupon bond order valuation.
//!
//! Discounts a bond's coupon stream and principal at the quoted yield to
//! maturity and compares the result against the market price of the order.
//! All four payment schedules share one discounting routine parameterized by
//! periods per year; the monthly schedule keeps its historical principal
//! formula (see [`monthly_principal_value`]).

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::FinCalcError;
use crate::types::{with_metadata, ComputationOutput, Money, Percent};
use crate::FinCalcResult;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Face value per bond. Fixed at the standard $1,000, not configurable.
const FACE_VALUE: Decimal = dec!(1000);

/// Market quotes are in tens of dollars per $1,000 face (101 quotes $1,010).
const QUOTE_SCALE: Decimal = dec!(10);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// How often the bond pays its coupon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentFrequency {
    Annual,
    #[serde(alias = "semi")]
    Semiannual,
    Quarterly,
    Monthly,
}

impl PaymentFrequency {
    /// Coupon payments per year.
    pub fn periods_per_year(self) -> u32 {
        match self {
            PaymentFrequency::Annual => 1,
            PaymentFrequency::Semiannual => 2,
            PaymentFrequency::Quarterly => 4,
            PaymentFrequency::Monthly => 12,
        }
    }

    /// Wording used in the classic report.
    pub fn label(self) -> &'static str {
        match self {
            PaymentFrequency::Annual => "annual",
            PaymentFrequency::Semiannual => "semi annual",
            PaymentFrequency::Quarterly => "quarterly",
            PaymentFrequency::Monthly => "monthly",
        }
    }
}

/// Which profit formula to apply.
///
/// `Legacy` reproduces the historical computation, which scales the order
/// value by quantity a second time. `Standard` is conventional bond
/// economics: order value minus order market value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfitBasis {
    #[default]
    Legacy,
    Standard,
}

/// Input parameters for valuing a bond order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BondOrderInput {
    /// Number of bonds purchased.
    pub quantity: u32,
    /// Quoted market price per bond in tens of dollars (101 = $1,010).
    pub market_price: Money,
    /// Annual coupon rate as a percentage of face value (5 = 5%).
    pub coupon_rate_pct: Percent,
    /// Annual yield to maturity as a percentage (6 = 6%).
    pub ytm_pct: Percent,
    /// Whole years until the bond matures.
    pub years_to_maturity: u32,
    /// Coupon payment schedule.
    pub frequency: PaymentFrequency,
    /// Profit formula; defaults to the legacy scaling.
    #[serde(default)]
    pub profit_basis: ProfitBasis,
}

/// Output of a bond order valuation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BondValuationOutput {
    /// Total coupon payments over the bond's life.
    pub payment_count: u32,
    /// Schedule echoed from the input.
    pub frequency: PaymentFrequency,
    /// Order size echoed from the input.
    pub quantity: u32,
    /// Coupon cash flow per period, per bond.
    pub coupon_payment: Money,
    /// Present value of the coupon stream, per bond. Reported unrounded.
    pub pv_coupons: Money,
    /// Present value of the principal repayment, per bond.
    pub pv_principal: Money,
    /// pv_coupons + pv_principal.
    pub value_per_bond: Money,
    /// value_per_bond × quantity.
    pub order_value: Money,
    /// Quoted price converted to dollars, per bond.
    pub market_price_dollars: Money,
    /// market_price_dollars × quantity.
    pub order_market_value: Money,
    /// Profit under the selected basis.
    pub profit: Money,
    /// Basis echoed from the input.
    pub profit_basis: ProfitBasis,
}

impl BondValuationOutput {
    /// The classic six-line valuation report.
    ///
    /// Monetary figures are rounded to 2 decimal places except the per-bond
    /// coupon present value, which is reported unrounded.
    pub fn report_lines(&self) -> Vec<String> {
        vec![
            format!("Total Payments: {}", self.payment_count),
            format!(
                "Total value of {} payments per Bond: ${}",
                self.frequency.label(),
                self.pv_coupons
            ),
            format!(
                "Present value of one Bond: ${:.2}",
                self.pv_principal.round_dp(2)
            ),
            format!(
                "Total value of {} Bonds: ${:.2}",
                self.quantity,
                self.order_value.round_dp(2)
            ),
            format!(
                "Market value of one Bond: ${:.2}",
                self.market_price_dollars.round_dp(2)
            ),
            format!(
                "Total Profit of {} Bonds: ${:.2}",
                self.quantity,
                self.profit.round_dp(2)
            ),
        ]
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Value a bond order: discount the coupon stream and principal at the
/// quoted yield, then compare against the market price of the order.
pub fn value_bond_order(
    input: &BondOrderInput,
) -> FinCalcResult<ComputationOutput<BondValuationOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    // --- Validate ---
    validate_input(input)?;

    let periods_per_year = input.frequency.periods_per_year();
    let payment_count = input.years_to_maturity * periods_per_year;
    let k = Decimal::from(periods_per_year);

    // Per-period coupon cash flow and discount rate
    let coupon_payment = input.coupon_rate_pct / dec!(100) * FACE_VALUE / k;
    let period_rate = input.ytm_pct / dec!(100) / k;

    // --- PV of coupons: iterative discount-factor accumulation ---
    let one_plus_r = Decimal::ONE + period_rate;
    let mut pv_coupons = Decimal::ZERO;
    let mut discount = Decimal::ONE;
    for t in 1..=payment_count {
        discount *= one_plus_r;
        if discount.is_zero() {
            return Err(FinCalcError::DivisionByZero {
                context: format!("coupon discount factor at period {t}"),
            });
        }
        pv_coupons += coupon_payment / discount;
    }

    // --- PV of principal ---
    // After the loop, `discount` holds (1 + period_rate)^payment_count.
    let pv_principal = match input.frequency {
        PaymentFrequency::Monthly => {
            warnings.push(
                "Monthly schedule discounts principal by (1 + period count), not \
                 (1 + period rate); principal value is near zero for long maturities"
                    .into(),
            );
            monthly_principal_value(payment_count)
        }
        _ => FACE_VALUE / discount,
    };

    let value_per_bond = pv_coupons + pv_principal;
    let quantity = Decimal::from(input.quantity);
    let order_value = value_per_bond * quantity;
    let market_price_dollars = input.market_price * QUOTE_SCALE;
    let order_market_value = market_price_dollars * quantity;

    // --- Profit ---
    let profit = match input.profit_basis {
        ProfitBasis::Legacy => order_value * quantity - order_market_value,
        ProfitBasis::Standard => order_value - order_market_value,
    };
    if input.profit_basis == ProfitBasis::Legacy && input.quantity > 1 {
        warnings.push(format!(
            "Legacy profit basis scales the order value by quantity ({}) a second \
             time; use the standard basis for conventional economics",
            input.quantity
        ));
    }

    let output = BondValuationOutput {
        payment_count,
        frequency: input.frequency,
        quantity: input.quantity,
        coupon_payment,
        pv_coupons,
        pv_principal,
        value_per_bond,
        order_value,
        market_price_dollars,
        order_market_value,
        profit,
        profit_basis: input.profit_basis,
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Bond order valuation — discounted coupon stream and principal at YTM",
        input,
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate_input(input: &BondOrderInput) -> FinCalcResult<()> {
    if input.quantity == 0 {
        return Err(FinCalcError::InvalidInput {
            field: "quantity".into(),
            reason: "Order must contain at least one bond".into(),
        });
    }
    if input.years_to_maturity == 0 {
        return Err(FinCalcError::InvalidInput {
            field: "years_to_maturity".into(),
            reason: "Years to maturity must be positive".into(),
        });
    }
    if input.market_price <= Decimal::ZERO {
        return Err(FinCalcError::InvalidInput {
            field: "market_price".into(),
            reason: "Market price must be positive".into(),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Monthly principal
// ---------------------------------------------------------------------------

/// Principal discounting for the monthly schedule.
///
/// Divides by (1 + n) once per period, where n is the period count — the
/// other schedules discount by (1 + period rate) per period. This is a
/// long-standing quirk kept for parity with existing reports; callers are
/// warned through the computation envelope. Iterative division lets the
/// result underflow toward zero for long maturities instead of overflowing
/// on the huge denominator.
fn monthly_principal_value(payment_count: u32) -> Money {
    let one_plus_n = Decimal::ONE + Decimal::from(payment_count);
    let mut pv = FACE_VALUE;
    for _ in 0..payment_count {
        pv /= one_plus_n;
    }
    pv
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
