//! Net present value and internal rate of return of a scenario's cash flows
//!
//! The series starts at time 0 with the upfront capital outflow, followed by
//! one net profit per projected year.

use serde::{Deserialize, Serialize};

use super::results::ScenarioResult;
use crate::params::CostParameters;

/// Discount rate applied when none is given, in percent
pub const DEFAULT_DISCOUNT_RATE_PCT: f64 = 10.0;

/// Discounted view of one scenario
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InvestmentMetrics {
    /// Discount rate used for `npv`, in percent
    pub discount_rate_pct: f64,

    pub npv: f64,

    /// Annual IRR as a decimal; absent when the series has no sign change
    /// or the solver does not converge
    pub irr: Option<f64>,
}

impl InvestmentMetrics {
    pub fn evaluate(cost: &CostParameters, result: &ScenarioResult, discount_rate_pct: f64) -> Self {
        let series = cash_flow_series(cost, result);
        Self {
            discount_rate_pct,
            npv: npv(&series, discount_rate_pct / 100.0),
            irr: calculate_irr(&series),
        }
    }
}

/// Upfront outflow at t=0 followed by yearly net profit
pub fn cash_flow_series(cost: &CostParameters, result: &ScenarioResult) -> Vec<f64> {
    std::iter::once(-cost.upfront_capex())
        .chain(result.yearly.iter().map(|r| r.net_profit))
        .collect()
}

/// Net present value with the first cash flow undiscounted
pub fn npv(cashflows: &[f64], rate: f64) -> f64 {
    cashflows
        .iter()
        .enumerate()
        .map(|(t, &cf)| cf / (1.0 + rate).powi(t as i32))
        .sum()
}

/// Annual internal rate of return by Newton-Raphson, falling back to bisection
///
/// One cash flow per year. Returns `None` for an empty series, a series
/// without a sign change, or when neither method converges.
pub fn calculate_irr(cashflows: &[f64]) -> Option<f64> {
    if cashflows.is_empty() {
        return None;
    }

    if cashflows.iter().all(|&cf| cf.abs() < 1e-10) {
        return Some(0.0);
    }

    let has_positive = cashflows.iter().any(|&cf| cf > 1e-10);
    let has_negative = cashflows.iter().any(|&cf| cf < -1e-10);
    if !has_positive || !has_negative {
        return None;
    }

    let mut rate = 0.10;
    let tolerance = 1e-10;

    for _ in 0..1000 {
        let (value, slope) = npv_and_derivative(cashflows, rate);

        if slope.abs() < 1e-20 {
            return irr_by_bisection(cashflows);
        }

        let next = (rate - value / slope).clamp(-0.99, 10.0);

        if (next - rate).abs() < tolerance {
            return Some(next);
        }

        rate = next;
    }

    irr_by_bisection(cashflows)
}

fn npv_and_derivative(cashflows: &[f64], rate: f64) -> (f64, f64) {
    cashflows
        .iter()
        .enumerate()
        .fold((0.0, 0.0), |(value, slope), (t, &cf)| {
            let discount = (1.0 + rate).powi(t as i32);
            let slope = if t > 0 {
                slope - (t as f64) * cf / (discount * (1.0 + rate))
            } else {
                slope
            };
            (value + cf / discount, slope)
        })
}

fn irr_by_bisection(cashflows: &[f64]) -> Option<f64> {
    let mut low = -0.99_f64;
    let mut high = 10.0_f64;
    let tolerance = 1e-10;

    let mut npv_low = npv(cashflows, low);
    if npv_low * npv(cashflows, high) > 0.0 {
        return None;
    }

    for _ in 0..1000 {
        let mid = (low + high) / 2.0;
        let npv_mid = npv(cashflows, mid);

        if npv_mid.abs() < tolerance || (high - low) / 2.0 < tolerance {
            return Some(mid);
        }

        if npv_mid * npv_low < 0.0 {
            high = mid;
        } else {
            low = mid;
            npv_low = npv_mid;
        }
    }

    None
}
