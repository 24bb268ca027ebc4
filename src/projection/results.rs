//! Projection output structures

use serde::{Deserialize, Serialize};

use crate::scenario::Scenario;

/// Projected figures for one year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearlyResult {
    /// Year label, 1-indexed
    pub year: u32,

    /// Price charged per unit, growth and scenario multiplier applied
    pub price_per_unit: f64,

    /// Units sold, after adoption and the scenario multiplier
    pub units: f64,

    pub revenue: f64,

    /// Unit variable cost (support included) times units
    pub variable_cost: f64,

    /// Revenue less variable cost
    pub gross_profit: f64,

    /// Gross profit as a percentage of revenue (0 when revenue is not positive)
    pub gross_margin_pct: f64,

    /// Annual fixed operating cost
    pub fixed_cost: f64,

    /// Gross profit less fixed cost
    pub net_profit: f64,

    /// Net profit as a percentage of revenue (0 when revenue is not positive)
    pub net_margin_pct: f64,

    /// Running cash flow since inception, upfront capital included
    pub cumulative_cash_flow: f64,
}

/// Complete projection for one scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub scenario: Scenario,

    /// One row per projected year, ascending
    pub yearly: Vec<YearlyResult>,

    /// Sum of yearly revenue
    pub total_revenue: f64,

    /// Sum of yearly net profit
    pub total_net_profit: f64,

    /// First year with non-negative cumulative cash flow, if reached
    pub payback_year: Option<u32>,

    /// Units needed to recover upfront capital; absent when the
    /// contribution margin is not positive
    pub break_even_units: Option<f64>,
}

impl ScenarioResult {
    /// Cumulative cash flow after the last projected year
    pub fn final_cumulative_cash_flow(&self) -> Option<f64> {
        self.yearly.last().map(|r| r.cumulative_cash_flow)
    }

    /// Net profit per year in order, for discounting
    pub fn net_profits(&self) -> Vec<f64> {
        self.yearly.iter().map(|r| r.net_profit).collect()
    }

    /// Flat summary row for comparison views
    pub fn summary(&self) -> ScenarioSummary {
        ScenarioSummary {
            scenario_id: self.scenario.id.clone(),
            scenario_name: self.scenario.name.clone(),
            years: self.yearly.len() as u32,
            total_revenue: self.total_revenue,
            total_net_profit: self.total_net_profit,
            final_cumulative_cash_flow: self.final_cumulative_cash_flow(),
            payback_year: self.payback_year,
            break_even_units: self.break_even_units,
        }
    }
}

/// Headline figures of a scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioSummary {
    pub scenario_id: String,
    pub scenario_name: String,
    pub years: u32,
    pub total_revenue: f64,
    pub total_net_profit: f64,
    pub final_cumulative_cash_flow: Option<f64>,
    pub payback_year: Option<u32>,
    pub break_even_units: Option<f64>,
}
