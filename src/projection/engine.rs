//! Core projection engine for yearly business case projections

use super::results::{ScenarioResult, YearlyResult};
use super::state::CashPosition;
use crate::params::{
    BusinessCase, CostParameters, GeneralParameters, MarketParameters, RevenueParameters,
    MAX_HORIZON_YEARS,
};
use crate::scenario::Scenario;

/// Project one scenario over the horizon
///
/// Pure and total: any numeric input produces a structurally valid result.
pub fn project(
    general: &GeneralParameters,
    cost: &CostParameters,
    market: &MarketParameters,
    revenue: &RevenueParameters,
    scenario: &Scenario,
) -> ScenarioResult {
    ProjectionEngine::new(general, cost, market, revenue).project_scenario(scenario)
}

/// Projection engine borrowing one set of business parameters
#[derive(Debug, Clone, Copy)]
pub struct ProjectionEngine<'a> {
    general: &'a GeneralParameters,
    cost: &'a CostParameters,
    market: &'a MarketParameters,
    revenue: &'a RevenueParameters,
}

impl<'a> ProjectionEngine<'a> {
    pub fn new(
        general: &'a GeneralParameters,
        cost: &'a CostParameters,
        market: &'a MarketParameters,
        revenue: &'a RevenueParameters,
    ) -> Self {
        Self {
            general,
            cost,
            market,
            revenue,
        }
    }

    /// Engine over the parameters of a business case
    pub fn from_case(case: &'a BusinessCase) -> Self {
        Self::new(&case.general, &case.cost, &case.market, &case.revenue)
    }

    /// Run the year loop and aggregate metrics for one scenario
    pub fn project_scenario(&self, scenario: &Scenario) -> ScenarioResult {
        let unit_variable_cost = self.cost.unit_variable_cost();
        let horizon = self.general.horizon_years;

        let opening = CashPosition::opening(self.cost.upfront_capex());
        let (yearly, position) = (0..horizon).fold(
            (Vec::with_capacity(horizon.min(MAX_HORIZON_YEARS) as usize), opening),
            |(mut rows, position), year_index| {
                let mut row = self.calculate_year(year_index as usize, unit_variable_cost, scenario);
                let position = position.advance(row.year, row.net_profit);
                row.cumulative_cash_flow = position.cumulative_cash_flow;
                rows.push(row);
                (rows, position)
            },
        );

        let total_revenue = yearly.iter().map(|r| r.revenue).sum();
        let total_net_profit = yearly.iter().map(|r| r.net_profit).sum();

        ScenarioResult {
            scenario: scenario.clone(),
            yearly,
            total_revenue,
            total_net_profit,
            payback_year: position.payback_year,
            break_even_units: self.break_even_units(unit_variable_cost),
        }
    }

    /// Figures for one year; cumulative cash flow is filled in by the caller
    fn calculate_year(
        &self,
        year_index: usize,
        unit_variable_cost: f64,
        scenario: &Scenario,
    ) -> YearlyResult {
        let price_per_unit = self.revenue.base_price(year_index) * scenario.price_multiplier;

        let base_units = self.market.som_units(year_index) * self.market.adoption_fraction(year_index);
        let units = base_units * scenario.adoption_multiplier;

        let revenue = price_per_unit * units;
        let variable_cost = unit_variable_cost * units;
        let gross_profit = revenue - variable_cost;

        let fixed_cost = self.cost.annual_fixed_opex;
        let net_profit = gross_profit - fixed_cost;

        YearlyResult {
            year: year_index as u32 + 1,
            price_per_unit,
            units,
            revenue,
            variable_cost,
            gross_profit,
            gross_margin_pct: margin_pct(gross_profit, revenue),
            fixed_cost,
            net_profit,
            net_margin_pct: margin_pct(net_profit, revenue),
            cumulative_cash_flow: 0.0,
        }
    }

    /// Upfront capital over the year-1 contribution margin
    ///
    /// Uses the unscaled year-1 base price so the figure is the same for
    /// every scenario.
    fn break_even_units(&self, unit_variable_cost: f64) -> Option<f64> {
        let contribution_margin = self.revenue.base_price_per_unit - unit_variable_cost;
        (contribution_margin > 0.0).then(|| self.cost.upfront_capex() / contribution_margin)
    }
}

/// Profit as a percentage of revenue; zero revenue yields zero margin
fn margin_pct(profit: f64, revenue: f64) -> f64 {
    if revenue > 0.0 {
        profit / revenue * 100.0
    } else {
        0.0
    }
}
