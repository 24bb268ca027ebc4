//! Delimited-text exports: yearly rows per scenario and a cross-scenario comparison

use std::io::Write;

use csv::Writer;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::projection::{InvestmentMetrics, ScenarioResult};

/// One scenario's headline figures in the comparison table
///
/// Absent values serialize as empty cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRow {
    pub scenario_id: String,
    pub scenario_name: String,
    /// Scenario scaling of units sold
    pub adoption_multiplier: f64,
    /// Scenario scaling of price
    pub price_multiplier: f64,
    /// Number of projected years
    pub years: u32,
    pub total_revenue: f64,
    pub total_net_profit: f64,
    /// Cumulative cash flow after the last year; empty for a zero horizon
    pub final_cumulative_cash_flow: Option<f64>,
    pub payback_year: Option<u32>,
    pub break_even_units: Option<f64>,
    /// Rate used for `npv`, in percent
    pub discount_rate_pct: f64,
    pub npv: f64,
    /// IRR in percent; empty when there is none
    pub irr_pct: Option<f64>,
}

impl ComparisonRow {
    pub fn new(result: &ScenarioResult, metrics: &InvestmentMetrics) -> Self {
        let summary = result.summary();
        Self {
            scenario_id: summary.scenario_id,
            scenario_name: summary.scenario_name,
            adoption_multiplier: result.scenario.adoption_multiplier,
            price_multiplier: result.scenario.price_multiplier,
            years: summary.years,
            total_revenue: summary.total_revenue,
            total_net_profit: summary.total_net_profit,
            final_cumulative_cash_flow: summary.final_cumulative_cash_flow,
            payback_year: summary.payback_year,
            break_even_units: summary.break_even_units,
            discount_rate_pct: metrics.discount_rate_pct,
            npv: metrics.npv,
            irr_pct: metrics.irr.map(|rate| rate * 100.0),
        }
    }
}

/// Write a header row and one record per projected year
pub fn write_yearly_csv<W: Write>(writer: W, result: &ScenarioResult) -> Result<()> {
    let mut csv_writer = Writer::from_writer(writer);
    for row in &result.yearly {
        csv_writer.serialize(row)?;
    }
    if result.yearly.is_empty() {
        csv_writer.write_record(YEARLY_COLUMNS)?;
    }
    csv_writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Write one comparison record per scenario
pub fn write_comparison_csv<W: Write>(writer: W, rows: &[ComparisonRow]) -> Result<()> {
    let mut csv_writer = Writer::from_writer(writer);
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Column names of the yearly export, matching `YearlyResult` field order
pub const YEARLY_COLUMNS: [&str; 11] = [
    "year",
    "price_per_unit",
    "units",
    "revenue",
    "variable_cost",
    "gross_profit",
    "gross_margin_pct",
    "fixed_cost",
    "net_profit",
    "net_margin_pct",
    "cumulative_cash_flow",
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::{ProjectionEngine, DEFAULT_DISCOUNT_RATE_PCT};
    use crate::scenario::Scenario;
    use crate::BusinessCase;

    fn project_default(horizon: u32) -> (BusinessCase, ScenarioResult) {
        let mut case = BusinessCase::default_case();
        case.general.horizon_years = horizon;
        let result = ProjectionEngine::from_case(&case).project_scenario(&Scenario::baseline());
        (case, result)
    }

    #[test]
    fn test_yearly_csv_has_header_and_one_row_per_year() {
        let (_, result) = project_default(5);
        let mut buffer = Vec::new();
        write_yearly_csv(&mut buffer, &result).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0], YEARLY_COLUMNS.join(","));
        assert!(lines[1].starts_with("1,49.0,"));
    }

    #[test]
    fn test_empty_projection_still_has_header() {
        let (_, result) = project_default(0);
        let mut buffer = Vec::new();
        write_yearly_csv(&mut buffer, &result).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(text.trim_end(), YEARLY_COLUMNS.join(","));
    }

    #[test]
    fn test_comparison_leaves_absent_values_empty() {
        let (mut case, _) = project_default(5);
        case.cost.annual_fixed_opex = 10_000_000.0;
        case.revenue.base_price_per_unit = 1.0;
        let result = ProjectionEngine::from_case(&case).project_scenario(&Scenario::baseline());
        let metrics = InvestmentMetrics::evaluate(&case.cost, &result, DEFAULT_DISCOUNT_RATE_PCT);

        let mut buffer = Vec::new();
        write_comparison_csv(&mut buffer, &[ComparisonRow::new(&result, &metrics)]).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        let mut reader = csv::Reader::from_reader(text.as_bytes());
        let headers = reader.headers().unwrap().clone();
        let record = reader.records().next().unwrap().unwrap();
        let field = |name: &str| {
            let idx = headers.iter().position(|h| h == name).unwrap();
            record[idx].to_string()
        };

        assert_eq!(field("scenario_id"), "base");
        assert_eq!(field("payback_year"), "");
        assert_eq!(field("break_even_units"), "");
        assert_eq!(field("irr_pct"), "");
    }
}
