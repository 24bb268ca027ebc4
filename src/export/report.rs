//! Paginated plain-text report: summary header followed by the yearly table
//!
//! Pages are separated by a form feed and every page repeats the column header.

use chrono::NaiveDate;

use super::format::{
    format_break_even, format_currency, format_irr, format_number, format_payback, format_pct,
};
use crate::params::BusinessCase;
use crate::projection::{InvestmentMetrics, ScenarioResult, YearlyResult};

/// Table rows per page when none is given
pub const DEFAULT_ROWS_PER_PAGE: usize = 40;

const PAGE_BREAK: char = '\u{000C}';

#[derive(Debug, Clone)]
pub struct ReportOptions {
    pub generated_on: NaiveDate,
    pub rows_per_page: usize,
}

impl ReportOptions {
    pub fn new(generated_on: NaiveDate) -> Self {
        Self {
            generated_on,
            rows_per_page: DEFAULT_ROWS_PER_PAGE,
        }
    }
}

/// Column header of the yearly table
pub fn table_header() -> String {
    format!(
        "{:>4} {:>12} {:>12} {:>16} {:>16} {:>16} {:>9} {:>14} {:>16} {:>9} {:>18}",
        "Year",
        "Price/Unit",
        "Units",
        "Revenue",
        "Variable Cost",
        "Gross Profit",
        "Gross %",
        "Fixed Cost",
        "Net Profit",
        "Net %",
        "Cumulative CF",
    )
}

/// One yearly result as a table line
pub fn table_row(row: &YearlyResult) -> String {
    format!(
        "{:>4} {:>12} {:>12} {:>16} {:>16} {:>16} {:>9} {:>14} {:>16} {:>9} {:>18}",
        row.year,
        format_currency(row.price_per_unit),
        format_number(row.units, 0),
        format_currency(row.revenue),
        format_currency(row.variable_cost),
        format_currency(row.gross_profit),
        format_pct(row.gross_margin_pct),
        format_currency(row.fixed_cost),
        format_currency(row.net_profit),
        format_pct(row.net_margin_pct),
        format_currency(row.cumulative_cash_flow),
    )
}

fn summary_lines(
    case: &BusinessCase,
    result: &ScenarioResult,
    metrics: &InvestmentMetrics,
    options: &ReportOptions,
) -> Vec<String> {
    let scenario = &result.scenario;
    vec![
        format!("Business Case Report: {}", scenario.name),
        format!("Generated: {}", options.generated_on.format("%Y-%m-%d")),
        String::new(),
        format!("Product type:        {}", case.general.product_type.as_str()),
        format!("Horizon:             {} years", case.general.horizon_years),
        format!(
            "Scenario:            {} (adoption x{}, price x{})",
            scenario.id, scenario.adoption_multiplier, scenario.price_multiplier
        ),
        format!("Upfront capital:     {}", format_currency(case.cost.upfront_capex())),
        format!("Unit variable cost:  {}", format_currency(case.cost.unit_variable_cost())),
        String::new(),
        format!("Total revenue:       {}", format_currency(result.total_revenue)),
        format!("Total net profit:    {}", format_currency(result.total_net_profit)),
        format!("Payback year:        {}", format_payback(result.payback_year)),
        format!("Break-even units:    {}", format_break_even(result.break_even_units)),
        format!(
            "{:<21}{}",
            format!("NPV @ {}:", format_pct(metrics.discount_rate_pct)),
            format_currency(metrics.npv)
        ),
        format!("IRR:                 {}", format_irr(metrics.irr)),
        String::new(),
    ]
}

/// Render the full report
pub fn render_report(
    case: &BusinessCase,
    result: &ScenarioResult,
    metrics: &InvestmentMetrics,
    options: &ReportOptions,
) -> String {
    let rows_per_page = options.rows_per_page.max(1);
    let pages: Vec<&[YearlyResult]> = if result.yearly.is_empty() {
        vec![&[]]
    } else {
        result.yearly.chunks(rows_per_page).collect()
    };
    let page_count = pages.len();

    let mut out = String::new();
    for (idx, rows) in pages.into_iter().enumerate() {
        if idx > 0 {
            out.push(PAGE_BREAK);
        }

        let mut lines = if idx == 0 {
            summary_lines(case, result, metrics, options)
        } else {
            Vec::new()
        };
        lines.push(format!("Page {} of {}", idx + 1, page_count));
        lines.push(table_header());
        lines.push("-".repeat(table_header().len()));

        if rows.is_empty() {
            lines.push("No projected years".to_string());
        }
        lines.extend(rows.iter().map(table_row));

        out.push_str(&lines.join("\n"));
        out.push('\n');
    }

    out
}
