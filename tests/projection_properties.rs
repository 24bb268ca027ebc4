//! Engine properties checked over a grid of business cases

use approx::assert_relative_eq;
use business_case::params::{HardwareCosts, ProductType, SoftwareCosts, VariableCosts};
use business_case::{
    project, BusinessCase, CostParameters, GeneralParameters, MarketParameters,
    RevenueParameters, Scenario, ScenarioResult,
};

fn variable_costs(product_type: ProductType) -> VariableCosts {
    match product_type {
        ProductType::Software => VariableCosts::Software(SoftwareCosts {
            infra_cost_per_user: 1.5,
            license_cost_per_user: 0.5,
        }),
        ProductType::Hardware => VariableCosts::Hardware(HardwareCosts {
            manufacturing_cost_per_unit: 20.0,
            shipping_cost_per_unit: 3.0,
            packaging_cost_per_unit: 1.0,
        }),
    }
}

/// Cases spanning horizons, product types, prices, growth and capex
fn case_grid() -> Vec<BusinessCase> {
    let mut cases = Vec::new();
    for &horizon in &[0u32, 1, 3, 7] {
        for &product_type in &[ProductType::Software, ProductType::Hardware] {
            for &price in &[-5.0, 0.0, 4.0, 30.0, 120.0] {
                for &growth in &[-10.0, 0.0, 5.0] {
                    for &capex in &[0.0, 50_000.0] {
                        cases.push(BusinessCase {
                            general: GeneralParameters {
                                product_type,
                                horizon_years: horizon,
                            },
                            cost: CostParameters {
                                development_capex: capex,
                                launch_marketing_capex: capex / 4.0,
                                variable: variable_costs(product_type),
                                support_cost_per_unit: 2.0,
                                annual_fixed_opex: 10_000.0,
                            },
                            market: MarketParameters {
                                // Deliberately shorter than the longest horizon
                                tam_units_per_year: vec![10_000.0, 12_000.0, 15_000.0, 18_000.0, 20_000.0],
                                sam_pct: 60.0,
                                som_pct: 25.0,
                                adoption_pct_per_year: vec![10.0, 20.0, 35.0, 50.0],
                            },
                            revenue: RevenueParameters {
                                base_price_per_unit: price,
                                annual_price_growth_pct: growth,
                            },
                            scenarios: Scenario::default_set(),
                        });
                    }
                }
            }
        }
    }
    cases
}

fn run_all(case: &BusinessCase) -> Vec<ScenarioResult> {
    case.scenarios
        .iter()
        .map(|s| project(&case.general, &case.cost, &case.market, &case.revenue, s))
        .collect()
}

#[test]
fn test_yearly_rows_cover_horizon_in_order() {
    for case in case_grid() {
        for result in run_all(&case) {
            assert_eq!(result.yearly.len(), case.general.horizon_years as usize);
            for (k, row) in result.yearly.iter().enumerate() {
                assert_eq!(row.year, k as u32 + 1);
            }
        }
    }
}

#[test]
fn test_totals_are_exact_sums() {
    for case in case_grid() {
        for result in run_all(&case) {
            let revenue: f64 = result.yearly.iter().map(|r| r.revenue).sum();
            let net: f64 = result.yearly.iter().map(|r| r.net_profit).sum();
            assert_eq!(result.total_revenue, revenue);
            assert_eq!(result.total_net_profit, net);
        }
    }
}

#[test]
fn test_final_cash_flow_is_capex_plus_total_profit() {
    for case in case_grid() {
        for result in run_all(&case) {
            if let Some(last) = result.yearly.last() {
                let expected = -case.cost.upfront_capex() + result.total_net_profit;
                assert_relative_eq!(
                    last.cumulative_cash_flow,
                    expected,
                    epsilon = 1e-6,
                    max_relative = 1e-12
                );
            }
        }
    }
}

#[test]
fn test_cash_flow_monotone_when_profitable() {
    for case in case_grid() {
        for result in run_all(&case) {
            if result.yearly.iter().all(|r| r.net_profit >= 0.0) {
                for pair in result.yearly.windows(2) {
                    assert!(pair[1].cumulative_cash_flow >= pair[0].cumulative_cash_flow);
                }
            }
        }
    }
}

#[test]
fn test_payback_is_first_crossing() {
    let mut seen_payback = false;
    let mut seen_none = false;

    for case in case_grid() {
        for result in run_all(&case) {
            match result.payback_year {
                Some(year) => {
                    seen_payback = true;
                    let idx = (year - 1) as usize;
                    assert!(result.yearly[idx].cumulative_cash_flow >= 0.0);
                    assert!(result.yearly[..idx].iter().all(|r| r.cumulative_cash_flow < 0.0));
                }
                None => {
                    seen_none = true;
                    assert!(result.yearly.iter().all(|r| r.cumulative_cash_flow < 0.0));
                }
            }
        }
    }

    assert!(seen_payback && seen_none, "grid should cover both outcomes");
}

#[test]
fn test_margins_zero_without_revenue() {
    for case in case_grid() {
        for result in run_all(&case) {
            for row in result.yearly.iter().filter(|r| r.revenue <= 0.0) {
                assert_eq!(row.gross_margin_pct, 0.0);
                assert_eq!(row.net_margin_pct, 0.0);
            }
        }
    }
}

#[test]
fn test_break_even_absent_when_price_not_above_unit_cost() {
    for case in case_grid() {
        let margin = case.revenue.base_price_per_unit - case.cost.unit_variable_cost();
        for result in run_all(&case) {
            if margin <= 0.0 {
                assert_eq!(result.break_even_units, None);
            } else {
                let units = result.break_even_units.expect("positive margin has a break-even");
                assert_relative_eq!(units * margin, case.cost.upfront_capex(), epsilon = 1e-6);
            }
        }
    }
}

#[test]
fn test_unit_multipliers_match_baseline() {
    for case in case_grid() {
        let baseline = project(
            &case.general,
            &case.cost,
            &case.market,
            &case.revenue,
            &Scenario::baseline(),
        );
        let neutral = Scenario::new("neutral", "Neutral", 1.0, 1.0);
        let result = project(&case.general, &case.cost, &case.market, &case.revenue, &neutral);

        assert_eq!(result.yearly, baseline.yearly);
        assert_eq!(result.total_net_profit, baseline.total_net_profit);
        assert_eq!(result.break_even_units, baseline.break_even_units);
    }
}

#[test]
fn test_years_past_market_data_sell_nothing() {
    for case in case_grid().into_iter().filter(|c| c.general.horizon_years == 7) {
        for result in run_all(&case) {
            // Adoption covers four years, TAM five
            for row in &result.yearly[4..] {
                assert_eq!(row.units, 0.0);
                assert_eq!(row.net_profit, -case.cost.annual_fixed_opex);
            }
        }
    }
}
