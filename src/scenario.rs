//! Scenarios and the runner that projects a business case across them
//!
//! Holds one business case and runs any number of scenarios against it.
//! Projections share nothing, so scenario sets are fanned out in parallel.

use log::debug;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::params::BusinessCase;
use crate::projection::{ProjectionEngine, ScenarioResult};

/// Relative price shift used by sensitivity analysis (±10%)
pub const SENSITIVITY_PERTURBATION: f64 = 0.10;

fn default_multiplier() -> f64 {
    1.0
}

/// Named scaling of the baseline projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// Stable identifier, used on the command line and in variant ids
    pub id: String,

    /// Display name, also used to derive export file names
    pub name: String,

    /// Scales units sold every year
    #[serde(default = "default_multiplier")]
    pub adoption_multiplier: f64,

    /// Scales the price every year
    #[serde(default = "default_multiplier")]
    pub price_multiplier: f64,
}

impl Scenario {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        adoption_multiplier: f64,
        price_multiplier: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            adoption_multiplier,
            price_multiplier,
        }
    }

    /// Unscaled projection
    pub fn baseline() -> Self {
        Self::new("base", "Base Case", 1.0, 1.0)
    }

    /// Base, conservative and optimistic cases
    pub fn default_set() -> Vec<Self> {
        vec![
            Self::baseline(),
            Self::new("conservative", "Conservative", 0.7, 0.9),
            Self::new("optimistic", "Optimistic", 1.3, 1.1),
        ]
    }

    /// Copy with the price multiplier scaled by `factor`, adoption unchanged
    pub fn with_price_factor(&self, factor: f64, id_suffix: &str, name_suffix: &str) -> Self {
        Self {
            id: format!("{}-{}", self.id, id_suffix),
            name: format!("{} ({})", self.name, name_suffix),
            adoption_multiplier: self.adoption_multiplier,
            price_multiplier: self.price_multiplier * factor,
        }
    }
}

/// A scenario re-run with its price shifted down and up
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensitivityAnalysis {
    /// Relative price shift applied to each side
    pub perturbation: f64,
    pub low: ScenarioResult,
    pub base: ScenarioResult,
    pub high: ScenarioResult,
}

impl SensitivityAnalysis {
    /// Total net profit spread between the high- and low-price runs
    pub fn net_profit_swing(&self) -> f64 {
        self.high.total_net_profit - self.low.total_net_profit
    }

    /// Results ordered low, base, high
    pub fn results(&self) -> [&ScenarioResult; 3] {
        [&self.low, &self.base, &self.high]
    }
}

/// Runs scenario projections against one business case
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    case: BusinessCase,
}

impl ScenarioRunner {
    pub fn new(case: BusinessCase) -> Self {
        Self { case }
    }

    /// Runner over the built-in default case
    pub fn with_default_case() -> Self {
        Self::new(BusinessCase::default_case())
    }

    pub fn case(&self) -> &BusinessCase {
        &self.case
    }

    /// Look up one of the case's scenarios by id
    pub fn find_scenario(&self, id: &str) -> Result<&Scenario> {
        self.case
            .scenarios
            .iter()
            .find(|s| s.id == id)
            .ok_or_else(|| Error::UnknownScenario(id.to_string()))
    }

    /// Project a single scenario
    pub fn run(&self, scenario: &Scenario) -> ScenarioResult {
        debug!(
            "Projecting scenario '{}' (adoption x{}, price x{})",
            scenario.id, scenario.adoption_multiplier, scenario.price_multiplier
        );
        ProjectionEngine::from_case(&self.case).project_scenario(scenario)
    }

    /// Project several scenarios; results keep the input order
    pub fn run_scenarios(&self, scenarios: &[Scenario]) -> Vec<ScenarioResult> {
        scenarios.par_iter().map(|s| self.run(s)).collect()
    }

    /// Project every scenario listed in the case
    pub fn run_all(&self) -> Vec<ScenarioResult> {
        self.run_scenarios(&self.case.scenarios)
    }

    /// Re-run `scenario` with its price multiplier shifted by ±10%
    pub fn sensitivity(&self, scenario: &Scenario) -> SensitivityAnalysis {
        let down =
            scenario.with_price_factor(1.0 - SENSITIVITY_PERTURBATION, "price-down-10", "price -10%");
        let up =
            scenario.with_price_factor(1.0 + SENSITIVITY_PERTURBATION, "price-up-10", "price +10%");

        let (low, (base, high)) = rayon::join(
            || self.run(&down),
            || rayon::join(|| self.run(scenario), || self.run(&up)),
        );

        SensitivityAnalysis {
            perturbation: SENSITIVITY_PERTURBATION,
            low,
            base,
            high,
        }
    }
}

impl Default for ScenarioRunner {
    fn default() -> Self {
        Self::with_default_case()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_run_all_keeps_scenario_order() {
        let runner = ScenarioRunner::default();
        let results = runner.run_all();

        let ids: Vec<_> = results.iter().map(|r| r.scenario.id.as_str()).collect();
        assert_eq!(ids, vec!["base", "conservative", "optimistic"]);
    }

    #[test]
    fn test_optimistic_beats_conservative() {
        let runner = ScenarioRunner::default();
        let results = runner.run_all();

        assert!(results[2].total_revenue > results[0].total_revenue);
        assert!(results[0].total_revenue > results[1].total_revenue);
    }

    #[test]
    fn test_unit_multipliers_reproduce_baseline() {
        let runner = ScenarioRunner::default();
        let custom = Scenario::new("plain", "Plain", 1.0, 1.0);

        let baseline = runner.run(&Scenario::baseline());
        let plain = runner.run(&custom);

        assert_eq!(baseline.yearly, plain.yearly);
        assert_eq!(baseline.payback_year, plain.payback_year);
    }

    #[test]
    fn test_find_unknown_scenario() {
        let runner = ScenarioRunner::default();
        assert!(runner.find_scenario("optimistic").is_ok());
        assert!(matches!(
            runner.find_scenario("moonshot"),
            Err(Error::UnknownScenario(id)) if id == "moonshot"
        ));
    }

    #[test]
    fn test_sensitivity_scales_price_only() {
        let runner = ScenarioRunner::default();
        let scenario = Scenario::new("mixed", "Mixed", 1.2, 1.05);
        let analysis = runner.sensitivity(&scenario);

        assert_eq!(analysis.low.scenario.id, "mixed-price-down-10");
        assert_eq!(analysis.high.scenario.name, "Mixed (price +10%)");
        assert_relative_eq!(analysis.low.scenario.price_multiplier, 1.05 * 0.9);
        assert_relative_eq!(analysis.high.scenario.price_multiplier, 1.05 * 1.1);
        assert_eq!(analysis.low.scenario.adoption_multiplier, 1.2);
        assert_eq!(analysis.base.scenario, scenario);

        // Units are unaffected by price
        assert_eq!(analysis.low.yearly[0].units, analysis.high.yearly[0].units);
        assert!(analysis.net_profit_swing() > 0.0);
    }
}
