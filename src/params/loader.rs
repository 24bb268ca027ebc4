//! Business case loading from JSON case files and CSV tables
//!
//! A case file mirrors the input form: both variable-cost blocks may be present
//! and the one matching `general.product_type` is used. Every field is optional
//! and falls back to the built-in default case.

use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use csv::Reader;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::{
    BusinessCase, CostParameters, GeneralParameters, HardwareCosts, MarketParameters,
    ProductType, RevenueParameters, SoftwareCosts, VariableCosts, MAX_HORIZON_YEARS,
};
use crate::error::{Error, Result};
use crate::scenario::Scenario;

/// Cost block as entered, holding both variable cost shapes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostInput {
    pub development_capex: f64,
    pub launch_marketing_capex: f64,
    pub software: SoftwareCosts,
    pub hardware: HardwareCosts,
    pub support_cost_per_unit: f64,
    pub annual_fixed_opex: f64,
}

impl Default for CostInput {
    fn default() -> Self {
        let defaults = BusinessCase::default_case().cost;
        let software = match defaults.variable {
            VariableCosts::Software(costs) => costs,
            VariableCosts::Hardware(_) => SoftwareCosts::default(),
        };
        Self {
            development_capex: defaults.development_capex,
            launch_marketing_capex: defaults.launch_marketing_capex,
            software,
            hardware: HardwareCosts {
                manufacturing_cost_per_unit: 40.0,
                shipping_cost_per_unit: 5.0,
                packaging_cost_per_unit: 2.0,
            },
            support_cost_per_unit: defaults.support_cost_per_unit,
            annual_fixed_opex: defaults.annual_fixed_opex,
        }
    }
}

impl CostInput {
    /// Select the variable cost shape for the given product type
    pub fn to_cost_parameters(&self, product_type: ProductType) -> CostParameters {
        let variable = match product_type {
            ProductType::Software => VariableCosts::Software(self.software),
            ProductType::Hardware => VariableCosts::Hardware(self.hardware),
        };
        CostParameters {
            development_capex: self.development_capex,
            launch_marketing_capex: self.launch_marketing_capex,
            variable,
            support_cost_per_unit: self.support_cost_per_unit,
            annual_fixed_opex: self.annual_fixed_opex,
        }
    }
}

/// On-disk case file layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaseFile {
    pub general: GeneralParameters,
    pub cost: CostInput,
    pub market: MarketParameters,
    pub revenue: RevenueParameters,
    pub scenarios: Vec<Scenario>,
}

impl Default for CaseFile {
    fn default() -> Self {
        let case = BusinessCase::default_case();
        Self {
            general: case.general,
            cost: CostInput::default(),
            market: case.market,
            revenue: case.revenue,
            scenarios: case.scenarios,
        }
    }
}

impl CaseFile {
    /// Build the immutable business case, substituting the default scenario
    /// set when none are listed
    pub fn into_case(self) -> Result<BusinessCase> {
        if self.general.horizon_years > MAX_HORIZON_YEARS {
            return Err(Error::HorizonTooLong(self.general.horizon_years));
        }

        let scenarios = if self.scenarios.is_empty() {
            Scenario::default_set()
        } else {
            check_unique_ids(&self.scenarios)?;
            self.scenarios
        };

        let case = BusinessCase {
            cost: self.cost.to_cost_parameters(self.general.product_type),
            general: self.general,
            market: self.market,
            revenue: self.revenue,
            scenarios,
        };
        warn_on_short_sequences(&case);
        Ok(case)
    }
}

/// Per-year TAM and adoption loaded from a market table
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MarketTable {
    pub tam_units_per_year: Vec<f64>,
    pub adoption_pct_per_year: Vec<f64>,
}

impl MarketTable {
    /// Replace the per-year sequences of `market`, keeping its funnel percentages
    pub fn apply(self, market: MarketParameters) -> MarketParameters {
        MarketParameters {
            tam_units_per_year: self.tam_units_per_year,
            adoption_pct_per_year: self.adoption_pct_per_year,
            ..market
        }
    }
}

#[derive(Debug, Deserialize)]
struct MarketRow {
    year: u32,
    tam_units: f64,
    adoption_pct: f64,
}

#[derive(Debug, Deserialize)]
struct ScenarioRow {
    id: String,
    name: String,
    adoption_multiplier: f64,
    price_multiplier: f64,
}

/// Parse a case from a JSON string
pub fn parse_case(json: &str) -> Result<BusinessCase> {
    let file: CaseFile = serde_json::from_str(json)?;
    file.into_case()
}

/// Load a case from any reader producing JSON
pub fn load_case_from_reader<R: Read>(reader: R) -> Result<BusinessCase> {
    let file: CaseFile = serde_json::from_reader(reader)?;
    file.into_case()
}

/// Load a case from a JSON file
pub fn load_case<P: AsRef<Path>>(path: P) -> Result<BusinessCase> {
    let path = path.as_ref();
    debug!("Loading case file {}", path.display());
    let file = File::open(path).map_err(|e| Error::io(path, e))?;
    load_case_from_reader(file)
}

/// Load a market table (`year,tam_units,adoption_pct`) from any reader
///
/// Years are 1-based and at most [`MAX_HORIZON_YEARS`]; years missing from
/// the table are zero-filled.
pub fn load_market_table_from_reader<R: Read>(reader: R) -> Result<MarketTable> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut table = MarketTable::default();

    for result in csv_reader.deserialize() {
        let row: MarketRow = result?;
        if row.year == 0 || row.year > MAX_HORIZON_YEARS {
            return Err(Error::InvalidYear(row.year));
        }
        let idx = (row.year - 1) as usize;
        if idx >= table.tam_units_per_year.len() {
            table.tam_units_per_year.resize(idx + 1, 0.0);
            table.adoption_pct_per_year.resize(idx + 1, 0.0);
        }
        table.tam_units_per_year[idx] = row.tam_units;
        table.adoption_pct_per_year[idx] = row.adoption_pct;
    }

    Ok(table)
}

/// Load a market table from a CSV file
pub fn load_market_table<P: AsRef<Path>>(path: P) -> Result<MarketTable> {
    let path = path.as_ref();
    debug!("Loading market table {}", path.display());
    let file = File::open(path).map_err(|e| Error::io(path, e))?;
    load_market_table_from_reader(file)
}

/// Load scenarios (`id,name,adoption_multiplier,price_multiplier`) from any reader
pub fn load_scenarios_from_reader<R: Read>(reader: R) -> Result<Vec<Scenario>> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut scenarios = Vec::new();

    for result in csv_reader.deserialize() {
        let row: ScenarioRow = result?;
        scenarios.push(Scenario::new(
            row.id,
            row.name,
            row.adoption_multiplier,
            row.price_multiplier,
        ));
    }

    check_unique_ids(&scenarios)?;
    Ok(scenarios)
}

/// Load scenarios from a CSV file
pub fn load_scenarios<P: AsRef<Path>>(path: P) -> Result<Vec<Scenario>> {
    let path = path.as_ref();
    debug!("Loading scenario table {}", path.display());
    let file = File::open(path).map_err(|e| Error::io(path, e))?;
    load_scenarios_from_reader(file)
}

/// Input locations for one run; anything unset falls back to the default case
#[derive(Debug, Clone, Default)]
pub struct CaseSources {
    pub case: Option<PathBuf>,
    pub market: Option<PathBuf>,
    pub scenarios: Option<PathBuf>,
}

impl CaseSources {
    /// Load the case file and apply the market and scenario table overrides
    pub fn load(&self) -> Result<BusinessCase> {
        let mut case = match &self.case {
            Some(path) => load_case(path)?,
            None => BusinessCase::default_case(),
        };

        if let Some(path) = &self.market {
            case.market = load_market_table(path)?.apply(case.market);
            warn_on_short_sequences(&case);
        }

        if let Some(path) = &self.scenarios {
            let scenarios = load_scenarios(path)?;
            if !scenarios.is_empty() {
                case.scenarios = scenarios;
            }
        }

        Ok(case)
    }
}

fn check_unique_ids(scenarios: &[Scenario]) -> Result<()> {
    let mut seen = HashSet::new();
    for scenario in scenarios {
        if !seen.insert(scenario.id.as_str()) {
            return Err(Error::DuplicateScenario(scenario.id.clone()));
        }
    }
    Ok(())
}

fn warn_on_short_sequences(case: &BusinessCase) {
    let horizon = case.general.horizon_years as usize;
    let tam_len = case.market.tam_units_per_year.len();
    let adoption_len = case.market.adoption_pct_per_year.len();

    if tam_len < horizon {
        warn!("TAM covers {} of {} years; later years project zero units", tam_len, horizon);
    }
    if adoption_len < horizon {
        warn!(
            "Adoption covers {} of {} years; later years project zero units",
            adoption_len, horizon
        );
    }
}
