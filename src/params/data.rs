//! Parameter groups describing a single product's business case

use serde::{Deserialize, Serialize};

use crate::scenario::Scenario;

/// Default projection horizon in years
pub const DEFAULT_HORIZON_YEARS: u32 = 5;

/// Longest horizon a case may project, also the last valid market table year
pub const MAX_HORIZON_YEARS: u32 = 100;

/// Kind of product being sold, which decides the variable cost shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductType {
    /// Licensed or hosted software, costed per user
    Software,
    /// Physical goods, costed per unit shipped
    Hardware,
}

impl ProductType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductType::Software => "software",
            ProductType::Hardware => "hardware",
        }
    }
}

/// Product type and projection length
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralParameters {
    pub product_type: ProductType,

    /// Number of projected years (year 1 is the first)
    pub horizon_years: u32,
}

impl Default for GeneralParameters {
    fn default() -> Self {
        Self {
            product_type: ProductType::Software,
            horizon_years: DEFAULT_HORIZON_YEARS,
        }
    }
}

/// Per-user costs of a software product
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SoftwareCosts {
    pub infra_cost_per_user: f64,
    pub license_cost_per_user: f64,
}

/// Per-unit costs of a hardware product
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HardwareCosts {
    pub manufacturing_cost_per_unit: f64,
    pub shipping_cost_per_unit: f64,
    pub packaging_cost_per_unit: f64,
}

/// Variable cost structure; exactly one shape applies to a product
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VariableCosts {
    Software(SoftwareCosts),
    Hardware(HardwareCosts),
}

impl VariableCosts {
    /// Product type implied by this cost shape
    pub fn product_type(&self) -> ProductType {
        match self {
            VariableCosts::Software(_) => ProductType::Software,
            VariableCosts::Hardware(_) => ProductType::Hardware,
        }
    }

    /// Sum of the product-specific per-unit costs, excluding support
    pub fn per_unit(&self) -> f64 {
        match self {
            VariableCosts::Software(c) => c.infra_cost_per_user + c.license_cost_per_user,
            VariableCosts::Hardware(c) => {
                c.manufacturing_cost_per_unit + c.shipping_cost_per_unit + c.packaging_cost_per_unit
            }
        }
    }
}

/// Upfront, variable and fixed cost assumptions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostParameters {
    /// One-time development spend before year 1
    pub development_capex: f64,

    /// One-time launch and marketing spend before year 1
    pub launch_marketing_capex: f64,

    pub variable: VariableCosts,

    /// Support cost per unit or user, common to both product types
    pub support_cost_per_unit: f64,

    /// Fixed operating cost charged identically every year
    pub annual_fixed_opex: f64,
}

impl CostParameters {
    /// Total capital spent before the first year begins
    pub fn upfront_capex(&self) -> f64 {
        self.development_capex + self.launch_marketing_capex
    }

    /// Variable cost of one unit (or user), support included
    pub fn unit_variable_cost(&self) -> f64 {
        self.variable.per_unit() + self.support_cost_per_unit
    }
}

/// TAM/SAM/SOM funnel and adoption curve
///
/// Percentages are literal (25.0 means 25%), not fractions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketParameters {
    /// Total addressable market in units; index 0 is year 1
    pub tam_units_per_year: Vec<f64>,

    /// Serviceable share of TAM, applied to every year
    pub sam_pct: f64,

    /// Obtainable share of SAM, applied to every year
    pub som_pct: f64,

    /// Share of SOM adopting in each year; index 0 is year 1
    pub adoption_pct_per_year: Vec<f64>,
}

impl Default for MarketParameters {
    fn default() -> Self {
        Self {
            tam_units_per_year: vec![1_000_000.0, 1_100_000.0, 1_210_000.0, 1_331_000.0, 1_464_100.0],
            sam_pct: 20.0,
            som_pct: 10.0,
            adoption_pct_per_year: vec![5.0, 10.0, 20.0, 30.0, 40.0],
        }
    }
}

impl MarketParameters {
    /// TAM for a 0-based year index, zero when the sequence is too short
    pub fn tam_units(&self, year_index: usize) -> f64 {
        self.tam_units_per_year.get(year_index).copied().unwrap_or(0.0)
    }

    /// Adoption as a fraction for a 0-based year index, zero when absent
    pub fn adoption_fraction(&self, year_index: usize) -> f64 {
        self.adoption_pct_per_year
            .get(year_index)
            .map(|pct| pct / 100.0)
            .unwrap_or(0.0)
    }

    /// Obtainable units for a 0-based year index before adoption is applied
    pub fn som_units(&self, year_index: usize) -> f64 {
        let sam_units = self.tam_units(year_index) * self.sam_pct / 100.0;
        sam_units * self.som_pct / 100.0
    }
}

/// Pricing trajectory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevenueParameters {
    /// Price of one unit in year 1
    pub base_price_per_unit: f64,

    /// Yearly price growth in percent, compounded
    pub annual_price_growth_pct: f64,
}

impl Default for RevenueParameters {
    fn default() -> Self {
        Self {
            base_price_per_unit: 49.0,
            annual_price_growth_pct: 3.0,
        }
    }
}

impl RevenueParameters {
    /// Unscaled price for a 0-based year index
    pub fn base_price(&self, year_index: usize) -> f64 {
        let growth = 1.0 + self.annual_price_growth_pct / 100.0;
        self.base_price_per_unit * growth.powi(year_index as i32)
    }
}

/// Complete set of inputs for one product plus the scenarios to run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessCase {
    pub general: GeneralParameters,
    pub cost: CostParameters,
    pub market: MarketParameters,
    pub revenue: RevenueParameters,
    pub scenarios: Vec<Scenario>,
}

impl BusinessCase {
    /// Built-in five-year software case used when no case file is given
    pub fn default_case() -> Self {
        Self {
            general: GeneralParameters::default(),
            cost: CostParameters {
                development_capex: 300_000.0,
                launch_marketing_capex: 100_000.0,
                variable: VariableCosts::Software(SoftwareCosts {
                    infra_cost_per_user: 2.0,
                    license_cost_per_user: 1.0,
                }),
                support_cost_per_unit: 3.0,
                annual_fixed_opex: 150_000.0,
            },
            market: MarketParameters::default(),
            revenue: RevenueParameters::default(),
            scenarios: Scenario::default_set(),
        }
    }

    /// Product type as configured in the general parameters
    pub fn product_type(&self) -> ProductType {
        self.general.product_type
    }
}
