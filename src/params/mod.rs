//! Business case parameters: cost structure, market funnel and pricing

mod data;
pub mod loader;

pub use data::{
    BusinessCase, CostParameters, GeneralParameters, HardwareCosts, MarketParameters,
    ProductType, RevenueParameters, SoftwareCosts, VariableCosts, DEFAULT_HORIZON_YEARS,
    MAX_HORIZON_YEARS,
};
pub use loader::{load_case, load_market_table, load_scenarios, parse_case, CaseFile, CaseSources};
