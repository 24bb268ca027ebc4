//! Business Case - deterministic multi-year projections for a single product
//!
//! This library provides:
//! - Yearly revenue, cost, margin and cash-flow projections per scenario
//! - Payback year and break-even units
//! - Scenario sets and ±10% price sensitivity runs
//! - NPV / IRR of the projected cash flows
//! - CSV, JSON and paginated text exports

pub mod error;
pub mod params;
pub mod projection;
pub mod scenario;
pub mod export;

// Re-export commonly used types
pub use error::{Error, Result};
pub use params::{BusinessCase, CostParameters, GeneralParameters, MarketParameters, RevenueParameters};
pub use projection::{project, ProjectionEngine, ScenarioResult, YearlyResult};
pub use scenario::{Scenario, ScenarioRunner, SensitivityAnalysis};
