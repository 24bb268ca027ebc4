//! Projection engine for yearly business case projections

mod state;
mod engine;
mod results;
mod irr;

pub use state::CashPosition;
pub use engine::{project, ProjectionEngine};
pub use results::{ScenarioResult, ScenarioSummary, YearlyResult};
pub use irr::{
    calculate_irr, cash_flow_series, npv, InvestmentMetrics, DEFAULT_DISCOUNT_RATE_PCT,
};
