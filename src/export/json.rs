//! JSON export of a scenario projection with its inputs

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::Result;
use crate::params::BusinessCase;
use crate::projection::{InvestmentMetrics, ScenarioResult};

/// Everything needed to reproduce and present one scenario
#[derive(Debug, Serialize)]
pub struct ProjectionDocument<'a> {
    pub generated_at: DateTime<Utc>,
    pub case: &'a BusinessCase,
    pub result: &'a ScenarioResult,
    pub metrics: &'a InvestmentMetrics,
}

pub fn write_json<W: Write>(writer: W, document: &ProjectionDocument<'_>) -> Result<()> {
    serde_json::to_writer_pretty(writer, document)?;
    Ok(())
}
