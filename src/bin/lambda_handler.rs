//! AWS Lambda handler for business case projections
//!
//! Accepts a case file (plus run options) as the JSON body of a Lambda
//! Function URL request and returns per-scenario results with summaries.

use aws_lambda_events::event::lambda_function_urls::{
    LambdaFunctionUrlRequest, LambdaFunctionUrlResponse,
};
use business_case::params::CaseFile;
use business_case::projection::{InvestmentMetrics, ScenarioSummary, DEFAULT_DISCOUNT_RATE_PCT};
use business_case::{ScenarioResult, ScenarioRunner, SensitivityAnalysis};
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Request body: a case file with optional run settings
#[derive(Debug, Deserialize)]
pub struct ProjectionRequest {
    #[serde(flatten)]
    pub case: CaseFile,

    /// Restrict the run to these scenario ids (all when empty)
    #[serde(default)]
    pub scenario_ids: Vec<String>,

    /// Discount rate for NPV in percent (default: 10)
    #[serde(default = "default_discount_rate")]
    pub discount_rate_pct: f64,

    /// Also return ±10% price sensitivity for each scenario
    #[serde(default)]
    pub include_sensitivity: bool,
}

fn default_discount_rate() -> f64 {
    DEFAULT_DISCOUNT_RATE_PCT
}

#[derive(Debug, Serialize)]
pub struct ScenarioOutput {
    pub summary: ScenarioSummary,
    pub metrics: InvestmentMetrics,
    pub result: ScenarioResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sensitivity: Option<SensitivityAnalysis>,
}

#[derive(Debug, Serialize)]
pub struct ProjectionResponse {
    pub product_type: String,
    pub horizon_years: u32,
    pub scenarios: Vec<ScenarioOutput>,
    pub execution_time_ms: u64,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

fn run_projection(request: ProjectionRequest) -> Result<ProjectionResponse, String> {
    let start = Instant::now();
    let case = request.case.into_case().map_err(|e| e.to_string())?;
    let runner = ScenarioRunner::new(case);

    let scenarios = if request.scenario_ids.is_empty() {
        runner.case().scenarios.clone()
    } else {
        request
            .scenario_ids
            .iter()
            .map(|id| runner.find_scenario(id).cloned().map_err(|e| e.to_string()))
            .collect::<Result<Vec<_>, _>>()?
    };

    let outputs = runner
        .run_scenarios(&scenarios)
        .into_iter()
        .map(|result| {
            let metrics =
                InvestmentMetrics::evaluate(&runner.case().cost, &result, request.discount_rate_pct);
            let sensitivity = request
                .include_sensitivity
                .then(|| runner.sensitivity(&result.scenario));
            ScenarioOutput {
                summary: result.summary(),
                metrics,
                result,
                sensitivity,
            }
        })
        .collect();

    Ok(ProjectionResponse {
        product_type: runner.case().general.product_type.as_str().to_string(),
        horizon_years: runner.case().general.horizon_years,
        scenarios: outputs,
        execution_time_ms: start.elapsed().as_millis() as u64,
    })
}

fn respond<T: Serialize>(status_code: i64, body: &T) -> Result<LambdaFunctionUrlResponse, Error> {
    Ok(LambdaFunctionUrlResponse {
        status_code,
        headers: Default::default(),
        body: Some(serde_json::to_string(body)?),
        is_base64_encoded: false,
        cookies: Vec::new(),
    })
}

fn bad_request(message: String) -> Result<LambdaFunctionUrlResponse, Error> {
    warn!("Rejecting request: {}", message);
    respond(400, &ErrorResponse { error: message })
}

fn handle_request(request: LambdaFunctionUrlRequest) -> Result<LambdaFunctionUrlResponse, Error> {
    if request.is_base64_encoded {
        return bad_request("base64-encoded bodies are not supported".to_string());
    }

    let body = request.body.unwrap_or_else(|| "{}".to_string());
    let parsed: ProjectionRequest = match serde_json::from_str(&body) {
        Ok(parsed) => parsed,
        Err(e) => return bad_request(format!("invalid request body: {}", e)),
    };

    match run_projection(parsed) {
        Ok(response) => {
            info!(
                "Projected {} scenarios in {} ms",
                response.scenarios.len(),
                response.execution_time_ms
            );
            respond(200, &response)
        }
        Err(message) => bad_request(message),
    }
}

async fn handler(
    event: LambdaEvent<LambdaFunctionUrlRequest>,
) -> Result<LambdaFunctionUrlResponse, Error> {
    handle_request(event.payload)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}
