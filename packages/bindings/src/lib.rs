//! Node bindings for hosting the dashboard in a web page.
//!
//! Every function takes and returns JSON strings; the host draws the
//! returned `DashboardView` tree.

use napi::Result as NapiResult;
use napi_derive::napi;

use sofinscore_core::applicant::ApplicantInput;
use sofinscore_core::{charts, dashboard, decision, model};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

fn parse_applicant(input_json: &str) -> NapiResult<ApplicantInput> {
    serde_json::from_str(input_json).map_err(to_napi_error)
}

/// Control defaults for a freshly opened page.
#[napi]
pub fn default_applicant() -> NapiResult<String> {
    serde_json::to_string(&ApplicantInput::default()).map_err(to_napi_error)
}

/// Score one applicant. Asset failures are returned as errors.
#[napi]
pub fn evaluate_applicant(models_dir: String, input_json: String) -> NapiResult<String> {
    let input = parse_applicant(&input_json)?;
    let bundle = model::shared_assets(&models_dir).map_err(to_napi_error)?;
    let output = decision::evaluate(bundle, &input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// Render the whole page. A missing or corrupt model yields a halted view.
#[napi]
pub fn render_dashboard(
    models_dir: String,
    input_json: String,
    evaluate: bool,
    seed: Option<u32>,
) -> NapiResult<String> {
    let input = parse_applicant(&input_json)?;
    let assets = model::shared_assets(&models_dir);
    let view = dashboard::render_page(assets, &input, evaluate, seed.map(u64::from))
        .map_err(to_napi_error)?;
    serde_json::to_string(&view).map_err(to_napi_error)
}

/// The two overview charts.
#[napi]
pub fn portfolio_charts(seed: Option<u32>) -> NapiResult<String> {
    let output = charts::render_charts(seed.map(u64::from)).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
