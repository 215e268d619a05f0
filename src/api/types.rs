//! API request and response types.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::config::DefaultsConfig;
use crate::finance::kpi::SummaryRow;
use crate::finance::types::CumulativeProfitMode;

/// One turbine in a request. Missing financial fields take the server's
/// configured defaults.
#[derive(Debug, Deserialize)]
pub struct TurbineRequest {
    pub turbine_type: String,
    #[serde(default)]
    pub hub_height_m: Option<f64>,
    #[serde(default)]
    pub construction_cost: Option<f64>,
    #[serde(default)]
    pub maintenance_rate: Option<f64>,
    /// Hourly power output (W).
    pub power_w: Vec<f64>,
}

/// `POST /project` body.
#[derive(Debug, Deserialize)]
pub struct ProjectRequest {
    #[serde(flatten)]
    pub turbine: TurbineRequest,
    #[serde(default)]
    pub revenue_per_kwh: Option<f64>,
    /// First timestamp; defaults to the server's configured start.
    #[serde(default)]
    pub start: Option<NaiveDateTime>,
    #[serde(default)]
    pub cumulative_profit: Option<CumulativeProfitMode>,
}

/// `POST /compare` body.
#[derive(Debug, Deserialize)]
pub struct CompareRequest {
    #[serde(default)]
    pub revenue_per_kwh: Option<f64>,
    pub turbines: Vec<TurbineRequest>,
    #[serde(default)]
    pub start: Option<NaiveDateTime>,
    #[serde(default)]
    pub cumulative_profit: Option<CumulativeProfitMode>,
}

/// `POST /compare` response.
#[derive(Debug, Serialize)]
pub struct CompareResponse {
    pub revenue_per_kwh: f64,
    pub time_span_years: f64,
    pub summary: Vec<SummaryRow>,
}

/// `GET /config` response.
#[derive(Debug, Serialize)]
pub struct ConfigResponse {
    pub location: String,
    pub defaults: DefaultsConfig,
    pub revenue_per_kwh: f64,
    pub cumulative_profit: CumulativeProfitMode,
}

/// Error body returned with 4xx responses.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
