//! Request handlers for the API endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use chrono::NaiveDateTime;

use super::AppState;
use super::types::{
    CompareRequest, CompareResponse, ConfigResponse, ErrorResponse, ProjectRequest,
    TurbineRequest,
};
use crate::config::{AnalysisConfig, default_start, or_default};
use crate::finance::projection::{CashflowProjection, ProjectionEngine};
use crate::finance::types::{PowerSeries, TurbineFinancials};

type ApiError = (StatusCode, Json<ErrorResponse>);

fn bad_request(error: impl ToString) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: error.to_string(),
        }),
    )
}

/// Builds financials and series for one requested turbine.
fn build_turbine(
    cfg: &AnalysisConfig,
    req: &TurbineRequest,
    revenue_per_kwh: f64,
    start: NaiveDateTime,
) -> Result<(TurbineFinancials, PowerSeries), ApiError> {
    let d = &cfg.defaults;
    let financials = TurbineFinancials {
        turbine_type: req.turbine_type.clone(),
        hub_height_m: or_default(req.hub_height_m, d.hub_height_m, "hub_height_m"),
        construction_cost: or_default(
            req.construction_cost,
            d.construction_cost,
            "construction_cost",
        ),
        maintenance_rate: or_default(req.maintenance_rate, d.maintenance_rate, "maintenance_rate"),
        revenue_per_kwh,
    };
    let series = PowerSeries::hourly(start, req.power_w.clone())
        .map_err(|e| bad_request(format!("turbine {}: {e}", req.turbine_type)))?;
    Ok((financials, series))
}

/// Request rate, or the configured one when missing or zero.
fn shared_revenue(cfg: &AnalysisConfig, requested: Option<f64>) -> f64 {
    match requested {
        Some(r) if r != 0.0 => r,
        _ => cfg.revenue_per_kwh(),
    }
}

/// Returns configured defaults.
///
/// `GET /config` → 200 + `ConfigResponse` JSON
pub async fn get_config(State(state): State<Arc<AppState>>) -> Json<ConfigResponse> {
    let cfg = &state.config;
    Json(ConfigResponse {
        location: cfg.site.location.clone(),
        defaults: cfg.defaults.clone(),
        revenue_per_kwh: cfg.revenue_per_kwh(),
        cumulative_profit: cfg.projection.cumulative_profit,
    })
}

/// Projects one turbine.
///
/// `POST /project` → 200 + `CashflowProjection` JSON, or 400 + `ErrorResponse`
pub async fn post_project(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ProjectRequest>,
) -> Result<Json<CashflowProjection>, ApiError> {
    let cfg = &state.config;
    let revenue = shared_revenue(cfg, req.revenue_per_kwh);
    let start = req.start.unwrap_or_else(default_start);
    let (financials, series) = build_turbine(cfg, &req.turbine, revenue, start)?;
    let mode = req
        .cumulative_profit
        .unwrap_or(cfg.projection.cumulative_profit);

    ProjectionEngine::new(mode)
        .project(&series, &financials)
        .map(Json)
        .map_err(bad_request)
}

/// Compares several turbines under one revenue rate.
///
/// `POST /compare` → 200 + `CompareResponse` JSON, or 400 + `ErrorResponse`
/// naming the offending turbine
pub async fn post_compare(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CompareRequest>,
) -> Result<Json<CompareResponse>, ApiError> {
    let cfg = &state.config;
    let revenue = shared_revenue(cfg, req.revenue_per_kwh);
    let start = req.start.unwrap_or_else(default_start);

    let mut financials = Vec::with_capacity(req.turbines.len());
    let mut series = Vec::with_capacity(req.turbines.len());
    for t in &req.turbines {
        let (f, s) = build_turbine(cfg, t, revenue, start)?;
        financials.push(f);
        series.push(s);
    }

    let mode = req
        .cumulative_profit
        .unwrap_or(cfg.projection.cumulative_profit);
    let comparison = ProjectionEngine::new(mode)
        .compare(&series, &financials, revenue)
        .map_err(bad_request)?;

    Ok(Json(CompareResponse {
        revenue_per_kwh: comparison.revenue_per_kwh,
        time_span_years: comparison.time_span_years(),
        summary: comparison.summary,
    }))
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::Request;
    use tower::util::ServiceExt;

    use super::*;
    use crate::api::router;

    fn make_test_state() -> Arc<AppState> {
        Arc::new(AppState {
            config: AnalysisConfig::demo(),
        })
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(resp: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn config_returns_defaults() {
        let app = router(make_test_state());
        let req = Request::builder()
            .uri("/config")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let json = body_json(resp).await;
        assert_eq!(json["defaults"]["construction_cost"], 10_000_000.0);
        assert_eq!(json["revenue_per_kwh"], 0.07);
        assert_eq!(json["cumulative_profit"], "literal");
    }

    #[tokio::test]
    async fn project_single_step() {
        let app = router(make_test_state());
        let body = r#"{
            "turbine_type": "T",
            "construction_cost": 1000000.0,
            "maintenance_rate": 0.0001,
            "revenue_per_kwh": 0.10,
            "power_w": [1000.0]
        }"#;
        let resp = app.oneshot(post_json("/project", body)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let json = body_json(resp).await;
        assert_eq!(json["power_w"].as_array().map(Vec::len), Some(1));
        let revenue = json["revenue"][0].as_f64().unwrap();
        assert!((revenue - 0.10).abs() < 1e-12);
        assert_eq!(json["break_even"]["status"], "reached");
    }

    #[tokio::test]
    async fn project_empty_series_is_bad_request() {
        let app = router(make_test_state());
        let body = r#"{"turbine_type": "T", "power_w": []}"#;
        let resp = app.oneshot(post_json("/project", body)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let json = body_json(resp).await;
        assert!(json["error"].as_str().unwrap().contains("empty"));
    }

    #[tokio::test]
    async fn project_negative_power_is_bad_request() {
        let app = router(make_test_state());
        let body = r#"{"turbine_type": "T", "power_w": [1.0, -1.0]}"#;
        let resp = app.oneshot(post_json("/project", body)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn compare_returns_summary_rows() {
        let app = router(make_test_state());
        let body = r#"{
            "revenue_per_kwh": 0.08,
            "turbines": [
                {"turbine_type": "A", "power_w": [1000.0, 2000.0]},
                {"turbine_type": "B", "construction_cost": 5000000.0, "power_w": [500.0, 0.0]}
            ]
        }"#;
        let resp = app.oneshot(post_json("/compare", body)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let json = body_json(resp).await;
        let summary = json["summary"].as_array().unwrap();
        assert_eq!(summary.len(), 2);
        assert_eq!(summary[0]["turbine"], "A");
        assert_eq!(summary[1]["construction_cost"], 5_000_000.0);
        assert_eq!(json["revenue_per_kwh"], 0.08);
    }

    #[tokio::test]
    async fn compare_misaligned_series_names_turbine() {
        let app = router(make_test_state());
        let body = r#"{
            "turbines": [
                {"turbine_type": "A", "power_w": [1.0, 2.0]},
                {"turbine_type": "B", "power_w": [1.0]}
            ]
        }"#;
        let resp = app.oneshot(post_json("/compare", body)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let json = body_json(resp).await;
        assert!(json["error"].as_str().unwrap().contains("turbine #2 (B)"));
    }
}
