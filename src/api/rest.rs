// =============================================================================
// REST API Endpoints — Axum 0.7
// =============================================================================
//
// All endpoints live under `/api/v1/`.  This is the control-surface adapter:
// clients send an IndicatorConfig and receive either the computed indicator
// series or a ready-to-draw ChartSpec.
//
// CORS is configured permissively for development; tighten `allowed_origins`
// in production.
// =============================================================================

use std::sync::Arc;

use axum::{
    extract::{Json, State},
    response::IntoResponse,
    routing::get,
    Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};

use crate::api::error::ApiResult;
use crate::app_state::AppState;
use crate::chart::ChartSpec;
use crate::indicator_config::{BollingerBasis, IndicatorConfig, MovingAverageKind};
use crate::indicators::IndicatorSet;

// =============================================================================
// Router construction
// =============================================================================

/// Build the full REST API router with CORS middleware and shared state.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/v1/health", get(health))
        .route("/api/v1/bars", get(bars))
        .route(
            "/api/v1/indicator-config",
            get(get_indicator_config).post(set_indicator_config),
        )
        .route("/api/v1/indicators", axum::routing::post(indicators))
        .route("/api/v1/chart", get(current_chart).post(chart))
        .layer(cors)
        .with_state(state)
}

// =============================================================================
// Health
// =============================================================================

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    state_version: u64,
    bars: usize,
    first_date: NaiveDate,
    last_date: NaiveDate,
    uptime_secs: u64,
    server_time: i64,
}

async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let prices = &state.context.prices;
    Json(HealthResponse {
        status: "ok",
        state_version: state.current_state_version(),
        bars: prices.len(),
        first_date: prices.first_date(),
        last_date: prices.last_date(),
        uptime_secs: state.uptime_secs(),
        server_time: chrono::Utc::now().timestamp_millis(),
    })
}

// =============================================================================
// Price bars
// =============================================================================

async fn bars(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.context.prices.bars().to_vec())
}

// =============================================================================
// Indicator selection
// =============================================================================

#[derive(Serialize)]
struct IndicatorConfigResponse {
    config: IndicatorConfig,
    /// Band bases the control surface may offer for this selection.
    basis_options: Vec<BollingerBasis>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    changes: Vec<String>,
}

impl IndicatorConfigResponse {
    fn new(config: IndicatorConfig, changes: Vec<String>) -> Self {
        Self {
            basis_options: config.basis_options(),
            config,
            changes,
        }
    }
}

async fn get_indicator_config(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(IndicatorConfigResponse::new(state.indicator_config(), Vec::new()))
}

#[derive(Debug, Default, Deserialize)]
struct IndicatorConfigUpdate {
    #[serde(default)]
    sma1_enabled: Option<bool>,
    #[serde(default)]
    sma1_window: Option<usize>,
    #[serde(default)]
    sma1_kind: Option<MovingAverageKind>,
    #[serde(default)]
    sma2_enabled: Option<bool>,
    #[serde(default)]
    sma2_window: Option<usize>,
    #[serde(default)]
    sma2_kind: Option<MovingAverageKind>,
    #[serde(default)]
    bollinger_enabled: Option<bool>,
    #[serde(default)]
    bollinger_basis: Option<BollingerBasis>,
}

async fn set_indicator_config(
    State(state): State<Arc<AppState>>,
    Json(update): Json<IndicatorConfigUpdate>,
) -> ApiResult<Json<IndicatorConfigResponse>> {
    let (config, changes) = state.update_indicator_config(|config| {
        let mut changes = Vec::new();

        macro_rules! apply_field {
            ($field:ident) => {
                if let Some(val) = update.$field {
                    if config.$field != val {
                        changes.push(format!(
                            "{}: {:?} -> {:?}",
                            stringify!($field),
                            config.$field,
                            val
                        ));
                        config.$field = val;
                    }
                }
            };
        }

        apply_field!(sma1_enabled);
        apply_field!(sma1_window);
        apply_field!(sma1_kind);
        apply_field!(sma2_enabled);
        apply_field!(sma2_window);
        apply_field!(sma2_kind);
        apply_field!(bollinger_enabled);
        apply_field!(bollinger_basis);

        changes
    })?;

    Ok(Json(IndicatorConfigResponse::new(config, changes)))
}

// =============================================================================
// Indicators & chart
// =============================================================================

async fn indicators(
    State(state): State<Arc<AppState>>,
    Json(config): Json<IndicatorConfig>,
) -> ApiResult<Json<IndicatorSet>> {
    Ok(Json(state.indicators(&config)?))
}

async fn chart(
    State(state): State<Arc<AppState>>,
    Json(config): Json<IndicatorConfig>,
) -> ApiResult<Json<ChartSpec>> {
    Ok(Json(state.chart(&config)?))
}

async fn current_chart(State(state): State<Arc<AppState>>) -> ApiResult<Json<ChartSpec>> {
    let config = state.indicator_config();
    Ok(Json(state.chart(&config)?))
}

// =============================================================================
// Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::chart::ChartContext;
    use crate::market_data::price_series::test_support::ramp_30;
    use crate::runtime_config::RuntimeConfig;

    fn app() -> (Router, Arc<AppState>) {
        let state = Arc::new(AppState::new(
            ChartContext::new(ramp_30(), "BTC"),
            RuntimeConfig::default(),
            None,
        ));
        (router(state.clone()), state)
    }

    async fn send(app: Router, method: &str, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn health_reports_loaded_series() {
        let (app, _) = app();
        let (status, body) = send(app, "GET", "/api/v1/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["bars"], 30);
        assert_eq!(body["first_date"], "2024-01-01");
    }

    #[tokio::test]
    async fn bars_returns_every_bar() {
        let (app, _) = app();
        let (status, body) = send(app, "GET", "/api/v1/bars", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().map(Vec::len), Some(30));
        assert_eq!(body[29]["close"], 129.0);
    }

    #[tokio::test]
    async fn chart_for_posted_config() {
        let (app, _) = app();
        let body = r#"{ "sma1_enabled": true, "sma1_window": 10 }"#;
        let (status, spec) = send(app, "POST", "/api/v1/chart", Some(body)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(spec["panels"].as_array().map(Vec::len), Some(4));
        assert_eq!(spec["panels"][0]["traces"][1]["name"], "SMA10");
        assert_eq!(spec["panels"][0]["traces"][1]["y"][29], 124.5);
    }

    #[tokio::test]
    async fn out_of_range_window_is_unprocessable() {
        let (app, _) = app();
        let body = r#"{ "sma1_window": 5 }"#;
        let (status, err) = send(app, "POST", "/api/v1/chart", Some(body)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err["status"], 422);
        assert!(err["error"].as_str().unwrap().contains("sma1 window 5"));
    }

    #[tokio::test]
    async fn indicators_endpoint_returns_aligned_series() {
        let (app, _) = app();
        let (status, set) = send(app, "POST", "/api/v1/indicators", Some("{}")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(set["dates"].as_array().map(Vec::len), Some(30));
        assert_eq!(set["macd"]["histogram"]["values"].as_array().map(Vec::len), Some(30));
        assert!(set["bands"].is_null());
    }

    #[tokio::test]
    async fn update_selection_then_fetch_current_chart() {
        let (app, state) = app();
        let update = r#"{ "sma1_enabled": true, "sma1_window": 10, "bollinger_enabled": true, "bollinger_basis": "SMA1" }"#;
        let (status, body) =
            send(app.clone(), "POST", "/api/v1/indicator-config", Some(update)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["changes"].as_array().map(Vec::len), Some(4));
        assert_eq!(body["basis_options"], serde_json::json!(["SMA1"]));
        assert_eq!(state.current_state_version(), 2);

        let (status, spec) = send(app, "GET", "/api/v1/chart", None).await;
        assert_eq!(status, StatusCode::OK);
        let names: Vec<&str> = spec["panels"][0]["traces"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|t| t["name"].as_str())
            .collect();
        assert_eq!(names, vec!["BTC", "SMA10", "upper band", "lower band"]);
    }

    #[tokio::test]
    async fn rejected_update_keeps_previous_selection() {
        let (app, state) = app();
        let update = r#"{ "bollinger_enabled": true, "bollinger_basis": "SMA2" }"#;
        let (status, _) = send(app, "POST", "/api/v1/indicator-config", Some(update)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(state.indicator_config(), IndicatorConfig::default());
        assert_eq!(state.current_state_version(), 1);
    }

    #[tokio::test]
    async fn no_op_update_reports_no_changes() {
        let (app, state) = app();
        let (status, body) =
            send(app, "POST", "/api/v1/indicator-config", Some(r#"{ "sma1_window": 100 }"#))
                .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.get("changes").is_none());
        assert_eq!(state.current_state_version(), 1);
    }
}
