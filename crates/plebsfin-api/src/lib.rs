//! JSON HTTP API
//!
//! Routes are organized into modules:
//! - routes::auth: PIN verification and change
//! - routes::profile: User profile singleton
//! - routes::cashflow, credit_cards, expenses, bills, goals: Record lists
//! - routes::statements: Bank statement upload parsing

pub mod error;
pub mod middleware;
pub mod routes;

use axum::extract::DefaultBodyLimit;
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use plebsfin_config::Config;
use plebsfin_core::{DefaultErrorLogger, ErrorLogger, PinGate, RecordStore, StoreRef};
use plebsfin_parser::{DefaultStatementParser, ParserRef};
use plebsfin_utils::SystemClock;
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::catch_panic::CatchPanicLayer;

pub use error::{ApiError, ApiJson, ApiPath, ApiResult};

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub records: Arc<RecordStore>,
    pub pins: PinGate,
    pub parser: ParserRef,
    pub config: Config,
    pub error_logger: Arc<dyn ErrorLogger>,
}

impl AppState {
    pub fn new(config: Config, records: Arc<RecordStore>) -> Self {
        Self {
            pins: PinGate::new(records.clone()),
            records,
            parser: Arc::new(DefaultStatementParser),
            config,
            error_logger: Arc::new(DefaultErrorLogger),
        }
    }
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    use routes::auth::{api_change_pin, api_verify_pin};
    use routes::bills::{api_bill_summary, api_bills, api_create_bill, api_delete_bill, api_toggle_bill_paid};
    use routes::cashflow::{api_cashflow, api_cashflow_summary, api_create_cashflow, api_delete_cashflow};
    use routes::credit_cards::{api_create_credit_card, api_credit_cards, api_delete_credit_card, api_update_credit_card};
    use routes::expenses::{api_create_expense, api_delete_expense, api_expenses};
    use routes::goals::{api_create_goal, api_delete_goal, api_goals, api_update_goal};
    use routes::profile::{api_profile, api_save_profile};
    use routes::statements::api_parse_statement;

    let api = Router::new()
        .route("/health", get(health_check))
        .route("/auth/verify", post(api_verify_pin))
        .route("/auth/change-pin", post(api_change_pin))
        .route("/user/profile", get(api_profile).post(api_save_profile))
        .route("/cashflow", get(api_cashflow).post(api_create_cashflow))
        .route("/cashflow/summary", get(api_cashflow_summary))
        .route("/cashflow/:id", delete(api_delete_cashflow))
        .route("/credit-cards", get(api_credit_cards).post(api_create_credit_card))
        .route("/credit-cards/:id", put(api_update_credit_card).delete(api_delete_credit_card))
        .route("/expenses", get(api_expenses).post(api_create_expense))
        .route("/expenses/:id", delete(api_delete_expense))
        .route("/bills", get(api_bills).post(api_create_bill))
        .route("/bills/summary", get(api_bill_summary))
        .route("/bills/:id", delete(api_delete_bill))
        .route("/bills/:id/toggle-paid", post(api_toggle_bill_paid))
        .route("/goals", get(api_goals).post(api_create_goal))
        .route("/goals/:id", put(api_update_goal).delete(api_delete_goal))
        .route("/bank-statement/parse", post(api_parse_statement));

    let prefix = state.config.server.api_prefix.as_str();
    let router = if prefix == "/" {
        Router::new().merge(api)
    } else {
        Router::new().nest(prefix, api)
    };

    router
        .fallback(middleware::not_found)
        .layer(DefaultBodyLimit::max(state.config.server.max_upload_bytes))
        .layer(axum::middleware::from_fn_with_state(state.clone(), middleware::log_errors))
        .layer(CatchPanicLayer::custom(middleware::handle_panic))
        .layer(axum::middleware::from_fn(middleware::cors))
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Start the HTTP server
///
/// Builds the record store over `store`, binds the configured address and
/// serves until the listener fails.
pub async fn start_server(config: Config, store: StoreRef) -> anyhow::Result<()> {
    let addr = config.bind_address();
    let records = Arc::new(RecordStore::new(store, Arc::new(SystemClock)));
    let prefix = config.server.api_prefix.clone();
    let router = create_router(AppState::new(config, records));

    let listener = TcpListener::bind(&addr).await?;
    log::info!("Starting plebsfin server on http://{}", listener.local_addr()?);
    log::info!("API mounted under {}", prefix);

    axum::serve(listener, router).await?;
    log::info!("Server stopped");
    Ok(())
}


#[cfg(test)]
mod tests {
    use super::test_support::{app, app_over, app_with, call, send, FailingStore};
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_health() {
        let (status, body) = call(&app(), "GET", "/api/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "ok"}));
    }

    #[tokio::test]
    async fn test_unknown_path_is_json_404() {
        let app = app();
        let (status, body) = call(&app, "GET", "/api/nothing-here", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"error": "Not found"}));

        let (status, body) = call(&app, "GET", "/elsewhere", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"error": "Not found"}));
    }

    #[tokio::test]
    async fn test_wrong_method_is_json_404() {
        let (status, body) = call(&app(), "PATCH", "/api/goals", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"error": "Not found"}));
    }

    #[tokio::test]
    async fn test_options_preflight_on_any_path() {
        let app = app();
        for uri in ["/api/goals", "/api/does-not-exist", "/"] {
            let request = Request::builder().method("OPTIONS").uri(uri).body(Body::empty()).unwrap();
            let response = app.clone().oneshot(request).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK);
            assert_eq!(response.headers()["access-control-allow-origin"], "*");
            assert_eq!(response.headers()["access-control-allow-methods"], "GET, POST, PUT, DELETE, OPTIONS");
            assert_eq!(response.headers()["access-control-allow-headers"], "Content-Type, Authorization");
            assert_eq!(response.headers()["content-type"], "application/json");
            let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
            assert!(bytes.is_empty());
        }
    }

    #[tokio::test]
    async fn test_every_response_has_cors_and_json() {
        let app = app();
        for (method, uri) in [("GET", "/api/cashflow"), ("GET", "/api/missing"), ("PUT", "/api/goals/none")] {
            let request = Request::builder()
                .method(method)
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from("{}"))
                .unwrap();
            let response = app.clone().oneshot(request).await.unwrap();
            assert_eq!(response.headers()["access-control-allow-origin"], "*");
            assert_eq!(response.headers()["content-type"], "application/json");
        }
    }

    #[tokio::test]
    async fn test_storage_failure_is_json_500() {
        let app = app_over(Arc::new(FailingStore));
        for (method, uri) in [("GET", "/api/goals"), ("GET", "/api/bills/summary")] {
            let request = Request::builder().method(method).uri(uri).body(Body::empty()).unwrap();
            let response = app.clone().oneshot(request).await.unwrap();
            assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(response.headers()["access-control-allow-origin"], "*");
            assert_eq!(response.headers()["content-type"], "application/json");

            let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
            let body: Value = serde_json::from_slice(&bytes).unwrap();
            assert_eq!(body, json!({"error": "Storage unavailable: backend offline"}));
        }
    }

    #[tokio::test]
    async fn test_malformed_json_is_400() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/goals")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let (status, body) = send(&app(), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_custom_prefix() {
        let mut config = Config::default();
        config.server.api_prefix = "/v1".to_string();
        let app = app_with(config);

        let (status, _) = call(&app, "GET", "/v1/health", None).await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = call(&app, "GET", "/api/health", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_root_prefix_merges_routes() {
        let mut config = Config::default();
        config.server.api_prefix = "/".to_string();
        let (status, _) = call(&app_with(config), "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
    }
}
