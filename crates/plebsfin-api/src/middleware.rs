//! Cross-cutting request handling: CORS, error reporting, panics, 404

use std::any::Any;

use axum::body::Body;
use axum::extract::{Request, State};
use axum::http::header::{
    HeaderValue, ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
    ACCESS_CONTROL_ALLOW_ORIGIN, CONTENT_TYPE,
};
use axum::http::{HeaderMap, Method, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use plebsfin_core::{CoreError, ErrorContext};
use serde_json::json;

use crate::error::ApiError;
use crate::AppState;

const ALLOW_METHODS: &str = "GET, POST, PUT, DELETE, OPTIONS";
const ALLOW_HEADERS: &str = "Content-Type, Authorization";

fn apply_cors(headers: &mut HeaderMap) {
    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    headers.insert(ACCESS_CONTROL_ALLOW_METHODS, HeaderValue::from_static(ALLOW_METHODS));
    headers.insert(ACCESS_CONTROL_ALLOW_HEADERS, HeaderValue::from_static(ALLOW_HEADERS));
}

/// Open CORS on every response.
///
/// `OPTIONS` on any path is answered here with an empty 200 that still
/// carries the JSON content type. A method the matched path does not serve is
/// reported as an unmatched route.
pub async fn cors(request: Request, next: Next) -> Response {
    if request.method() == Method::OPTIONS {
        let mut response = Response::new(Body::empty());
        response
            .headers_mut()
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        apply_cors(response.headers_mut());
        return response;
    }

    let mut response = next.run(request).await;
    if response.status() == StatusCode::METHOD_NOT_ALLOWED {
        response = ApiError::RouteNotFound.into_response();
    }
    apply_cors(response.headers_mut());
    response
}

/// Report failures attached by [`ApiError`] through the configured logger
pub async fn log_errors(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let operation = format!("{} {}", request.method(), request.uri().path());
    let response = next.run(request).await;

    if let Some(error) = response.extensions().get::<CoreError>() {
        let context = ErrorContext::new(operation)
            .with_data("status", json!(response.status().as_u16()));
        state.error_logger.log_error(error, &context);
    }
    response
}

/// Router fallback
pub async fn not_found() -> ApiError {
    ApiError::RouteNotFound
}

/// Turn a handler panic into a 500 JSON body
pub fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "Internal server error".to_string()
    };

    log::error!(target: "plebsfin::error", "Handler panicked: {}", message);
    ApiError::from(CoreError::Internal { message }).into_response()
}
