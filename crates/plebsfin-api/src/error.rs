//! Error types for plebsfin-api
//!
//! Handlers return `Result<_, ApiError>`. The response carries the underlying
//! [`CoreError`] as an extension so the logging middleware can report it with
//! the request line attached.

use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{FromRequest, FromRequestParts};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use plebsfin_core::CoreError;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Not found")]
    RouteNotFound,

    #[error("{message}")]
    BadRequest { message: String },
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest { message: message.into() }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Core(error) => match error {
                CoreError::RecordNotFound { .. } => StatusCode::NOT_FOUND,
                CoreError::InvalidPin | CoreError::InvalidCurrentPin => StatusCode::UNAUTHORIZED,
                CoreError::BadRequest { .. } => StatusCode::BAD_REQUEST,
                CoreError::Storage { .. }
                | CoreError::Serialization { .. }
                | CoreError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::RouteNotFound => StatusCode::NOT_FOUND,
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
        }
    }

    /// Core error to report for this failure; unmatched routes are not reported
    fn report(&self) -> Option<CoreError> {
        match self {
            ApiError::Core(error) => Some(error.clone()),
            ApiError::RouteNotFound => None,
            ApiError::BadRequest { message } => Some(CoreError::BadRequest { message: message.clone() }),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();

        // Auth failures keep the `success` flag clients branch on
        let body = if status == StatusCode::UNAUTHORIZED {
            json!({ "success": false, "error": message })
        } else {
            json!({ "error": message })
        };

        let mut response = (status, Json(body)).into_response();
        if let Some(error) = self.report() {
            response.extensions_mut().insert(error);
        }
        response
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::bad_request(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::bad_request(rejection.body_text())
    }
}

impl From<MultipartRejection> for ApiError {
    fn from(rejection: MultipartRejection) -> Self {
        ApiError::bad_request(rejection.body_text())
    }
}

impl From<MultipartError> for ApiError {
    fn from(error: MultipartError) -> Self {
        ApiError::bad_request(error.body_text())
    }
}

/// `Json` extractor whose rejections render as `{ "error": ... }` with 400
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// `Path` extractor with the same JSON rejection
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);

pub type ApiResult<T> = Result<Json<T>, ApiError>;
