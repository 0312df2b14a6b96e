//! PIN routes

use axum::extract::State;
use axum::Json;
use plebsfin_core::Verification;
use serde::{Deserialize, Serialize};

use super::Success;
use crate::{ApiJson, ApiResult, AppState};

#[derive(Debug, Deserialize)]
pub struct VerifyRequest {
    pub pin: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePinRequest {
    pub old_pin: String,
    pub new_pin: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_time: Option<bool>,
}

/// Verify the PIN; the first attempt ever sets it
pub async fn api_verify_pin(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<VerifyRequest>,
) -> ApiResult<VerifyResponse> {
    let first_time = match state.pins.verify(&request.pin).await? {
        Verification::FirstTime => Some(true),
        Verification::Accepted => None,
    };
    Ok(Json(VerifyResponse { success: true, first_time }))
}

pub async fn api_change_pin(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<ChangePinRequest>,
) -> ApiResult<Success> {
    state.pins.change(&request.old_pin, &request.new_pin).await?;
    Ok(Success::ok())
}

#[cfg(test)]
mod tests {
    use crate::test_support::{app, call};
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn test_first_verify_sets_pin() {
        let app = app();
        let (status, body) = call(&app, "POST", "/api/auth/verify", Some(json!({"pin": "1234"}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"success": true, "firstTime": true}));

        let (status, body) = call(&app, "POST", "/api/auth/verify", Some(json!({"pin": "1234"}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"success": true}));
    }

    #[tokio::test]
    async fn test_wrong_pin_is_401() {
        let app = app();
        call(&app, "POST", "/api/auth/verify", Some(json!({"pin": "1234"}))).await;

        let (status, body) = call(&app, "POST", "/api/auth/verify", Some(json!({"pin": "9999"}))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, json!({"success": false, "error": "Invalid PIN"}));
    }

    #[tokio::test]
    async fn test_change_pin() {
        let app = app();
        call(&app, "POST", "/api/auth/verify", Some(json!({"pin": "1234"}))).await;

        let (status, body) = call(
            &app,
            "POST",
            "/api/auth/change-pin",
            Some(json!({"oldPin": "0000", "newPin": "5678"})),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, json!({"success": false, "error": "Invalid current PIN"}));

        let (status, body) = call(
            &app,
            "POST",
            "/api/auth/change-pin",
            Some(json!({"oldPin": "1234", "newPin": "5678"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"success": true}));

        let (status, _) = call(&app, "POST", "/api/auth/verify", Some(json!({"pin": "5678"}))).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_change_before_setup_is_401() {
        let (status, _) = call(
            &app(),
            "POST",
            "/api/auth/change-pin",
            Some(json!({"oldPin": "", "newPin": "5678"})),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_missing_pin_field_is_400() {
        let (status, _) = call(&app(), "POST", "/api/auth/verify", Some(json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
