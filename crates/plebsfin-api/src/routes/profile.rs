//! User profile routes

use axum::extract::State;
use axum::Json;
use plebsfin_core::{Category, UserProfile};

use super::Success;
use crate::{ApiJson, ApiResult, AppState};

/// Stored profile, or the configured defaults when none was saved
pub async fn api_profile(State(state): State<AppState>) -> ApiResult<UserProfile> {
    let defaults = &state.config.profile;
    let fallback = UserProfile::with_defaults(&defaults.default_currency, &defaults.default_timezone);
    let profile = state.records.get_singleton(Category::Profile, fallback).await?;
    Ok(Json(profile))
}

pub async fn api_save_profile(
    State(state): State<AppState>,
    ApiJson(profile): ApiJson<UserProfile>,
) -> ApiResult<Success> {
    state.records.put_singleton(Category::Profile, &profile).await?;
    Ok(Success::ok())
}
