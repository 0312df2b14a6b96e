//! Savings goal routes

use axum::extract::State;
use axum::Json;
use plebsfin_core::{Goal, GoalPatch, NewGoal};

use super::Success;
use crate::{ApiJson, ApiPath, ApiResult, AppState};

pub async fn api_goals(State(state): State<AppState>) -> ApiResult<Vec<Goal>> {
    Ok(Json(state.records.list().await?))
}

pub async fn api_create_goal(
    State(state): State<AppState>,
    ApiJson(draft): ApiJson<NewGoal>,
) -> ApiResult<Goal> {
    Ok(Json(state.records.append(draft).await?))
}

/// Merge the given fields over the stored goal; `targetDate: null` clears it
pub async fn api_update_goal(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
    ApiJson(patch): ApiJson<GoalPatch>,
) -> ApiResult<Goal> {
    Ok(Json(state.records.patch(&id, patch).await?))
}

pub async fn api_delete_goal(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
) -> ApiResult<Success> {
    state.records.remove::<Goal>(&id).await?;
    Ok(Success::ok())
}
