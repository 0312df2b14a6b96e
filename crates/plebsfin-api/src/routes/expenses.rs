//! Expense routes

use axum::extract::State;
use axum::Json;
use plebsfin_core::{Expense, NewExpense};

use super::Success;
use crate::{ApiJson, ApiPath, ApiResult, AppState};

pub async fn api_expenses(State(state): State<AppState>) -> ApiResult<Vec<Expense>> {
    Ok(Json(state.records.list().await?))
}

pub async fn api_create_expense(
    State(state): State<AppState>,
    ApiJson(draft): ApiJson<NewExpense>,
) -> ApiResult<Expense> {
    Ok(Json(state.records.append(draft).await?))
}

pub async fn api_delete_expense(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
) -> ApiResult<Success> {
    state.records.remove::<Expense>(&id).await?;
    Ok(Success::ok())
}
