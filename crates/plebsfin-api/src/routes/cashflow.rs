//! Cashflow routes

use axum::extract::State;
use axum::Json;
use plebsfin_core::{CashflowEntry, CashflowSummary, NewCashflowEntry};

use super::Success;
use crate::{ApiJson, ApiPath, ApiResult, AppState};

pub async fn api_cashflow(State(state): State<AppState>) -> ApiResult<Vec<CashflowEntry>> {
    Ok(Json(state.records.list().await?))
}

pub async fn api_create_cashflow(
    State(state): State<AppState>,
    ApiJson(draft): ApiJson<NewCashflowEntry>,
) -> ApiResult<CashflowEntry> {
    let entry: CashflowEntry = state.records.append(draft).await?;
    log::debug!("Cashflow entry {} added", entry.id);
    Ok(Json(entry))
}

pub async fn api_delete_cashflow(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
) -> ApiResult<Success> {
    state.records.remove::<CashflowEntry>(&id).await?;
    Ok(Success::ok())
}

/// Income, expense and net over all entries
pub async fn api_cashflow_summary(State(state): State<AppState>) -> ApiResult<CashflowSummary> {
    let entries: Vec<CashflowEntry> = state.records.list().await?;
    Ok(Json(CashflowSummary::from_entries(&entries)))
}
