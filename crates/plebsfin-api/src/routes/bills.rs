//! Bill routes

use axum::extract::State;
use axum::Json;
use plebsfin_core::{Bill, BillSummary, NewBill};

use super::Success;
use crate::{ApiJson, ApiPath, ApiResult, AppState};

pub async fn api_bills(State(state): State<AppState>) -> ApiResult<Vec<Bill>> {
    Ok(Json(state.records.list().await?))
}

pub async fn api_create_bill(
    State(state): State<AppState>,
    ApiJson(draft): ApiJson<NewBill>,
) -> ApiResult<Bill> {
    Ok(Json(state.records.append(draft).await?))
}

pub async fn api_delete_bill(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
) -> ApiResult<Success> {
    state.records.remove::<Bill>(&id).await?;
    Ok(Success::ok())
}

/// Flip `paid` in place, keeping id and createdAt
pub async fn api_toggle_bill_paid(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
) -> ApiResult<Bill> {
    let bill = state
        .records
        .update(&id, |bill: &mut Bill| bill.paid = !bill.paid)
        .await?;
    Ok(Json(bill))
}

/// Unpaid and overdue totals as of today (UTC)
pub async fn api_bill_summary(State(state): State<AppState>) -> ApiResult<BillSummary> {
    let bills: Vec<Bill> = state.records.list().await?;
    let today = state.records.now().date_naive();
    Ok(Json(BillSummary::from_bills(&bills, today)))
}
