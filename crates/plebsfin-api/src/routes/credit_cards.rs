//! Credit card routes

use axum::extract::State;
use axum::Json;
use plebsfin_core::{CreditCard, CreditCardPatch, NewCreditCard};

use super::Success;
use crate::{ApiJson, ApiPath, ApiResult, AppState};

pub async fn api_credit_cards(State(state): State<AppState>) -> ApiResult<Vec<CreditCard>> {
    Ok(Json(state.records.list().await?))
}

pub async fn api_create_credit_card(
    State(state): State<AppState>,
    ApiJson(draft): ApiJson<NewCreditCard>,
) -> ApiResult<CreditCard> {
    Ok(Json(state.records.append(draft).await?))
}

/// Merge the given fields over the stored card
pub async fn api_update_credit_card(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
    ApiJson(patch): ApiJson<CreditCardPatch>,
) -> ApiResult<CreditCard> {
    Ok(Json(state.records.patch(&id, patch).await?))
}

pub async fn api_delete_credit_card(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
) -> ApiResult<Success> {
    state.records.remove::<CreditCard>(&id).await?;
    Ok(Success::ok())
}
