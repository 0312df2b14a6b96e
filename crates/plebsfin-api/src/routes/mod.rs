//! Route modules for the API server
//!
//! - auth: PIN verification and change
//! - profile: User profile
//! - cashflow, credit_cards, expenses, bills, goals: Record list endpoints
//! - statements: Bank statement parsing

pub mod auth;
pub mod bills;
pub mod cashflow;
pub mod credit_cards;
pub mod expenses;
pub mod goals;
pub mod profile;
pub mod statements;

use serde::Serialize;

/// `{ "success": true }`
#[derive(Debug, Serialize)]
pub struct Success {
    pub success: bool,
}

impl Success {
    pub fn ok() -> axum::Json<Self> {
        axum::Json(Self { success: true })
    }
}
