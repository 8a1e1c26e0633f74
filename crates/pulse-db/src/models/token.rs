//! Token budget and ledger database models

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;

/// Database model for token_budgets table.
///
/// Primary key is (user_id, period_start); one row per user per
/// calendar month.
#[derive(Debug, Clone, FromRow)]
pub struct TokenBudgetModel {
    pub user_id: i64,
    pub period_start: NaiveDate,
    pub granted: i64,
    pub used: i64,
}

/// Database model for token_ledger table
#[derive(Debug, Clone, FromRow)]
pub struct TokenLedgerModel {
    pub id: i64,
    pub user_id: i64,
    pub delta: i64,
    pub feature: String,
    pub created_at: DateTime<Utc>,
}
