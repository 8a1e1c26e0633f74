//! Token budget and ledger entity <-> model mappers

use pulse_core::entities::{TokenBudget, TokenLedgerEntry};
use pulse_core::value_objects::Snowflake;

use crate::models::{TokenBudgetModel, TokenLedgerModel};

impl From<TokenBudgetModel> for TokenBudget {
    fn from(model: TokenBudgetModel) -> Self {
        TokenBudget {
            user_id: Snowflake::new(model.user_id),
            period_start: model.period_start,
            granted: model.granted,
            used: model.used,
        }
    }
}

impl From<TokenLedgerModel> for TokenLedgerEntry {
    fn from(model: TokenLedgerModel) -> Self {
        TokenLedgerEntry {
            id: Snowflake::new(model.id),
            user_id: Snowflake::new(model.user_id),
            delta: model.delta,
            feature: model.feature,
            created_at: model.created_at,
        }
    }
}
