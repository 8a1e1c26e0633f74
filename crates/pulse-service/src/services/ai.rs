//! AI token accounting service
//!
//! Per-user monthly budgets with an append-only ledger. Budgets are
//! created lazily on first touch of a new calendar month (UTC) and the
//! debit itself is a single conditional update, so concurrent spends
//! cannot overshoot the grant.

use pulse_core::entities::{TokenBudget, TokenLedgerEntry};
use pulse_core::{DomainError, FeedQuery, Snowflake};
use tracing::{info, instrument};

use crate::dto::{LedgerEntryResponse, TokenBudgetResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Token accounting service
pub struct TokenService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> TokenService<'a> {
    /// Create a new TokenService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// The caller's budget for the current month, created on first touch
    #[instrument(skip(self))]
    pub async fn budget(&self, user_id: Snowflake) -> ServiceResult<TokenBudgetResponse> {
        let budget = self.ensure_current_budget(user_id).await?;
        Ok(TokenBudgetResponse::from(budget))
    }

    /// The caller's ledger, newest first
    #[instrument(skip(self))]
    pub async fn ledger(
        &self,
        user_id: Snowflake,
        query: FeedQuery,
    ) -> ServiceResult<Vec<LedgerEntryResponse>> {
        let entries = self.ctx.token_repo().ledger(user_id, query).await?;
        Ok(entries.iter().map(LedgerEntryResponse::from).collect())
    }

    /// Atomically spend `amount` tokens against the current budget.
    ///
    /// Returns the updated budget, or `TokenBudgetExhausted` carrying the
    /// remaining balance when the spend does not fit.
    #[instrument(skip(self))]
    pub async fn check_and_debit(
        &self,
        user_id: Snowflake,
        amount: i64,
        feature: &str,
    ) -> ServiceResult<TokenBudget> {
        let budget = self.ensure_current_budget(user_id).await?;
        let period_start = budget.period_start;

        match self
            .ctx
            .token_repo()
            .try_debit(user_id, period_start, amount)
            .await?
        {
            Some(updated) => {
                let entry =
                    TokenLedgerEntry::spend(self.ctx.generate_id(), user_id, amount, feature);
                self.ctx.token_repo().record_ledger(&entry).await?;

                info!(
                    user_id = %user_id,
                    amount = amount,
                    feature = %feature,
                    remaining = updated.remaining(),
                    "Tokens debited"
                );

                Ok(updated)
            }
            None => Err(DomainError::TokenBudgetExhausted {
                remaining: budget.remaining(),
            }
            .into()),
        }
    }

    /// Fetch the current-month budget, creating it (and recording the
    /// monthly grant in the ledger) when this is its first touch
    async fn ensure_current_budget(&self, user_id: Snowflake) -> ServiceResult<TokenBudget> {
        let period_start = TokenBudget::current_period();
        let grant = self.ctx.ai_config().monthly_token_grant;

        if let Some(existing) = self
            .ctx
            .token_repo()
            .find_budget(user_id, period_start)
            .await?
        {
            return Ok(existing);
        }

        let budget = self
            .ctx
            .token_repo()
            .ensure_budget(user_id, period_start, grant)
            .await?;

        let entry = TokenLedgerEntry::grant(self.ctx.generate_id(), user_id, grant);
        self.ctx.token_repo().record_ledger(&entry).await?;

        info!(user_id = %user_id, grant = grant, "Monthly token budget opened");

        Ok(budget)
    }
}

#[cfg(test)]
mod tests {
    // Integration tests would go here with mocked dependencies
}
