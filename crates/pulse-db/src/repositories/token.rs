//! PostgreSQL implementation of TokenRepository

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use tracing::instrument;

use pulse_core::entities::{TokenBudget, TokenLedgerEntry};
use pulse_core::traits::{FeedQuery, RepoResult, TokenRepository};
use pulse_core::value_objects::Snowflake;

use crate::models::{TokenBudgetModel, TokenLedgerModel};

use super::error::map_db_error;

const BUDGET_COLUMNS: &str = "user_id, period_start, granted, used";

/// PostgreSQL implementation of TokenRepository
#[derive(Clone)]
pub struct PgTokenRepository {
    pool: PgPool,
}

impl PgTokenRepository {
    /// Create a new PgTokenRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TokenRepository for PgTokenRepository {
    #[instrument(skip(self))]
    async fn find_budget(
        &self,
        user_id: Snowflake,
        period_start: NaiveDate,
    ) -> RepoResult<Option<TokenBudget>> {
        let result = sqlx::query_as::<_, TokenBudgetModel>(&format!(
            r"
            SELECT {BUDGET_COLUMNS} FROM token_budgets
            WHERE user_id = $1 AND period_start = $2
            "
        ))
        .bind(user_id.into_inner())
        .bind(period_start)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(TokenBudget::from))
    }

    #[instrument(skip(self))]
    async fn ensure_budget(
        &self,
        user_id: Snowflake,
        period_start: NaiveDate,
        grant: i64,
    ) -> RepoResult<TokenBudget> {
        // The no-op DO UPDATE makes RETURNING yield the row whether it
        // was just inserted or already existed
        let result = sqlx::query_as::<_, TokenBudgetModel>(&format!(
            r"
            INSERT INTO token_budgets (user_id, period_start, granted, used)
            VALUES ($1, $2, $3, 0)
            ON CONFLICT (user_id, period_start) DO UPDATE
            SET granted = token_budgets.granted
            RETURNING {BUDGET_COLUMNS}
            "
        ))
        .bind(user_id.into_inner())
        .bind(period_start)
        .bind(grant)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(TokenBudget::from(result))
    }

    #[instrument(skip(self))]
    async fn try_debit(
        &self,
        user_id: Snowflake,
        period_start: NaiveDate,
        amount: i64,
    ) -> RepoResult<Option<TokenBudget>> {
        // Single conditional UPDATE keeps check-and-debit atomic under
        // concurrent requests
        let result = sqlx::query_as::<_, TokenBudgetModel>(&format!(
            r"
            UPDATE token_budgets
            SET used = used + $3
            WHERE user_id = $1 AND period_start = $2 AND used + $3 <= granted
            RETURNING {BUDGET_COLUMNS}
            "
        ))
        .bind(user_id.into_inner())
        .bind(period_start)
        .bind(amount)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(TokenBudget::from))
    }

    #[instrument(skip(self, entry))]
    async fn record_ledger(&self, entry: &TokenLedgerEntry) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO token_ledger (id, user_id, delta, feature, created_at)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(entry.id.into_inner())
        .bind(entry.user_id.into_inner())
        .bind(entry.delta)
        .bind(&entry.feature)
        .bind(entry.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn ledger(
        &self,
        user_id: Snowflake,
        query: FeedQuery,
    ) -> RepoResult<Vec<TokenLedgerEntry>> {
        let result = sqlx::query_as::<_, TokenLedgerModel>(
            r"
            SELECT id, user_id, delta, feature, created_at
            FROM token_ledger
            WHERE user_id = $1
              AND ($2::BIGINT IS NULL OR id < $2)
            ORDER BY id DESC
            LIMIT $3
            ",
        )
        .bind(user_id.into_inner())
        .bind(query.before.map(Snowflake::into_inner))
        .bind(query.limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.into_iter().map(TokenLedgerEntry::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgTokenRepository>();
    }
}
