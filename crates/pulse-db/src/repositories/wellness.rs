//! PostgreSQL implementations of HealthProfileRepository and PlanRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use pulse_core::entities::{HealthProfile, Plan};
use pulse_core::traits::{FeedQuery, HealthProfileRepository, PlanRepository, RepoResult};
use pulse_core::value_objects::Snowflake;

use crate::models::{HealthProfileModel, PlanModel};

use super::error::{map_db_error, plan_not_found};

const PROFILE_COLUMNS: &str = "user_id, height_cm, weight_kg, birth_date, activity_level, \
                               dietary_preference, goal, updated_at";

const PLAN_COLUMNS: &str = "id, user_id, kind, title, content, tokens_spent, created_at";

/// PostgreSQL implementation of HealthProfileRepository
#[derive(Clone)]
pub struct PgHealthProfileRepository {
    pool: PgPool,
}

impl PgHealthProfileRepository {
    /// Create a new PgHealthProfileRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HealthProfileRepository for PgHealthProfileRepository {
    #[instrument(skip(self))]
    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Option<HealthProfile>> {
        let result = sqlx::query_as::<_, HealthProfileModel>(&format!(
            "SELECT {PROFILE_COLUMNS} FROM health_profiles WHERE user_id = $1"
        ))
        .bind(user_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(HealthProfile::from))
    }

    #[instrument(skip(self, profile))]
    async fn upsert(&self, profile: &HealthProfile) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO health_profiles (user_id, height_cm, weight_kg, birth_date,
                                         activity_level, dietary_preference, goal, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, NOW())
            ON CONFLICT (user_id) DO UPDATE
            SET height_cm = EXCLUDED.height_cm,
                weight_kg = EXCLUDED.weight_kg,
                birth_date = EXCLUDED.birth_date,
                activity_level = EXCLUDED.activity_level,
                dietary_preference = EXCLUDED.dietary_preference,
                goal = EXCLUDED.goal,
                updated_at = NOW()
            ",
        )
        .bind(profile.user_id.into_inner())
        .bind(profile.height_cm)
        .bind(profile.weight_kg)
        .bind(profile.birth_date)
        .bind(profile.activity_level.as_str())
        .bind(profile.dietary_preference.as_str())
        .bind(profile.goal.as_str())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }
}

/// PostgreSQL implementation of PlanRepository
#[derive(Clone)]
pub struct PgPlanRepository {
    pool: PgPool,
}

impl PgPlanRepository {
    /// Create a new PgPlanRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PlanRepository for PgPlanRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Plan>> {
        let result = sqlx::query_as::<_, PlanModel>(&format!(
            "SELECT {PLAN_COLUMNS} FROM plans WHERE id = $1"
        ))
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Plan::from))
    }

    #[instrument(skip(self, plan))]
    async fn create(&self, plan: &Plan) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO plans (id, user_id, kind, title, content, tokens_spent, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(plan.id.into_inner())
        .bind(plan.user_id.into_inner())
        .bind(plan.kind.as_str())
        .bind(&plan.title)
        .bind(&plan.content)
        .bind(plan.tokens_spent)
        .bind(plan.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_by_user(&self, user_id: Snowflake, query: FeedQuery) -> RepoResult<Vec<Plan>> {
        let result = sqlx::query_as::<_, PlanModel>(&format!(
            r"
            SELECT {PLAN_COLUMNS} FROM plans
            WHERE user_id = $1
              AND ($2::BIGINT IS NULL OR id < $2)
            ORDER BY id DESC
            LIMIT $3
            "
        ))
        .bind(user_id.into_inner())
        .bind(query.before.map(Snowflake::into_inner))
        .bind(query.limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.into_iter().map(Plan::from).collect())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            DELETE FROM plans WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(plan_not_found(id));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repos_are_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgHealthProfileRepository>();
        assert_send_sync::<PgPlanRepository>();
    }
}
