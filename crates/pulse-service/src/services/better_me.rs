//! Better Me wellness service
//!
//! Health profiles and AI-generated meal/workout plans. Plan generation
//! is rate limited per user and debits the monthly token budget before
//! calling the model.

use chrono::Utc;
use pulse_core::entities::{HealthProfile, Plan};
use pulse_core::{DomainError, DomainEvent, FeedQuery, NotificationKind, PlanKind, Snowflake};
use tracing::{info, instrument};

use crate::dto::{
    GeneratePlanRequest, HealthProfileResponse, PlanResponse, UpsertHealthProfileRequest,
};

use super::ai::TokenService;
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::notification::NotificationService;

/// Wellness service
pub struct BetterMeService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> BetterMeService<'a> {
    /// Create a new BetterMeService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// The caller's health profile
    #[instrument(skip(self))]
    pub async fn get_profile(&self, user_id: Snowflake) -> ServiceResult<HealthProfileResponse> {
        let profile = self
            .ctx
            .health_profile_repo()
            .find_by_user(user_id)
            .await?
            .ok_or(ServiceError::Domain(DomainError::HealthProfileNotFound))?;

        Ok(HealthProfileResponse::from(&profile))
    }

    /// Create or replace the caller's health profile
    #[instrument(skip(self, request))]
    pub async fn upsert_profile(
        &self,
        user_id: Snowflake,
        request: UpsertHealthProfileRequest,
    ) -> ServiceResult<HealthProfileResponse> {
        let today = Utc::now().date_naive();
        if request.birth_date >= today {
            return Err(ServiceError::validation("Birth date must be in the past"));
        }
        if today.years_since(request.birth_date).unwrap_or(0) > 120 {
            return Err(ServiceError::validation("Birth date is implausibly old"));
        }

        let profile = HealthProfile {
            user_id,
            height_cm: request.height_cm,
            weight_kg: request.weight_kg,
            birth_date: request.birth_date,
            activity_level: request.activity_level,
            dietary_preference: request.dietary_preference,
            goal: request.goal,
            updated_at: Utc::now(),
        };
        self.ctx.health_profile_repo().upsert(&profile).await?;

        info!(user_id = %user_id, "Health profile saved");

        Ok(HealthProfileResponse::from(&profile))
    }

    /// Generate a meal or workout plan.
    ///
    /// Requires a health profile. Each call counts against the per-minute
    /// AI limiter and debits the monthly token budget up front.
    #[instrument(skip(self, request), fields(kind = %request.kind.as_str()))]
    pub async fn generate_plan(
        &self,
        user_id: Snowflake,
        request: GeneratePlanRequest,
    ) -> ServiceResult<PlanResponse> {
        let profile = self
            .ctx
            .health_profile_repo()
            .find_by_user(user_id)
            .await?
            .ok_or(ServiceError::Domain(DomainError::HealthProfileNotFound))?;

        if !self.ctx.ai_limiter().check(user_id).await? {
            return Err(ServiceError::App(pulse_common::AppError::RateLimitExceeded));
        }

        let cost = self.ctx.ai_config().plan_token_cost;
        let feature = match request.kind {
            PlanKind::Meal => "meal_plan",
            PlanKind::Workout => "workout_plan",
        };
        TokenService::new(self.ctx)
            .check_and_debit(user_id, cost, feature)
            .await?;

        let prompt = build_prompt(&profile, request.kind);
        let output = self.ctx.completion_client().complete(&prompt).await?;

        let plan = Plan::new(
            self.ctx.generate_id(),
            user_id,
            request.kind,
            plan_title(&profile, request.kind),
            output.text,
            cost,
        );
        self.ctx.plan_repo().create(&plan).await?;

        NotificationService::new(self.ctx)
            .deliver_to_self(user_id, NotificationKind::PlanReady, Some(plan.id))
            .await?;

        super::emit(&DomainEvent::PlanGenerated {
            plan_id: plan.id,
            user_id,
        });

        Ok(PlanResponse::from(&plan))
    }

    /// The caller's plans, newest first
    #[instrument(skip(self))]
    pub async fn list_plans(
        &self,
        user_id: Snowflake,
        query: FeedQuery,
    ) -> ServiceResult<Vec<PlanResponse>> {
        let plans = self.ctx.plan_repo().find_by_user(user_id, query).await?;
        Ok(plans.iter().map(PlanResponse::from).collect())
    }

    /// Get one of the caller's plans
    #[instrument(skip(self))]
    pub async fn get_plan(&self, user_id: Snowflake, plan_id: Snowflake) -> ServiceResult<PlanResponse> {
        let plan = self.find_owned_plan(user_id, plan_id).await?;
        Ok(PlanResponse::from(&plan))
    }

    /// Delete one of the caller's plans
    #[instrument(skip(self))]
    pub async fn delete_plan(&self, user_id: Snowflake, plan_id: Snowflake) -> ServiceResult<()> {
        let _ = self.find_owned_plan(user_id, plan_id).await?;
        self.ctx.plan_repo().delete(plan_id).await?;

        info!(plan_id = %plan_id, "Plan deleted");

        Ok(())
    }

    async fn find_owned_plan(&self, user_id: Snowflake, plan_id: Snowflake) -> ServiceResult<Plan> {
        let plan = self
            .ctx
            .plan_repo()
            .find_by_id(plan_id)
            .await?
            .ok_or(ServiceError::Domain(DomainError::PlanNotFound(plan_id)))?;

        if plan.user_id != user_id {
            return Err(ServiceError::Domain(DomainError::NotAuthor));
        }

        Ok(plan)
    }
}

/// Build the model prompt from the profile
fn build_prompt(profile: &HealthProfile, kind: PlanKind) -> String {
    let what = match kind {
        PlanKind::Meal => "weekly meal plan",
        PlanKind::Workout => "weekly workout plan",
    };
    format!(
        "Create a {what} for a {age}-year-old, {height:.0} cm, {weight:.1} kg, \
         activity level {activity}, dietary preference {diet}, goal {goal}.",
        age = profile.age_years(),
        height = profile.height_cm,
        weight = profile.weight_kg,
        activity = profile.activity_level.as_str(),
        diet = profile.dietary_preference.as_str(),
        goal = profile.goal.as_str(),
    )
}

fn plan_title(profile: &HealthProfile, kind: PlanKind) -> String {
    match kind {
        PlanKind::Meal => format!("Meal plan ({})", profile.dietary_preference.as_str()),
        PlanKind::Workout => format!("Workout plan ({})", profile.goal.as_str()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pulse_core::{ActivityLevel, DietaryPreference, WellnessGoal};

    fn profile() -> HealthProfile {
        HealthProfile {
            user_id: Snowflake::new(1),
            height_cm: 175.0,
            weight_kg: 70.0,
            birth_date: NaiveDate::from_ymd_opt(1992, 3, 14).unwrap(),
            activity_level: ActivityLevel::Active,
            dietary_preference: DietaryPreference::Vegetarian,
            goal: WellnessGoal::GainMuscle,
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_prompt_carries_profile() {
        let prompt = build_prompt(&profile(), PlanKind::Meal);
        assert!(prompt.contains("meal plan"));
        assert!(prompt.contains("vegetarian"));
        assert!(prompt.contains("gain_muscle"));
    }

    #[test]
    fn test_plan_titles() {
        assert_eq!(
            plan_title(&profile(), PlanKind::Meal),
            "Meal plan (vegetarian)"
        );
        assert_eq!(
            plan_title(&profile(), PlanKind::Workout),
            "Workout plan (gain_muscle)"
        );
    }
}
