//! Health profile and plan entity <-> model mappers

use pulse_core::entities::{
    ActivityLevel, DietaryPreference, HealthProfile, Plan, PlanKind, WellnessGoal,
};
use pulse_core::value_objects::Snowflake;

use crate::models::{HealthProfileModel, PlanModel};

use super::parse_or;

impl From<HealthProfileModel> for HealthProfile {
    fn from(model: HealthProfileModel) -> Self {
        HealthProfile {
            user_id: Snowflake::new(model.user_id),
            height_cm: model.height_cm,
            weight_kg: model.weight_kg,
            birth_date: model.birth_date,
            activity_level: parse_or(&model.activity_level, ActivityLevel::Sedentary),
            dietary_preference: parse_or(&model.dietary_preference, DietaryPreference::None),
            goal: parse_or(&model.goal, WellnessGoal::Maintain),
            updated_at: model.updated_at,
        }
    }
}

impl From<PlanModel> for Plan {
    fn from(model: PlanModel) -> Self {
        Plan {
            id: Snowflake::new(model.id),
            user_id: Snowflake::new(model.user_id),
            kind: parse_or(&model.kind, PlanKind::Meal),
            title: model.title,
            content: model.content,
            tokens_spent: model.tokens_spent,
            created_at: model.created_at,
        }
    }
}
