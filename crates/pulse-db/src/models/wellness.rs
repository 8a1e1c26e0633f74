//! Health profile and plan database models

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;

/// Database model for health_profiles table (one row per user)
#[derive(Debug, Clone, FromRow)]
pub struct HealthProfileModel {
    pub user_id: i64,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub birth_date: NaiveDate,
    pub activity_level: String,
    pub dietary_preference: String,
    pub goal: String,
    pub updated_at: DateTime<Utc>,
}

/// Database model for plans table
#[derive(Debug, Clone, FromRow)]
pub struct PlanModel {
    pub id: i64,
    pub user_id: i64,
    pub kind: String,
    pub title: String,
    pub content: String,
    pub tokens_spent: i64,
    pub created_at: DateTime<Utc>,
}
