//! Better Me wellness entities - health profile and generated plans

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// Self-reported activity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    Sedentary,
    Light,
    Moderate,
    Active,
    VeryActive,
}

impl ActivityLevel {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Sedentary => "sedentary",
            Self::Light => "light",
            Self::Moderate => "moderate",
            Self::Active => "active",
            Self::VeryActive => "very_active",
        }
    }
}

impl std::str::FromStr for ActivityLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sedentary" => Ok(Self::Sedentary),
            "light" => Ok(Self::Light),
            "moderate" => Ok(Self::Moderate),
            "active" => Ok(Self::Active),
            "very_active" => Ok(Self::VeryActive),
            other => Err(format!("unknown activity level: {other}")),
        }
    }
}

/// Dietary preference used when generating meal plans
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DietaryPreference {
    None,
    Vegetarian,
    Vegan,
    Pescatarian,
    GlutenFree,
}

impl DietaryPreference {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Vegetarian => "vegetarian",
            Self::Vegan => "vegan",
            Self::Pescatarian => "pescatarian",
            Self::GlutenFree => "gluten_free",
        }
    }
}

impl std::str::FromStr for DietaryPreference {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Self::None),
            "vegetarian" => Ok(Self::Vegetarian),
            "vegan" => Ok(Self::Vegan),
            "pescatarian" => Ok(Self::Pescatarian),
            "gluten_free" => Ok(Self::GlutenFree),
            other => Err(format!("unknown dietary preference: {other}")),
        }
    }
}

/// Overall wellness goal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WellnessGoal {
    LoseWeight,
    Maintain,
    GainMuscle,
    ImproveEndurance,
}

impl WellnessGoal {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::LoseWeight => "lose_weight",
            Self::Maintain => "maintain",
            Self::GainMuscle => "gain_muscle",
            Self::ImproveEndurance => "improve_endurance",
        }
    }
}

impl std::str::FromStr for WellnessGoal {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lose_weight" => Ok(Self::LoseWeight),
            "maintain" => Ok(Self::Maintain),
            "gain_muscle" => Ok(Self::GainMuscle),
            "improve_endurance" => Ok(Self::ImproveEndurance),
            other => Err(format!("unknown wellness goal: {other}")),
        }
    }
}

/// A user's health profile. One per user, upserted as a whole.
#[derive(Debug, Clone, PartialEq)]
pub struct HealthProfile {
    pub user_id: Snowflake,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub birth_date: NaiveDate,
    pub activity_level: ActivityLevel,
    pub dietary_preference: DietaryPreference,
    pub goal: WellnessGoal,
    pub updated_at: DateTime<Utc>,
}

impl HealthProfile {
    /// Age in whole years as of today
    pub fn age_years(&self) -> i32 {
        let today = Utc::now().date_naive();
        let mut age = today.years_since(self.birth_date).unwrap_or(0) as i32;
        if age < 0 {
            age = 0;
        }
        age
    }

    /// Body mass index (kg / m^2)
    pub fn bmi(&self) -> f64 {
        let height_m = self.height_cm / 100.0;
        if height_m <= 0.0 {
            return 0.0;
        }
        self.weight_kg / (height_m * height_m)
    }
}

/// Kind of generated plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanKind {
    Meal,
    Workout,
}

impl PlanKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Meal => "meal",
            Self::Workout => "workout",
        }
    }
}

impl std::str::FromStr for PlanKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "meal" => Ok(Self::Meal),
            "workout" => Ok(Self::Workout),
            other => Err(format!("unknown plan kind: {other}")),
        }
    }
}

/// A generated meal or workout plan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    pub id: Snowflake,
    pub user_id: Snowflake,
    pub kind: PlanKind,
    pub title: String,
    pub content: String,
    pub tokens_spent: i64,
    pub created_at: DateTime<Utc>,
}

impl Plan {
    /// Create a new Plan
    pub fn new(
        id: Snowflake,
        user_id: Snowflake,
        kind: PlanKind,
        title: String,
        content: String,
        tokens_spent: i64,
    ) -> Self {
        Self {
            id,
            user_id,
            kind,
            title,
            content,
            tokens_spent,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> HealthProfile {
        HealthProfile {
            user_id: Snowflake::new(1),
            height_cm: 180.0,
            weight_kg: 81.0,
            birth_date: NaiveDate::from_ymd_opt(1990, 6, 1).unwrap(),
            activity_level: ActivityLevel::Moderate,
            dietary_preference: DietaryPreference::None,
            goal: WellnessGoal::Maintain,
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_bmi() {
        let p = profile();
        let bmi = p.bmi();
        assert!((bmi - 25.0).abs() < 0.01, "unexpected bmi {bmi}");
    }

    #[test]
    fn test_bmi_zero_height() {
        let mut p = profile();
        p.height_cm = 0.0;
        assert_eq!(p.bmi(), 0.0);
    }

    #[test]
    fn test_age_is_positive() {
        assert!(profile().age_years() >= 30);
    }

    #[test]
    fn test_enum_roundtrips() {
        assert_eq!("moderate".parse::<ActivityLevel>().unwrap(), ActivityLevel::Moderate);
        assert_eq!("vegan".parse::<DietaryPreference>().unwrap(), DietaryPreference::Vegan);
        assert_eq!("gain_muscle".parse::<WellnessGoal>().unwrap(), WellnessGoal::GainMuscle);
        assert_eq!("workout".parse::<PlanKind>().unwrap(), PlanKind::Workout);
    }
}
