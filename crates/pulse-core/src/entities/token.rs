//! AI token accounting - per-user monthly budget and spend ledger

use chrono::{DateTime, Datelike, NaiveDate, Utc};

use crate::value_objects::Snowflake;

/// Per-user token budget for one calendar month (UTC).
///
/// A fresh budget is created lazily on the first debit of a new period,
/// seeded with the configured monthly grant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenBudget {
    pub user_id: Snowflake,
    /// First day of the budget month
    pub period_start: NaiveDate,
    pub granted: i64,
    pub used: i64,
}

impl TokenBudget {
    /// Create a fresh budget for the current period
    pub fn new(user_id: Snowflake, granted: i64) -> Self {
        Self {
            user_id,
            period_start: Self::current_period(),
            granted,
            used: 0,
        }
    }

    /// First day of the current UTC month
    pub fn current_period() -> NaiveDate {
        let today = Utc::now().date_naive();
        NaiveDate::from_ymd_opt(today.year(), today.month(), 1)
            .unwrap_or(today)
    }

    /// Tokens still available this period
    #[inline]
    pub fn remaining(&self) -> i64 {
        (self.granted - self.used).max(0)
    }

    /// Check whether `amount` tokens can be spent
    #[inline]
    pub fn can_spend(&self, amount: i64) -> bool {
        amount >= 0 && self.used + amount <= self.granted
    }

    /// Check whether the budget belongs to the current period
    pub fn is_current(&self) -> bool {
        self.period_start == Self::current_period()
    }
}

/// One ledger row: positive delta for grants, negative for spends
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenLedgerEntry {
    pub id: Snowflake,
    pub user_id: Snowflake,
    pub delta: i64,
    /// Feature that caused the movement ("monthly_grant", "meal_plan", ...)
    pub feature: String,
    pub created_at: DateTime<Utc>,
}

impl TokenLedgerEntry {
    /// Record a grant
    pub fn grant(id: Snowflake, user_id: Snowflake, amount: i64) -> Self {
        Self {
            id,
            user_id,
            delta: amount,
            feature: "monthly_grant".to_string(),
            created_at: Utc::now(),
        }
    }

    /// Record a spend against a feature
    pub fn spend(id: Snowflake, user_id: Snowflake, amount: i64, feature: impl Into<String>) -> Self {
        Self {
            id,
            user_id,
            delta: -amount,
            feature: feature.into(),
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_budget() {
        let budget = TokenBudget::new(Snowflake::new(1), 10_000);
        assert_eq!(budget.remaining(), 10_000);
        assert!(budget.is_current());
    }

    #[test]
    fn test_can_spend_boundary() {
        let mut budget = TokenBudget::new(Snowflake::new(1), 100);
        assert!(budget.can_spend(100));
        assert!(!budget.can_spend(101));
        budget.used = 40;
        assert!(budget.can_spend(60));
        assert!(!budget.can_spend(61));
        assert!(!budget.can_spend(-1));
    }

    #[test]
    fn test_remaining_never_negative() {
        let mut budget = TokenBudget::new(Snowflake::new(1), 100);
        budget.used = 150;
        assert_eq!(budget.remaining(), 0);
    }

    #[test]
    fn test_ledger_signs() {
        let grant = TokenLedgerEntry::grant(Snowflake::new(1), Snowflake::new(2), 500);
        assert_eq!(grant.delta, 500);
        let spend = TokenLedgerEntry::spend(Snowflake::new(3), Snowflake::new(2), 120, "meal_plan");
        assert_eq!(spend.delta, -120);
        assert_eq!(spend.feature, "meal_plan");
    }
}
