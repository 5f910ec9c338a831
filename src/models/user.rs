// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User model for storage and API.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Account role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

/// Subscription level gating premium content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionTier {
    Free,
    Premium,
    Gold,
}

impl SubscriptionTier {
    /// Whether this tier grants access to premium content.
    /// Every tier above Free does.
    pub fn grants_premium(self) -> bool {
        !matches!(self, SubscriptionTier::Free)
    }
}

/// Subscription lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    Active,
    Expired,
}

/// Supported content languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Ar,
    En,
    Fr,
}

/// User profile stored in the `users` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique ID (also used as document ID)
    pub id: String,
    /// Email address (unique login key)
    pub email: String,
    /// Plaintext password (credential hardening is a non-goal)
    pub password: String,
    /// Account role
    pub role: Role,
    /// Subscription tier
    pub subscription_tier: SubscriptionTier,
    /// Subscription lifecycle state
    pub subscription_status: SubscriptionStatus,
    /// Preferred content language
    pub language: Language,
    /// Country used for prayer-time lookup
    pub country: String,
    /// Reward point balance
    #[serde(default)]
    pub points: u32,
    /// Total content completions (monotonic)
    #[serde(default)]
    pub completed_count: u32,
    /// Consecutive-day activity counter, always >= 1 once any activity
    /// has been recorded
    pub streak: u32,
    /// Calendar date of the most recent activity
    pub last_active_date: Option<NaiveDate>,
    /// IDs of claimed rewards
    #[serde(default)]
    pub unlocked_gifts: BTreeSet<String>,
    /// Whether reminder notifications are enabled
    pub notifications_enabled: bool,
    /// Optional reminder time of day ("HH:MM")
    pub reminder_time: Option<String>,
    /// When the account was created (RFC3339)
    pub created_at: String,
}

impl User {
    /// Create a fresh account. Signup counts as the first activity, so
    /// new users start with a one-day streak and today's date recorded.
    pub fn new(
        email: String,
        password: String,
        country: String,
        language: Language,
        today: NaiveDate,
        created_at: String,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            email,
            password,
            role: Role::User,
            subscription_tier: SubscriptionTier::Free,
            subscription_status: SubscriptionStatus::Active,
            language,
            country,
            points: 0,
            completed_count: 0,
            streak: 1,
            last_active_date: Some(today),
            unlocked_gifts: BTreeSet::new(),
            notifications_enabled: true,
            reminder_time: None,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_starting_state() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let user = User::new(
            "new@example.com".to_string(),
            "secret".to_string(),
            "مصر".to_string(),
            Language::Ar,
            today,
            "2024-01-01T08:00:00Z".to_string(),
        );

        assert_eq!(user.role, Role::User);
        assert_eq!(user.subscription_tier, SubscriptionTier::Free);
        assert_eq!(user.subscription_status, SubscriptionStatus::Active);
        assert_eq!(user.points, 0);
        assert_eq!(user.completed_count, 0);
        assert_eq!(user.streak, 1);
        assert_eq!(user.last_active_date, Some(today));
        assert!(user.unlocked_gifts.is_empty());
    }

    #[test]
    fn test_tier_premium_access() {
        assert!(!SubscriptionTier::Free.grants_premium());
        assert!(SubscriptionTier::Premium.grants_premium());
        assert!(SubscriptionTier::Gold.grants_premium());
    }

    #[test]
    fn test_language_serde_round_trip() {
        let json = serde_json::to_string(&Language::Ar).unwrap();
        assert_eq!(json, "\"ar\"");
        let lang: Language = serde_json::from_str("\"fr\"").unwrap();
        assert_eq!(lang, Language::Fr);
    }
}
