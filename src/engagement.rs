// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Engagement engine: streak continuation and point accounting.
//!
//! Every operation is a pure function of (current user value, action
//! inputs, today's date) and returns a complete replacement [`User`].
//! Arguments are never mutated; persistence is the caller's job. The
//! engine performs no I/O and no logging, so failed operations leave
//! no trace of partial state anywhere.

use crate::catalog;
use crate::models::{ContentItem, Language, Reward, RewardKind, SubscriptionStatus, User};
use chrono::{Days, NaiveDate};

/// Points granted for a completion when the item does not carry its own
/// reward value.
pub const DEFAULT_COMPLETION_POINTS: u32 = 5;

/// Typed failures for engagement operations. Converted to HTTP status
/// codes at the route boundary.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum EngagementError {
    #[error("content is restricted to paid subscription tiers")]
    PremiumLocked,

    #[error("insufficient points: {required} required, balance is {balance}")]
    InsufficientPoints { required: u32, balance: u32 },

    #[error("reward already claimed")]
    AlreadyClaimed,
}

/// Record a daily activity (called once per session/login).
///
/// Same-day repeats are a no-op: the streak is never decremented and the
/// result is identical to the first call of the day. A visit on the day
/// after the last recorded one extends the streak; any longer gap (or no
/// prior activity at all) resets it to 1.
pub fn record_daily_activity(user: &User, today: NaiveDate) -> User {
    if user.last_active_date == Some(today) {
        return user.clone();
    }

    let yesterday = today.checked_sub_days(Days::new(1));
    let streak = if user.last_active_date.is_some() && user.last_active_date == yesterday {
        user.streak + 1
    } else {
        1
    };

    User {
        streak,
        last_active_date: Some(today),
        ..user.clone()
    }
}

/// Credit a completed content item.
///
/// Fails with [`EngagementError::PremiumLocked`] when the item is gated
/// for this user; the input user is untouched in that case. Streaks are
/// date-driven only and unaffected here.
pub fn complete_content(user: &User, item: &ContentItem) -> Result<User, EngagementError> {
    if catalog::is_locked(item, user) {
        return Err(EngagementError::PremiumLocked);
    }

    let earned = if item.points_reward == 0 {
        DEFAULT_COMPLETION_POINTS
    } else {
        item.points_reward
    };

    Ok(User {
        points: user.points + earned,
        completed_count: user.completed_count + 1,
        ..user.clone()
    })
}

/// Redeem a reward against the user's point balance.
///
/// The balance can never go negative: a claim that costs more than the
/// balance fails with [`EngagementError::InsufficientPoints`] and leaves
/// the user unchanged. Claiming the same reward twice is rejected with
/// [`EngagementError::AlreadyClaimed`].
pub fn claim_reward(user: &User, reward: &Reward) -> Result<User, EngagementError> {
    if user.unlocked_gifts.contains(&reward.id) {
        return Err(EngagementError::AlreadyClaimed);
    }
    if user.points < reward.required_points {
        return Err(EngagementError::InsufficientPoints {
            required: reward.required_points,
            balance: user.points,
        });
    }

    let mut unlocked_gifts = user.unlocked_gifts.clone();
    unlocked_gifts.insert(reward.id.clone());

    // Subscription extensions re-activate a lapsed subscription; the
    // day arithmetic for expiry stays with the caller.
    let subscription_status = match reward.kind {
        RewardKind::SubscriptionExtension => SubscriptionStatus::Active,
        RewardKind::Badge => user.subscription_status,
    };

    Ok(User {
        points: user.points - reward.required_points,
        unlocked_gifts,
        subscription_status,
        ..user.clone()
    })
}

/// Switch the user's preferred content language.
pub fn change_language(user: &User, language: Language) -> User {
    User {
        language,
        ..user.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, LocalizedText, SubscriptionTier};
    use std::collections::BTreeMap;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn make_user(streak: u32, last_active: Option<NaiveDate>) -> User {
        let mut user = User::new(
            "user@example.com".to_string(),
            "pw".to_string(),
            "السعودية".to_string(),
            Language::Ar,
            date(2024, 1, 1),
            "2024-01-01T00:00:00Z".to_string(),
        );
        user.streak = streak;
        user.last_active_date = last_active;
        user
    }

    fn make_item(is_premium: bool, points_reward: u32) -> ContentItem {
        let mut translations = BTreeMap::new();
        translations.insert(
            Language::Ar,
            LocalizedText {
                title: "ذكر".to_string(),
                content: "سبحان الله".to_string(),
                explanation: None,
            },
        );
        ContentItem {
            id: "item-1".to_string(),
            category: Category::Morning,
            sub_category: None,
            count: 3,
            is_premium,
            points_reward,
            translations,
            active: true,
            created_at: "2024-01-01T00:00:00Z".to_string(),
        }
    }

    fn make_reward(id: &str, cost: u32, kind: RewardKind) -> Reward {
        Reward {
            id: id.to_string(),
            name: "Test Reward".to_string(),
            required_points: cost,
            kind,
            value: 3,
            active: true,
        }
    }

    // ─── record_daily_activity ───────────────────────────────────

    #[test]
    fn test_same_day_repeat_is_idempotent() {
        let today = date(2024, 1, 2);
        let user = make_user(5, Some(today));

        let after = record_daily_activity(&user, today);

        assert_eq!(after.streak, 5);
        assert_eq!(after.last_active_date, Some(today));

        // A second call on the same day changes nothing either
        let again = record_daily_activity(&after, today);
        assert_eq!(again.streak, after.streak);
        assert_eq!(again.last_active_date, after.last_active_date);
    }

    #[test]
    fn test_next_day_extends_streak() {
        let user = make_user(5, Some(date(2024, 1, 1)));

        let after = record_daily_activity(&user, date(2024, 1, 2));

        assert_eq!(after.streak, 6);
        assert_eq!(after.last_active_date, Some(date(2024, 1, 2)));
    }

    #[test]
    fn test_two_day_gap_resets_streak() {
        let user = make_user(5, Some(date(2024, 1, 1)));

        let after = record_daily_activity(&user, date(2024, 1, 3));

        assert_eq!(after.streak, 1);
        assert_eq!(after.last_active_date, Some(date(2024, 1, 3)));
    }

    #[test]
    fn test_long_gap_resets_streak() {
        let user = make_user(30, Some(date(2024, 1, 1)));

        let after = record_daily_activity(&user, date(2024, 3, 1));

        assert_eq!(after.streak, 1);
    }

    #[test]
    fn test_no_prior_activity_starts_streak_at_one() {
        let user = make_user(0, None);

        let after = record_daily_activity(&user, date(2024, 1, 2));

        assert_eq!(after.streak, 1);
        assert_eq!(after.last_active_date, Some(date(2024, 1, 2)));
    }

    #[test]
    fn test_month_boundary_extends_streak() {
        let user = make_user(3, Some(date(2024, 1, 31)));

        let after = record_daily_activity(&user, date(2024, 2, 1));

        assert_eq!(after.streak, 4);
    }

    #[test]
    fn test_input_user_is_not_mutated() {
        let user = make_user(5, Some(date(2024, 1, 1)));

        let _ = record_daily_activity(&user, date(2024, 1, 2));

        assert_eq!(user.streak, 5);
        assert_eq!(user.last_active_date, Some(date(2024, 1, 1)));
    }

    // ─── complete_content ────────────────────────────────────────

    #[test]
    fn test_completion_credits_points_and_count() {
        let user = make_user(1, Some(date(2024, 1, 1)));
        let item = make_item(false, 10);

        let after = complete_content(&user, &item).unwrap();

        assert_eq!(after.points, 10);
        assert_eq!(after.completed_count, 1);
        // Streaks are date-driven only
        assert_eq!(after.streak, user.streak);
        assert_eq!(after.last_active_date, user.last_active_date);
    }

    #[test]
    fn test_completion_defaults_to_five_points() {
        let user = make_user(1, None);
        let item = make_item(false, 0);

        let after = complete_content(&user, &item).unwrap();

        assert_eq!(after.points, DEFAULT_COMPLETION_POINTS);
    }

    #[test]
    fn test_premium_completion_fails_for_free_tier() {
        let user = make_user(1, None);
        assert_eq!(user.subscription_tier, SubscriptionTier::Free);
        let item = make_item(true, 10);

        let err = complete_content(&user, &item).unwrap_err();

        assert_eq!(err, EngagementError::PremiumLocked);
        assert_eq!(user.points, 0);
        assert_eq!(user.completed_count, 0);
    }

    #[test]
    fn test_premium_completion_succeeds_for_gold_tier() {
        let mut user = make_user(1, None);
        user.subscription_tier = SubscriptionTier::Gold;
        let item = make_item(true, 10);

        let after = complete_content(&user, &item).unwrap();

        assert_eq!(after.points, 10);
    }

    // ─── claim_reward ────────────────────────────────────────────

    #[test]
    fn test_claim_deducts_points_and_unlocks() {
        let mut user = make_user(1, None);
        user.points = 60;
        let reward = make_reward("g1", 50, RewardKind::Badge);

        let after = claim_reward(&user, &reward).unwrap();

        assert_eq!(after.points, 10);
        assert!(after.unlocked_gifts.contains("g1"));
    }

    #[test]
    fn test_claim_with_insufficient_points_fails() {
        let mut user = make_user(1, None);
        user.points = 45;
        let reward = make_reward("g1", 50, RewardKind::Badge);

        let err = claim_reward(&user, &reward).unwrap_err();

        assert_eq!(
            err,
            EngagementError::InsufficientPoints {
                required: 50,
                balance: 45
            }
        );
        assert_eq!(user.points, 45);
        assert!(user.unlocked_gifts.is_empty());
    }

    #[test]
    fn test_claim_exact_balance_leaves_zero() {
        let mut user = make_user(1, None);
        user.points = 50;
        let reward = make_reward("g1", 50, RewardKind::Badge);

        let after = claim_reward(&user, &reward).unwrap();

        assert_eq!(after.points, 0);
    }

    #[test]
    fn test_duplicate_claim_is_rejected() {
        let mut user = make_user(1, None);
        user.points = 200;
        let reward = make_reward("g1", 50, RewardKind::Badge);

        let once = claim_reward(&user, &reward).unwrap();
        let err = claim_reward(&once, &reward).unwrap_err();

        assert_eq!(err, EngagementError::AlreadyClaimed);
        assert_eq!(once.points, 150);
    }

    #[test]
    fn test_subscription_extension_reactivates() {
        let mut user = make_user(1, None);
        user.points = 50;
        user.subscription_status = SubscriptionStatus::Expired;
        let reward = make_reward("g2", 50, RewardKind::SubscriptionExtension);

        let after = claim_reward(&user, &reward).unwrap();

        assert_eq!(after.subscription_status, SubscriptionStatus::Active);
    }

    #[test]
    fn test_badge_claim_leaves_subscription_status() {
        let mut user = make_user(1, None);
        user.points = 50;
        user.subscription_status = SubscriptionStatus::Expired;
        let reward = make_reward("g1", 10, RewardKind::Badge);

        let after = claim_reward(&user, &reward).unwrap();

        assert_eq!(after.subscription_status, SubscriptionStatus::Expired);
    }

    // ─── change_language ─────────────────────────────────────────

    #[test]
    fn test_change_language_touches_only_language() {
        let mut user = make_user(7, Some(date(2024, 1, 1)));
        user.points = 33;

        let after = change_language(&user, Language::Fr);

        assert_eq!(after.language, Language::Fr);
        assert_eq!(after.points, 33);
        assert_eq!(after.streak, 7);
        assert_eq!(after.email, user.email);
    }
}
