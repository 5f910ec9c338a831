// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use adhkari::config::Config;
use adhkari::db::Store;
use adhkari::middleware::auth::create_jwt;
use adhkari::models::{
    Category, ContentItem, Language, LocalizedText, Reward, RewardKind, Role, SubscriptionTier,
    User,
};
use adhkari::routes::create_router;
use adhkari::services::{PrayerTimesClient, TranslationClient};
use adhkari::time_utils::{now_rfc3339, today_utc};
use adhkari::AppState;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Create a test app backed by an in-memory store.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    create_test_app_with_config(Config::test_default())
}

/// Create a test app with a custom config (e.g. mock upstream URLs).
#[allow(dead_code)]
pub fn create_test_app_with_config(config: Config) -> (axum::Router, Arc<AppState>) {
    let db = Store::in_memory();
    let prayer_service = PrayerTimesClient::new(config.aladhan_base_url.clone());
    let translation_service = TranslationClient::new(
        config.gemini_base_url.clone(),
        config.gemini_api_key.clone(),
        config.gemini_model.clone(),
    );

    let state = Arc::new(AppState::new(
        config,
        db,
        prayer_service,
        translation_service,
    ));

    (create_router(state.clone()), state)
}

/// Create a session JWT for a user ID.
#[allow(dead_code)]
pub fn create_test_jwt(user_id: &str, signing_key: &[u8]) -> String {
    create_jwt(user_id, signing_key).expect("JWT creation failed")
}

/// Insert a user with the given tier. Password is "password123".
#[allow(dead_code)]
pub async fn seed_user(state: &AppState, email: &str, tier: SubscriptionTier) -> User {
    let mut user = User::new(
        email.to_string(),
        "password123".to_string(),
        "السعودية".to_string(),
        Language::Ar,
        today_utc(),
        now_rfc3339(),
    );
    user.subscription_tier = tier;
    state.db.insert_user(&user).await.expect("insert user");
    user
}

/// Insert an admin user. Password is "password123".
#[allow(dead_code)]
pub async fn seed_admin(state: &AppState, email: &str) -> User {
    let mut admin = seed_user(state, email, SubscriptionTier::Gold).await;
    admin.role = Role::Admin;
    state.db.upsert_user(&admin).await.expect("upsert admin");
    admin
}

/// Insert a content item with a single Arabic bundle.
#[allow(dead_code)]
pub async fn seed_content(
    state: &AppState,
    category: Category,
    sub_category: Option<&str>,
    is_premium: bool,
    points_reward: u32,
) -> ContentItem {
    let mut translations = BTreeMap::new();
    translations.insert(
        Language::Ar,
        LocalizedText {
            title: "ذكر".to_string(),
            content: "سبحان الله وبحمده".to_string(),
            explanation: None,
        },
    );
    let item = ContentItem {
        id: uuid::Uuid::new_v4().to_string(),
        category,
        sub_category: sub_category.map(String::from),
        count: 3,
        is_premium,
        points_reward,
        translations,
        active: true,
        created_at: now_rfc3339(),
    };
    state.db.insert_content(&item).await.expect("insert content");
    item
}

/// Insert a reward.
#[allow(dead_code)]
pub async fn seed_reward(state: &AppState, cost: u32, kind: RewardKind) -> Reward {
    let reward = Reward {
        id: uuid::Uuid::new_v4().to_string(),
        name: "Test Reward".to_string(),
        required_points: cost,
        kind,
        value: 3,
        active: true,
    };
    state.db.insert_reward(&reward).await.expect("insert reward");
    reward
}

/// Read a JSON response body.
#[allow(dead_code)]
pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("parse body")
}
