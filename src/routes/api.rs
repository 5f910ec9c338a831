// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API routes for authenticated users.

use axum::{
    extract::{Path, Query, State},
    routing::{get, post, put},
    Extension, Json, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::catalog;
use crate::engagement;
use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{Category, ContentItem, Language, PrayerTimes, User};
use crate::time_utils::today_utc;
use crate::AppState;

/// API routes (require authentication via JWT).
/// The auth middleware is applied in routes/mod.rs for these routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/me", get(get_me))
        .route("/api/me/language", put(change_language))
        .route("/api/checkin", post(checkin))
        .route("/api/content", get(list_content))
        .route("/api/content/sub-categories", get(list_sub_categories))
        .route("/api/content/{id}", get(get_content_item))
        .route("/api/content/{id}/complete", post(complete_content))
        .route("/api/rewards", get(list_rewards))
        .route("/api/rewards/{id}/claim", post(claim_reward))
        .route("/api/prayer-times", get(get_prayer_times))
}

// ─── User Profile ────────────────────────────────────────────

/// Current user response. Never carries the password.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub role: crate::models::Role,
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub subscription_tier: crate::models::SubscriptionTier,
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub subscription_status: crate::models::SubscriptionStatus,
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub language: Language,
    pub country: String,
    pub points: u32,
    pub completed_count: u32,
    pub streak: u32,
    #[cfg_attr(feature = "binding-generation", ts(type = "string | null"))]
    pub last_active_date: Option<NaiveDate>,
    pub unlocked_gifts: Vec<String>,
    pub notifications_enabled: bool,
    pub reminder_time: Option<String>,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            role: user.role,
            subscription_tier: user.subscription_tier,
            subscription_status: user.subscription_status,
            language: user.language,
            country: user.country,
            points: user.points,
            completed_count: user.completed_count,
            streak: user.streak,
            last_active_date: user.last_active_date,
            unlocked_gifts: user.unlocked_gifts.into_iter().collect(),
            notifications_enabled: user.notifications_enabled,
            reminder_time: user.reminder_time,
        }
    }
}

async fn load_user(state: &AppState, auth: &AuthUser) -> Result<User> {
    state
        .db
        .get_user(&auth.user_id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", auth.user_id)))
}

/// Get current user profile.
async fn get_me(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<UserProfile>> {
    let user = load_user(&state, &auth).await?;
    Ok(Json(UserProfile::from(user)))
}

// ─── Daily Check-in ──────────────────────────────────────────

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct CheckinResponse {
    pub streak: u32,
    #[cfg_attr(feature = "binding-generation", ts(type = "string | null"))]
    pub last_active_date: Option<NaiveDate>,
}

/// Record the day's activity. Idempotent within a calendar day.
async fn checkin(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<CheckinResponse>> {
    let lock = state.user_lock(&auth.user_id);
    let _guard = lock.lock().await;

    let user = load_user(&state, &auth).await?;
    let updated = engagement::record_daily_activity(&user, today_utc());
    if updated.last_active_date != user.last_active_date {
        state.db.upsert_user(&updated).await?;
        tracing::info!(user_id = %updated.id, streak = updated.streak, "Daily check-in");
    }

    Ok(Json(CheckinResponse {
        streak: updated.streak,
        last_active_date: updated.last_active_date,
    }))
}

// ─── Language ────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ChangeLanguageRequest {
    pub language: Language,
}

/// Switch the preferred content language.
async fn change_language(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Json(payload): Json<ChangeLanguageRequest>,
) -> Result<Json<UserProfile>> {
    let lock = state.user_lock(&auth.user_id);
    let _guard = lock.lock().await;

    let user = load_user(&state, &auth).await?;
    let updated = engagement::change_language(&user, payload.language);
    state.db.upsert_user(&updated).await?;

    Ok(Json(UserProfile::from(updated)))
}

// ─── Content ─────────────────────────────────────────────────

/// One content item as presented to a viewer: localized for their
/// language, with the body redacted when the item is locked for them.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ContentItemView {
    pub id: String,
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub category: Category,
    pub sub_category: Option<String>,
    pub count: u32,
    pub is_premium: bool,
    pub points_reward: u32,
    pub locked: bool,
    pub title: String,
    /// Absent when the item is locked for the viewer
    pub content: Option<String>,
    /// Absent when the item is locked for the viewer
    pub explanation: Option<String>,
}

/// Render an item for a viewer. The catalog only signals lock state;
/// the redaction contract is honored here, before anything leaves the
/// API.
fn render_item(item: &ContentItem, user: &User) -> ContentItemView {
    let locked = catalog::is_locked(item, user);
    let text = catalog::localize(item, user.language);

    ContentItemView {
        id: item.id.clone(),
        category: item.category,
        sub_category: item.sub_category.clone(),
        count: item.count,
        is_premium: item.is_premium,
        points_reward: item.points_reward,
        locked,
        title: text.title.clone(),
        content: (!locked).then(|| text.content.clone()),
        explanation: if locked {
            None
        } else {
            text.explanation.clone()
        },
    }
}

#[derive(Deserialize)]
struct ContentQuery {
    category: Category,
    sub_category: Option<String>,
}

/// List content for a category (two-level navigation filter).
async fn list_content(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Query(query): Query<ContentQuery>,
) -> Result<Json<Vec<ContentItemView>>> {
    let user = load_user(&state, &auth).await?;
    let items = state.db.list_content().await;

    let views = catalog::filter_by_category(&items, query.category, query.sub_category.as_deref())
        .into_iter()
        .map(|item| render_item(item, &user))
        .collect();

    Ok(Json(views))
}

#[derive(Deserialize)]
struct SubCategoryQuery {
    category: Category,
}

/// Distinct sub-categories within a category.
async fn list_sub_categories(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SubCategoryQuery>,
) -> Result<Json<Vec<String>>> {
    let items = state.db.list_content().await;
    let subs = catalog::distinct_sub_categories(&items, query.category);
    Ok(Json(subs.into_iter().collect()))
}

/// Get a single content item, localized for the viewer.
async fn get_content_item(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<ContentItemView>> {
    let user = load_user(&state, &auth).await?;
    let item = state
        .db
        .get_content(&id)
        .await
        .filter(|item| item.active)
        .ok_or_else(|| AppError::NotFound(format!("Content {} not found", id)))?;

    Ok(Json(render_item(&item, &user)))
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct CompletionResponse {
    pub points: u32,
    pub completed_count: u32,
}

/// Credit a finished content item (all repetitions done).
async fn complete_content(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<CompletionResponse>> {
    let item = state
        .db
        .get_content(&id)
        .await
        .filter(|item| item.active)
        .ok_or_else(|| AppError::NotFound(format!("Content {} not found", id)))?;

    let lock = state.user_lock(&auth.user_id);
    let _guard = lock.lock().await;

    let user = load_user(&state, &auth).await?;
    let updated = engagement::complete_content(&user, &item)?;
    state.db.upsert_user(&updated).await?;

    tracing::info!(
        user_id = %updated.id,
        content_id = %item.id,
        points = updated.points,
        "Content completed"
    );

    Ok(Json(CompletionResponse {
        points: updated.points,
        completed_count: updated.completed_count,
    }))
}

// ─── Rewards ─────────────────────────────────────────────────

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct RewardView {
    pub id: String,
    pub name: String,
    pub required_points: u32,
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub kind: crate::models::RewardKind,
    pub value: u32,
    pub claimed: bool,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct RewardsResponse {
    pub points: u32,
    pub rewards: Vec<RewardView>,
}

/// List active rewards alongside the viewer's balance.
async fn list_rewards(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<RewardsResponse>> {
    let user = load_user(&state, &auth).await?;
    let rewards = state
        .db
        .list_rewards()
        .await
        .into_iter()
        .filter(|r| r.active)
        .map(|r| RewardView {
            claimed: user.unlocked_gifts.contains(&r.id),
            id: r.id,
            name: r.name,
            required_points: r.required_points,
            kind: r.kind,
            value: r.value,
        })
        .collect();

    Ok(Json(RewardsResponse {
        points: user.points,
        rewards,
    }))
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ClaimResponse {
    pub points: u32,
    pub unlocked_gifts: Vec<String>,
}

/// Redeem a reward against the point balance.
async fn claim_reward(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<ClaimResponse>> {
    let reward = state
        .db
        .get_reward(&id)
        .await
        .filter(|r| r.active)
        .ok_or_else(|| AppError::NotFound(format!("Reward {} not found", id)))?;

    let lock = state.user_lock(&auth.user_id);
    let _guard = lock.lock().await;

    let user = load_user(&state, &auth).await?;
    let updated = engagement::claim_reward(&user, &reward)?;
    state.db.upsert_user(&updated).await?;

    tracing::info!(
        user_id = %updated.id,
        reward_id = %reward.id,
        points = updated.points,
        "Reward claimed"
    );

    Ok(Json(ClaimResponse {
        points: updated.points,
        unlocked_gifts: updated.unlocked_gifts.into_iter().collect(),
    }))
}

// ─── Prayer Times ────────────────────────────────────────────

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct PrayerTimesResponse {
    pub available: bool,
    pub country: String,
    #[cfg_attr(feature = "binding-generation", ts(type = "Record<string, string> | null"))]
    pub times: Option<PrayerTimes>,
}

/// Today's prayer times for the viewer's country. An upstream failure
/// is "not yet available", never a failed session.
async fn get_prayer_times(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<PrayerTimesResponse>> {
    let user = load_user(&state, &auth).await?;

    let times = match state.prayer_service.fetch(&user.country).await {
        Ok(times) => Some(times),
        Err(err) => {
            tracing::warn!(error = %err, country = %user.country, "Prayer times unavailable");
            None
        }
    };

    Ok(Json(PrayerTimesResponse {
        available: times.is_some(),
        country: user.country,
        times,
    }))
}
