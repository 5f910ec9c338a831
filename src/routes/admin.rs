// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Administrator routes: user management, content curation, rewards,
//! and the audit trail.
//!
//! Every mutation appends an audit entry. Content and reward deletion
//! is soft (the record is marked inactive and stays resolvable by ID)
//! so users' unlocked sets never dangle.

use axum::{
    extract::{Path, State},
    routing::{delete, get, post, put},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

use crate::error::{AppError, Result};
use crate::middleware::auth::AdminUser;
use crate::models::{
    AuditLogEntry, Category, ContentItem, Reward, RewardKind, SubscriptionTier, User,
};
use crate::time_utils::now_rfc3339;
use crate::AppState;

/// Admin routes (require authentication and the admin role).
/// Both middlewares are applied in routes/mod.rs.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/admin/users", get(list_users))
        .route("/api/admin/users/{id}/tier", put(update_tier))
        .route("/api/admin/content", get(list_content).post(create_content))
        .route("/api/admin/content/{id}", delete(delete_content))
        .route("/api/admin/rewards", post(create_reward))
        .route("/api/admin/rewards/{id}", delete(delete_reward))
        .route("/api/admin/logs", get(list_logs))
}

async fn record_audit(state: &AppState, admin: &AdminUser, action: String) -> Result<()> {
    state
        .db
        .append_audit(AuditLogEntry::new(
            admin.email.clone(),
            action,
            now_rfc3339(),
        ))
        .await
}

// ─── Users ───────────────────────────────────────────────────

/// User summary for the admin dashboard. Never carries the password.
#[derive(Serialize)]
pub struct AdminUserView {
    pub id: String,
    pub email: String,
    pub role: crate::models::Role,
    pub subscription_tier: SubscriptionTier,
    pub subscription_status: crate::models::SubscriptionStatus,
    pub country: String,
    pub points: u32,
    pub completed_count: u32,
    pub streak: u32,
    pub created_at: String,
}

impl From<User> for AdminUserView {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            role: user.role,
            subscription_tier: user.subscription_tier,
            subscription_status: user.subscription_status,
            country: user.country,
            points: user.points,
            completed_count: user.completed_count,
            streak: user.streak,
            created_at: user.created_at,
        }
    }
}

/// List all registered users.
async fn list_users(State(state): State<Arc<AppState>>) -> Result<Json<Vec<AdminUserView>>> {
    let users = state
        .db
        .list_users()
        .await
        .into_iter()
        .map(AdminUserView::from)
        .collect();
    Ok(Json(users))
}

#[derive(Deserialize)]
pub struct UpdateTierRequest {
    pub tier: SubscriptionTier,
}

/// Change a user's subscription tier.
async fn update_tier(
    State(state): State<Arc<AppState>>,
    Extension(admin): Extension<AdminUser>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateTierRequest>,
) -> Result<Json<AdminUserView>> {
    let lock = state.user_lock(&id);
    let _guard = lock.lock().await;

    let mut user = state
        .db
        .get_user(&id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))?;

    user.subscription_tier = payload.tier;
    state.db.upsert_user(&user).await?;

    record_audit(
        &state,
        &admin,
        format!("Set tier {:?} for {}", payload.tier, user.email),
    )
    .await?;

    tracing::info!(user_id = %user.id, tier = ?payload.tier, "Tier updated");

    Ok(Json(AdminUserView::from(user)))
}

// ─── Content ─────────────────────────────────────────────────

/// List all content, including soft-deleted items.
async fn list_content(State(state): State<Arc<AppState>>) -> Result<Json<Vec<ContentItem>>> {
    Ok(Json(state.db.list_content().await))
}

#[derive(Deserialize, Validate)]
pub struct CreateContentRequest {
    pub category: Category,
    #[validate(length(min = 1, max = 100))]
    pub sub_category: Option<String>,
    #[validate(range(min = 1))]
    pub count: u32,
    #[serde(default)]
    pub is_premium: bool,
    #[serde(default)]
    pub points_reward: u32,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1, max = 4000))]
    pub content: String,
    pub explanation: Option<String>,
}

/// Create a content item, filling the per-language bundles through the
/// translation service. Translation failure aborts the whole operation;
/// nothing is persisted in that case.
async fn create_content(
    State(state): State<Arc<AppState>>,
    Extension(admin): Extension<AdminUser>,
    Json(payload): Json<CreateContentRequest>,
) -> Result<Json<ContentItem>> {
    payload.validate()?;

    let translations = state
        .translation_service
        .translate(
            &payload.title,
            &payload.content,
            payload.explanation.as_deref(),
        )
        .await?;

    let item = ContentItem {
        id: uuid::Uuid::new_v4().to_string(),
        category: payload.category,
        sub_category: payload.sub_category,
        count: payload.count,
        is_premium: payload.is_premium,
        points_reward: payload.points_reward,
        translations,
        active: true,
        created_at: now_rfc3339(),
    };
    item.validate()?;

    state.db.insert_content(&item).await?;

    record_audit(
        &state,
        &admin,
        format!("Add content: {} (category {:?})", payload.title, item.category),
    )
    .await?;

    tracing::info!(content_id = %item.id, category = ?item.category, "Content created");

    Ok(Json(item))
}

#[derive(Serialize)]
pub struct DeleteResponse {
    pub success: bool,
}

/// Soft-delete a content item.
async fn delete_content(
    State(state): State<Arc<AppState>>,
    Extension(admin): Extension<AdminUser>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>> {
    let mut item = state
        .db
        .get_content(&id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Content {} not found", id)))?;

    item.active = false;
    state.db.upsert_content(&item).await?;

    record_audit(&state, &admin, format!("Delete content: {}", id)).await?;

    Ok(Json(DeleteResponse { success: true }))
}

// ─── Rewards ─────────────────────────────────────────────────

#[derive(Deserialize, Validate)]
pub struct CreateRewardRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub required_points: u32,
    pub kind: RewardKind,
    #[serde(default)]
    pub value: u32,
}

/// Create a reward.
async fn create_reward(
    State(state): State<Arc<AppState>>,
    Extension(admin): Extension<AdminUser>,
    Json(payload): Json<CreateRewardRequest>,
) -> Result<Json<Reward>> {
    payload.validate()?;

    let reward = Reward {
        id: uuid::Uuid::new_v4().to_string(),
        name: payload.name,
        required_points: payload.required_points,
        kind: payload.kind,
        value: payload.value,
        active: true,
    };
    state.db.insert_reward(&reward).await?;

    record_audit(&state, &admin, format!("Add reward: {}", reward.name)).await?;

    Ok(Json(reward))
}

/// Soft-delete a reward. Users who already claimed it keep the ID in
/// their unlocked set, and it stays resolvable.
async fn delete_reward(
    State(state): State<Arc<AppState>>,
    Extension(admin): Extension<AdminUser>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>> {
    let mut reward = state
        .db
        .get_reward(&id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Reward {} not found", id)))?;

    reward.active = false;
    state.db.upsert_reward(&reward).await?;

    record_audit(&state, &admin, format!("Delete reward: {}", id)).await?;

    Ok(Json(DeleteResponse { success: true }))
}

// ─── Audit Log ───────────────────────────────────────────────

/// Audit entries, newest first (capped at 100 in storage).
async fn list_logs(State(state): State<Arc<AppState>>) -> Result<Json<Vec<AuditLogEntry>>> {
    Ok(Json(state.db.list_audit().await))
}
