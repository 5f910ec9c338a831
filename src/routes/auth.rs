// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Signup, login, and logout routes.
//!
//! Passwords are stored and compared in plaintext; hardening the
//! credential path is an explicit non-goal for this service.

use axum::{extract::State, routing::post, Json, Router};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

use crate::engagement;
use crate::error::{AppError, Result};
use crate::middleware::auth::{create_jwt, SESSION_COOKIE};
use crate::models::{Language, User};
use crate::routes::api::UserProfile;
use crate::time_utils::{now_rfc3339, today_utc};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/signup", post(signup))
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
}

/// Session response: the token is also set as an HttpOnly cookie, the
/// body copy exists for non-browser clients.
#[derive(Serialize)]
pub struct SessionResponse {
    pub token: String,
    pub user: UserProfile,
}

#[derive(Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 6, max = 128))]
    pub password: String,
    #[validate(length(min = 1, max = 64))]
    pub country: String,
    pub language: Language,
}

/// Create an account. Signup counts as the first daily activity.
async fn signup(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(payload): Json<SignupRequest>,
) -> Result<(CookieJar, Json<SessionResponse>)> {
    payload.validate()?;

    if state.db.find_user_by_email(&payload.email).await.is_some() {
        return Err(AppError::BadRequest("Account already exists".to_string()));
    }

    let user = User::new(
        payload.email,
        payload.password,
        payload.country,
        payload.language,
        today_utc(),
        now_rfc3339(),
    );
    state.db.insert_user(&user).await?;

    tracing::info!(user_id = %user.id, "Account created");

    let token = create_jwt(&user.id, &state.config.jwt_signing_key)?;
    let jar = jar.add(session_cookie(token.clone()));

    Ok((
        jar,
        Json(SessionResponse {
            token,
            user: UserProfile::from(user),
        }),
    ))
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Log in and record the day's activity (streak check) before the
/// session starts.
async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(payload): Json<LoginRequest>,
) -> Result<(CookieJar, Json<SessionResponse>)> {
    let user = state
        .db
        .find_user_by_email(&payload.email)
        .await
        .filter(|u| u.password == payload.password)
        .ok_or(AppError::Unauthorized)?;

    // Serialize the streak update against other writers for this user
    let lock = state.user_lock(&user.id);
    let _guard = lock.lock().await;

    let current = state
        .db
        .get_user(&user.id)
        .await
        .ok_or(AppError::Unauthorized)?;

    let updated = engagement::record_daily_activity(&current, today_utc());
    if updated.last_active_date != current.last_active_date {
        state.db.upsert_user(&updated).await?;
    }

    tracing::info!(user_id = %updated.id, streak = updated.streak, "Login");

    let token = create_jwt(&updated.id, &state.config.jwt_signing_key)?;
    let jar = jar.add(session_cookie(token.clone()));

    Ok((
        jar,
        Json(SessionResponse {
            token,
            user: UserProfile::from(updated),
        }),
    ))
}

#[derive(Serialize)]
pub struct LogoutResponse {
    pub success: bool,
}

/// Clear the session cookie.
async fn logout(jar: CookieJar) -> (CookieJar, Json<LogoutResponse>) {
    let jar = jar.remove(Cookie::build(SESSION_COOKIE).path("/"));
    (jar, Json(LogoutResponse { success: true }))
}

fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}
