// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Adhkari: daily dhikr companion backend
//!
//! This crate provides the backend API for tracking recitation
//! progress, streaks and reward points, serving prayer-time schedules,
//! and curating multilingual devotional content.

pub mod catalog;
pub mod config;
pub mod db;
pub mod engagement;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use dashmap::DashMap;
use db::Store;
use services::{PrayerTimesClient, TranslationClient};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Per-user write locks. Read-modify-write sequences on a user record
/// must hold this lock so concurrent requests for the same user cannot
/// overwrite each other's point/streak updates (persistence is a
/// whole-record replace).
pub type UserLocks = Arc<DashMap<String, Arc<Mutex<()>>>>;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: Store,
    pub prayer_service: PrayerTimesClient,
    pub translation_service: TranslationClient,
    user_locks: UserLocks,
}

impl AppState {
    pub fn new(
        config: Config,
        db: Store,
        prayer_service: PrayerTimesClient,
        translation_service: TranslationClient,
    ) -> Self {
        Self {
            config,
            db,
            prayer_service,
            translation_service,
            user_locks: Arc::new(DashMap::new()),
        }
    }

    /// Get the write-lock handle for a user.
    pub fn user_lock(&self, user_id: &str) -> Arc<Mutex<()>> {
        self.user_locks
            .entry(user_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}
