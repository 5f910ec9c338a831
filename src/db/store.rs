// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! JSON-file backed keyed store.
//!
//! Each logical collection is one JSON file under the data directory,
//! holding records in insertion order (catalog filtering relies on
//! storage order). An in-memory copy of every collection is the source
//! of truth while the process runs, which gives read-your-writes within
//! the process; every mutation is flushed to disk through a
//! write-to-temp-then-rename so a crash never leaves a half-written
//! collection behind.
//!
//! The store exposes read/replace-by-id operations only. Callers that
//! do read-modify-write sequences on a user must serialize them through
//! the per-user lock table in [`crate::AppState`].

use crate::db::collections;
use crate::error::AppError;
use crate::models::{AuditLogEntry, ContentItem, Reward, User, MAX_AUDIT_ENTRIES};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Keyed store over the four logical collections.
#[derive(Clone)]
pub struct Store {
    inner: Arc<StoreInner>,
}

struct StoreInner {
    /// None runs the store purely in memory (tests).
    data_dir: Option<PathBuf>,
    users: RwLock<Vec<User>>,
    content: RwLock<Vec<ContentItem>>,
    rewards: RwLock<Vec<Reward>>,
    audit_log: RwLock<Vec<AuditLogEntry>>,
}

impl Store {
    /// Open (or create) a store rooted at `data_dir`, loading any
    /// existing collection files.
    pub async fn open<P: Into<PathBuf>>(data_dir: P) -> Result<Self, AppError> {
        let data_dir = data_dir.into();
        tokio::fs::create_dir_all(&data_dir)
            .await
            .map_err(|e| AppError::Storage(format!("Failed to create data dir: {}", e)))?;

        let users = load_collection(&data_dir, collections::USERS).await?;
        let content = load_collection(&data_dir, collections::CONTENT).await?;
        let rewards = load_collection(&data_dir, collections::REWARDS).await?;
        let audit_log = load_collection(&data_dir, collections::AUDIT_LOG).await?;

        tracing::info!(
            path = %data_dir.display(),
            users = users.len(),
            content = content.len(),
            "Store opened"
        );

        Ok(Self {
            inner: Arc::new(StoreInner {
                data_dir: Some(data_dir),
                users: RwLock::new(users),
                content: RwLock::new(content),
                rewards: RwLock::new(rewards),
                audit_log: RwLock::new(audit_log),
            }),
        })
    }

    /// Create a store that never touches disk (for tests).
    pub fn in_memory() -> Self {
        Self {
            inner: Arc::new(StoreInner {
                data_dir: None,
                users: RwLock::new(Vec::new()),
                content: RwLock::new(Vec::new()),
                rewards: RwLock::new(Vec::new()),
                audit_log: RwLock::new(Vec::new()),
            }),
        }
    }

    async fn flush<T: Serialize>(&self, name: &str, records: &[T]) -> Result<(), AppError> {
        let Some(dir) = &self.inner.data_dir else {
            return Ok(());
        };

        let bytes = serde_json::to_vec_pretty(records)
            .map_err(|e| AppError::Storage(format!("Failed to serialize {}: {}", name, e)))?;

        let path = dir.join(format!("{}.json", name));
        let tmp = dir.join(format!("{}.json.tmp", name));

        tokio::fs::write(&tmp, bytes)
            .await
            .map_err(|e| AppError::Storage(format!("Failed to write {}: {}", name, e)))?;
        tokio::fs::rename(&tmp, &path)
            .await
            .map_err(|e| AppError::Storage(format!("Failed to replace {}: {}", name, e)))?;

        Ok(())
    }

    // ─── User Operations ─────────────────────────────────────────

    /// Get a user by ID.
    pub async fn get_user(&self, id: &str) -> Option<User> {
        self.inner
            .users
            .read()
            .await
            .iter()
            .find(|u| u.id == id)
            .cloned()
    }

    /// Look up a user by email (the unique login key).
    pub async fn find_user_by_email(&self, email: &str) -> Option<User> {
        self.inner
            .users
            .read()
            .await
            .iter()
            .find(|u| u.email == email)
            .cloned()
    }

    /// List all users in storage order.
    pub async fn list_users(&self) -> Vec<User> {
        self.inner.users.read().await.clone()
    }

    /// Insert a new user record.
    pub async fn insert_user(&self, user: &User) -> Result<(), AppError> {
        let mut users = self.inner.users.write().await;
        users.push(user.clone());
        self.flush(collections::USERS, &users).await
    }

    /// Replace a user record by ID (insert if absent).
    pub async fn upsert_user(&self, user: &User) -> Result<(), AppError> {
        let mut users = self.inner.users.write().await;
        match users.iter_mut().find(|u| u.id == user.id) {
            Some(existing) => *existing = user.clone(),
            None => users.push(user.clone()),
        }
        self.flush(collections::USERS, &users).await
    }

    // ─── Content Operations ──────────────────────────────────────

    /// Get a content item by ID (including soft-deleted items).
    pub async fn get_content(&self, id: &str) -> Option<ContentItem> {
        self.inner
            .content
            .read()
            .await
            .iter()
            .find(|c| c.id == id)
            .cloned()
    }

    /// List all content items in storage order.
    pub async fn list_content(&self) -> Vec<ContentItem> {
        self.inner.content.read().await.clone()
    }

    /// Insert a new content item.
    pub async fn insert_content(&self, item: &ContentItem) -> Result<(), AppError> {
        let mut content = self.inner.content.write().await;
        content.push(item.clone());
        self.flush(collections::CONTENT, &content).await
    }

    /// Replace a content item by ID (insert if absent).
    pub async fn upsert_content(&self, item: &ContentItem) -> Result<(), AppError> {
        let mut content = self.inner.content.write().await;
        match content.iter_mut().find(|c| c.id == item.id) {
            Some(existing) => *existing = item.clone(),
            None => content.push(item.clone()),
        }
        self.flush(collections::CONTENT, &content).await
    }

    // ─── Reward Operations ───────────────────────────────────────

    /// Get a reward by ID (including soft-deleted rewards).
    pub async fn get_reward(&self, id: &str) -> Option<Reward> {
        self.inner
            .rewards
            .read()
            .await
            .iter()
            .find(|r| r.id == id)
            .cloned()
    }

    /// List all rewards in storage order.
    pub async fn list_rewards(&self) -> Vec<Reward> {
        self.inner.rewards.read().await.clone()
    }

    /// Insert a new reward.
    pub async fn insert_reward(&self, reward: &Reward) -> Result<(), AppError> {
        let mut rewards = self.inner.rewards.write().await;
        rewards.push(reward.clone());
        self.flush(collections::REWARDS, &rewards).await
    }

    /// Replace a reward by ID (insert if absent).
    pub async fn upsert_reward(&self, reward: &Reward) -> Result<(), AppError> {
        let mut rewards = self.inner.rewards.write().await;
        match rewards.iter_mut().find(|r| r.id == reward.id) {
            Some(existing) => *existing = reward.clone(),
            None => rewards.push(reward.clone()),
        }
        self.flush(collections::REWARDS, &rewards).await
    }

    // ─── Audit Log Operations ────────────────────────────────────

    /// Append an audit entry, newest first, keeping at most
    /// [`MAX_AUDIT_ENTRIES`] entries.
    pub async fn append_audit(&self, entry: AuditLogEntry) -> Result<(), AppError> {
        let mut log = self.inner.audit_log.write().await;
        log.insert(0, entry);
        log.truncate(MAX_AUDIT_ENTRIES);
        self.flush(collections::AUDIT_LOG, &log).await
    }

    /// List audit entries, newest first.
    pub async fn list_audit(&self) -> Vec<AuditLogEntry> {
        self.inner.audit_log.read().await.clone()
    }
}

async fn load_collection<T: DeserializeOwned>(dir: &Path, name: &str) -> Result<Vec<T>, AppError> {
    let path = dir.join(format!("{}.json", name));
    match tokio::fs::read(&path).await {
        Ok(bytes) => serde_json::from_slice(&bytes)
            .map_err(|e| AppError::Storage(format!("Corrupt collection {}: {}", name, e))),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
        Err(e) => Err(AppError::Storage(format!(
            "Failed to read {}: {}",
            name, e
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Language;
    use crate::time_utils::today_utc;

    fn make_user(email: &str) -> User {
        User::new(
            email.to_string(),
            "pw".to_string(),
            "مصر".to_string(),
            Language::Ar,
            today_utc(),
            "2024-01-01T00:00:00Z".to_string(),
        )
    }

    fn make_entry(n: usize) -> AuditLogEntry {
        AuditLogEntry::new(
            "admin@example.com".to_string(),
            format!("action {}", n),
            "2024-01-01T00:00:00Z".to_string(),
        )
    }

    #[tokio::test]
    async fn test_read_your_writes() {
        let store = Store::in_memory();
        let user = make_user("a@example.com");

        store.insert_user(&user).await.unwrap();

        let loaded = store.get_user(&user.id).await.unwrap();
        assert_eq!(loaded.email, "a@example.com");
        assert!(store.find_user_by_email("a@example.com").await.is_some());
        assert!(store.find_user_by_email("b@example.com").await.is_none());
    }

    #[tokio::test]
    async fn test_upsert_replaces_whole_record() {
        let store = Store::in_memory();
        let mut user = make_user("a@example.com");
        store.insert_user(&user).await.unwrap();

        user.points = 42;
        store.upsert_user(&user).await.unwrap();

        assert_eq!(store.get_user(&user.id).await.unwrap().points, 42);
        assert_eq!(store.list_users().await.len(), 1);
    }

    #[tokio::test]
    async fn test_audit_log_caps_at_max_entries() {
        let store = Store::in_memory();

        for n in 0..MAX_AUDIT_ENTRIES + 5 {
            store.append_audit(make_entry(n)).await.unwrap();
        }

        let log = store.list_audit().await;
        assert_eq!(log.len(), MAX_AUDIT_ENTRIES);
        // Newest first; the oldest five were discarded
        assert_eq!(log[0].action, format!("action {}", MAX_AUDIT_ENTRIES + 4));
        assert_eq!(log.last().unwrap().action, "action 5");
    }

    #[tokio::test]
    async fn test_collections_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let user = make_user("persist@example.com");

        {
            let store = Store::open(dir.path()).await.unwrap();
            store.insert_user(&user).await.unwrap();
            store.append_audit(make_entry(1)).await.unwrap();
        }

        let reopened = Store::open(dir.path()).await.unwrap();
        assert_eq!(
            reopened.get_user(&user.id).await.unwrap().email,
            "persist@example.com"
        );
        assert_eq!(reopened.list_audit().await.len(), 1);
    }

    #[tokio::test]
    async fn test_open_with_missing_files_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path()).await.unwrap();
        assert!(store.list_users().await.is_empty());
        assert!(store.list_content().await.is_empty());
        assert!(store.list_rewards().await.is_empty());
        assert!(store.list_audit().await.is_empty());
    }
}
