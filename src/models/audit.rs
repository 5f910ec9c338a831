// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Append-only audit trail of administrative actions.

use serde::{Deserialize, Serialize};

/// Maximum audit entries retained; the oldest beyond this are discarded
/// at append time.
pub const MAX_AUDIT_ENTRIES: usize = 100;

/// One recorded admin action, stored newest-first in the `audit_log`
/// collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditLogEntry {
    /// Unique ID
    pub id: String,
    /// When the action happened (RFC3339)
    pub timestamp: String,
    /// Email of the acting administrator
    pub admin_email: String,
    /// Free-text description of the action
    pub action: String,
}

impl AuditLogEntry {
    /// Build a new entry with a generated ID.
    pub fn new(admin_email: String, action: String, timestamp: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            timestamp,
            admin_email,
            action,
        }
    }
}
