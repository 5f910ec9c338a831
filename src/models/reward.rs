// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Point-redeemable rewards ("gifts").

use serde::{Deserialize, Serialize};

/// What claiming a reward grants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RewardKind {
    Badge,
    SubscriptionExtension,
}

/// A redeemable unlock stored in the `rewards` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reward {
    /// Unique ID (also used as document ID)
    pub id: String,
    /// Display name
    pub name: String,
    /// Point cost to claim
    pub required_points: u32,
    /// Reward kind
    pub kind: RewardKind,
    /// Magnitude of the reward (days for subscription extensions,
    /// unused for badges)
    pub value: u32,
    /// Soft-delete flag; rewards referenced by a user's unlocked set
    /// are never hard-deleted
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}
