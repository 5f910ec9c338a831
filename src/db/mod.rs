// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Storage layer (keyed JSON collections).

pub mod seed;
pub mod store;

pub use store::Store;

/// Collection names as constants.
pub mod collections {
    pub const USERS: &str = "users";
    pub const CONTENT: &str = "content";
    pub const REWARDS: &str = "rewards";
    pub const AUDIT_LOG: &str = "audit_log";
}
