// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Devotional content model with per-language bundles.

use crate::models::user::Language;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Fixed content categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Morning,
    Evening,
    Sleep,
    Prayer,
    Hadith,
    Misc,
}

/// One localized rendering of a content item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalizedText {
    /// Display title
    pub title: String,
    /// Body text to recite
    pub content: String,
    /// Optional explanation/commentary
    pub explanation: Option<String>,
}

/// A devotional text stored in the `content` collection.
///
/// The translation map may be partially populated; resolution to a
/// concrete language (with fallback) happens in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentItem {
    /// Unique ID (also used as document ID)
    pub id: String,
    /// Primary category
    pub category: Category,
    /// Free-form grouping within the category
    pub sub_category: Option<String>,
    /// Required repetitions to complete (>= 1)
    pub count: u32,
    /// Whether the item requires a paid tier
    pub is_premium: bool,
    /// Points granted on completion (0 falls back to the default)
    pub points_reward: u32,
    /// Localized bundles keyed by language; not every language is
    /// guaranteed present
    pub translations: BTreeMap<Language, LocalizedText>,
    /// Soft-delete flag; inactive items stay resolvable by ID but are
    /// hidden from listings
    #[serde(default = "default_active")]
    pub active: bool,
    /// When the item was created (RFC3339)
    pub created_at: String,
}

fn default_active() -> bool {
    true
}

/// Validation failures for admin-supplied content.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("repetition count must be at least 1")]
    ZeroCount,

    #[error("content item must have at least one translation bundle")]
    NoTranslations,
}

impl ContentItem {
    /// Check the structural invariants before the item is persisted.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.count == 0 {
            return Err(ValidationError::ZeroCount);
        }
        if self.translations.is_empty() {
            return Err(ValidationError::NoTranslations);
        }
        Ok(())
    }
}
