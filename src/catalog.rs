// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Content catalog: localization resolution and premium gating.
//!
//! Stateless helpers over explicit inputs. Localization never fails;
//! gating only signals lock state — redacting a locked item's body is
//! the caller's contract.

use crate::models::{Category, ContentItem, Language, LocalizedText, User};
use std::collections::BTreeSet;
use std::sync::LazyLock;

/// Primary supported language, used as the localization fallback.
pub const FALLBACK_LANGUAGE: Language = Language::Ar;

static UNTITLED: LazyLock<LocalizedText> = LazyLock::new(|| LocalizedText {
    title: "Untitled".to_string(),
    content: String::new(),
    explanation: None,
});

/// Resolve the bundle to display for `language`.
///
/// Falls back to the primary language, then to any populated bundle,
/// then to a static "untitled" sentinel. Total — never fails.
pub fn localize(item: &ContentItem, language: Language) -> &LocalizedText {
    item.translations
        .get(&language)
        .or_else(|| item.translations.get(&FALLBACK_LANGUAGE))
        .or_else(|| item.translations.values().next())
        .unwrap_or(&UNTITLED)
}

/// Whether `item` is locked for `user`.
///
/// Premium items are locked for every tier that does not grant premium
/// access; non-premium items are never locked.
pub fn is_locked(item: &ContentItem, user: &User) -> bool {
    item.is_premium && !user.subscription_tier.grants_premium()
}

/// Two-level category filter over active items, in storage order.
///
/// With a sub-category, matches it exactly; without one, matches items
/// that have no sub-category. The same semantics drive the
/// category -> subcategory -> item navigation.
pub fn filter_by_category<'a>(
    items: &'a [ContentItem],
    category: Category,
    sub_category: Option<&str>,
) -> Vec<&'a ContentItem> {
    items
        .iter()
        .filter(|item| item.active && item.category == category)
        .filter(|item| match sub_category {
            Some(sub) => item.sub_category.as_deref() == Some(sub),
            None => item.sub_category.is_none(),
        })
        .collect()
}

/// Distinct non-empty sub-categories among active items of `category`.
pub fn distinct_sub_categories(items: &[ContentItem], category: Category) -> BTreeSet<String> {
    items
        .iter()
        .filter(|item| item.active && item.category == category)
        .filter_map(|item| item.sub_category.clone())
        .filter(|sub| !sub.is_empty())
        .collect()
}
