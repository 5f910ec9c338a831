// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! First-run seed data: the administrator account plus a starter set
//! of content and rewards, inserted only into empty collections.

use crate::db::Store;
use crate::error::AppError;
use crate::models::{
    Category, ContentItem, Language, LocalizedText, Reward, RewardKind, Role, SubscriptionTier,
    User,
};
use crate::time_utils::{now_rfc3339, today_utc};
use std::collections::BTreeMap;

/// Seed empty collections so a fresh deployment is usable immediately.
pub async fn ensure_seed_data(
    store: &Store,
    admin_email: &str,
    admin_password: &str,
) -> Result<(), AppError> {
    if store.list_users().await.is_empty() {
        let mut admin = User::new(
            admin_email.to_string(),
            admin_password.to_string(),
            "السعودية".to_string(),
            Language::Ar,
            today_utc(),
            now_rfc3339(),
        );
        admin.role = Role::Admin;
        admin.subscription_tier = SubscriptionTier::Gold;
        store.insert_user(&admin).await?;
        tracing::info!(email = %admin.email, "Seeded administrator account");
    }

    if store.list_content().await.is_empty() {
        for item in starter_content() {
            store.insert_content(&item).await?;
        }
        tracing::info!("Seeded starter content");
    }

    if store.list_rewards().await.is_empty() {
        for reward in starter_rewards() {
            store.insert_reward(&reward).await?;
        }
        tracing::info!("Seeded starter rewards");
    }

    Ok(())
}

fn bundle(title: &str, content: &str, explanation: Option<&str>) -> LocalizedText {
    LocalizedText {
        title: title.to_string(),
        content: content.to_string(),
        explanation: explanation.map(String::from),
    }
}

fn starter_content() -> Vec<ContentItem> {
    let mut morning = BTreeMap::new();
    morning.insert(
        Language::Ar,
        bundle(
            "أذكار الصباح",
            "أصبحنا وأصبح الملك لله والحمد لله",
            Some("هذا الذكر يبعث الطمأنينة."),
        ),
    );
    morning.insert(
        Language::En,
        bundle(
            "Morning Dhikr",
            "We have reached the morning and so has the dominion of Allah",
            Some("This dhikr brings tranquility."),
        ),
    );
    morning.insert(
        Language::Fr,
        bundle(
            "Dhikr du Matin",
            "Nous sommes au matin et le règne appartient à Allah",
            Some("Ce dhikr apporte la tranquillité."),
        ),
    );

    let mut hadith = BTreeMap::new();
    hadith.insert(
        Language::Ar,
        bundle(
            "حديث النية",
            "إنما الأعمال بالنيات",
            Some("مدار الدين على النية."),
        ),
    );
    hadith.insert(
        Language::En,
        bundle(
            "Hadith of Intention",
            "Actions are but by intentions",
            Some("Religion is based on intention."),
        ),
    );
    hadith.insert(
        Language::Fr,
        bundle(
            "Hadith de l'Intention",
            "Les actions ne valent que par les intentions",
            Some("La religion est basée sur l'intention."),
        ),
    );

    vec![
        ContentItem {
            id: uuid::Uuid::new_v4().to_string(),
            category: Category::Morning,
            sub_category: None,
            count: 1,
            is_premium: false,
            points_reward: 5,
            translations: morning,
            active: true,
            created_at: now_rfc3339(),
        },
        ContentItem {
            id: uuid::Uuid::new_v4().to_string(),
            category: Category::Hadith,
            sub_category: Some("أحاديث نبوية".to_string()),
            count: 1,
            is_premium: true,
            points_reward: 10,
            translations: hadith,
            active: true,
            created_at: now_rfc3339(),
        },
    ]
}

fn starter_rewards() -> Vec<Reward> {
    vec![
        Reward {
            id: uuid::Uuid::new_v4().to_string(),
            name: "مبتدئ الذاكرين".to_string(),
            required_points: 10,
            kind: RewardKind::Badge,
            value: 0,
            active: true,
        },
        Reward {
            id: uuid::Uuid::new_v4().to_string(),
            name: "تمديد اشتراك (3 أيام)".to_string(),
            required_points: 50,
            kind: RewardKind::SubscriptionExtension,
            value: 3,
            active: true,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_seed_populates_empty_store() {
        let store = Store::in_memory();

        ensure_seed_data(&store, "admin@example.com", "pw").await.unwrap();

        let users = store.list_users().await;
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].role, Role::Admin);
        assert_eq!(store.list_content().await.len(), 2);
        assert_eq!(store.list_rewards().await.len(), 2);
    }

    #[tokio::test]
    async fn test_seed_is_idempotent() {
        let store = Store::in_memory();

        ensure_seed_data(&store, "admin@example.com", "pw").await.unwrap();
        ensure_seed_data(&store, "admin@example.com", "pw").await.unwrap();

        assert_eq!(store.list_users().await.len(), 1);
        assert_eq!(store.list_content().await.len(), 2);
    }

    #[test]
    fn test_starter_content_is_valid() {
        for item in starter_content() {
            assert!(item.validate().is_ok());
        }
    }
}
