use adhkari::catalog;
use adhkari::engagement;
use adhkari::models::{Category, ContentItem, Language, LocalizedText, User};
use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::collections::BTreeMap;

fn make_user(last_active: NaiveDate) -> User {
    let mut user = User::new(
        "bench@example.com".to_string(),
        "pw".to_string(),
        "السعودية".to_string(),
        Language::Ar,
        last_active,
        "2024-01-01T00:00:00Z".to_string(),
    );
    user.streak = 10;
    user
}

fn make_catalog(size: usize) -> Vec<ContentItem> {
    let categories = [
        Category::Morning,
        Category::Evening,
        Category::Sleep,
        Category::Prayer,
        Category::Hadith,
        Category::Misc,
    ];

    (0..size)
        .map(|n| {
            let mut translations = BTreeMap::new();
            translations.insert(
                Language::Ar,
                LocalizedText {
                    title: format!("ذكر {}", n),
                    content: "سبحان الله".to_string(),
                    explanation: None,
                },
            );
            ContentItem {
                id: format!("item-{}", n),
                category: categories[n % categories.len()],
                sub_category: (n % 3 == 0).then(|| format!("sub-{}", n % 7)),
                count: 3,
                is_premium: n % 5 == 0,
                points_reward: 5,
                translations,
                active: true,
                created_at: "2024-01-01T00:00:00Z".to_string(),
            }
        })
        .collect()
}

fn benchmark_engagement(c: &mut Criterion) {
    let yesterday = NaiveDate::from_ymd_opt(2024, 1, 14).unwrap();
    let today = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
    let user = make_user(yesterday);

    c.bench_function("record_daily_activity_extend", |b| {
        b.iter(|| engagement::record_daily_activity(black_box(&user), black_box(today)))
    });
}

fn benchmark_catalog(c: &mut Criterion) {
    let items = make_catalog(1000);

    let mut group = c.benchmark_group("catalog");

    group.bench_function("filter_by_category_1000", |b| {
        b.iter(|| catalog::filter_by_category(black_box(&items), Category::Hadith, None))
    });

    group.bench_function("distinct_sub_categories_1000", |b| {
        b.iter(|| catalog::distinct_sub_categories(black_box(&items), Category::Hadith))
    });

    group.bench_function("localize_fallback", |b| {
        b.iter(|| catalog::localize(black_box(&items[0]), Language::En))
    });

    group.finish();
}

criterion_group!(benches, benchmark_engagement, benchmark_catalog);
criterion_main!(benches);
