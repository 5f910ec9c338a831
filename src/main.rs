// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Adhkari API Server
//!
//! Tracks recitation progress, streaks and reward points, serves
//! prayer-time schedules, and lets administrators curate multilingual
//! devotional content.

use adhkari::{
    config::Config,
    db::{seed, Store},
    services::{PrayerTimesClient, TranslationClient},
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(port = config.port, "Starting Adhkari API");

    // Open the JSON-file store and seed first-run data
    let db = Store::open(config.data_dir.clone())
        .await
        .expect("Failed to open store");
    seed::ensure_seed_data(&db, &config.admin_email, &config.admin_password)
        .await
        .expect("Failed to seed store");

    // External service clients
    let prayer_service = PrayerTimesClient::new(config.aladhan_base_url.clone());
    let translation_service = TranslationClient::new(
        config.gemini_base_url.clone(),
        config.gemini_api_key.clone(),
        config.gemini_model.clone(),
    );

    // Build shared state
    let state = Arc::new(AppState::new(
        config.clone(),
        db,
        prayer_service,
        translation_service,
    ));

    // Build router
    let app = adhkari::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("adhkari=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
