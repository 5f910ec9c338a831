// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Aladhan timetable client for fetching prayer times.
//!
//! Lookup is by country; the query needs a city, so each supported
//! country maps to its capital. Any network or shape failure surfaces
//! as `Upstream` — the route layer treats that as "not yet available"
//! rather than an error worth failing the session over.

use crate::error::AppError;
use crate::models::PrayerTimes;
use serde::Deserialize;

/// Umm al-Qura calculation method.
const CALCULATION_METHOD: u8 = 4;

/// Aladhan API client.
#[derive(Clone)]
pub struct PrayerTimesClient {
    http: reqwest::Client,
    base_url: String,
}

impl PrayerTimesClient {
    /// Create a client against the given API root
    /// (e.g. `https://api.aladhan.com/v1`).
    pub fn new(base_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    /// Fetch today's prayer times for a country.
    pub async fn fetch(&self, country: &str) -> Result<PrayerTimes, AppError> {
        let city = capital_for(country);
        let url = format!(
            "{}/timingsByCity?city={}&country={}&method={}",
            self.base_url,
            urlencoding::encode(city),
            urlencoding::encode(country),
            CALCULATION_METHOD
        );

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("Aladhan request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::Upstream(format!(
                "Aladhan returned HTTP {}",
                response.status()
            )));
        }

        let body: AladhanResponse = response
            .json()
            .await
            .map_err(|e| AppError::Upstream(format!("Aladhan response parse failed: {}", e)))?;

        if body.code != 200 {
            return Err(AppError::Upstream(format!(
                "Aladhan returned code {}",
                body.code
            )));
        }

        Ok(body.data.timings)
    }
}

/// Capital city used for the timetable query. Countries outside the map
/// fall back to Makkah.
fn capital_for(country: &str) -> &'static str {
    match country {
        "السعودية" => "الرياض",
        "مصر" => "القاهرة",
        "الإمارات" => "دبي",
        "الكويت" => "الكويت",
        "الأردن" => "عمان",
        "المغرب" => "الرباط",
        "تونس" => "تونس",
        "العراق" => "بغداد",
        _ => "Makkah",
    }
}

/// Aladhan response envelope.
#[derive(Deserialize)]
struct AladhanResponse {
    code: u32,
    data: AladhanData,
}

#[derive(Deserialize)]
struct AladhanData {
    timings: PrayerTimes,
}
