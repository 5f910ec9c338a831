// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Prayer-time schedule as returned by the timetable service.

use serde::{Deserialize, Serialize};

/// Daily prayer schedule. Values are local time-of-day strings exactly
/// as the upstream timetable reports them (e.g. "04:32").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PrayerTimes {
    pub fajr: String,
    pub sunrise: String,
    pub dhuhr: String,
    pub asr: String,
    pub maghrib: String,
    pub isha: String,
}
