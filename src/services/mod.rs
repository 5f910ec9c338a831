// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - external collaborators.

pub mod prayer_times;
pub mod translate;

pub use prayer_times::PrayerTimesClient;
pub use translate::TranslationClient;
