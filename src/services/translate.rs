// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Gemini client for AI-assisted content translation.
//!
//! Admin-created content is authored once and translated into the full
//! supported-language set in a single structured-output call. Any
//! network, parse, or completeness failure aborts the whole operation
//! so a half-translated item is never persisted.

use crate::error::AppError;
use crate::models::{Language, LocalizedText};
use serde::Deserialize;
use std::collections::BTreeMap;

/// Languages every translation must cover.
const REQUIRED_LANGUAGES: [Language; 3] = [Language::Ar, Language::En, Language::Fr];

/// Gemini generateContent client.
#[derive(Clone)]
pub struct TranslationClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl TranslationClient {
    /// Create a client against the given API root
    /// (e.g. `https://generativelanguage.googleapis.com/v1beta`).
    pub fn new(base_url: String, api_key: String, model: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
            api_key,
            model,
        }
    }

    /// Translate a source text into every supported language.
    ///
    /// Returns a bundle per language or fails as a whole; partial
    /// results are never returned.
    pub async fn translate(
        &self,
        title: &str,
        content: &str,
        explanation: Option<&str>,
    ) -> Result<BTreeMap<Language, LocalizedText>, AppError> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );

        let prompt = format!(
            "Translate to Arabic, English, and French. Provide ONLY a JSON object \
             with keys 'ar', 'en', 'fr'. Each key has 'title', 'content', 'explanation'.\n\
             Title: {}\nContent: {}\nExplanation: {}",
            title,
            content,
            explanation.unwrap_or("None")
        );

        let bundle_schema = serde_json::json!({
            "type": "OBJECT",
            "properties": {
                "title": { "type": "STRING" },
                "content": { "type": "STRING" },
                "explanation": { "type": "STRING" }
            }
        });
        let body = serde_json::json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": {
                    "type": "OBJECT",
                    "properties": {
                        "ar": bundle_schema,
                        "en": bundle_schema,
                        "fr": bundle_schema
                    }
                }
            }
        });

        let response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("Translation request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::Upstream(format!(
                "Translation service returned HTTP {}",
                response.status()
            )));
        }

        let envelope: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| AppError::Upstream(format!("Translation response parse failed: {}", e)))?;

        let text = envelope
            .candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .map(|p| p.text.as_str())
            .ok_or_else(|| AppError::Upstream("Translation response was empty".to_string()))?;

        parse_translations(text)
    }
}

/// Parse and validate the model's JSON payload into per-language
/// bundles. Every supported language must be present with a non-empty
/// title and content.
fn parse_translations(text: &str) -> Result<BTreeMap<Language, LocalizedText>, AppError> {
    let translations: BTreeMap<Language, RawBundle> = serde_json::from_str(text)
        .map_err(|e| AppError::Upstream(format!("Translation payload parse failed: {}", e)))?;

    let mut bundles = BTreeMap::new();
    for language in REQUIRED_LANGUAGES {
        let raw = translations.get(&language).ok_or_else(|| {
            AppError::Upstream(format!("Translation payload is missing {:?}", language))
        })?;
        if raw.title.trim().is_empty() || raw.content.trim().is_empty() {
            return Err(AppError::Upstream(format!(
                "Translation for {:?} is incomplete",
                language
            )));
        }
        bundles.insert(
            language,
            LocalizedText {
                title: raw.title.clone(),
                content: raw.content.clone(),
                explanation: raw
                    .explanation
                    .as_deref()
                    .filter(|e| !e.trim().is_empty() && *e != "None")
                    .map(String::from),
            },
        );
    }

    Ok(bundles)
}

/// One per-language object as the model returns it.
#[derive(Deserialize)]
struct RawBundle {
    title: String,
    content: String,
    #[serde(default)]
    explanation: Option<String>,
}

/// Gemini generateContent response envelope.
#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Deserialize)]
struct Part {
    text: String,
}
