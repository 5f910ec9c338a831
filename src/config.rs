// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

/// Default Aladhan API root.
const DEFAULT_ALADHAN_URL: &str = "https://api.aladhan.com/v1";
/// Default Gemini API root.
const DEFAULT_GEMINI_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
/// Default Gemini model for content translation.
const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,
    /// Frontend URL for CORS
    pub frontend_url: String,
    /// Directory holding the JSON collection files
    pub data_dir: PathBuf,
    /// Email of the seeded administrator account
    pub admin_email: String,
    /// Password of the seeded administrator account
    pub admin_password: String,
    /// JWT signing key for session tokens (raw bytes)
    pub jwt_signing_key: Vec<u8>,
    /// Gemini API key for content translation
    pub gemini_api_key: String,
    /// Gemini API root (overridable for tests)
    pub gemini_base_url: String,
    /// Gemini model used for translation
    pub gemini_model: String,
    /// Aladhan API root (overridable for tests)
    pub aladhan_base_url: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            data_dir: env::var("DATA_DIR")
                .unwrap_or_else(|_| "data".to_string())
                .into(),
            admin_email: env::var("ADMIN_EMAIL")
                .unwrap_or_else(|_| "admin@adhkari.app".to_string()),
            admin_password: env::var("ADMIN_PASSWORD")
                .map_err(|_| ConfigError::Missing("ADMIN_PASSWORD"))?,
            jwt_signing_key: env::var("JWT_SIGNING_KEY")
                .map_err(|_| ConfigError::Missing("JWT_SIGNING_KEY"))?
                .into_bytes(),
            gemini_api_key: env::var("GEMINI_API_KEY")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("GEMINI_API_KEY"))?,
            gemini_base_url: env::var("GEMINI_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_GEMINI_URL.to_string()),
            gemini_model: env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| DEFAULT_GEMINI_MODEL.to_string()),
            aladhan_base_url: env::var("ALADHAN_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_ALADHAN_URL.to_string()),
        })
    }

    /// Default config for testing only.
    pub fn test_default() -> Self {
        Self {
            port: 8080,
            frontend_url: "http://localhost:5173".to_string(),
            data_dir: PathBuf::from("data"),
            admin_email: "admin@adhkari.test".to_string(),
            admin_password: "test-admin-password".to_string(),
            jwt_signing_key: b"test_jwt_key_32_bytes_minimum!!".to_vec(),
            gemini_api_key: "test-key".to_string(),
            gemini_base_url: DEFAULT_GEMINI_URL.to_string(),
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            aladhan_base_url: DEFAULT_ALADHAN_URL.to_string(),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env() {
        // Set required env vars for test
        env::set_var("ADMIN_PASSWORD", "hunter2");
        env::set_var("JWT_SIGNING_KEY", "test_jwt_key_32_bytes_minimum!!");
        env::set_var("GEMINI_API_KEY", "test_key");

        let config = Config::from_env().expect("Config should load");

        assert_eq!(config.admin_email, "admin@adhkari.app");
        assert_eq!(config.gemini_api_key, "test_key");
        assert_eq!(config.port, 8080);
        assert_eq!(config.aladhan_base_url, DEFAULT_ALADHAN_URL);
    }
}
