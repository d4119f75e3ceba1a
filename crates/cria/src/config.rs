//! Configuration for Cria.
//!
//! Loaded from `~/.config/cria/config.toml` when present, then overridden by
//! environment variables. A bad config file is logged and replaced by
//! defaults rather than aborting; a missing API key is a condition the
//! analysis engine reports, not an error here.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Name of the config file under the user config directory.
pub const CONFIG_FILE: &str = "cria/config.toml";

/// Environment variable carrying the API credential.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CriaConfig {
    /// Gemini API key. Usually provided via `GEMINI_API_KEY` instead.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Model used for creative analysis.
    #[serde(default = "default_model")]
    pub model: String,

    /// Base URL of the Generative Language API.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Timeout for one analysis call.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_endpoint() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_request_timeout() -> u64 {
    // Image + long prompt analysis regularly runs tens of seconds.
    90
}

impl Default for CriaConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            endpoint: default_endpoint(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl CriaConfig {
    /// Path of the user config file, if a config directory exists.
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_FILE))
    }

    /// Load the file (when present) and apply environment overrides.
    pub fn load() -> Self {
        let mut config = match Self::path() {
            Some(path) if path.exists() => match std::fs::read_to_string(&path) {
                Ok(raw) => Self::from_toml(&raw),
                Err(e) => {
                    warn!("failed to read {}: {e}, using defaults", path.display());
                    Self::default()
                }
            },
            _ => Self::default(),
        };
        config.override_from(|key| std::env::var(key).ok());
        config
    }

    /// Parse TOML, falling back to defaults on malformed input.
    pub fn from_toml(raw: &str) -> Self {
        match toml::from_str(raw) {
            Ok(config) => config,
            Err(e) => {
                warn!("invalid config file: {e}, using defaults");
                Self::default()
            }
        }
    }

    /// Apply environment-style overrides through a lookup function.
    pub fn override_from(&mut self, get: impl Fn(&str) -> Option<String>) {
        if let Some(key) = get(API_KEY_ENV).filter(|k| !k.is_empty()) {
            self.api_key = Some(key);
        }
        if let Some(model) = get("CRIA_MODEL").filter(|m| !m.is_empty()) {
            self.model = model;
        }
        if let Some(endpoint) = get("CRIA_ENDPOINT").filter(|e| !e.is_empty()) {
            self.endpoint = endpoint;
        }
        if let Some(timeout) = get("CRIA_TIMEOUT_SECS").and_then(|t| t.parse().ok()) {
            self.request_timeout_secs = timeout;
        }
    }

    /// The credential to use, if any.
    pub fn resolved_api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|k| !k.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let config = CriaConfig::default();
        assert_eq!(config.model, "gemini-2.5-flash");
        assert!(config.endpoint.starts_with("https://"));
        assert!(config.resolved_api_key().is_none());
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let config = CriaConfig::from_toml("model = \"gemini-exp\"\n");
        assert_eq!(config.model, "gemini-exp");
        assert_eq!(config.endpoint, default_endpoint());
        assert_eq!(config.request_timeout_secs, default_request_timeout());
    }

    #[test]
    fn malformed_toml_falls_back_to_defaults() {
        let config = CriaConfig::from_toml("model = [not toml");
        assert_eq!(config.model, default_model());
    }

    #[test]
    fn env_overrides_win_over_file_values() {
        let mut config = CriaConfig::from_toml("api_key = \"from-file\"\n");
        config.override_from(|key| match key {
            "GEMINI_API_KEY" => Some("from-env".to_string()),
            "CRIA_TIMEOUT_SECS" => Some("30".to_string()),
            _ => None,
        });
        assert_eq!(config.resolved_api_key(), Some("from-env"));
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn empty_env_values_are_ignored() {
        let mut config = CriaConfig::default();
        config.override_from(|key| match key {
            "GEMINI_API_KEY" => Some(String::new()),
            _ => None,
        });
        assert!(config.resolved_api_key().is_none());
    }
}
