//! Session configuration.

use serde::Deserialize;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8081/api";
pub const DEFAULT_USER_KEY: &str = "user";
pub const DEFAULT_FLAG_KEY: &str = "isAuthenticated";

/// Environment variable holding the backend base URL.
pub const API_BASE_URL_ENV: &str = "EARA_API_BASE_URL";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Backend base URL; the login endpoint is `{api_base_url}/auth/login`.
    pub api_base_url: String,
    /// Key holding the JSON-serialized identity.
    pub user_key: String,
    /// Key holding the literal `"true"` while signed in.
    pub flag_key: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            user_key: DEFAULT_USER_KEY.to_string(),
            flag_key: DEFAULT_FLAG_KEY.to_string(),
        }
    }
}

impl SessionConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(url) = lookup(API_BASE_URL_ENV).filter(|v| !v.trim().is_empty()) {
            config.api_base_url = url.trim().to_string();
        } else {
            tracing::debug!("{API_BASE_URL_ENV} not set; using {DEFAULT_API_BASE_URL}");
        }
        config
    }

    /// Whether a storage key is one of the two session keys.
    pub fn is_session_key(&self, key: &str) -> bool {
        key == self.user_key || key == self.flag_key
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_browser_layout() {
        let config = SessionConfig::default();
        assert_eq!(config.user_key, "user");
        assert_eq!(config.flag_key, "isAuthenticated");
        assert!(config.is_session_key("user"));
        assert!(!config.is_session_key("theme"));
    }

    #[test]
    fn lookup_overrides_base_url() {
        let config = SessionConfig::from_lookup(|key| {
            (key == API_BASE_URL_ENV).then(|| " https://eara.example/api ".to_string())
        });
        assert_eq!(config.api_base_url, "https://eara.example/api");

        let blank = SessionConfig::from_lookup(|_| Some("   ".to_string()));
        assert_eq!(blank.api_base_url, DEFAULT_API_BASE_URL);
    }

    #[test]
    fn deserializes_partial_config() {
        let config: SessionConfig = serde_json::from_str(r#"{ "user_key": "eara.user" }"#).unwrap();
        assert_eq!(config.user_key, "eara.user");
        assert_eq!(config.flag_key, DEFAULT_FLAG_KEY);
    }
}
