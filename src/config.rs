use serde::Deserialize;
use std::time::Duration;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// TMDB API key; without it every endpoint degrades to empty results
    #[serde(default)]
    pub tmdb_api_key: Option<String>,

    /// TMDB API base URL
    #[serde(default = "default_tmdb_api_url")]
    pub tmdb_api_url: String,

    /// TMDB image CDN base URL
    #[serde(default = "default_tmdb_image_url")]
    pub tmdb_image_url: String,

    /// Language sent with every TMDB request
    #[serde(default = "default_tmdb_language")]
    pub tmdb_language: String,

    /// Timeout for a single outbound TMDB request, in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Frontend origins allowed by CORS (comma-separated in the environment)
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_tmdb_api_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_tmdb_image_url() -> String {
    "https://image.tmdb.org/t/p".to_string()
}

fn default_tmdb_language() -> String {
    "tr-TR".to_string()
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_cors_origins() -> Vec<String> {
    vec![
        "http://localhost:5173".to_string(),
        "http://localhost:3000".to_string(),
    ]
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tmdb_api_key: None,
            tmdb_api_url: default_tmdb_api_url(),
            tmdb_image_url: default_tmdb_image_url(),
            tmdb_language: default_tmdb_language(),
            request_timeout_secs: default_request_timeout_secs(),
            cors_origins: default_cors_origins(),
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// API key, treating a blank value as absent
    pub fn api_key(&self) -> Option<&str> {
        self.tmdb_api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_pairs(pairs: &[(&str, &str)]) -> Config {
        envy::from_iter::<_, Config>(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string())),
        )
        .unwrap()
    }

    #[test]
    fn test_defaults_when_env_empty() {
        let config = from_pairs(&[]);
        assert_eq!(config.api_key(), None);
        assert_eq!(config.tmdb_api_url, "https://api.themoviedb.org/3");
        assert_eq!(config.tmdb_language, "tr-TR");
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
        assert_eq!(config.port, 8000);
        assert_eq!(config.cors_origins.len(), 2);
    }

    #[test]
    fn test_env_overrides() {
        let config = from_pairs(&[
            ("TMDB_API_KEY", "abc123"),
            ("TMDB_LANGUAGE", "en-US"),
            ("REQUEST_TIMEOUT_SECS", "5"),
            ("CORS_ORIGINS", "https://reelpick.app,https://staging.reelpick.app"),
            ("PORT", "9000"),
        ]);

        assert_eq!(config.api_key(), Some("abc123"));
        assert_eq!(config.tmdb_language, "en-US");
        assert_eq!(config.request_timeout(), Duration::from_secs(5));
        assert_eq!(
            config.cors_origins,
            vec!["https://reelpick.app", "https://staging.reelpick.app"]
        );
        assert_eq!(config.port, 9000);
    }

    #[test]
    fn test_blank_api_key_is_absent() {
        let config = Config {
            tmdb_api_key: Some("   ".to_string()),
            ..Config::default()
        };
        assert_eq!(config.api_key(), None);
    }
}
