//! Application configuration loaded from environment variables.
//!
//! Everything here is non-sensitive; the service has no secrets to manage.
//! Values are read once at startup.

use std::env;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Frontend URL allowed by CORS
    pub frontend_url: String,
    /// Server port
    pub port: u16,
    /// Path to the locations JSON export served by the store
    pub locations_path: String,
    /// Cluster merge radius in screen pixels
    pub cluster_radius_px: f64,
    /// Zoom level above which clustering is disabled
    pub max_cluster_zoom: f64,
    /// Debounce interval for persisted viewport writes (milliseconds)
    pub viewport_throttle_ms: u64,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            locations_path: env::var("LOCATIONS_PATH")
                .unwrap_or_else(|_| "data/locations.json".to_string()),
            cluster_radius_px: parse_env_f64("CLUSTER_RADIUS_PX", 50.0)?,
            max_cluster_zoom: parse_env_f64("MAX_CLUSTER_ZOOM", 14.0)?,
            viewport_throttle_ms: env::var("VIEWPORT_THROTTLE_MS")
                .ok()
                .map(|v| {
                    v.parse()
                        .map_err(|_| ConfigError::Invalid("VIEWPORT_THROTTLE_MS"))
                })
                .transpose()?
                .unwrap_or(500),
        })
    }

    /// Default config for tests (no environment access).
    pub fn test_default() -> Self {
        Self {
            frontend_url: "http://localhost:3000".to_string(),
            port: 8080,
            locations_path: "data/locations.json".to_string(),
            cluster_radius_px: 50.0,
            max_cluster_zoom: 14.0,
            viewport_throttle_ms: 500,
        }
    }
}

fn parse_env_f64(key: &'static str, default: f64) -> Result<f64, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw.parse().map_err(|_| ConfigError::Invalid(key)),
        Err(_) => Ok(default),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for environment variable: {0}")]
    Invalid(&'static str),
}
