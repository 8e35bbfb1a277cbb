// src/config/env.rs
// DOCUMENTATION: Environment variable management
// PURPOSE: Load and validate configuration from .env files

use crate::errors::PlacesError;
use dotenv::dotenv;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Default root of the Google Places Web Service
pub const DEFAULT_PLACES_API_BASE_URL: &str = "https://maps.googleapis.com/maps/api/place";

/// Application configuration loaded from environment variables
/// DOCUMENTATION: Centralizes all configuration in one struct
/// Load with Config::from_env() at application startup
#[derive(Debug, Clone)]
pub struct Config {
    /// Google Maps API key (GOOGLE_MAPS_API_KEY)
    pub google_maps_api_key: String,

    /// Base URL for the Places API (overridable for testing against a mock)
    pub places_api_base_url: String,

    /// Wait between paginated search requests, in milliseconds (default 2000)
    pub page_delay_ms: u64,

    /// HTTP request timeout in seconds
    pub request_timeout_secs: u64,

    /// Directory the default output file is written to
    pub output_dir: PathBuf,

    /// Log level: debug, info, warn, error
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables
    /// DOCUMENTATION: Reads from .env or process environment
    /// Called once at application startup
    pub fn from_env() -> Result<Self, PlacesError> {
        // Load .env file if it exists
        dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    /// DOCUMENTATION: Decoupled from the process environment so parsing can be tested
    pub fn from_lookup<F>(lookup: F) -> Result<Self, PlacesError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let or_default =
            |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let parse_u64 = |key: &str, default: u64| -> Result<u64, PlacesError> {
            match lookup(key) {
                Some(raw) => raw.trim().parse().map_err(|e| {
                    PlacesError::Configuration(format!("{} is not a valid number: {}", key, e))
                }),
                None => Ok(default),
            }
        };

        Ok(Config {
            google_maps_api_key: or_default("GOOGLE_MAPS_API_KEY", "").trim().to_string(),

            places_api_base_url: or_default("PLACES_API_BASE_URL", DEFAULT_PLACES_API_BASE_URL)
                .trim_end_matches('/')
                .to_string(),

            page_delay_ms: parse_u64("PAGE_DELAY_MS", 2000)?,

            request_timeout_secs: parse_u64("REQUEST_TIMEOUT_SECS", 30)?,

            output_dir: PathBuf::from(or_default("OUTPUT_DIR", ".")),

            log_level: or_default("LOG_LEVEL", "info"),
        })
    }

    /// Validate critical configuration
    /// DOCUMENTATION: The credential is the only required value; nothing runs without it
    pub fn validate(&self) -> Result<(), PlacesError> {
        if self.google_maps_api_key.is_empty() {
            return Err(PlacesError::Configuration(
                "API key not found. Please set the GOOGLE_MAPS_API_KEY environment variable."
                    .to_string(),
            ));
        }

        if self.request_timeout_secs == 0 {
            return Err(PlacesError::Configuration(
                "REQUEST_TIMEOUT_SECS must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }

    pub fn page_delay(&self) -> Duration {
        Duration::from_millis(self.page_delay_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config, PlacesError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[("GOOGLE_MAPS_API_KEY", "abc")]).unwrap();

        assert_eq!(config.google_maps_api_key, "abc");
        assert_eq!(config.places_api_base_url, DEFAULT_PLACES_API_BASE_URL);
        assert_eq!(config.page_delay(), Duration::from_secs(2));
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.output_dir, PathBuf::from("."));
        assert_eq!(config.log_level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_api_key_fails_validation() {
        let config = config_from(&[]).unwrap();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, PlacesError::Configuration(_)));

        let blank = config_from(&[("GOOGLE_MAPS_API_KEY", "   ")]).unwrap();
        assert!(blank.validate().is_err());
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("GOOGLE_MAPS_API_KEY", "abc"),
            ("PLACES_API_BASE_URL", "http://127.0.0.1:9999/"),
            ("PAGE_DELAY_MS", "0"),
            ("REQUEST_TIMEOUT_SECS", "5"),
            ("OUTPUT_DIR", "/tmp/out"),
        ])
        .unwrap();

        assert_eq!(config.places_api_base_url, "http://127.0.0.1:9999");
        assert_eq!(config.page_delay(), Duration::ZERO);
        assert_eq!(config.request_timeout(), Duration::from_secs(5));
        assert_eq!(config.output_dir, PathBuf::from("/tmp/out"));
    }

    #[test]
    fn test_invalid_number_is_rejected() {
        let err = config_from(&[("GOOGLE_MAPS_API_KEY", "abc"), ("PAGE_DELAY_MS", "soon")])
            .unwrap_err();
        assert!(err.to_string().contains("PAGE_DELAY_MS"));
    }
}
