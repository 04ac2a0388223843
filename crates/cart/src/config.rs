//! Cart configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `CART_CATALOG_URL` - Base URL of the product/stock query service
//!
//! ## Optional
//! - `CART_CATALOG_TOKEN` - Bearer token for the catalog API
//! - `CART_CATALOG_TIMEOUT_SECS` - HTTP request timeout in seconds (default: 10)
//! - `CART_CACHE_TTL_SECS` - Product cache TTL in seconds (default: 300)
//! - `CART_STORAGE_PATH` - Path of the persisted cart file (default: cart.json)

use std::path::PathBuf;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_CACHE_TTL_SECS: u64 = 300;
const DEFAULT_STORAGE_PATH: &str = "cart.json";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Cart application configuration.
#[derive(Debug, Clone)]
pub struct CartConfig {
    /// Product/stock query service configuration
    pub catalog: CatalogConfig,
    /// Path of the persistence slot holding the serialized cart
    pub storage_path: PathBuf,
}

/// Product/stock query service configuration.
///
/// Implements `Debug` manually to redact the access token.
#[derive(Clone)]
pub struct CatalogConfig {
    /// Base URL of the service (e.g. <https://api.example.com>)
    pub base_url: Url,
    /// Optional bearer token for authenticated deployments
    pub access_token: Option<SecretString>,
    /// HTTP request timeout in seconds
    pub timeout_secs: u64,
    /// Product cache TTL in seconds
    pub cache_ttl_secs: u64,
}

impl std::fmt::Debug for CatalogConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogConfig")
            .field("base_url", &self.base_url.as_str())
            .field(
                "access_token",
                &self.access_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("timeout_secs", &self.timeout_secs)
            .field("cache_ttl_secs", &self.cache_ttl_secs)
            .finish()
    }
}

impl CartConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Ok(Self {
            catalog: CatalogConfig::from_env()?,
            storage_path: get_env_or_default("CART_STORAGE_PATH", DEFAULT_STORAGE_PATH).into(),
        })
    }
}

impl CatalogConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let base_url = get_required_env("CART_CATALOG_URL")?;
        let base_url = Url::parse(&base_url)
            .map_err(|e| ConfigError::InvalidEnvVar("CART_CATALOG_URL".to_string(), e.to_string()))?;

        Ok(Self {
            base_url,
            access_token: get_optional_env("CART_CATALOG_TOKEN").map(SecretString::from),
            timeout_secs: parse_env_or_default("CART_CATALOG_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?,
            cache_ttl_secs: parse_env_or_default("CART_CACHE_TTL_SECS", DEFAULT_CACHE_TTL_SECS)?,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse an environment variable, falling back to a default when unset.
fn parse_env_or_default<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse()
            .map_err(|e: T::Err| ConfigError::InvalidEnvVar(key.to_string(), e.to_string())),
        Err(_) => Ok(default),
    }
}
