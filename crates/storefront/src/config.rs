//! Storefront configuration loaded from environment variables.
//!
//! Every variable has a default, so the engine runs with no environment at
//! all.
//!
//! # Environment Variables
//!
//! - `LUXE_API_BASE_URL` - Base URL of the mock catalog API
//!   (default: `https://fakestoreapi.com`)
//! - `LUXE_DATA_DIR` - Directory for the persisted user-data blob
//!   (default: `./data`)
//! - `LUXE_LOGIN_DELAY_MS` - Simulated login latency (default: 1000)
//! - `LUXE_CHECKOUT_DELAY_MS` - Simulated payment processing latency
//!   (default: 2000)

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Default base URL of the mock catalog API.
pub const DEFAULT_API_BASE_URL: &str = "https://fakestoreapi.com";

const DEFAULT_DATA_DIR: &str = "./data";
const DEFAULT_LOGIN_DELAY_MS: u64 = 1000;
const DEFAULT_CHECKOUT_DELAY_MS: u64 = 2000;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront engine configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Base URL of the mock catalog API.
    pub api_base_url: Url,
    /// Directory holding the persisted user-data blob.
    pub data_dir: PathBuf,
    /// Simulated network latency for the demo login.
    pub login_delay: Duration,
    /// Simulated processing latency for checkout payment submission.
    pub checkout_delay: Duration,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_base_url = get_env_or_default("LUXE_API_BASE_URL", DEFAULT_API_BASE_URL)
            .parse::<Url>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("LUXE_API_BASE_URL".to_string(), e.to_string())
            })?;
        let data_dir = PathBuf::from(get_env_or_default("LUXE_DATA_DIR", DEFAULT_DATA_DIR));
        let login_delay = get_delay_ms("LUXE_LOGIN_DELAY_MS", DEFAULT_LOGIN_DELAY_MS)?;
        let checkout_delay = get_delay_ms("LUXE_CHECKOUT_DELAY_MS", DEFAULT_CHECKOUT_DELAY_MS)?;

        Ok(Self {
            api_base_url,
            data_dir,
            login_delay,
            checkout_delay,
        })
    }

    /// A configuration with all defaults and zero simulated delays.
    ///
    /// Intended for tests and scripted use where the spinner theater of the
    /// interactive session has no audience.
    #[must_use]
    pub fn without_delays(data_dir: PathBuf) -> Self {
        Self {
            api_base_url: Url::parse(DEFAULT_API_BASE_URL)
                .unwrap_or_else(|_| unreachable!("default API URL is valid")),
            data_dir,
            login_delay: Duration::ZERO,
            checkout_delay: Duration::ZERO,
        }
    }
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse a millisecond delay variable into a [`Duration`].
fn get_delay_ms(key: &str, default_ms: u64) -> Result<Duration, ConfigError> {
    let ms = match std::env::var(key) {
        Ok(value) => value
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?,
        Err(_) => default_ms,
    };
    Ok(Duration::from_millis(ms))
}
