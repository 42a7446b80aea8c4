//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `PLANTSHOP_HOST` - Bind address (default: 127.0.0.1)
//! - `PLANTSHOP_PORT` - Listen port (default: 3000)
//! - `PLANTSHOP_CATALOG_URL` - Catalog API base URL
//!   (default: <https://openapi.programming-hero.com/api>)
//! - `PLANTSHOP_PAGE_IDLE_SECS` - Seconds before an idle page session is dropped (default: 1800)
//! - `PLANTSHOP_MAX_PAGES` - Maximum number of live page sessions (default: 10000)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error event sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Performance trace sample rate (default: 0.0)

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Public catalog API used when `PLANTSHOP_CATALOG_URL` is not set.
pub const DEFAULT_CATALOG_URL: &str = "https://openapi.programming-hero.com/api";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Catalog API configuration
    pub catalog: CatalogConfig,
    /// Page session limits
    pub pages: PageConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g. "production")
    pub sentry_environment: Option<String>,
    /// Fraction of error events sent to Sentry
    pub sentry_sample_rate: f32,
    /// Fraction of transactions traced
    pub sentry_traces_sample_rate: f32,
}

/// Remote plant catalog configuration.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Base URL; endpoint paths are appended to it.
    pub base_url: Url,
}

/// Page session registry configuration.
#[derive(Debug, Clone)]
pub struct PageConfig {
    /// Idle time after which a page's cart is forgotten.
    pub idle_timeout: Duration,
    /// Maximum number of page sessions kept in memory.
    pub max_pages: u64,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            idle_timeout: Duration::from_secs(30 * 60),
            max_pages: 10_000,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = parse_or_default::<IpAddr>(&lookup, "PLANTSHOP_HOST", "127.0.0.1")?;
        let port = parse_or_default::<u16>(&lookup, "PLANTSHOP_PORT", "3000")?;

        let catalog_url = lookup("PLANTSHOP_CATALOG_URL")
            .unwrap_or_else(|| DEFAULT_CATALOG_URL.to_string());
        let catalog = CatalogConfig {
            base_url: parse_catalog_url("PLANTSHOP_CATALOG_URL", &catalog_url)?,
        };

        let idle_secs = parse_or_default::<u64>(&lookup, "PLANTSHOP_PAGE_IDLE_SECS", "1800")?;
        if idle_secs == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "PLANTSHOP_PAGE_IDLE_SECS".to_string(),
                "must be greater than zero".to_string(),
            ));
        }
        let pages = PageConfig {
            idle_timeout: Duration::from_secs(idle_secs),
            max_pages: parse_or_default::<u64>(&lookup, "PLANTSHOP_MAX_PAGES", "10000")?,
        };

        Ok(Self {
            host,
            port,
            catalog,
            pages,
            sentry_dsn: lookup("SENTRY_DSN").filter(|dsn| !dsn.is_empty()),
            sentry_environment: lookup("SENTRY_ENVIRONMENT"),
            sentry_sample_rate: parse_or_default::<f32>(&lookup, "SENTRY_SAMPLE_RATE", "1.0")?,
            sentry_traces_sample_rate: parse_or_default::<f32>(
                &lookup,
                "SENTRY_TRACES_SAMPLE_RATE",
                "0.0",
            )?,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse a variable, falling back to `default` when unset.
fn parse_or_default<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: &str,
) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let raw = lookup(key).unwrap_or_else(|| default.to_string());
    raw.trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// Validate the catalog base URL.
///
/// A trailing slash is added so that endpoint paths join underneath it.
fn parse_catalog_url(key: &str, raw: &str) -> Result<Url, ConfigError> {
    let mut url =
        Url::parse(raw).map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    Ok(url)
}
