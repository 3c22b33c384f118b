//! Configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `WC_URL` - Store base URL (e.g., `https://shop.example.com`)
//! - `WC_CONSUMER_KEY` - WooCommerce REST API consumer key
//! - `WC_CONSUMER_SECRET` - WooCommerce REST API consumer secret
//! - `WP_USERNAME` - WordPress user that owns the application password
//! - `WP_APPLICATION_PASSWORD` - WordPress application password (media uploads)
//!
//! ## Optional
//! - `WC_API_VERSION` - REST API version (default: wc/v3)
//! - `WC_TIMEOUT_SECS` - Product request timeout in seconds (default: 5)
//! - `WC_QUERY_STRING_AUTH` - Send consumer credentials as query parameters
//!   over HTTPS instead of basic auth (default: false)
//! - `LOG_FILE` - Log file path (default: app.log)
//! - `LOG_ROTATION_BYTES` - Rotate the log file past this size (default: 1 MB)
//! - `LOG_FORMAT` - Log file format, `text` or `json` (default: text)
//!
//! A variable that is set to an empty string counts as missing.

use std::path::{Path, PathBuf};
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

const DEFAULT_API_VERSION: &str = "wc/v3";
const DEFAULT_TIMEOUT_SECS: u64 = 5;
const DEFAULT_LOG_FILE: &str = "app.log";
const DEFAULT_LOG_ROTATION_BYTES: u64 = 1024 * 1024;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing WooCommerce credentials: {} not set", .0.join(", "))]
    MissingEnvVars(Vec<&'static str>),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Failed to load env file {0}: {1}")]
    EnvFile(String, String),
}

/// Application configuration.
///
/// Built once at startup and only read afterwards.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Store base URL without a trailing slash
    pub store_url: String,
    /// WooCommerce REST API configuration
    pub woocommerce: WooCommerceConfig,
    /// WordPress media upload credentials
    pub wordpress: WordPressConfig,
    /// Log file configuration
    pub logging: LogConfig,
}

/// WooCommerce REST API configuration.
///
/// Implements `Debug` manually to redact the consumer secret.
#[derive(Clone)]
pub struct WooCommerceConfig {
    /// Consumer key (ck_...)
    pub consumer_key: String,
    /// Consumer secret (cs_...)
    pub consumer_secret: SecretString,
    /// API version path segment (e.g., wc/v3)
    pub api_version: String,
    /// Per-request timeout
    pub timeout: Duration,
    /// Send credentials in the query string over HTTPS
    pub query_string_auth: bool,
}

impl std::fmt::Debug for WooCommerceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WooCommerceConfig")
            .field("consumer_key", &self.consumer_key)
            .field("consumer_secret", &"[REDACTED]")
            .field("api_version", &self.api_version)
            .field("timeout", &self.timeout)
            .field("query_string_auth", &self.query_string_auth)
            .finish()
    }
}

/// WordPress basic-auth credentials for the media endpoint.
///
/// Implements `Debug` manually to redact the application password.
#[derive(Clone)]
pub struct WordPressConfig {
    /// WordPress username
    pub username: String,
    /// Application password
    pub application_password: SecretString,
}

impl std::fmt::Debug for WordPressConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WordPressConfig")
            .field("username", &self.username)
            .field("application_password", &"[REDACTED]")
            .finish()
    }
}

/// Log file configuration.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Active log file path
    pub file: PathBuf,
    /// Size in bytes after which the file is rotated
    pub rotation_bytes: u64,
    /// Write the file as JSON lines instead of text
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            file: PathBuf::from(DEFAULT_LOG_FILE),
            rotation_bytes: DEFAULT_LOG_ROTATION_BYTES,
            json: false,
        }
    }
}

impl AppConfig {
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
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from a specific env file, then the environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::EnvFile` if the file cannot be read, or any
    /// error from [`AppConfig::from_lookup`].
    pub fn from_env_file(path: &Path) -> Result<Self, ConfigError> {
        dotenvy::from_path(path)
            .map_err(|e| ConfigError::EnvFile(path.display().to_string(), e.to_string()))?;
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// All missing required variables are reported together.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Env { lookup };
        let mut missing = Vec::new();

        let store_url = env.required("WC_URL", &mut missing);
        let consumer_key = env.required("WC_CONSUMER_KEY", &mut missing);
        let consumer_secret = env.required("WC_CONSUMER_SECRET", &mut missing);
        let username = env.required("WP_USERNAME", &mut missing);
        let application_password = env.required("WP_APPLICATION_PASSWORD", &mut missing);

        let (
            Some(store_url),
            Some(consumer_key),
            Some(consumer_secret),
            Some(username),
            Some(application_password),
        ) = (
            store_url,
            consumer_key,
            consumer_secret,
            username,
            application_password,
        )
        else {
            return Err(ConfigError::MissingEnvVars(missing));
        };

        let woocommerce = WooCommerceConfig {
            consumer_key,
            consumer_secret: SecretString::from(consumer_secret),
            api_version: env
                .optional("WC_API_VERSION")
                .map_or_else(|| DEFAULT_API_VERSION.to_string(), |v| v.trim_matches('/').to_string()),
            timeout: Duration::from_secs(env.parsed_or("WC_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?),
            query_string_auth: env
                .optional("WC_QUERY_STRING_AUTH")
                .map(|v| parse_bool("WC_QUERY_STRING_AUTH", &v))
                .transpose()?
                .unwrap_or(false),
        };

        let rotation_bytes = env.parsed_or("LOG_ROTATION_BYTES", DEFAULT_LOG_ROTATION_BYTES)?;
        if rotation_bytes == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "LOG_ROTATION_BYTES".to_string(),
                "must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            store_url: normalize_store_url(&store_url)?,
            woocommerce,
            wordpress: WordPressConfig {
                username,
                application_password: SecretString::from(application_password),
            },
            logging: LogConfig {
                file: env
                    .optional("LOG_FILE")
                    .map_or_else(|| PathBuf::from(DEFAULT_LOG_FILE), PathBuf::from),
                rotation_bytes,
                json: env
                    .optional("LOG_FORMAT")
                    .map(|v| parse_log_format(&v))
                    .transpose()?
                    .unwrap_or(false),
            },
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

struct Env<F> {
    lookup: F,
}

impl<F> Env<F>
where
    F: Fn(&str) -> Option<String>,
{
    /// Get an optional variable, treating empty values as unset.
    fn optional(&self, key: &str) -> Option<String> {
        (self.lookup)(key).filter(|v| !v.trim().is_empty())
    }

    /// Get a required variable, recording its name if missing.
    fn required(&self, key: &'static str, missing: &mut Vec<&'static str>) -> Option<String> {
        let value = self.optional(key);
        if value.is_none() {
            missing.push(key);
        }
        value
    }

    /// Parse an optional variable, falling back to a default.
    fn parsed_or<T>(&self, key: &str, default: T) -> Result<T, ConfigError>
    where
        T: std::str::FromStr,
        T::Err: std::fmt::Display,
    {
        self.optional(key).map_or(Ok(default), |v| {
            v.trim()
                .parse()
                .map_err(|e: T::Err| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
        })
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("expected true or false, got {other:?}"),
        )),
    }
}

/// `json` selects JSON lines; `text` the default format.
fn parse_log_format(value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "json" => Ok(true),
        "text" => Ok(false),
        other => Err(ConfigError::InvalidEnvVar(
            "LOG_FORMAT".to_string(),
            format!("expected text or json, got {other:?}"),
        )),
    }
}

/// Validate the store URL and strip trailing slashes.
fn normalize_store_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let url = Url::parse(trimmed)
        .map_err(|e| ConfigError::InvalidEnvVar("WC_URL".to_string(), e.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            "WC_URL".to_string(),
            format!("unsupported scheme {:?}", url.scheme()),
        ));
    }

    Ok(trimmed.to_string())
}
