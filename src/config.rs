//! Application configuration loaded from environment variables.
//!
//! Loaded once at startup by [`load_from_env`] and validated before the
//! server binds.
//!
//! ## Database
//!
//! `DATABASE_URL`, or the components it is assembled from when unset:
//! `DB_HOST` (default `localhost`), `DB_PORT` (default `5432`), `DB_USER`,
//! `DB_PASSWORD`, `DB_NAME`.
//!
//! Pool tuning: `DB_MAX_CONNECTIONS` (10), `DB_CONNECT_TIMEOUT` (30 s),
//! `DB_IDLE_TIMEOUT` (600 s), `DB_MAX_LIFETIME` (1800 s).
//!
//! ## Service
//!
//! | Variable | Default | Meaning |
//! |---|---|---|
//! | `API_TOKEN_HASHES` | required | Comma-separated SHA-256 hex digests of accepted tokens |
//! | `LISTEN` | `0.0.0.0:3000` | Bind address |
//! | `RUST_LOG` | `info` | Log filter |
//! | `LOG_FORMAT` | `text` | `text` or `json` |
//! | `CUSTOM_DOMAIN` | request `Host` | Host used in emitted short URLs |
//! | `DEFAULT_REDIRECT_URL` | none | Target for unknown codes instead of 404 |
//! | `CLICK_QUEUE_CAPACITY` | `10000` | Click buffer size, 100..=1000000 |
//! | `BEHIND_PROXY` | `false` | Rate-limit by `X-Forwarded-For` / `X-Real-IP` |

use anyhow::{Context, Result};
use regex::Regex;
use std::env;
use std::net::SocketAddr;
use std::ops::RangeInclusive;
use std::str::FromStr;
use std::sync::LazyLock;
use std::time::Duration;
use url::Url;

use crate::utils::url_validator::validate_http_url;

static TOKEN_HASH_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9a-fA-F]{64}$").expect("valid token hash regex"));

const CLICK_QUEUE_BOUNDS: RangeInclusive<usize> = 100..=1_000_000;

/// Output format of the log subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, thiserror::Error)]
#[error("expected 'text' or 'json', got '{0}'")]
pub struct UnknownLogFormat(String);

impl FromStr for LogFormat {
    type Err = UnknownLogFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(UnknownLogFormat(s.to_string())),
        }
    }
}

/// Connection pool limits.
#[derive(Debug, Clone)]
pub struct PoolSettings {
    pub max_connections: u32,
    /// How long a request may wait for a free connection.
    pub acquire_timeout: Duration,
    pub idle_timeout: Duration,
    pub max_lifetime: Duration,
}

impl PoolSettings {
    fn from_env() -> Result<Self> {
        Ok(Self {
            max_connections: parse_var("DB_MAX_CONNECTIONS", 10)?,
            acquire_timeout: Duration::from_secs(parse_var("DB_CONNECT_TIMEOUT", 30)?),
            idle_timeout: Duration::from_secs(parse_var("DB_IDLE_TIMEOUT", 600)?),
            max_lifetime: Duration::from_secs(parse_var("DB_MAX_LIFETIME", 1800)?),
        })
    }
}

/// Service configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub pool: PoolSettings,
    pub listen_addr: SocketAddr,
    pub log_level: String,
    pub log_format: LogFormat,
    /// Host embedded in short URLs. Falls back to the request `Host` header.
    pub custom_domain: Option<String>,
    /// Redirect target for unknown codes. Unknown codes return 404 when unset.
    pub default_redirect_url: Option<String>,
    pub click_queue_capacity: usize,
    /// Rate limiting keys on forwarded client IPs. Only safe behind a
    /// trusted reverse proxy.
    pub behind_proxy: bool,
    /// Lowercase SHA-256 hex digests of accepted bearer tokens.
    pub api_token_hashes: Vec<String>,
}

impl Config {
    /// Reads every variable, applying defaults.
    ///
    /// # Errors
    ///
    /// Fails when the database is not configured or a variable is present
    /// but does not parse.
    pub fn from_env() -> Result<Self> {
        let database_url =
            Self::load_database_url().context("Failed to load database configuration")?;

        Ok(Self {
            database_url,
            pool: PoolSettings::from_env()?,
            listen_addr: parse_var("LISTEN", SocketAddr::from(([0, 0, 0, 0], 3000)))?,
            log_level: non_empty_var("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            log_format: parse_var("LOG_FORMAT", LogFormat::Text)?,
            custom_domain: non_empty_var("CUSTOM_DOMAIN"),
            default_redirect_url: non_empty_var("DEFAULT_REDIRECT_URL"),
            click_queue_capacity: parse_var("CLICK_QUEUE_CAPACITY", 10_000)?,
            behind_proxy: flag_var("BEHIND_PROXY"),
            api_token_hashes: non_empty_var("API_TOKEN_HASHES")
                .map(|raw| parse_token_hashes(&raw))
                .unwrap_or_default(),
        })
    }

    /// Resolves the PostgreSQL URL: `DATABASE_URL` when set, otherwise
    /// assembled from the `DB_*` components.
    ///
    /// Shared with the admin CLI, which needs nothing else from the config.
    ///
    /// # Errors
    ///
    /// Fails when `DATABASE_URL` is unset and a required component is missing.
    pub fn load_database_url() -> Result<String> {
        if let Some(url) = non_empty_var("DATABASE_URL") {
            return Ok(url);
        }

        let required = |name: &str| {
            non_empty_var(name)
                .with_context(|| format!("{name} must be set when DATABASE_URL is not provided"))
        };

        let user = required("DB_USER")?;
        let password = required("DB_PASSWORD")?;
        let name = required("DB_NAME")?;
        let host = non_empty_var("DB_HOST").unwrap_or_else(|| "localhost".to_string());
        let port = non_empty_var("DB_PORT").unwrap_or_else(|| "5432".to_string());

        Ok(format!("postgres://{user}:{password}@{host}:{port}/{name}"))
    }

    /// Checks cross-field rules and value ranges that parsing alone cannot.
    ///
    /// # Errors
    ///
    /// Returns the first violated rule.
    pub fn validate(&self) -> Result<()> {
        if !CLICK_QUEUE_BOUNDS.contains(&self.click_queue_capacity) {
            anyhow::bail!(
                "CLICK_QUEUE_CAPACITY must be within {}..={}, got {}",
                CLICK_QUEUE_BOUNDS.start(),
                CLICK_QUEUE_BOUNDS.end(),
                self.click_queue_capacity
            );
        }

        let scheme = Url::parse(&self.database_url)
            .map(|u| u.scheme().to_string())
            .unwrap_or_default();
        if scheme != "postgres" && scheme != "postgresql" {
            anyhow::bail!(
                "DATABASE_URL must be a postgres:// or postgresql:// URL, got '{}'",
                mask_connection_string(&self.database_url)
            );
        }

        if let Some(url) = &self.default_redirect_url {
            validate_http_url(url)
                .with_context(|| format!("DEFAULT_REDIRECT_URL is invalid: '{url}'"))?;
        }

        if self.api_token_hashes.is_empty() {
            anyhow::bail!(
                "API_TOKEN_HASHES must list at least one token digest (see `admin token generate`)"
            );
        }
        if let Some(bad) = self
            .api_token_hashes
            .iter()
            .find(|h| !TOKEN_HASH_REGEX.is_match(h))
        {
            anyhow::bail!("API_TOKEN_HASHES entry '{bad}' is not a 64-character hex digest");
        }

        if self.pool.max_connections == 0 {
            anyhow::bail!("DB_MAX_CONNECTIONS must be at least 1");
        }
        if self.pool.acquire_timeout.is_zero() {
            anyhow::bail!("DB_CONNECT_TIMEOUT must be greater than 0");
        }

        Ok(())
    }

    /// Logs the effective configuration with credentials masked.
    pub fn print_summary(&self) {
        tracing::info!(
            listen = %self.listen_addr,
            database = %mask_connection_string(&self.database_url),
            pool_size = self.pool.max_connections,
            custom_domain = self.custom_domain.as_deref().unwrap_or("(request host)"),
            default_redirect = self.default_redirect_url.as_deref().unwrap_or("(none)"),
            api_tokens = self.api_token_hashes.len(),
            log_level = %self.log_level,
            log_format = ?self.log_format,
            click_queue_capacity = self.click_queue_capacity,
            behind_proxy = self.behind_proxy,
            "Configuration loaded"
        );
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn flag_var(name: &str) -> bool {
    non_empty_var(name).is_some_and(|v| v.eq_ignore_ascii_case("true") || v == "1")
}

/// Parses a variable when present; `default` when unset or blank.
fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match non_empty_var(name) {
        Some(raw) => raw
            .parse()
            .with_context(|| format!("{name} has an invalid value '{raw}'")),
        None => Ok(default),
    }
}

fn parse_token_hashes(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|h| !h.is_empty())
        .map(str::to_ascii_lowercase)
        .collect()
}

/// Replaces the password of a connection URL with `***`.
///
/// Strings that do not parse as URLs are hidden entirely, since they may
/// still carry a credential.
fn mask_connection_string(raw: &str) -> String {
    match Url::parse(raw) {
        Ok(mut url) => {
            if url.password().is_some() {
                // only fails for URLs that cannot carry credentials at all
                let _ = url.set_password(Some("***"));
            }
            url.to_string()
        }
        Err(_) => "(unparseable)".to_string(),
    }
}

/// Loads and validates configuration.
///
/// Expects `.env` to have been applied already (`dotenvy::dotenv()` in
/// `main`).
///
/// # Errors
///
/// Fails when a variable is missing, malformed or out of range.
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
