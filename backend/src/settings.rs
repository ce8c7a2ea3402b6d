//! Application settings loaded via OrthoConfig.
//!
//! Values come from `YAPA_*` environment variables, a `.yapa.toml` file or
//! command-line flags. Every field is optional; accessors supply the
//! defaults used for local development.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;
use zeroize::Zeroizing;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_PUBLIC_ORIGIN: &str = "http://localhost:8080";
const DEFAULT_IDENTITY_TIMEOUT_SECS: u64 = 10;
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 8;

/// Settings that cannot be turned into runtime values.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// `YAPA_BIND_ADDR` is not a socket address.
    #[error("invalid bind address '{value}': {source}")]
    BindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    /// A URL setting does not parse.
    #[error("invalid {name} '{value}': {source}")]
    Url {
        name: &'static str,
        value: String,
        #[source]
        source: url::ParseError,
    },
    /// A provider URL was given without its service key.
    #[error("YAPA_IDENTITY_URL is set but YAPA_IDENTITY_API_KEY is missing")]
    MissingIdentityKey,
    /// `YAPA_CODE_TTL_MINUTES` is below one.
    #[error("verification code TTL must be at least one minute, got {0}")]
    CodeTtl(i64),
}

/// Identity provider endpoint and service key.
pub struct IdentitySettings {
    pub base_url: Url,
    pub api_key: Zeroizing<String>,
    pub timeout: Duration,
}

/// Process settings, read with the `YAPA_` prefix.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "YAPA")]
pub struct Settings {
    /// Socket address the HTTP server binds to.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL. Without one the server runs on fixture adapters.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    pub db_max_connections: Option<u32>,
    /// Run embedded migrations before serving. Defaults to `true`.
    pub run_migrations: Option<bool>,
    /// Origin the browser sees; used for provider redirect links.
    pub public_origin: Option<String>,
    pub identity_url: Option<String>,
    pub identity_api_key: Option<String>,
    pub identity_timeout_secs: Option<u64>,
    /// Lifetime of emailed verification codes.
    pub code_ttl_minutes: Option<i64>,
}

impl Settings {
    /// Listen address, defaulting to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value.parse().map_err(|source| SettingsError::BindAddr {
            value: value.to_owned(),
            source,
        })
    }

    /// Return whether migrations run at startup, defaulting to `true`.
    pub fn run_migrations(&self) -> bool {
        self.run_migrations.unwrap_or(true)
    }

    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections
            .unwrap_or(DEFAULT_DB_MAX_CONNECTIONS)
    }

    /// Browser-facing origin, defaulting to `http://localhost:8080`.
    pub fn public_origin(&self) -> Result<Url, SettingsError> {
        let value = self.public_origin.as_deref().unwrap_or(DEFAULT_PUBLIC_ORIGIN);
        parse_url("YAPA_PUBLIC_ORIGIN", value)
    }

    /// `None` when no provider is configured; the server then signs users in
    /// through the fixture provider.
    pub fn identity(&self) -> Result<Option<IdentitySettings>, SettingsError> {
        let Some(url) = self.identity_url.as_deref() else {
            return Ok(None);
        };
        let api_key = self
            .identity_api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or(SettingsError::MissingIdentityKey)?;
        Ok(Some(IdentitySettings {
            base_url: parse_url("YAPA_IDENTITY_URL", url)?,
            api_key: Zeroizing::new(api_key),
            timeout: Duration::from_secs(
                self.identity_timeout_secs
                    .unwrap_or(DEFAULT_IDENTITY_TIMEOUT_SECS),
            ),
        }))
    }

    /// Verification code lifetime; at least one minute.
    pub fn code_ttl(&self) -> Result<chrono::Duration, SettingsError> {
        match self.code_ttl_minutes {
            None => Ok(crate::domain::verification::DEFAULT_CODE_TTL),
            Some(minutes) if minutes >= 1 => Ok(chrono::Duration::minutes(minutes)),
            Some(minutes) => Err(SettingsError::CodeTtl(minutes)),
        }
    }
}

fn parse_url(name: &'static str, value: &str) -> Result<Url, SettingsError> {
    Url::parse(value).map_err(|source| SettingsError::Url {
        name,
        value: value.to_owned(),
        source,
    })
}
