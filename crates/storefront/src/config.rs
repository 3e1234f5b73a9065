//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required (postgres backend)
//! - `STOREFRONT_DATABASE_URL` - `PostgreSQL` connection string (falls back to
//!   `DATABASE_URL`)
//!
//! ## Optional
//! - `STOREFRONT_STORE` - Store backend, `postgres` or `memory` (default: postgres)
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `STOREFRONT_DB_MAX_CONNECTIONS` - Pool size (default: 10)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment tag

use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use secrecy::SecretString;
use thiserror::Error;

const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Where carts, orders and products live.
#[derive(Debug, Clone)]
pub enum StoreBackend {
    /// `PostgreSQL` document store.
    Postgres {
        /// Connection URL (contains password)
        database_url: SecretString,
        /// Upper bound on pooled connections
        max_connections: u32,
    },
    /// In-process store; contents are lost on restart.
    Memory,
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Store backend
    pub store: StoreBackend,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment tag
    pub sentry_environment: Option<String>,
}

impl StorefrontConfig {
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

    /// Build configuration from an arbitrary variable source.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let env = Env(&lookup);

        let store = match env.or_default("STOREFRONT_STORE", "postgres").as_str() {
            "postgres" => StoreBackend::Postgres {
                database_url: env.database_url("STOREFRONT_DATABASE_URL")?,
                max_connections: env.parsed(
                    "STOREFRONT_DB_MAX_CONNECTIONS",
                    DEFAULT_MAX_CONNECTIONS,
                )?,
            },
            "memory" => StoreBackend::Memory,
            other => {
                return Err(ConfigError::InvalidEnvVar(
                    "STOREFRONT_STORE".to_string(),
                    format!("unknown store backend '{other}' (expected postgres or memory)"),
                ));
            }
        };

        Ok(Self {
            store,
            host: env.parsed("STOREFRONT_HOST", IpAddr::from([127, 0, 0, 1]))?,
            port: env.parsed("STOREFRONT_PORT", 3000)?,
            sentry_dsn: env.optional("SENTRY_DSN"),
            sentry_environment: env.optional("SENTRY_ENVIRONMENT"),
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

struct Env<'a, F: Fn(&str) -> Option<String>>(&'a F);

impl<F: Fn(&str) -> Option<String>> Env<'_, F> {
    /// Get an optional variable. Empty values count as unset.
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|v| !v.trim().is_empty())
    }

    /// Get a variable with a default value.
    fn or_default(&self, key: &str, default: &str) -> String {
        self.optional(key).unwrap_or_else(|| default.to_string())
    }

    /// Parse a variable, falling back to `default` when unset.
    fn parsed<T>(&self, key: &str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        self.optional(key).map_or(Ok(default), |raw| {
            raw.trim()
                .parse()
                .map_err(|e: T::Err| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
        })
    }

    /// Get database URL with fallback to generic `DATABASE_URL`.
    fn database_url(&self, primary_key: &str) -> Result<SecretString, ConfigError> {
        self.optional(primary_key)
            .or_else(|| self.optional("DATABASE_URL"))
            .map(SecretString::from)
            .ok_or_else(|| ConfigError::MissingEnvVar(primary_key.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use secrecy::ExposeSecret;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<StorefrontConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        StorefrontConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults_with_database_url() {
        let config = load(&[("STOREFRONT_DATABASE_URL", "postgres://localhost/vibe")]);
        let Ok(config) = config else {
            panic!("config should load");
        };

        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:3000");
        assert!(config.sentry_dsn.is_none());
        let StoreBackend::Postgres {
            database_url,
            max_connections,
        } = config.store
        else {
            panic!("expected postgres backend");
        };
        assert_eq!(database_url.expose_secret(), "postgres://localhost/vibe");
        assert_eq!(max_connections, 10);
    }

    #[test]
    fn test_database_url_fallback() {
        let config = load(&[("DATABASE_URL", "postgres://fallback/db")]);
        assert!(matches!(
            config.map(|c| c.store),
            Ok(StoreBackend::Postgres { ref database_url, .. })
                if database_url.expose_secret() == "postgres://fallback/db"
        ));
    }

    #[test]
    fn test_postgres_requires_database_url() {
        let config = load(&[]);
        assert!(matches!(config, Err(ConfigError::MissingEnvVar(ref k)) if k == "STOREFRONT_DATABASE_URL"));
    }

    #[test]
    fn test_memory_backend_needs_no_database() {
        let config = load(&[
            ("STOREFRONT_STORE", "memory"),
            ("STOREFRONT_HOST", "0.0.0.0"),
            ("STOREFRONT_PORT", "8080"),
        ]);
        let Ok(config) = config else {
            panic!("config should load");
        };

        assert!(matches!(config.store, StoreBackend::Memory));
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:8080");
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(matches!(
            load(&[("STOREFRONT_STORE", "mongodb")]),
            Err(ConfigError::InvalidEnvVar(..))
        ));
        assert!(matches!(
            load(&[("STOREFRONT_STORE", "memory"), ("STOREFRONT_PORT", "http")]),
            Err(ConfigError::InvalidEnvVar(ref k, _)) if k == "STOREFRONT_PORT"
        ));
        assert!(matches!(
            load(&[
                ("STOREFRONT_DATABASE_URL", "postgres://x/y"),
                ("STOREFRONT_DB_MAX_CONNECTIONS", "-1"),
            ]),
            Err(ConfigError::InvalidEnvVar(..))
        ));
    }

    #[test]
    fn test_debug_redacts_database_url() {
        let config = load(&[("STOREFRONT_DATABASE_URL", "postgres://user:hunter2@db/vibe")]);
        let debug_output = format!("{config:?}");
        assert!(!debug_output.contains("hunter2"));
    }
}
