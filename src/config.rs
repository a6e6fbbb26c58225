//! Service configuration loaded from environment variables.
//!
//! Follows 12-factor style: all settings come from environment variables
//! (or a `.env` file via `dotenvy`).

use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

/// Which record store backs the service.
#[derive(Clone, PartialEq, Eq)]
pub enum StorageBackend {
    /// In-process maps; data is lost on restart.
    Memory,
    /// PostgreSQL through `sqlx`.
    Postgres {
        /// Connection string.
        database_url: String,
    },
}

impl StorageBackend {
    /// Short name of the backend, safe to log.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::Postgres { .. } => "postgres",
        }
    }
}

// The connection string may carry credentials.
impl fmt::Debug for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Value of `STORAGE_BACKEND`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BackendKind {
    Memory,
    Postgres,
}

impl FromStr for BackendKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "postgres" | "postgresql" => Ok(Self::Postgres),
            other => Err(ConfigError::UnknownBackend(other.to_string())),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines.
    Text,
    /// One JSON object per event.
    Json,
}

/// Configuration errors detected at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// `LISTEN_ADDR` is not a socket address.
    #[error("invalid LISTEN_ADDR {0:?}")]
    InvalidListenAddr(String),

    /// `PORT` is not a port number.
    #[error("invalid PORT {0:?}")]
    InvalidPort(String),

    /// `STORAGE_BACKEND` names an unknown backend.
    #[error("unknown STORAGE_BACKEND {0:?} (expected memory or postgres)")]
    UnknownBackend(String),

    /// `postgres` was selected but no connection string was given.
    #[error("DATABASE_URL must be set when STORAGE_BACKEND=postgres")]
    MissingDatabaseUrl,
}

/// Top-level service configuration.
///
/// Loaded once at startup via [`AppConfig::from_env`].
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Socket address to bind the HTTP server to (e.g. `0.0.0.0:3000`).
    pub listen_addr: SocketAddr,

    /// Selected record store, with its connection string when it needs
    /// one.
    pub storage_backend: StorageBackend,

    /// Maximum number of database connections in the pool.
    pub database_max_connections: u32,

    /// Minimum idle connections in the pool.
    pub database_min_connections: u32,

    /// Timeout in seconds for acquiring a database connection.
    pub database_connect_timeout_secs: u64,

    /// Log output format.
    pub log_format: LogFormat,
}

impl AppConfig {
    /// Loads configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if an address, port or backend cannot
    /// be parsed, or `postgres` is selected without `DATABASE_URL`.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds configuration from an arbitrary key lookup, falling back to
    /// defaults when a key is absent.
    ///
    /// # Errors
    ///
    /// See [`AppConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw_addr = lookup("LISTEN_ADDR").unwrap_or_else(|| "0.0.0.0:3000".to_string());
        let mut listen_addr: SocketAddr = raw_addr
            .parse()
            .map_err(|_| ConfigError::InvalidListenAddr(raw_addr.clone()))?;

        if let Some(raw_port) = lookup("PORT") {
            let port = raw_port
                .parse()
                .map_err(|_| ConfigError::InvalidPort(raw_port.clone()))?;
            listen_addr.set_port(port);
        }

        let database_url = lookup("DATABASE_URL").filter(|url| !url.is_empty());

        let kind = match lookup("STORAGE_BACKEND") {
            Some(raw) => raw.parse()?,
            None if database_url.is_some() => BackendKind::Postgres,
            None => BackendKind::Memory,
        };
        let storage_backend = match (kind, database_url) {
            (BackendKind::Memory, _) => StorageBackend::Memory,
            (BackendKind::Postgres, Some(database_url)) => {
                StorageBackend::Postgres { database_url }
            }
            (BackendKind::Postgres, None) => return Err(ConfigError::MissingDatabaseUrl),
        };

        let log_format = match lookup("LOG_FORMAT").as_deref() {
            Some("json") | Some("JSON") => LogFormat::Json,
            _ => LogFormat::Text,
        };

        Ok(Self {
            listen_addr,
            storage_backend,
            database_max_connections: parse_env(&lookup, "DATABASE_MAX_CONNECTIONS", 10),
            database_min_connections: parse_env(&lookup, "DATABASE_MIN_CONNECTIONS", 1),
            database_connect_timeout_secs: parse_env(&lookup, "DATABASE_CONNECT_TIMEOUT_SECS", 5),
            log_format,
        })
    }
}

/// Parses a variable as `T`, returning `default` on missing or invalid
/// values.
fn parse_env<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    lookup(key).and_then(|v| v.parse().ok()).unwrap_or(default)
}
