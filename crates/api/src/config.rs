use std::str::FromStr;

/// Configuration that could not be loaded.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{var} has invalid value '{value}': {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Server configuration loaded from environment variables.
///
/// Only the database connection string is required; everything else has a
/// default suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host the HTTP listener binds to. May be an IP address or a hostname;
    /// it is resolved when the listener binds.
    pub host: String,
    /// Port the HTTP listener binds to.
    pub port: u16,
    /// PostgreSQL connection string.
    pub database_url: String,
    /// Upper bound on pooled database connections (default: `10`).
    pub max_pool_size: u32,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Time allowed for in-flight requests to drain on shutdown (default: `30`).
    pub shutdown_timeout_secs: u64,
    /// Service name reported by `/health` and the startup log.
    pub app_name: String,
    /// Service version reported by `/health`.
    pub app_version: String,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default                               |
    /// |-------------------------|---------------------------------------|
    /// | `SERVER_ADDRESS`        | `$HOST:$PORT`                         |
    /// | `HOST`                  | `0.0.0.0` (IP address or hostname)    |
    /// | `PORT`                  | `8080`                                |
    /// | `POSTGRES_CONN`         | `$DATABASE_URL` (one is required)     |
    /// | `MAX_POOL_SIZE`         | `10`                                  |
    /// | `CORS_ORIGINS`          | `http://localhost:5173`               |
    /// | `REQUEST_TIMEOUT_SECS`  | `30`                                  |
    /// | `SHUTDOWN_TIMEOUT_SECS` | `30`                                  |
    /// | `APP_NAME`              | `tenderflow`                          |
    /// | `VERSION`               | crate version                         |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key/value source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let (host, port) = match lookup("SERVER_ADDRESS") {
            Some(value) => split_host_port(value)?,
            None => (
                lookup("HOST").unwrap_or_else(|| "0.0.0.0".into()),
                parse_or("PORT", &lookup, 8080)?,
            ),
        };

        let database_url = lookup("POSTGRES_CONN")
            .or_else(|| lookup("DATABASE_URL"))
            .ok_or(ConfigError::Missing("POSTGRES_CONN or DATABASE_URL"))?;

        let cors_origins: Vec<String> = lookup("CORS_ORIGINS")
            .unwrap_or_else(|| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Self {
            host,
            port,
            database_url,
            max_pool_size: parse_or("MAX_POOL_SIZE", &lookup, 10)?,
            cors_origins,
            request_timeout_secs: parse_or("REQUEST_TIMEOUT_SECS", &lookup, 30)?,
            shutdown_timeout_secs: parse_or("SHUTDOWN_TIMEOUT_SECS", &lookup, 30)?,
            app_name: lookup("APP_NAME").unwrap_or_else(|| "tenderflow".into()),
            app_version: lookup("VERSION").unwrap_or_else(|| env!("CARGO_PKG_VERSION").into()),
        })
    }

    /// `host:port` as configured, for logging.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Split `host:port`, accepting a bracketed IPv6 host.
fn split_host_port(value: String) -> Result<(String, u16), ConfigError> {
    let invalid = |reason: &str| ConfigError::Invalid {
        var: "SERVER_ADDRESS",
        value: value.clone(),
        reason: reason.to_string(),
    };
    let (host, port) = value
        .trim()
        .rsplit_once(':')
        .ok_or_else(|| invalid("expected host:port"))?;
    let host = host.trim_start_matches('[').trim_end_matches(']');
    if host.is_empty() {
        return Err(invalid("host is empty"));
    }
    let port = port.parse().map_err(|e: std::num::ParseIntError| invalid(&e.to_string()))?;
    Ok((host.to_string(), port))
}

fn parse_var<T>(var: &'static str, value: String) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
        var,
        reason: e.to_string(),
        value,
    })
}

fn parse_or<T, F>(var: &'static str, lookup: &F, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(var) {
        Some(value) => parse_var(var, value),
        None => Ok(default),
    }
}
