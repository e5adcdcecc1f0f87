/// Process configuration loaded from the environment
///
/// A `.env` file is read first when present; real environment variables win.
use crate::shared::errors::{AppError, AppResult};
use std::time::Duration;

const DEFAULT_SERVICE_PORT: u16 = 50051;
const DEFAULT_SERVICE_NAME: &str = "subscription";
const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 10_000;
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub database_url: String,
    pub db_max_connections: u32,
    pub service_port: u16,
    pub service_name: String,
    pub request_timeout: Duration,
    pub downstream: DownstreamEndpoints,
}

/// Base URLs of the four downstream services
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownstreamEndpoints {
    pub user_service: String,
    pub media_service: String,
    pub watchlist_service: String,
    pub review_service: String,
}

impl Config {
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup; `from_env` passes the process environment
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let require = |key: &str| {
            get(key).ok_or_else(|| {
                AppError::InvalidArgument(format!(
                    "missing required environment variable: {}",
                    key
                ))
            })
        };

        let database_url = match get("DATABASE_URL") {
            Some(url) => url,
            None => format!(
                "postgres://{}:{}@{}:{}/{}?sslmode={}",
                require("DB_USER")?,
                require("DB_PASSWORD")?,
                require("DB_HOST")?,
                require("DB_PORT")?,
                require("DB_NAME")?,
                get("DB_SSLMODE").unwrap_or_else(|| "disable".to_string()),
            ),
        };

        let endpoint = |prefix: &str| -> AppResult<String> {
            let host = require(&format!("{}_SERVICE_HOST", prefix))?;
            let port = require(&format!("{}_SERVICE_PORT", prefix))?;
            Ok(format!("http://{}:{}", host, port))
        };

        Ok(Self {
            database_url,
            db_max_connections: parse_or(
                get("DB_MAX_CONNECTIONS"),
                "DB_MAX_CONNECTIONS",
                DEFAULT_DB_MAX_CONNECTIONS,
            )?,
            service_port: parse_or(get("SERVICE_PORT"), "SERVICE_PORT", DEFAULT_SERVICE_PORT)?,
            service_name: get("SERVICE_NAME").unwrap_or_else(|| DEFAULT_SERVICE_NAME.to_string()),
            request_timeout: Duration::from_millis(parse_or(
                get("REQUEST_TIMEOUT_MS"),
                "REQUEST_TIMEOUT_MS",
                DEFAULT_REQUEST_TIMEOUT_MS,
            )?),
            downstream: DownstreamEndpoints {
                user_service: endpoint("USER")?,
                media_service: endpoint("MEDIA")?,
                watchlist_service: endpoint("WATCHLIST")?,
                review_service: endpoint("REVIEW")?,
            },
        })
    }

    pub fn listen_addr(&self) -> String {
        format!("0.0.0.0:{}", self.service_port)
    }
}

fn parse_or<T: std::str::FromStr>(value: Option<String>, key: &str, default: T) -> AppResult<T> {
    match value {
        Some(raw) => raw.trim().parse().map_err(|_| {
            AppError::InvalidArgument(format!("invalid value for {}: {}", key, raw))
        }),
        None => Ok(default),
    }
}
