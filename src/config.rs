use std::env;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("environment variable {0} not set")]
    Missing(&'static str),
    #[error("environment variable {key} has invalid value {value:?}")]
    Invalid { key: &'static str, value: String },
}

/// Upper bound for `SESSION_TTL_HOURS` (ten years).
pub const MAX_SESSION_TTL_HOURS: i64 = 24 * 365 * 10;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub auth: AuthSettings,
}

/// Settings shared with handlers through `AddData`.
#[derive(Clone, Debug)]
pub struct AuthSettings {
    pub secret_key: String,
    pub bcrypt_cost: u32,
    pub session_ttl_hours: i64,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| lookup(key).ok_or(ConfigError::Missing(key));

        let database_url = match lookup("DATABASE_URL") {
            Some(url) => url,
            None => format!(
                "postgres://{}:{}@{}/{}",
                required("DB_USER")?,
                required("DB_PASSWORD")?,
                required("DB_HOST")?,
                required("DB_NAME")?,
            ),
        };

        Ok(AppConfig {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or(&lookup, "PORT", 4000)?,
            database_url,
            auth: AuthSettings {
                secret_key: required("SECRET_KEY")?,
                bcrypt_cost: parse_or(&lookup, "BCRYPT_COST", bcrypt::DEFAULT_COST)?,
                session_ttl_hours: parse_session_ttl(&lookup)?,
            },
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Settings for the demo server; it has no database or sessions.
#[derive(Clone, Debug)]
pub struct DemoConfig {
    pub host: String,
    pub port: u16,
}

impl DemoConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(DemoConfig {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or(&lookup, "DEMO_PORT", 5000)?,
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_session_ttl<F>(lookup: &F) -> Result<i64, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let hours: i64 = parse_or(lookup, "SESSION_TTL_HOURS", 24)?;
    if !(1..=MAX_SESSION_TTL_HOURS).contains(&hours) {
        return Err(ConfigError::Invalid {
            key: "SESSION_TTL_HOURS",
            value: hours.to_string(),
        });
    }
    Ok(hours)
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(value) => value
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
        None => Ok(default),
    }
}
