//! Runtime configuration parsed from environment variables.
//!
//! Every knob has a default so a bare `cargo run` serves an in-memory
//! gateway. Parsing goes through a lookup closure so tests never touch the
//! process environment.

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_SESSION_TTL_HOURS: i64 = 24 * 7;
const MAX_SESSION_TTL_HOURS: i64 = 24 * 365 * 10;
const MIN_BCRYPT_COST: u32 = 4;
const MAX_BCRYPT_COST: u32 = 31;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
    #[error("{key} must be between {min} and {max}, got {value}")]
    OutOfRange { key: &'static str, min: i64, max: i64, value: i64 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Postgres URL. `None` selects the in-memory account store.
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    pub port: u16,
    pub bcrypt_cost: u32,
    pub session_ttl_hours: i64,
    pub cookie_secure: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: None,
            db_max_connections: DEFAULT_DB_MAX_CONNECTIONS,
            port: DEFAULT_PORT,
            bcrypt_cost: bcrypt::DEFAULT_COST,
            session_ttl_hours: DEFAULT_SESSION_TTL_HOURS,
            cookie_secure: false,
        }
    }
}

impl Config {
    /// Build typed config from the process environment.
    ///
    /// Optional:
    /// - `DATABASE_URL`: in-memory store when absent
    /// - `DB_MAX_CONNECTIONS`: default 5
    /// - `PORT`: default 3000
    /// - `BCRYPT_COST`: default `bcrypt::DEFAULT_COST`, 4..=31
    /// - `SESSION_TTL_HOURS`: default 168, at most ten years
    /// - `COOKIE_SECURE`: default false
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable is present but unparseable.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let database_url = lookup("DATABASE_URL").filter(|v| !v.trim().is_empty());
        let db_max_connections = parse_or(&lookup, "DB_MAX_CONNECTIONS", defaults.db_max_connections)?;
        let port = parse_or(&lookup, "PORT", defaults.port)?;

        let bcrypt_cost = parse_or(&lookup, "BCRYPT_COST", defaults.bcrypt_cost)?;
        if !(MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&bcrypt_cost) {
            return Err(ConfigError::OutOfRange {
                key: "BCRYPT_COST",
                min: i64::from(MIN_BCRYPT_COST),
                max: i64::from(MAX_BCRYPT_COST),
                value: i64::from(bcrypt_cost),
            });
        }

        let session_ttl_hours = parse_or(&lookup, "SESSION_TTL_HOURS", defaults.session_ttl_hours)?;
        if !(1..=MAX_SESSION_TTL_HOURS).contains(&session_ttl_hours) {
            return Err(ConfigError::OutOfRange {
                key: "SESSION_TTL_HOURS",
                min: 1,
                max: MAX_SESSION_TTL_HOURS,
                value: session_ttl_hours,
            });
        }

        let cookie_secure = match lookup("COOKIE_SECURE") {
            None => defaults.cookie_secure,
            Some(raw) => parse_bool(&raw).ok_or(ConfigError::Invalid { key: "COOKIE_SECURE", value: raw })?,
        };

        Ok(Self { database_url, db_max_connections, port, bcrypt_cost, session_ttl_hours, cookie_secure })
    }

    #[must_use]
    pub fn session_ttl(&self) -> time::Duration {
        time::Duration::hours(self.session_ttl_hours)
    }
}

pub(crate) fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::Invalid { key, value: raw }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
