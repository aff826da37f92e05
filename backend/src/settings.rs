//! Environment-driven process settings.
//!
//! Everything is read through [`mockable::Env`] so parsing can be exercised
//! with `MockEnv` instead of mutating the process environment.

use std::fmt;
use std::net::SocketAddr;

use actix_web::http::Uri;
use mockable::Env;
use zeroize::Zeroizing;

use crate::domain::RowLimit;

const DATABASE_URL_ENV: &str = "DATABASE_URL";
const API_KEY_ENV: &str = "API_KEY";
const ADMIN_KEY_ENV: &str = "ADMIN_KEY";
const COOKIE_DOMAIN_ENV: &str = "COOKIE_DOMAIN";
const ROW_LIMIT_ENV: &str = "ROW_LIMIT";
const POOL_MIN_ENV: &str = "DB_POOL_MIN_SIZE";
const POOL_MAX_ENV: &str = "DB_POOL_MAX_SIZE";
const BIND_ADDR_ENV: &str = "BIND_ADDR";
const PORT_ENV: &str = "PORT";
const RUN_MIGRATIONS_ENV: &str = "RUN_MIGRATIONS";
const CORS_ORIGINS_ENV: &str = "CORS_ORIGINS";

const DEFAULT_POOL_MIN: u32 = 2;
const DEFAULT_POOL_MAX: u32 = 10;
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_CORS_ORIGINS: [&str; 3] = [
    "https://find-my-bike.netlify.app",
    "https://find-my-bike.krokotsch.eu",
    "http://localhost:3000",
];

const BOOL_EXPECTED: &str = "1|0|true|false|yes|no|y|n";

/// Errors raised while reading settings.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum SettingsError {
    /// A required environment variable is missing.
    #[error("missing required environment variable: {name}")]
    MissingEnv { name: &'static str },
    /// A variable is present but contains an invalid value.
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// String that is wiped from memory on drop and never printed by `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(Zeroizing<String>);

impl Secret {
    /// Wrap `value`.
    pub fn new(value: impl Into<String>) -> Self {
        Self(Zeroizing::new(value.into()))
    }

    /// Borrow the secret value.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret([redacted])")
    }
}

/// Settings for one server process.
#[derive(Debug, Clone)]
pub struct AppSettings {
    /// PostgreSQL connection string.
    pub database_url: Secret,
    /// Key accepted from any client.
    pub api_key: Secret,
    /// Key required for admin endpoints.
    pub admin_key: Secret,
    /// `Domain` attribute of the `access_token` cookie.
    pub cookie_domain: String,
    /// Row budget shared by postings and corrections.
    pub row_limit: RowLimit,
    /// Idle connections kept in the pool.
    pub pool_min_size: u32,
    /// Upper bound on pooled connections.
    pub pool_max_size: u32,
    /// Listen address.
    pub bind_addr: SocketAddr,
    /// Apply pending migrations before serving.
    pub run_migrations: bool,
    /// Browser origins allowed to make credentialed cross-origin calls.
    pub cors_origins: Vec<String>,
}

/// Read [`AppSettings`] from `env`.
///
/// # Examples
///
/// ```rust
/// use find_my_bike::settings::settings_from_env;
/// use mockable::MockEnv;
///
/// let mut env = MockEnv::new();
/// env.expect_string().returning(|name| match name {
///     "DATABASE_URL" => Some("postgres://localhost/bikes".to_owned()),
///     "API_KEY" => Some("public".to_owned()),
///     "ADMIN_KEY" => Some("private".to_owned()),
///     "COOKIE_DOMAIN" => Some("localhost".to_owned()),
///     "ROW_LIMIT" => Some("10000".to_owned()),
///     _ => None,
/// });
///
/// let settings = settings_from_env(&env).expect("valid settings");
/// assert_eq!(settings.row_limit.get(), 10_000);
/// assert_eq!(settings.bind_addr.port(), 8000);
/// ```
///
/// # Errors
///
/// Returns [`SettingsError`] for the first missing or malformed variable.
pub fn settings_from_env<E: Env>(env: &E) -> Result<AppSettings, SettingsError> {
    let database_url = Secret::new(required(env, DATABASE_URL_ENV)?);
    let api_key = Secret::new(required(env, API_KEY_ENV)?);
    let admin_key = Secret::new(required(env, ADMIN_KEY_ENV)?);
    let cookie_domain = required(env, COOKIE_DOMAIN_ENV)?;
    let row_limit = row_limit_from_env(env)?;

    let pool_min_size = u32_or_default(env, POOL_MIN_ENV, DEFAULT_POOL_MIN)?;
    let pool_max_size = u32_or_default(env, POOL_MAX_ENV, DEFAULT_POOL_MAX)?;
    if pool_max_size == 0 {
        return Err(SettingsError::InvalidEnv {
            name: POOL_MAX_ENV,
            value: pool_max_size.to_string(),
            expected: "a positive integer",
        });
    }
    if pool_min_size > pool_max_size {
        return Err(SettingsError::InvalidEnv {
            name: POOL_MIN_ENV,
            value: pool_min_size.to_string(),
            expected: "a value no larger than DB_POOL_MAX_SIZE",
        });
    }

    Ok(AppSettings {
        database_url,
        api_key,
        admin_key,
        cookie_domain,
        row_limit,
        pool_min_size,
        pool_max_size,
        bind_addr: bind_addr_from_env(env)?,
        run_migrations: bool_or_default(env, RUN_MIGRATIONS_ENV, true)?,
        cors_origins: cors_origins_from_env(env)?,
    })
}

fn required<E: Env>(env: &E, name: &'static str) -> Result<String, SettingsError> {
    match env.string(name) {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(SettingsError::MissingEnv { name }),
    }
}

fn row_limit_from_env<E: Env>(env: &E) -> Result<RowLimit, SettingsError> {
    let raw = required(env, ROW_LIMIT_ENV)?;
    raw.parse().map_err(|_| SettingsError::InvalidEnv {
        name: ROW_LIMIT_ENV,
        value: raw,
        expected: "a non-negative integer",
    })
}

fn u32_or_default<E: Env>(env: &E, name: &'static str, default: u32) -> Result<u32, SettingsError> {
    let Some(raw) = env.string(name) else {
        return Ok(default);
    };
    raw.trim().parse().map_err(|_| SettingsError::InvalidEnv {
        name,
        value: raw,
        expected: "a non-negative integer",
    })
}

fn bool_or_default<E: Env>(
    env: &E,
    name: &'static str,
    default: bool,
) -> Result<bool, SettingsError> {
    let Some(raw) = env.string(name) else {
        return Ok(default);
    };
    parse_bool(&raw).ok_or(SettingsError::InvalidEnv {
        name,
        value: raw,
        expected: BOOL_EXPECTED,
    })
}

fn bind_addr_from_env<E: Env>(env: &E) -> Result<SocketAddr, SettingsError> {
    if let Some(raw) = env.string(BIND_ADDR_ENV) {
        return raw.trim().parse().map_err(|_| SettingsError::InvalidEnv {
            name: BIND_ADDR_ENV,
            value: raw,
            expected: "host:port",
        });
    }

    let port = match env.string(PORT_ENV) {
        Some(raw) => raw.trim().parse().map_err(|_| SettingsError::InvalidEnv {
            name: PORT_ENV,
            value: raw,
            expected: "a TCP port",
        })?,
        None => DEFAULT_PORT,
    };
    format!("{DEFAULT_HOST}:{port}")
        .parse()
        .map_err(|_| SettingsError::InvalidEnv {
            name: PORT_ENV,
            value: port.to_string(),
            expected: "a TCP port",
        })
}

/// Comma separated `scheme://host[:port]` origins. An empty value disables
/// cross-origin access.
fn cors_origins_from_env<E: Env>(env: &E) -> Result<Vec<String>, SettingsError> {
    let Some(raw) = env.string(CORS_ORIGINS_ENV) else {
        return Ok(DEFAULT_CORS_ORIGINS.map(str::to_owned).to_vec());
    };
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(|origin| {
            if is_origin(origin) {
                Ok(origin.to_owned())
            } else {
                Err(SettingsError::InvalidEnv {
                    name: CORS_ORIGINS_ENV,
                    value: origin.to_owned(),
                    expected: "comma separated scheme://host[:port] origins",
                })
            }
        })
        .collect()
}

fn is_origin(value: &str) -> bool {
    value.parse::<Uri>().is_ok_and(|uri| {
        uri.scheme().is_some()
            && uri.host().is_some()
            && uri.path_and_query().is_none_or(|p| p.as_str() == "/" || p.as_str().is_empty())
            && !value.ends_with('/')
    })
}

/// Parse the boolean spellings accepted across the process environment.
pub(crate) fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Some(true),
        "0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}
