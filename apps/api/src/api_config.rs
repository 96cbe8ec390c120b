use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use alumnet_core::AppError;
use alumnet_infrastructure::DEFAULT_STORE_TIMEOUT;
use tracing_subscriber::EnvFilter;

const MIN_BOOTSTRAP_TOKEN_LENGTH: usize = 32;

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub migrate_only: bool,
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    pub frontend_url: String,
    pub bootstrap_token: String,
    pub api_host: String,
    pub api_port: u16,
    pub cookie_secure: bool,
    pub store_timeout: Duration,
}

impl ApiConfig {
    pub fn load() -> Result<Self, AppError> {
        let migrate_only = env::args().nth(1).as_deref() == Some("migrate");

        let database_url = env::var("DATABASE_URL")
            .ok()
            .filter(|value| !value.trim().is_empty());
        if migrate_only && database_url.is_none() {
            return Err(AppError::Validation(
                "DATABASE_URL is required to run migrations".to_owned(),
            ));
        }

        let database_max_connections = parse_env("DATABASE_MAX_CONNECTIONS", 10_u32)?;
        let frontend_url =
            env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:3000".to_owned());

        let bootstrap_token = required_non_empty_env("AUTH_BOOTSTRAP_TOKEN")?;
        if bootstrap_token.len() < MIN_BOOTSTRAP_TOKEN_LENGTH {
            return Err(AppError::Validation(format!(
                "AUTH_BOOTSTRAP_TOKEN must be at least {MIN_BOOTSTRAP_TOKEN_LENGTH} characters"
            )));
        }

        let api_host = env::var("API_HOST").unwrap_or_else(|_| "127.0.0.1".to_owned());
        let api_port = env::var("API_PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(3001);

        let cookie_secure = env::var("SESSION_COOKIE_SECURE")
            .unwrap_or_else(|_| "false".to_owned())
            .eq_ignore_ascii_case("true");

        let default_timeout_ms = u64::try_from(DEFAULT_STORE_TIMEOUT.as_millis()).unwrap_or(5_000);
        let store_timeout_ms = parse_env("STORE_TIMEOUT_MS", default_timeout_ms)?;
        if store_timeout_ms == 0 {
            return Err(AppError::Validation(
                "STORE_TIMEOUT_MS must be greater than zero".to_owned(),
            ));
        }

        Ok(Self {
            migrate_only,
            database_url,
            database_max_connections,
            frontend_url,
            bootstrap_token,
            api_host,
            api_port,
            cookie_secure,
            store_timeout: Duration::from_millis(store_timeout_ms),
        })
    }

    pub fn socket_address(&self) -> Result<SocketAddr, AppError> {
        let host = IpAddr::from_str(&self.api_host).map_err(|error| {
            AppError::Internal(format!("invalid API_HOST '{}': {error}", self.api_host))
        })?;
        Ok(SocketAddr::from((host, self.api_port)))
    }
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn required_env(name: &str) -> Result<String, AppError> {
    env::var(name).map_err(|_| AppError::Validation(format!("{name} is required")))
}

fn required_non_empty_env(name: &str) -> Result<String, AppError> {
    let value = required_env(name)?;
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{name} must not be empty")));
    }

    Ok(value)
}

fn parse_env<T>(name: &str, default: T) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => value
            .trim()
            .parse::<T>()
            .map_err(|error| AppError::Validation(format!("invalid {name}: {error}"))),
        _ => Ok(default),
    }
}
