/*
 * Responsibility
 * - Load settings from the environment (.env via dotenvy): DATABASE_URL, CORS allowlist, identity provider
 * - Validate values up front (startup fails on missing/invalid settings)
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use jsonwebtoken::Algorithm;
use url::Url;

use crate::services::auth::AuthConfig;

const MAX_JWKS_CACHE_TTL_SECONDS: u64 = 7 * 24 * 60 * 60;
const MAX_JWKS_FETCH_TIMEOUT_SECONDS: u64 = 5 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn from_env() -> Self {
        Self::parse(&std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()))
    }

    fn parse(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug)]
pub struct Config {
    pub addr: SocketAddr,
    pub database_url: String,

    pub app_env: AppEnv,
    pub cors_allowed_origins: Vec<String>,

    pub auth: AuthConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let port: u16 = std::env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(3000);

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let database_url =
            std::env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))?;

        let app_env = AppEnv::from_env();

        let cors_allowed_origins =
            split_list(&std::env::var("CORS_ALLOWED_ORIGINS").unwrap_or_default());

        let auth_domain =
            std::env::var("AUTH0_DOMAIN").map_err(|_| ConfigError::Missing("AUTH0_DOMAIN"))?;

        let api_audience =
            std::env::var("API_AUDIENCE").map_err(|_| ConfigError::Missing("API_AUDIENCE"))?;

        let algorithms = parse_algorithms(
            &std::env::var("AUTH_ALGORITHMS").unwrap_or_else(|_| "RS256".to_string()),
        )?;

        let jwks_cache_ttl = parse_seconds(
            "JWKS_CACHE_TTL_SECONDS",
            std::env::var("JWKS_CACHE_TTL_SECONDS").ok().as_deref(),
            300,
            MAX_JWKS_CACHE_TTL_SECONDS,
        )?;

        let jwks_fetch_timeout = parse_seconds(
            "JWKS_FETCH_TIMEOUT_SECONDS",
            std::env::var("JWKS_FETCH_TIMEOUT_SECONDS").ok().as_deref(),
            10,
            MAX_JWKS_FETCH_TIMEOUT_SECONDS,
        )?;

        let mut auth = AuthConfig::new(auth_domain, api_audience)
            .map_err(|_| ConfigError::Invalid("AUTH0_DOMAIN"))?
            .with_algorithms(algorithms)
            .with_cache_ttl(jwks_cache_ttl)
            .with_fetch_timeout(jwks_fetch_timeout);

        if let Ok(jwks_url) = std::env::var("JWKS_URL") {
            let jwks_url = Url::parse(&jwks_url).map_err(|_| ConfigError::Invalid("JWKS_URL"))?;
            auth = auth.with_jwks_url(jwks_url);
        }

        Ok(Self {
            addr,
            database_url,
            app_env,
            cors_allowed_origins,
            auth,
        })
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Unset uses `default`; anything unparseable or above `max` is rejected.
fn parse_seconds(
    key: &'static str,
    raw: Option<&str>,
    default: u64,
    max: u64,
) -> Result<Duration, ConfigError> {
    let Some(raw) = raw else {
        return Ok(Duration::from_secs(default));
    };

    match raw.trim().parse::<u64>() {
        Ok(secs) if secs <= max => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::Invalid(key)),
    }
}

fn parse_algorithms(raw: &str) -> Result<Vec<Algorithm>, ConfigError> {
    let algorithms = split_list(raw)
        .iter()
        .map(|s| Algorithm::from_str(s).map_err(|_| ConfigError::Invalid("AUTH_ALGORITHMS")))
        .collect::<Result<Vec<_>, _>>()?;

    if algorithms.is_empty() {
        return Err(ConfigError::Invalid("AUTH_ALGORITHMS"));
    }

    Ok(algorithms)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_env_parsing() {
        assert!(AppEnv::parse("production").is_production());
        assert!(AppEnv::parse("PROD").is_production());
        assert!(!AppEnv::parse("development").is_production());
        assert!(!AppEnv::parse("staging").is_production());
    }

    #[test]
    fn split_list_trims_and_drops_empty() {
        assert_eq!(
            split_list(" https://a.example , ,https://b.example"),
            vec!["https://a.example", "https://b.example"]
        );
        assert!(split_list("").is_empty());
    }

    #[test]
    fn parses_algorithm_list() {
        assert_eq!(parse_algorithms("RS256").unwrap(), vec![Algorithm::RS256]);
        assert_eq!(
            parse_algorithms("RS256, RS384").unwrap(),
            vec![Algorithm::RS256, Algorithm::RS384]
        );
    }

    #[test]
    fn rejects_unknown_or_empty_algorithm_list() {
        assert!(matches!(
            parse_algorithms("RS999"),
            Err(ConfigError::Invalid("AUTH_ALGORITHMS"))
        ));
        assert!(matches!(
            parse_algorithms(" , "),
            Err(ConfigError::Invalid("AUTH_ALGORITHMS"))
        ));
    }

    #[test]
    fn seconds_default_when_unset() {
        assert_eq!(
            parse_seconds("JWKS_CACHE_TTL_SECONDS", None, 300, MAX_JWKS_CACHE_TTL_SECONDS).unwrap(),
            Duration::from_secs(300)
        );
        assert_eq!(
            parse_seconds("JWKS_CACHE_TTL_SECONDS", Some(" 60 "), 300, MAX_JWKS_CACHE_TTL_SECONDS)
                .unwrap(),
            Duration::from_secs(60)
        );
    }

    #[test]
    fn rejects_out_of_range_or_garbage_seconds() {
        for raw in ["18446744073709551615", "604801", "-1", "five"] {
            assert!(
                matches!(
                    parse_seconds("JWKS_CACHE_TTL_SECONDS", Some(raw), 300, MAX_JWKS_CACHE_TTL_SECONDS),
                    Err(ConfigError::Invalid("JWKS_CACHE_TTL_SECONDS"))
                ),
                "{raw}"
            );
        }
    }
}
