//! Environment-driven configuration.
//!
//! Every value comes from the process environment (a `.env` file is honored in
//! development). In production every variable without a hardcoded fallback is
//! required and startup fails fast when one is missing.

use serde::Deserialize;
use std::env;

use crate::error::CoreError;

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Dev,
    Prod,
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dev" => Ok(Environment::Dev),
            "prod" => Ok(Environment::Prod),
            other => Err(format!("unknown environment '{}'", other)),
        }
    }
}

/// Connection settings for one PostgreSQL pool.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub service_name: String,
    pub service_version: String,
    pub log_level: String,
    /// Pool used by serve-mode domain operations.
    pub database: DatabaseConfig,
    /// Pool used by the one-shot migration run. Connects with admin
    /// credentials when `ADMIN_DATABASE_URL` is set, otherwise falls back to
    /// the service credentials.
    pub admin_database: DatabaseConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, CoreError> {
        let env_str = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string());
        let environment: Environment = env_str
            .parse()
            .map_err(|e: String| CoreError::Config(anyhow::anyhow!(e)))?;

        let is_prod = environment == Environment::Prod;

        let database_url = get_env("DATABASE_URL", None, is_prod)?;

        Ok(AppConfig {
            environment,
            service_name: get_env("SERVICE_NAME", Some("unified-access"), is_prod)?,
            service_version: get_env("SERVICE_VERSION", Some(env!("CARGO_PKG_VERSION")), is_prod)?,
            log_level: get_env("LOG_LEVEL", Some("info"), is_prod)?,
            database: DatabaseConfig {
                url: database_url.clone(),
                max_connections: parse_env("DATABASE_MAX_CONNECTIONS", "25", is_prod)?,
                min_connections: parse_env("DATABASE_MIN_CONNECTIONS", "5", is_prod)?,
            },
            admin_database: DatabaseConfig {
                url: env::var("ADMIN_DATABASE_URL").unwrap_or(database_url),
                // Migration runs single-writer; it never needs a real pool.
                max_connections: 2,
                min_connections: 1,
            },
        })
    }
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, CoreError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(CoreError::Config(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(CoreError::Config(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}

fn parse_env(key: &str, default: &str, is_prod: bool) -> Result<u32, CoreError> {
    get_env(key, Some(default), is_prod)?
        .parse()
        .map_err(|e: std::num::ParseIntError| {
            CoreError::Config(anyhow::anyhow!("{}: {}", key, e))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn environment_parses_case_insensitively() {
        assert_eq!("DEV".parse::<Environment>().unwrap(), Environment::Dev);
        assert_eq!("prod".parse::<Environment>().unwrap(), Environment::Prod);
        assert!("staging".parse::<Environment>().is_err());
    }
}
