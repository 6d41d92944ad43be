//! Application configuration structs
//!
//! Loads configuration from environment variables and an optional `.env` file.

use serde::Deserialize;
use std::env;

use historify_core::registry::ACTOR_MAX_LENGTH;
use historify_core::MANUAL_ACTOR;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub database: DatabaseConfig,
    pub history: HistoryConfig,
    pub jwt: Option<JwtConfig>,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_env")]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "production" => Some(Self::Production),
            "staging" => Some(Self::Staging),
            "development" => Some(Self::Development),
            _ => None,
        }
    }
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

/// History recording settings
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryConfig {
    /// Actor recorded when no identity resolves
    #[serde(default = "default_sentinel_actor")]
    pub sentinel_actor: String,
    /// Resolved actor names are cut to this many characters
    #[serde(default = "default_actor_max_length")]
    pub actor_max_length: usize,
    /// Consult the bearer token when the session caller is anonymous
    #[serde(default = "default_jwt_fallback")]
    pub jwt_fallback: bool,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            sentinel_actor: default_sentinel_actor(),
            actor_max_length: default_actor_max_length(),
            jwt_fallback: default_jwt_fallback(),
        }
    }
}

/// JWT configuration for the fallback identity provider
#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
}

// Default value functions
fn default_app_name() -> String {
    "historify".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_max_connections() -> u32 {
    20
}

fn default_min_connections() -> u32 {
    5
}

fn default_sentinel_actor() -> String {
    MANUAL_ACTOR.to_string()
}

fn default_actor_max_length() -> usize {
    ACTOR_MAX_LENGTH
}

fn default_jwt_fallback() -> bool {
    true
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source
    ///
    /// # Errors
    /// Returns an error if required variables are missing or malformed
    pub fn from_vars<F>(var: F) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let actor_max_length = match var("HISTORY_ACTOR_MAX_LENGTH") {
            Some(s) => match s.parse::<usize>() {
                Ok(n) if (1..=ACTOR_MAX_LENGTH).contains(&n) => n,
                _ => return Err(ConfigError::InvalidValue("HISTORY_ACTOR_MAX_LENGTH", s)),
            },
            None => default_actor_max_length(),
        };

        let jwt_fallback = match var("HISTORY_JWT_FALLBACK") {
            Some(s) => parse_bool(&s).ok_or(ConfigError::InvalidValue("HISTORY_JWT_FALLBACK", s))?,
            None => default_jwt_fallback(),
        };

        Ok(Self {
            app: AppSettings {
                name: var("APP_NAME").unwrap_or_else(default_app_name),
                env: var("APP_ENV")
                    .and_then(|s| Environment::parse(&s))
                    .unwrap_or_default(),
            },
            database: DatabaseConfig {
                url: var("DATABASE_URL").ok_or(ConfigError::MissingVar("DATABASE_URL"))?,
                max_connections: var("DATABASE_MAX_CONNECTIONS")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_max_connections),
                min_connections: var("DATABASE_MIN_CONNECTIONS")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_min_connections),
            },
            history: HistoryConfig {
                sentinel_actor: var("HISTORY_SENTINEL_ACTOR")
                    .filter(|s| !s.is_empty())
                    .unwrap_or_else(default_sentinel_actor),
                actor_max_length,
                jwt_fallback,
            },
            jwt: var("JWT_SECRET")
                .filter(|s| !s.is_empty())
                .map(|secret| JwtConfig { secret }),
        })
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&'static str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<&str, String> = vars
            .iter()
            .map(|(k, v)| (*k, (*v).to_string()))
            .collect();
        AppConfig::from_vars(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_environment_is_production() {
        assert!(!Environment::Development.is_production());
        assert!(!Environment::Staging.is_production());
        assert!(Environment::Production.is_production());
    }

    #[test]
    fn test_environment_is_development() {
        assert!(Environment::Development.is_development());
        assert!(!Environment::Staging.is_development());
        assert!(!Environment::Production.is_development());
    }

    #[test]
    fn test_defaults() {
        let config = load(&[("DATABASE_URL", "postgres://localhost/test")]).unwrap();
        assert_eq!(config.app.name, "historify");
        assert_eq!(config.app.env, Environment::Development);
        assert_eq!(config.database.max_connections, 20);
        assert_eq!(config.history.sentinel_actor, "<<manual>>");
        assert_eq!(config.history.actor_max_length, 100);
        assert!(config.history.jwt_fallback);
        assert!(config.jwt.is_none());
    }

    #[test]
    fn test_missing_database_url() {
        let err = load(&[]).unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar("DATABASE_URL")));
    }

    #[test]
    fn test_history_overrides() {
        let config = load(&[
            ("DATABASE_URL", "postgres://localhost/test"),
            ("APP_ENV", "Production"),
            ("HISTORY_SENTINEL_ACTOR", "system"),
            ("HISTORY_ACTOR_MAX_LENGTH", "32"),
            ("HISTORY_JWT_FALLBACK", "off"),
            ("JWT_SECRET", "s3cret"),
        ])
        .unwrap();

        assert!(config.app.env.is_production());
        assert_eq!(config.history.sentinel_actor, "system");
        assert_eq!(config.history.actor_max_length, 32);
        assert!(!config.history.jwt_fallback);
        assert_eq!(config.jwt.unwrap().secret, "s3cret");
    }

    #[test]
    fn test_invalid_history_values() {
        let err = load(&[
            ("DATABASE_URL", "postgres://localhost/test"),
            ("HISTORY_ACTOR_MAX_LENGTH", "500"),
        ])
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue("HISTORY_ACTOR_MAX_LENGTH", _)));

        let err = load(&[
            ("DATABASE_URL", "postgres://localhost/test"),
            ("HISTORY_JWT_FALLBACK", "maybe"),
        ])
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue("HISTORY_JWT_FALLBACK", _)));
    }
}
