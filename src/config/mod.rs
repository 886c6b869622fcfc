use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;
use thiserror::Error;

/// Lifetime of every issued session token.
pub const TOKEN_LIFETIME: Duration = Duration::from_secs(60 * 60);

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing configuration: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },

    #[error("Invalid database URL")]
    InvalidDatabaseUrl,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub api: ApiConfig,
    pub database: DatabaseConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub port: u16,
    pub cors_origins: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    /// Pool acquire timeout in seconds
    pub connection_timeout: u64,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub jwt_secret: String,
    pub bcrypt_cost: u32,
}

// Keep the signing secret out of logs.
impl std::fmt::Debug for SecurityConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecurityConfig")
            .field("jwt_secret", &"<redacted>")
            .field("bcrypt_cost", &self.bcrypt_cost)
            .finish()
    }
}

impl AppConfig {
    /// Build the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup. `from_env` is the
    /// production entry point; tests pass a map.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = match lookup("APP_ENV").as_deref() {
            Some("production") | Some("prod") => Environment::Production,
            _ => Environment::Development,
        };

        let jwt_secret = lookup("JWT_SECRET")
            .filter(|s| !s.trim().is_empty())
            .ok_or(ConfigError::Missing("JWT_SECRET"))?;

        let database_url = match lookup("DATABASE_URL") {
            Some(url) => url,
            None => Self::database_url_from_parts(&lookup)?,
        };

        let mut config = match environment {
            Environment::Production => Self::production(database_url, jwt_secret),
            Environment::Development => Self::development(database_url, jwt_secret),
        };
        config.apply_overrides(&lookup)?;
        Ok(config)
    }

    fn apply_overrides<F>(&mut self, lookup: &F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("PORT") {
            self.api.port = parse_var("PORT", &v)?;
        }
        if let Some(v) = lookup("CORS_ORIGINS") {
            self.api.cors_origins = v
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        if let Some(v) = lookup("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = parse_var("DATABASE_MAX_CONNECTIONS", &v)?;
        }
        if let Some(v) = lookup("DATABASE_CONNECTION_TIMEOUT") {
            self.database.connection_timeout = parse_var("DATABASE_CONNECTION_TIMEOUT", &v)?;
        }

        if let Some(v) = lookup("BCRYPT_COST") {
            let cost: u32 = parse_var("BCRYPT_COST", &v)?;
            if !(4..=31).contains(&cost) {
                return Err(ConfigError::Invalid { name: "BCRYPT_COST", value: v });
            }
            self.security.bcrypt_cost = cost;
        }

        Ok(())
    }

    /// Assemble a Postgres URL from DB_HOST / DB_PORT / DB_USER / DB_PASSWORD / DB_NAME.
    fn database_url_from_parts<F>(lookup: &F) -> Result<String, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("DB_HOST").unwrap_or_else(|| "localhost".to_string());
        let port: u16 = match lookup("DB_PORT") {
            Some(v) => parse_var("DB_PORT", &v)?,
            None => 5432,
        };
        let user = lookup("DB_USER").unwrap_or_else(|| "postgres".to_string());
        let name = lookup("DB_NAME").unwrap_or_else(|| "expense_tracker".to_string());

        let mut url = url::Url::parse(&format!("postgres://{}:{}", host, port))
            .map_err(|_| ConfigError::InvalidDatabaseUrl)?;
        url.set_username(&user)
            .map_err(|_| ConfigError::InvalidDatabaseUrl)?;
        if let Some(password) = lookup("DB_PASSWORD").filter(|p| !p.is_empty()) {
            url.set_password(Some(&password))
                .map_err(|_| ConfigError::InvalidDatabaseUrl)?;
        }
        url.set_path(&format!("/{}", name));
        Ok(url.into())
    }

    fn development(database_url: String, jwt_secret: String) -> Self {
        Self {
            environment: Environment::Development,
            api: ApiConfig {
                port: 3000,
                cors_origins: vec!["http://localhost:5173".to_string()],
            },
            database: DatabaseConfig {
                url: database_url,
                max_connections: 10,
                connection_timeout: 30,
            },
            security: SecurityConfig {
                jwt_secret,
                bcrypt_cost: 10,
            },
        }
    }

    fn production(database_url: String, jwt_secret: String) -> Self {
        Self {
            environment: Environment::Production,
            api: ApiConfig {
                port: 3000,
                cors_origins: vec!["http://localhost:5173".to_string()],
            },
            database: DatabaseConfig {
                url: database_url,
                max_connections: 20,
                connection_timeout: 5,
            },
            security: SecurityConfig {
                jwt_secret,
                bcrypt_cost: 10,
            },
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Invalid {
        name,
        value: value.to_string(),
    })
}
