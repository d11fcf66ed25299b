use std::env;

use dotenvy::dotenv;
use thiserror::Error;

pub const DEFAULT_PORT: u16 = 5432;
pub const DEFAULT_SSLMODE: &str = "require";

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Missing required environment variables: {}", .0.join(", "))]
    Missing(Vec<&'static str>),
    #[error("Invalid DB_PORT {0:?}")]
    InvalidPort(String),
}

/// Connection parameters read from `DB_*` environment variables.
#[derive(Clone, Debug, PartialEq)]
pub struct DbConfig {
    pub host: String,
    pub database: String,
    pub user: String,
    pub password: String,
    pub port: u16,
    pub sslmode: String,
}

impl DbConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Every missing required key is reported in a single error.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut missing = Vec::new();
        let mut required = |key: &'static str| match lookup(key) {
            Some(value) => value,
            None => {
                missing.push(key);
                String::new()
            }
        };
        let host = required("DB_HOST");
        let database = required("DB_NAME");
        let user = required("DB_USER");
        let password = required("DB_PASSWORD");
        if !missing.is_empty() {
            return Err(ConfigError::Missing(missing));
        }

        let port = match lookup("DB_PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };
        let sslmode = lookup("DB_SSLMODE").unwrap_or_else(|| DEFAULT_SSLMODE.to_string());

        Ok(Self {
            host,
            database,
            user,
            password,
            port,
            sslmode,
        })
    }

    /// libpq keyword/value connection string.
    pub fn connection_string(&self) -> String {
        format!(
            "host={} port={} dbname={} user={} password={} sslmode={}",
            quote(&self.host),
            self.port,
            quote(&self.database),
            quote(&self.user),
            quote(&self.password),
            quote(&self.sslmode),
        )
    }
}

fn quote(value: &str) -> String {
    let escaped = value.replace('\\', "\\\\").replace('\'', "\\'");
    format!("'{}'", escaped)
}
