use crate::error::{AppError, Result};
use std::{env, str::FromStr};

const DEFAULT_SQLITE_STORAGE: &str = "./data.db";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub app_name: String,
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub api: ApiConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    Sqlite,
    Postgres,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub dialect: Dialect,
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Route prefix such as `/api/v1`; empty for unversioned routes.
    pub base_path: String,
    pub docs: bool,
    pub max_body_size: usize,
}

impl FromStr for Environment {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "production" | "prod" => Ok(Environment::Production),
            other => Err(AppError::ConfigError(format!(
                "Unknown APP_ENV value: {}",
                other
            ))),
        }
    }
}

impl DatabaseConfig {
    pub fn sqlite(storage: &str, max_connections: u32) -> Self {
        let url = if storage == ":memory:" || storage == "sqlite::memory:" {
            "sqlite::memory:".to_string()
        } else if storage.starts_with("sqlite:") {
            storage.to_string()
        } else {
            format!("sqlite://{}?mode=rwc", storage)
        };

        Self {
            dialect: Dialect::Sqlite,
            url,
            max_connections,
        }
    }

    pub fn postgres(url: String, max_connections: u32) -> Self {
        Self {
            dialect: Dialect::Postgres,
            url,
            max_connections,
        }
    }

    pub fn is_in_memory(&self) -> bool {
        self.dialect == Dialect::Sqlite && self.url.contains(":memory:")
    }
}

impl ApiConfig {
    pub fn new(base_path: &str, docs: bool) -> Self {
        Self {
            base_path: normalize_base_path(base_path),
            docs,
            max_body_size: 1024 * 1024,
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new("", false)
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(var: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment: Environment = var("APP_ENV")
            .unwrap_or_else(|| "development".to_string())
            .parse()?;

        let max_connections = parse_or(&var, "DB_MAX_CONNECTIONS", 5u32)?;

        let database = match environment {
            Environment::Development => {
                let storage =
                    var("DB_STORAGE").unwrap_or_else(|| DEFAULT_SQLITE_STORAGE.to_string());
                DatabaseConfig::sqlite(&storage, max_connections)
            }
            Environment::Production => {
                let url = var("DATABASE_URL").ok_or_else(|| {
                    AppError::ConfigError("DATABASE_URL must be set in production".to_string())
                })?;
                DatabaseConfig::postgres(url, max_connections)
            }
        };

        Ok(Self {
            app_name: var("APP_NAME").unwrap_or_else(|| env!("CARGO_PKG_NAME").to_string()),
            environment,
            server: ServerConfig {
                host: var("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
                port: parse_or(&var, "PORT", 3000u16)?,
            },
            database,
            api: ApiConfig {
                base_path: normalize_base_path(&var("API_BASE_PATH").unwrap_or_default()),
                docs: parse_or(&var, "API_DOCS", false)?,
                max_body_size: parse_or(&var, "MAX_BODY_SIZE", 1024 * 1024usize)?,
            },
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn parse_or<F, T>(var: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match var(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| AppError::ConfigError(format!("Invalid {} value", key))),
        None => Ok(default),
    }
}

fn normalize_base_path(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<AppConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_to_development_sqlite() {
        let config = load(&[]).unwrap();
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.database.dialect, Dialect::Sqlite);
        assert_eq!(config.database.url, "sqlite://./data.db?mode=rwc");
        assert_eq!(config.server_address(), "0.0.0.0:3000");
        assert_eq!(config.api.base_path, "");
        assert!(!config.api.docs);
    }

    #[test]
    fn production_requires_database_url() {
        let err = load(&[("APP_ENV", "production")]).unwrap_err();
        assert!(matches!(err, AppError::ConfigError(_)));

        let config = load(&[
            ("APP_ENV", "production"),
            ("DATABASE_URL", "postgres://localhost/products"),
        ])
        .unwrap();
        assert_eq!(config.database.dialect, Dialect::Postgres);
        assert_eq!(config.database.url, "postgres://localhost/products");
    }

    #[test]
    fn rejects_unknown_environment_and_bad_numbers() {
        assert!(load(&[("APP_ENV", "staging")]).is_err());
        assert!(load(&[("PORT", "eighty")]).is_err());
        assert!(load(&[("API_DOCS", "maybe")]).is_err());
    }

    #[test]
    fn normalizes_base_path() {
        let config = load(&[("API_BASE_PATH", "api/v1/")]).unwrap();
        assert_eq!(config.api.base_path, "/api/v1");
        assert_eq!(ApiConfig::new("/", false).base_path, "");
    }

    #[test]
    fn recognizes_in_memory_sqlite() {
        let config = load(&[("DB_STORAGE", ":memory:")]).unwrap();
        assert!(config.database.is_in_memory());
        assert_eq!(config.database.url, "sqlite::memory:");
    }
}
