mod app_config;

pub use app_config::{ApiConfig, AppConfig, DatabaseConfig, Dialect, Environment, ServerConfig};
