/// Environment-driven application configuration.
pub mod config;

pub use config::AppConfig;
