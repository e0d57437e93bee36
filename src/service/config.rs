use anyhow::{Context, Result};

/// Runtime configuration, read once at startup from the environment. Missing
/// required values are fatal.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub port: u16,
    pub db_host: String,
    pub db_port: u16,
    pub db_name: String,
    pub db_user: String,
    pub db_pass: String,
    pub suggestor_url: String,
    pub jwt_key: String,
    pub filter_refresh_seconds: u64,
}

impl ServiceConfig {
    pub fn load() -> Result<Self> {
        let cfg = Self {
            port: env_or("PORT", 8080),
            db_host: required("DB_HOST")?,
            db_port: env_or("DB_PORT", 5432),
            db_name: required("DB_NAME")?,
            db_user: required("DB_USER")?,
            db_pass: required("DB_PASS")?,
            suggestor_url: required("SUGGESTOR_URL")?,
            jwt_key: required("JWT_KEY")?,
            filter_refresh_seconds: env_or("FILTER_REFRESH_SECONDS", 300),
        };
        tracing::info!(
            "Configuration loaded; port {} db {}:{}/{} suggestor {}",
            cfg.port,
            cfg.db_host,
            cfg.db_port,
            cfg.db_name,
            cfg.suggestor_url
        );
        Ok(cfg)
    }

    pub fn database_url(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}",
            self.db_user, self.db_pass, self.db_host, self.db_port, self.db_name
        )
    }
}

fn required(name: &str) -> Result<String> {
    std::env::var(name).with_context(|| format!("{} must be set", name))
}

fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|value| value.parse::<T>().ok())
        .unwrap_or(default)
}
