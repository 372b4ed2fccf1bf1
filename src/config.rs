use crate::utils::error::AppError;
use std::env;

const DEFAULT_DATABASE_NAME: &str = "veridoc";

/// Runtime settings read from the environment (after `.env` is loaded)
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub database_name: String,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        let port = match env::var("PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .map_err(|_| AppError::ConfigError(format!("PORT must be a valid port number, got '{}'", raw)))?,
            Err(_) => 3000,
        };

        let database_url = env::var("DATABASE_URL")
            .map_err(|_| AppError::ConfigError("DATABASE_URL must be set".to_string()))?;

        let database_name = env::var("DATABASE_NAME")
            .ok()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| database_name_from_uri(&database_url));

        Ok(Self { host, port, database_url, database_name })
    }
}

/// Extract database name from URI path, e.g. `mongodb://host:27017/veridoc?retryWrites=true`
pub fn database_name_from_uri(uri: &str) -> String {
    let without_scheme = uri.split_once("://").map(|(_, rest)| rest).unwrap_or(uri);

    without_scheme
        .split_once('/')
        .map(|(_, path)| path.split('?').next().unwrap_or(""))
        .filter(|name| !name.is_empty())
        .unwrap_or(DEFAULT_DATABASE_NAME)
        .to_string()
}
