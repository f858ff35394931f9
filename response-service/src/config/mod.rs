use secrecy::Secret;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_MONGODB_URI: &str = "mongodb://localhost:27017/vlm-webcam-responses";
pub const DEFAULT_UPSTREAM_API_BASE: &str = "http://localhost:8080";
pub const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_STATIC_DIR: &str = ".";

#[derive(Debug, Clone)]
pub struct ResponseConfig {
    pub common: core_config::Config,
    pub mongodb: MongoConfig,
    pub upstream: UpstreamConfig,
    pub static_files: StaticConfig,
}

#[derive(Debug, Clone)]
pub struct MongoConfig {
    /// Full connection string; the path component names the database.
    pub uri: Secret<String>,
}

#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    pub base_url: String,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct StaticConfig {
    /// Document root for the static front-end.
    pub root: PathBuf,
}

impl ResponseConfig {
    pub fn load() -> Result<Self, AppError> {
        // Load common config (handles .env, PORT and logging settings)
        let common_config = core_config::Config::load()?;

        Ok(ResponseConfig {
            common: common_config,
            mongodb: MongoConfig {
                uri: Secret::new(get_env("MONGODB_URI", DEFAULT_MONGODB_URI)),
            },
            upstream: UpstreamConfig {
                base_url: get_env("UPSTREAM_API_BASE", DEFAULT_UPSTREAM_API_BASE),
                timeout: Duration::from_secs(parse_env(
                    "UPSTREAM_TIMEOUT_SECS",
                    DEFAULT_UPSTREAM_TIMEOUT_SECS,
                )?),
            },
            static_files: StaticConfig {
                root: PathBuf::from(get_env("STATIC_DIR", DEFAULT_STATIC_DIR)),
            },
        })
    }
}

fn get_env(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|val| !val.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn parse_env<T>(key: &str, default: T) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(val) if !val.trim().is_empty() => val.trim().parse().map_err(|e: T::Err| {
            AppError::ConfigError(anyhow::anyhow!("{} has an invalid value '{}': {}", key, val, e))
        }),
        _ => Ok(default),
    }
}
