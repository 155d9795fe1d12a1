use std::{net::SocketAddr, path::PathBuf, str::FromStr, time::Duration};

use thiserror::Error;
use votacao_persistence_firebase::firebase::FirebaseConfig;

use crate::logs::LogFile;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_SESSION_TTL_SECS: u64 = 60 * 60;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} has invalid value {value:?}")]
    Invalid { key: &'static str, value: String },
    #[error("{0} and {1} must be set together")]
    Incomplete(&'static str, &'static str),
}

#[derive(Debug)]
pub struct Config {
    pub address: SocketAddr,
    /// Unset means players live in memory only.
    pub firebase: Option<FirebaseConfig>,
    pub seed_file: Option<PathBuf>,
    pub session_time_to_idle: Duration,
    pub log_file: Option<LogFile>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let host = var("VOTACAO_HTTP_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port: u16 = parse_or("VOTACAO_HTTP_PORT", var("VOTACAO_HTTP_PORT"), DEFAULT_PORT)?;
        let address: SocketAddr = format!("{}:{}", host, port)
            .parse()
            .map_err(|_| ConfigError::Invalid {
                key: "VOTACAO_HTTP_HOST",
                value: host.clone(),
            })?;

        let timeout_secs = parse_or(
            "VOTACAO_FIREBASE_TIMEOUT_SECS",
            var("VOTACAO_FIREBASE_TIMEOUT_SECS"),
            FirebaseConfig::DEFAULT_TIMEOUT.as_secs(),
        )?;
        let firebase = var("VOTACAO_FIREBASE_URL").map(|base_url| FirebaseConfig {
            base_url,
            auth_token: var("VOTACAO_FIREBASE_AUTH"),
            timeout: Duration::from_secs(timeout_secs),
        });

        let ttl_secs = parse_or(
            "VOTACAO_SESSION_TTL_SECS",
            var("VOTACAO_SESSION_TTL_SECS"),
            DEFAULT_SESSION_TTL_SECS,
        )?;

        let log_file = match (var("LOG_FILE_PATH"), var("LOG_ARCHIVE_PATTERN")) {
            (Some(path), Some(archive_pattern)) => Some(LogFile {
                path,
                archive_pattern,
            }),
            (None, None) => None,
            _ => {
                return Err(ConfigError::Incomplete(
                    "LOG_FILE_PATH",
                    "LOG_ARCHIVE_PATTERN",
                ));
            }
        };

        Ok(Self {
            address,
            firebase,
            seed_file: var("VOTACAO_SEED_FILE").map(PathBuf::from),
            session_time_to_idle: Duration::from_secs(ttl_secs),
            log_file,
        })
    }
}

fn parse_or<T: FromStr>(
    key: &'static str,
    value: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match value {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
        None => Ok(default),
    }
}
