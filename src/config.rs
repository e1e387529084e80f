use dotenvy::dotenv;
use std::env;
use thiserror::Error;

pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?} ({reason})")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Chat platform tenant.
    pub domain: Option<String>,
    /// Token the platform stamps on outgoing webhooks.
    pub token: Option<String>,
    pub port: u16,
}

impl Config {
    /// Reads `DOMAIN`, `TOKEN` and `PORT`, loading a `.env` file first if present.
    pub fn from_env() -> Result<Config, ConfigError> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Config, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match get_non_empty(&lookup, "PORT") {
            Some(value) => value.trim().parse().map_err(|e: std::num::ParseIntError| {
                ConfigError::Invalid {
                    key: "PORT",
                    value,
                    reason: e.to_string(),
                }
            })?,
            None => DEFAULT_PORT,
        };

        Ok(Config {
            domain: get_non_empty(&lookup, "DOMAIN"),
            token: get_non_empty(&lookup, "TOKEN"),
            port,
        })
    }

    /// True when no token is configured or the hook's token matches it.
    pub fn token_matches(&self, token: Option<&str>) -> bool {
        match (&self.token, token) {
            (None, _) => true,
            (Some(expected), Some(got)) => expected == got,
            (Some(_), None) => false,
        }
    }
}

fn get_non_empty<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).filter(|v| !v.is_empty())
}
