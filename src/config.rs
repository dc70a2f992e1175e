use std::env;
use thiserror::Error;

use crate::wallet::pubkey_to_address_hex;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

/// Process configuration read from the environment (after `.env` is loaded).
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Registry owner as a compressed pubkey address; `None` means generate
    /// a development identity.
    pub owner_address: Option<String>,
    /// Scaled rate applied right after construction.
    pub initial_rate: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string());

        let port = match lookup("PORT") {
            Some(v) => v.trim().parse().map_err(|_| ConfigError::Invalid {
                key: "PORT",
                value: v,
            })?,
            None => 8080,
        };

        // FROM_ADDRESS must also hold a secp256k1 public key, not an EVM account.
        let owner_raw = match lookup("OWNER_ADDRESS") {
            Some(v) => Some(("OWNER_ADDRESS", v)),
            None => lookup("FROM_ADDRESS").map(|v| ("FROM_ADDRESS", v)),
        };
        let owner_address = match owner_raw {
            Some((_, v)) if v.trim().is_empty() => None,
            Some((key, v)) => Some(
                pubkey_to_address_hex(&v).map_err(|_| ConfigError::Invalid { key, value: v })?,
            ),
            None => None,
        };

        let initial_rate = match lookup("INITIAL_RATE") {
            Some(v) => v.trim().parse().map_err(|_| ConfigError::Invalid {
                key: "INITIAL_RATE",
                value: v,
            })?,
            None => 0,
        };

        Ok(Self {
            host,
            port,
            owner_address,
            initial_rate,
        })
    }
}
