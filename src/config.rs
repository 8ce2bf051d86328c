//! Configuration management for the now-playing badge service.
//!
//! Values are read from environment variables, optionally seeded from `.env`
//! files. The lookup order is:
//! 1. Environment variables already set on the process (highest priority)
//! 2. `./.env` in the working directory
//! 3. `.env` in the local data directory (`<data_local_dir>/nowplaying-badge/.env`)
//! 4. Application defaults (endpoints and listen address only)

use std::{env, path::PathBuf};

use thiserror::Error;

pub const ENV_CLIENT_ID: &str = "SPOTIFY_API_AUTH_CLIENT_ID";
pub const ENV_CLIENT_SECRET: &str = "SPOTIFY_API_AUTH_CLIENT_SECRET";
pub const ENV_BASE_URL: &str = "PUBLIC_BASE_URL";
pub const ENV_REFRESH_TOKEN: &str = "SPOTIFY_REFRESH_TOKEN";
pub const ENV_SERVER_ADDRESS: &str = "SERVER_ADDRESS";
pub const ENV_AUTH_URL: &str = "SPOTIFY_API_AUTH_URL";
pub const ENV_TOKEN_URL: &str = "SPOTIFY_API_TOKEN_URL";
pub const ENV_API_URL: &str = "SPOTIFY_API_URL";

const DEFAULT_SERVER_ADDRESS: &str = "0.0.0.0:8080";
const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";

/// Scopes requested by `/login`, space-joined in the authorize URL.
pub const SPOTIFY_SCOPES: [&str; 2] = ["user-read-currently-playing", "user-read-playback-state"];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{key} is invalid: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Runtime configuration of the service.
///
/// Client id, client secret and base URL are mandatory; the refresh token may
/// be absent until it has been obtained through `/login` and `/callback`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub client_id: String,
    pub client_secret: String,
    pub base_url: String,
    pub refresh_token: Option<String>,
    pub server_address: String,
    pub auth_url: String,
    pub token_url: String,
    pub api_url: String,
}

impl Config {
    /// Builds the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// Empty and whitespace-only values are treated as absent.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let require = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));

        let client_id = require(ENV_CLIENT_ID)?;
        let client_secret = require(ENV_CLIENT_SECRET)?;
        let base_url = require(ENV_BASE_URL)?.trim_end_matches('/').to_string();

        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ConfigError::Invalid {
                key: ENV_BASE_URL,
                reason: format!("'{}' is not an http(s) URL", base_url),
            });
        }

        Ok(Self {
            client_id,
            client_secret,
            base_url,
            refresh_token: get(ENV_REFRESH_TOKEN),
            server_address: get(ENV_SERVER_ADDRESS)
                .unwrap_or_else(|| DEFAULT_SERVER_ADDRESS.to_string()),
            auth_url: get(ENV_AUTH_URL).unwrap_or_else(|| DEFAULT_AUTH_URL.to_string()),
            token_url: get(ENV_TOKEN_URL).unwrap_or_else(|| DEFAULT_TOKEN_URL.to_string()),
            api_url: get(ENV_API_URL)
                .unwrap_or_else(|| DEFAULT_API_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
        })
    }

    /// The OAuth redirect URI registered with Spotify.
    pub fn redirect_uri(&self) -> String {
        format!("{}/callback", self.base_url)
    }
}

/// Loads `.env` files into the process environment.
///
/// Both `./.env` and `<data_local_dir>/nowplaying-badge/.env` are tried; a
/// missing file is not an error, a malformed one is.
pub fn load_env() -> Result<(), String> {
    for path in env_files() {
        if !path.is_file() {
            continue;
        }
        dotenv::from_path(&path)
            .map_err(|e| format!("Failed to load {}: {}", path.display(), e))?;
    }
    Ok(())
}

fn env_files() -> Vec<PathBuf> {
    let mut data_path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    data_path.push("nowplaying-badge/.env");
    vec![PathBuf::from(".env"), data_path]
}
