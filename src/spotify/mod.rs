//! # Spotify Integration Module
//!
//! Thin client for the two Spotify services the badge needs:
//!
//! ```text
//! Now-playing service / HTTP handlers
//!          ↓
//! SpotifyApi (trait)
//!     ├── Accounts service: code exchange, token refresh  (auth.rs)
//!     └── Web API: currently playing                      (player.rs)
//!          ↓
//! reqwest
//! ```
//!
//! Callers depend on the [`SpotifyApi`] trait rather than on [`SpotifyClient`]
//! so the route and service tests can substitute a scripted implementation.
//!
//! ## Error Types
//!
//! Every call returns [`crate::error::Result`]. A non-success status becomes
//! [`Error::Api`](crate::error::Error::Api) carrying the status and response
//! body; transport failures become `Error::Http`. Nothing is retried here.

use async_trait::async_trait;
use reqwest::{Client, Response};

use crate::{
    config::Config,
    error::{Error, Result},
    types::{CurrentlyPlaying, Token},
};

pub mod auth;
pub mod player;

pub use auth::authorize_url;

#[async_trait]
pub trait SpotifyApi: Send + Sync {
    /// Exchanges an authorization code from `/callback` for tokens.
    async fn exchange_code(&self, code: &str) -> Result<Token>;

    /// Trades the long-lived refresh token for a short-lived access token.
    async fn refresh_access_token(&self, refresh_token: &str) -> Result<Token>;

    /// Current playback, or `None` when Spotify reports nothing playing.
    async fn currently_playing(&self, access_token: &str) -> Result<Option<CurrentlyPlaying>>;
}

/// reqwest-backed [`SpotifyApi`] implementation.
#[derive(Debug, Clone)]
pub struct SpotifyClient {
    http: Client,
    client_id: String,
    client_secret: String,
    redirect_uri: String,
    token_url: String,
    api_url: String,
}

impl SpotifyClient {
    pub fn new(http: Client, config: &Config) -> Self {
        Self {
            http,
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            redirect_uri: config.redirect_uri(),
            token_url: config.token_url.clone(),
            api_url: config.api_url.clone(),
        }
    }
}

#[async_trait]
impl SpotifyApi for SpotifyClient {
    async fn exchange_code(&self, code: &str) -> Result<Token> {
        self.request_token(&[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", &self.redirect_uri),
        ])
        .await
    }

    async fn refresh_access_token(&self, refresh_token: &str) -> Result<Token> {
        self.request_token(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
        ])
        .await
    }

    async fn currently_playing(&self, access_token: &str) -> Result<Option<CurrentlyPlaying>> {
        self.fetch_currently_playing(access_token).await
    }
}

/// Turns a non-success response into [`Error::Api`], keeping the body for the log.
pub(crate) async fn ensure_success(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(Error::Api { status, body })
}
