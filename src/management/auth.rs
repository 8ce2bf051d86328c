use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{
    error::{Error, Result},
    spotify::SpotifyApi,
    utils::Clock,
};

/// Seconds before the reported expiry at which an access token is refreshed.
const EXPIRY_MARGIN_SECS: i64 = 240;

#[derive(Debug, Clone)]
struct AccessToken {
    value: String,
    expires_at_ms: i64,
}

#[derive(Debug, Default)]
struct TokenState {
    refresh_token: Option<String>,
    access: Option<AccessToken>,
}

/// Holds the refresh token and the current access token in memory.
///
/// Nothing is persisted: the refresh token comes from configuration at startup
/// and a rotated one returned by Spotify only lives until the process exits.
pub struct TokenManager {
    state: Mutex<TokenState>,
    clock: Arc<dyn Clock>,
}

impl TokenManager {
    pub fn new(refresh_token: Option<String>, clock: Arc<dyn Clock>) -> Self {
        Self {
            state: Mutex::new(TokenState {
                refresh_token,
                access: None,
            }),
            clock,
        }
    }

    pub async fn has_refresh_token(&self) -> bool {
        self.state.lock().await.refresh_token.is_some()
    }

    /// Returns a usable access token, refreshing it when close to expiry.
    ///
    /// Fails with [`Error::MissingCredential`] before any network call when no
    /// refresh token is configured. The lock is not held across the refresh
    /// request, so concurrent callers may both refresh; the last writer wins.
    pub async fn access_token(&self, api: &dyn SpotifyApi) -> Result<String> {
        let refresh_token = {
            let state = self.state.lock().await;
            let Some(refresh_token) = state.refresh_token.clone() else {
                return Err(Error::MissingCredential);
            };
            if let Some(access) = &state.access {
                if self.clock.now_ms() < access.expires_at_ms {
                    return Ok(access.value.clone());
                }
            }
            refresh_token
        };

        let token = api.refresh_access_token(&refresh_token).await?;
        let lifetime_secs = (token.expires_in as i64 - EXPIRY_MARGIN_SECS).max(0);

        let mut state = self.state.lock().await;
        state.access = Some(AccessToken {
            value: token.access_token.clone(),
            expires_at_ms: self.clock.now_ms() + lifetime_secs * 1000,
        });
        if let Some(rotated) = token.refresh_token.filter(|t| !t.is_empty()) {
            state.refresh_token = Some(rotated);
        }

        Ok(token.access_token)
    }
}
