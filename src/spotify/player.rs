use reqwest::StatusCode;

use crate::{
    error::Result,
    spotify::{SpotifyClient, ensure_success},
    types::CurrentlyPlaying,
};

impl SpotifyClient {
    /// Calls `GET /me/player/currently-playing`.
    ///
    /// # Arguments
    ///
    /// * `access_token` - A valid user access token, sent as a bearer token
    ///
    /// # Behavior
    ///
    /// * `204 No Content` (no active device) gives `Ok(None)`
    /// * A `2xx` with an empty or whitespace-only body also gives `Ok(None)`
    /// * Any other non-success status gives [`Error::Api`](crate::error::Error::Api)
    ///   with the response body
    /// * A body that is not a currently-playing object gives `Error::Decode`
    pub(crate) async fn fetch_currently_playing(
        &self,
        access_token: &str,
    ) -> Result<Option<CurrentlyPlaying>> {
        let url = format!("{}/me/player/currently-playing", self.api_url);
        let response = self.http.get(&url).bearer_auth(access_token).send().await?;

        if response.status() == StatusCode::NO_CONTENT {
            return Ok(None);
        }

        let response = ensure_success(response).await?;
        let bytes = response.bytes().await?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }

        Ok(Some(serde_json::from_slice(&bytes)?))
    }
}
