use reqwest::Url;

use crate::{
    config::{Config, ConfigError, ENV_AUTH_URL, SPOTIFY_SCOPES},
    error::Result,
    spotify::{SpotifyClient, ensure_success},
    types::Token,
};

/// Builds the Spotify authorize URL `/login` redirects to.
///
/// Uses the authorization-code flow with the fixed scope list and the
/// configured `<base>/callback` redirect URI. Query values are form-encoded.
///
/// # Example
///
/// ```
/// let url = authorize_url(&config)?;
/// // https://accounts.spotify.com/authorize?client_id=...&response_type=code&...
/// ```
pub fn authorize_url(config: &Config) -> std::result::Result<Url, ConfigError> {
    let scope = SPOTIFY_SCOPES.join(" ");
    let redirect_uri = config.redirect_uri();

    Url::parse_with_params(
        &config.auth_url,
        &[
            ("client_id", config.client_id.as_str()),
            ("response_type", "code"),
            ("redirect_uri", redirect_uri.as_str()),
            ("scope", scope.as_str()),
        ],
    )
    .map_err(|e| ConfigError::Invalid {
        key: ENV_AUTH_URL,
        reason: e.to_string(),
    })
}

impl SpotifyClient {
    /// Posts a grant to the accounts token endpoint.
    ///
    /// Client credentials travel in the `Authorization: Basic` header
    /// (base64 of `client_id:client_secret`), the grant in the form body.
    pub(crate) async fn request_token(&self, form: &[(&str, &str)]) -> Result<Token> {
        let response = self
            .http
            .post(&self.token_url)
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(form)
            .send()
            .await?;

        let response = ensure_success(response).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config::from_lookup(|key| match key {
            "SPOTIFY_API_AUTH_CLIENT_ID" => Some("client-123".to_string()),
            "SPOTIFY_API_AUTH_CLIENT_SECRET" => Some("secret".to_string()),
            "PUBLIC_BASE_URL" => Some("https://badge.example.com".to_string()),
            _ => None,
        })
        .unwrap()
    }

    #[test]
    fn authorize_url_carries_code_flow_parameters() {
        let url = authorize_url(&config()).unwrap();
        let params: Vec<(String, String)> = url.query_pairs().into_owned().collect();

        assert_eq!(url.host_str(), Some("accounts.spotify.com"));
        assert_eq!(url.path(), "/authorize");
        assert!(params.contains(&("client_id".into(), "client-123".into())));
        assert!(params.contains(&("response_type".into(), "code".into())));
        assert!(params.contains(&(
            "redirect_uri".into(),
            "https://badge.example.com/callback".into()
        )));
        assert!(params.contains(&(
            "scope".into(),
            "user-read-currently-playing user-read-playback-state".into()
        )));
    }

    #[test]
    fn token_payload_tolerates_missing_optional_fields() {
        let token: Token = serde_json::from_str(r#"{"access_token":"BQC"}"#).unwrap();
        assert_eq!(token.access_token, "BQC");
        assert_eq!(token.refresh_token, None);
        assert_eq!(token.expires_in, 3600);
    }
}
