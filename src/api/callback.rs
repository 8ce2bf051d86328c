use std::collections::HashMap;

use axum::{
    Extension,
    extract::Query,
    http::{StatusCode, header::LOCATION},
    response::{Html, IntoResponse, Response},
};

use crate::{server::AppState, spotify, utils::escape_xml, warning};

/// Redirects to the Spotify consent screen.
pub async fn login(Extension(state): Extension<AppState>) -> Response {
    match spotify::authorize_url(&state.config) {
        Ok(url) => (StatusCode::FOUND, [(LOCATION, url.to_string())]).into_response(),
        Err(e) => {
            warning!("Cannot build authorize URL: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html("<h4>Login is misconfigured.</h4>"),
            )
                .into_response()
        }
    }
}

/// Completes the authorization-code flow and shows the refresh token once.
///
/// The token is not stored; it has to be copied into `SPOTIFY_REFRESH_TOKEN`.
pub async fn callback(
    Query(params): Query<HashMap<String, String>>,
    Extension(state): Extension<AppState>,
) -> Response {
    let Some(code) = params.get("code").filter(|c| !c.is_empty()) else {
        return (
            StatusCode::BAD_REQUEST,
            Html("<h4>Missing authorization code.</h4>".to_string()),
        )
            .into_response();
    };

    let token = match state.now_playing.api().exchange_code(code).await {
        Ok(token) => token,
        Err(e) => {
            warning!("Token exchange failed: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html("<h4>Login failed.</h4>".to_string()),
            )
                .into_response();
        }
    };

    match token.refresh_token.filter(|t| !t.is_empty()) {
        Some(refresh_token) => Html(format!(
            "<h2>Authentication successful.</h2>\
             <p>Set this as <code>SPOTIFY_REFRESH_TOKEN</code> and restart the service:</p>\
             <pre>{}</pre>",
            escape_xml(&refresh_token)
        ))
        .into_response(),
        None => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Html("<h4>Spotify did not return a refresh token.</h4>".to_string()),
        )
            .into_response(),
    }
}
