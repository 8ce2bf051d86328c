use axum::{
    Extension, Json,
    extract::Query,
    http::{
        HeaderMap, HeaderValue, StatusCode,
        header::{CACHE_CONTROL, CONTENT_TYPE, ETAG, IF_NONE_MATCH},
    },
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::json;

use crate::{
    render::{self, RenderOptions},
    server::AppState,
    types::NowPlaying,
    utils::{etag_for, etag_matches},
    warning,
};

const SVG_CACHE_CONTROL: &str = "private, no-cache, max-age=0, s-maxage=0, must-revalidate";
const SVG_CONTENT_TYPE: &str = "image/svg+xml; charset=utf-8";

/// Query parameters accepted by `/now-playing.svg`.
///
/// Values are parsed leniently by [`RenderOptions::from_query`]: unknown
/// themes or sizes fall back to the defaults instead of rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct BadgeQuery {
    /// `dark` (default) or `light`
    pub theme: Option<String>,
    /// `wide` (default) or `compact`
    pub size: Option<String>,
    /// Replaces the "Now Playing" / "Not Playing" header
    pub label: Option<String>,
}

/// Handles `GET /now-playing.json`.
///
/// # Behavior
///
/// * Track playing or paused: the normalized snapshot in camelCase
/// * Nothing playing: `{"isPlaying":false}`
/// * No refresh token configured: `200` with `{"error":"missing credential"}`
/// * Spotify or transport failure: `500` with `{"error": "<message>"}`
///
/// Every response carries `Cache-Control: no-cache`.
pub async fn now_playing_json(Extension(state): Extension<AppState>) -> Response {
    let no_cache = [(CACHE_CONTROL, "no-cache")];

    match state.now_playing.current().await {
        Ok(now_playing) => (no_cache, Json(now_playing)).into_response(),
        Err(e) => {
            warning!("Failed to load now playing: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                no_cache,
                Json(json!({ "error": e.to_string() })),
            )
                .into_response()
        }
    }
}

/// Handles `GET /now-playing.svg`.
///
/// Always answers 200 (or 304); failures are drawn into the image itself.
///
/// # Behavior
///
/// * The ETag is derived from the rendered markup, so it changes with both
///   the playback state and the query options
/// * A matching `If-None-Match` gives `304` with an empty body and the same
///   `ETag` and `Cache-Control` headers
pub async fn now_playing_svg(
    Query(query): Query<BadgeQuery>,
    headers: HeaderMap,
    Extension(state): Extension<AppState>,
) -> Response {
    let options = RenderOptions::from_query(
        query.theme.as_deref(),
        query.size.as_deref(),
        query.label.as_deref(),
    );

    let svg = match state.now_playing.current().await {
        Ok(NowPlaying::Unavailable(message)) => render::render_error(&message, &options),
        Ok(now_playing) => render::render(&now_playing.snapshot(), &options),
        Err(e) => {
            warning!("Failed to render now playing badge: {}", e);
            render::render_error("Unable to load playback status", &options)
        }
    };

    let etag = etag_for(&svg);
    let not_modified = headers
        .get(IF_NONE_MATCH)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| etag_matches(value, &etag));

    let mut response = if not_modified {
        StatusCode::NOT_MODIFIED.into_response()
    } else {
        ([(CONTENT_TYPE, SVG_CONTENT_TYPE)], svg).into_response()
    };

    let response_headers = response.headers_mut();
    response_headers.insert(CACHE_CONTROL, HeaderValue::from_static(SVG_CACHE_CONTROL));
    if let Ok(value) = HeaderValue::from_str(&etag) {
        response_headers.insert(ETAG, value);
    }
    response
}
