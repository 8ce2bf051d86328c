//! Now-playing lookup and normalization.
//!
//! [`normalize`] maps the raw currently-playing payload into a
//! [`PlaybackSnapshot`], substituting every default in one place so the
//! renderer never deals with missing fields. [`NowPlayingService`] wires the
//! token manager, the Spotify client and the cover cache around it.

use std::{path::Path, sync::Arc};

use crate::{
    error::{Error, Result},
    management::{CoverCache, TokenManager},
    progress,
    spotify::SpotifyApi,
    types::{ACCENT_COLOR, CurrentlyPlaying, NowPlaying, PlaybackSnapshot},
    utils::Clock,
};

/// Maps a currently-playing payload to a snapshot.
///
/// Returns `None` when the payload has no item to show. `image_url` is left
/// empty; it is filled in once the cover has been resolved.
pub fn normalize(raw: CurrentlyPlaying, now_ms: i64) -> Option<PlaybackSnapshot> {
    let item = raw.item?;

    let album = item.album.unwrap_or_default();
    let cover_url = album
        .images
        .unwrap_or_default()
        .into_iter()
        .next()
        .and_then(|image| image.url)
        .unwrap_or_default();
    let artists = item
        .artists
        .unwrap_or_default()
        .into_iter()
        .filter_map(|artist| artist.name)
        .collect();
    let duration_ms = item.duration_ms.unwrap_or(0).max(0);
    let progress = progress::correct(
        raw.progress_ms.unwrap_or(0),
        duration_ms,
        raw.timestamp.unwrap_or(0),
        now_ms,
    );

    Some(PlaybackSnapshot {
        is_playing: raw.is_playing,
        title: item.name.unwrap_or_default(),
        album: album.name.unwrap_or_default(),
        artists,
        explicit: item.explicit.unwrap_or(false),
        track_url: item
            .external_urls
            .and_then(|urls| urls.spotify)
            .unwrap_or_default(),
        cover_url,
        image_url: String::new(),
        duration_ms: duration_ms as u64,
        progress_ms: progress.progress_ms,
        remaining_ms: progress.remaining_ms,
        accent: ACCENT_COLOR.to_string(),
    })
}

/// Reads a snapshot saved in the `/now-playing.json` track shape.
///
/// Used by the `render` subcommand to draw a badge without contacting Spotify.
///
/// # Errors
///
/// * [`Error::Io`] when the file cannot be read
/// * [`Error::Decode`] when the content is not a snapshot
pub async fn load_snapshot(path: &Path) -> Result<PlaybackSnapshot> {
    let content = tokio::fs::read_to_string(path).await?;
    Ok(serde_json::from_str(&content)?)
}

/// Fetches and normalizes the current playback for one request.
///
/// Calls happen in program order: token refresh, currently-playing, cover
/// art. External API failures propagate; cover failures are absorbed by the
/// cache.
pub struct NowPlayingService {
    api: Arc<dyn SpotifyApi>,
    tokens: TokenManager,
    covers: CoverCache,
    clock: Arc<dyn Clock>,
}

impl NowPlayingService {
    pub fn new(
        api: Arc<dyn SpotifyApi>,
        tokens: TokenManager,
        covers: CoverCache,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            api,
            tokens,
            covers,
            clock,
        }
    }

    pub fn api(&self) -> &dyn SpotifyApi {
        self.api.as_ref()
    }

    pub fn covers(&self) -> &CoverCache {
        &self.covers
    }

    pub async fn has_refresh_token(&self) -> bool {
        self.tokens.has_refresh_token().await
    }

    pub async fn current(&self) -> Result<NowPlaying> {
        let access_token = match self.tokens.access_token(self.api.as_ref()).await {
            Ok(token) => token,
            Err(Error::MissingCredential) => {
                return Ok(NowPlaying::Unavailable(Error::MissingCredential.to_string()));
            }
            Err(e) => return Err(e),
        };

        let Some(raw) = self.api.currently_playing(&access_token).await? else {
            return Ok(NowPlaying::Idle);
        };

        let Some(mut snapshot) = normalize(raw, self.clock.now_ms()) else {
            return Ok(NowPlaying::Idle);
        };

        snapshot.image_url = self.covers.resolve(&snapshot.cover_url).await;
        Ok(NowPlaying::Track(snapshot))
    }
}
