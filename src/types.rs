use serde::{Deserialize, Serialize, ser::SerializeMap};

/// Brand color used for the progress fill and the equalizer bars.
pub const ACCENT_COLOR: &str = "#1DB954";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub scope: String,
    #[serde(default = "default_expires_in")]
    pub expires_in: u64,
}

fn default_expires_in() -> u64 {
    3600
}

/// Response of `GET /me/player/currently-playing`.
///
/// Every field is optional: episodes, ads and local files leave large parts of
/// the payload empty, and defaults are substituted once in the normalizer.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CurrentlyPlaying {
    #[serde(default)]
    pub is_playing: bool,
    pub progress_ms: Option<i64>,
    pub timestamp: Option<i64>,
    pub item: Option<TrackItem>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TrackItem {
    pub name: Option<String>,
    pub album: Option<AlbumRef>,
    pub artists: Option<Vec<ArtistRef>>,
    pub explicit: Option<bool>,
    pub external_urls: Option<ExternalUrls>,
    pub duration_ms: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AlbumRef {
    pub name: Option<String>,
    pub images: Option<Vec<ImageRef>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArtistRef {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExternalUrls {
    pub spotify: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImageRef {
    pub url: Option<String>,
}

/// Normalized description of the current playback, consumed by the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlaybackSnapshot {
    pub is_playing: bool,
    pub title: String,
    pub album: String,
    pub artists: Vec<String>,
    pub explicit: bool,
    pub track_url: String,
    pub cover_url: String,
    /// Cover art after resolution through the cover cache, usually a data URI.
    pub image_url: String,
    pub duration_ms: u64,
    pub progress_ms: u64,
    pub remaining_ms: u64,
    pub accent: String,
}

impl Default for PlaybackSnapshot {
    fn default() -> Self {
        Self {
            is_playing: false,
            title: String::new(),
            album: String::new(),
            artists: Vec::new(),
            explicit: false,
            track_url: String::new(),
            cover_url: String::new(),
            image_url: String::new(),
            duration_ms: 0,
            progress_ms: 0,
            remaining_ms: 0,
            accent: ACCENT_COLOR.to_string(),
        }
    }
}

impl PlaybackSnapshot {
    /// Snapshot used when nothing is playing.
    pub fn idle() -> Self {
        Self::default()
    }
}

/// Outcome of a now-playing lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NowPlaying {
    Track(PlaybackSnapshot),
    Idle,
    /// The lookup could not be attempted, e.g. no refresh token configured.
    Unavailable(String),
}

impl NowPlaying {
    /// The snapshot the badge is rendered from; idle states render an empty card.
    pub fn snapshot(&self) -> PlaybackSnapshot {
        match self {
            NowPlaying::Track(snapshot) => snapshot.clone(),
            _ => PlaybackSnapshot::idle(),
        }
    }
}

impl Serialize for NowPlaying {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            NowPlaying::Track(snapshot) => snapshot.serialize(serializer),
            NowPlaying::Idle => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("isPlaying", &false)?;
                map.end()
            }
            NowPlaying::Unavailable(message) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("error", message)?;
                map.end()
            }
        }
    }
}
