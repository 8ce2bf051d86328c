#![allow(dead_code)]

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicI64, AtomicUsize, Ordering},
};

use async_trait::async_trait;
use nowplaying_badge::{
    error::{Error, Result},
    management::{CoverCache, FetchedImage, ImageFetcher, TokenManager},
    now_playing::NowPlayingService,
    spotify::SpotifyApi,
    types::{CurrentlyPlaying, Token},
    utils::Clock,
};
use reqwest::StatusCode;

pub const NOW: i64 = 1_700_000_000_000;

pub struct FixedClock(AtomicI64);

impl FixedClock {
    pub fn new(now_ms: i64) -> Arc<Self> {
        Arc::new(Self(AtomicI64::new(now_ms)))
    }

    pub fn advance(&self, ms: i64) {
        self.0.fetch_add(ms, Ordering::SeqCst);
    }
}

impl Clock for FixedClock {
    fn now_ms(&self) -> i64 {
        self.0.load(Ordering::SeqCst)
    }
}

/// Serves a fixed image, or fails with `status` when set.
pub struct CountingFetcher {
    pub calls: AtomicUsize,
    pub status: Option<StatusCode>,
    pub content_type: Option<String>,
}

impl CountingFetcher {
    pub fn ok() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            status: None,
            content_type: Some("image/png".to_string()),
        })
    }

    pub fn failing(status: StatusCode) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            status: Some(status),
            content_type: None,
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ImageFetcher for CountingFetcher {
    async fn fetch(&self, _url: &str) -> Result<FetchedImage> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.status {
            Some(status) => Err(Error::Api {
                status,
                body: String::new(),
            }),
            None => Ok(FetchedImage {
                content_type: self.content_type.clone(),
                bytes: b"cover".to_vec(),
            }),
        }
    }
}

/// Scripted Spotify API counting every call.
pub struct ScriptedSpotify {
    pub playing: Mutex<Option<CurrentlyPlaying>>,
    pub player_status: Option<StatusCode>,
    pub rotated_refresh_token: Option<String>,
    pub refresh_calls: AtomicUsize,
    pub player_calls: AtomicUsize,
    pub seen_refresh_tokens: Mutex<Vec<String>>,
}

impl ScriptedSpotify {
    pub fn new(playing: Option<CurrentlyPlaying>) -> Self {
        Self {
            playing: Mutex::new(playing),
            player_status: None,
            rotated_refresh_token: None,
            refresh_calls: AtomicUsize::new(0),
            player_calls: AtomicUsize::new(0),
            seen_refresh_tokens: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(status: StatusCode) -> Self {
        Self {
            player_status: Some(status),
            ..Self::new(None)
        }
    }

    pub fn refresh_calls(&self) -> usize {
        self.refresh_calls.load(Ordering::SeqCst)
    }

    pub fn player_calls(&self) -> usize {
        self.player_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SpotifyApi for ScriptedSpotify {
    async fn exchange_code(&self, code: &str) -> Result<Token> {
        Ok(Token {
            access_token: format!("access-{}", code),
            refresh_token: Some(format!("refresh-{}", code)),
            scope: String::new(),
            expires_in: 3600,
        })
    }

    async fn refresh_access_token(&self, refresh_token: &str) -> Result<Token> {
        self.refresh_calls.fetch_add(1, Ordering::SeqCst);
        self.seen_refresh_tokens
            .lock()
            .unwrap()
            .push(refresh_token.to_string());
        Ok(Token {
            access_token: "access".to_string(),
            refresh_token: self.rotated_refresh_token.clone(),
            scope: String::new(),
            expires_in: 3600,
        })
    }

    async fn currently_playing(&self, _access_token: &str) -> Result<Option<CurrentlyPlaying>> {
        self.player_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(status) = self.player_status {
            return Err(Error::Api {
                status,
                body: "{\"error\":\"boom\"}".to_string(),
            });
        }
        Ok(self.playing.lock().unwrap().clone())
    }
}

pub fn service(
    api: Arc<ScriptedSpotify>,
    fetcher: Arc<CountingFetcher>,
    refresh_token: Option<&str>,
    clock: Arc<FixedClock>,
) -> NowPlayingService {
    NowPlayingService::new(
        api,
        TokenManager::new(refresh_token.map(str::to_string), clock.clone()),
        CoverCache::new(fetcher, clock.clone()),
        clock,
    )
}

/// A typical currently-playing payload sampled `lag_ms` before [`NOW`].
pub fn playing_payload(lag_ms: i64) -> CurrentlyPlaying {
    serde_json::from_value(serde_json::json!({
        "is_playing": true,
        "progress_ms": 50_000,
        "timestamp": NOW - lag_ms,
        "item": {
            "name": "Song",
            "explicit": true,
            "duration_ms": 200_000,
            "external_urls": { "spotify": "https://open.spotify.com/track/abc" },
            "album": {
                "name": "Record",
                "images": [
                    { "url": "https://i.scdn.co/image/large", "width": 640 },
                    { "url": "https://i.scdn.co/image/small", "width": 64 }
                ]
            },
            "artists": [ { "name": "A" }, { "name": "B" } ]
        }
    }))
    .unwrap()
}
