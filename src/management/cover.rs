use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use base64::{Engine, engine::general_purpose::STANDARD};
use reqwest::{Client, header::CONTENT_TYPE};
use tokio::sync::Mutex;

use crate::{error::Result, spotify::ensure_success, utils::Clock, warning};

/// Lifetime of a cached cover: ten minutes.
pub const COVER_TTL_MS: i64 = 600_000;

/// Returned for an empty cover URL.
pub const DEFAULT_COVER: &str = "data:image/svg+xml;utf8,<svg xmlns='http://www.w3.org/2000/svg' viewBox='0 0 100 100'><rect width='100' height='100' fill='%23282828'/><path d='M42 30v32.5a9 9 0 1 0 6 8.5V42h16v-12z' fill='%236a6a6a'/></svg>";

/// Returned when fetching a cover fails: a 1x1 transparent GIF.
pub const FALLBACK_COVER: &str =
    "data:image/gif;base64,R0lGODlhAQABAIAAAAAAAP///yH5BAEAAAAALAAAAAABAAEAAAIBRAA7";

const DEFAULT_CONTENT_TYPE: &str = "image/jpeg";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedImage {
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Downloads cover art.
#[async_trait]
pub trait ImageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchedImage>;
}

#[derive(Debug, Clone)]
pub struct HttpImageFetcher {
    http: Client,
}

impl HttpImageFetcher {
    pub fn new(http: Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl ImageFetcher for HttpImageFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedImage> {
        let response = ensure_success(self.http.get(url).send().await?).await?;
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let bytes = response.bytes().await?.to_vec();

        Ok(FetchedImage { content_type, bytes })
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    data_uri: String,
    stored_at_ms: i64,
}

/// Memoizes cover URLs as inline `data:` URIs for a fixed TTL.
///
/// Expired entries are evicted lazily on lookup; there is no background sweep.
/// Failed fetches are never cached so the next request retries. The map lock is
/// only held between await points, never across the download.
pub struct CoverCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
    fetcher: Arc<dyn ImageFetcher>,
    clock: Arc<dyn Clock>,
    ttl_ms: i64,
}

impl CoverCache {
    pub fn new(fetcher: Arc<dyn ImageFetcher>, clock: Arc<dyn Clock>) -> Self {
        Self::with_ttl(fetcher, clock, COVER_TTL_MS)
    }

    pub fn with_ttl(fetcher: Arc<dyn ImageFetcher>, clock: Arc<dyn Clock>, ttl_ms: i64) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            fetcher,
            clock,
            ttl_ms,
        }
    }

    /// Resolves `url` to an image reference usable inline. Never fails.
    pub async fn resolve(&self, url: &str) -> String {
        if url.is_empty() {
            return DEFAULT_COVER.to_string();
        }

        if let Some(data_uri) = self.lookup(url).await {
            return data_uri;
        }

        match self.fetcher.fetch(url).await {
            Ok(image) => {
                let data_uri = to_data_uri(&image);
                self.entries.lock().await.insert(
                    url.to_string(),
                    CacheEntry {
                        data_uri: data_uri.clone(),
                        stored_at_ms: self.clock.now_ms(),
                    },
                );
                data_uri
            }
            Err(e) => {
                warning!("Failed to fetch cover art {}: {}", url, e);
                FALLBACK_COVER.to_string()
            }
        }
    }

    /// Whether a live entry exists for `url`.
    pub async fn contains(&self, url: &str) -> bool {
        self.lookup(url).await.is_some()
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    async fn lookup(&self, url: &str) -> Option<String> {
        let mut entries = self.entries.lock().await;
        let entry = entries.get(url)?;
        if self.clock.now_ms() - entry.stored_at_ms >= self.ttl_ms {
            entries.remove(url);
            return None;
        }
        Some(entry.data_uri.clone())
    }
}

fn to_data_uri(image: &FetchedImage) -> String {
    let content_type = image
        .content_type
        .as_deref()
        .map(|ct| ct.split(';').next().unwrap_or(ct).trim())
        .filter(|ct| !ct.is_empty())
        .unwrap_or(DEFAULT_CONTENT_TYPE);

    format!("data:{};base64,{}", content_type, STANDARD.encode(&image.bytes))
}
