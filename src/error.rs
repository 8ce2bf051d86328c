use reqwest::StatusCode;
use thiserror::Error;

/// Errors surfaced by the outbound HTTP clients, the now-playing service and
/// snapshot loading.
///
/// Cover-art failures never reach the service's callers: the cover cache
/// absorbs them and falls back to a transparent pixel.
#[derive(Debug, Error)]
pub enum Error {
    #[error("missing credential")]
    MissingCredential,

    #[error("request returned {status}: {body}")]
    Api { status: StatusCode, body: String },

    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected response payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
