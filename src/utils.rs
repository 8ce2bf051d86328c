use chrono::Utc;
use sha2::{Digest, Sha256};

/// Source of the current wall-clock time in epoch milliseconds.
///
/// Injected into the token manager, the cover cache and the normalizer so
/// expiry and progress correction can be tested without sleeping.
pub trait Clock: Send + Sync {
    fn now_ms(&self) -> i64;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// Escapes `& < > "` for embedding in XML text or attribute values.
pub fn escape_xml(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            other => out.push(other),
        }
    }
    out
}

/// Formats milliseconds as `m:ss`, truncating partial seconds.
///
/// Zero and negative inputs give `0:00`.
pub fn ms_to_clock(ms: i64) -> String {
    if ms <= 0 {
        return "0:00".to_string();
    }
    let total_seconds = ms / 1000;
    format!("{}:{:02}", total_seconds / 60, total_seconds % 60)
}

/// Strong entity tag for a response body: quoted hex SHA-256 prefix.
pub fn etag_for(body: &str) -> String {
    let hash = format!("{:x}", Sha256::digest(body.as_bytes()));
    format!("\"{}\"", &hash[..32])
}

/// Whether an `If-None-Match` header value matches `etag`.
///
/// Handles `*`, comma-separated lists and weak validators (`W/"..."`).
pub fn etag_matches(if_none_match: &str, etag: &str) -> bool {
    if_none_match.split(',').map(str::trim).any(|candidate| {
        candidate == "*" || candidate.strip_prefix("W/").unwrap_or(candidate) == etag
    })
}
