//! Playback progress correction.
//!
//! Spotify reports `progress_ms` together with a `timestamp` taken when the
//! playback state was sampled. When that timestamp is close to the local
//! clock, the elapsed time since sampling is added to the progress so a badge
//! rendered later does not lag behind the real playback position.

/// Largest distance between server timestamp and local time that is still
/// trusted for correction.
pub const MAX_TRUSTED_SKEW_MS: i64 = 2000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub progress_ms: u64,
    pub remaining_ms: u64,
}

/// Computes the playback position at `now_ms`.
///
/// With `|now - server_timestamp| < 2000` the difference is added to the raw
/// progress, otherwise the raw value is used as-is. The result is clamped into
/// `[0, duration]` and `progress + remaining == duration` always holds.
/// Negative durations count as zero.
pub fn correct(progress_ms_raw: i64, duration_ms: i64, server_timestamp_ms: i64, now_ms: i64) -> Progress {
    let duration = duration_ms.max(0);
    let delta = now_ms.saturating_sub(server_timestamp_ms);
    let correction = if delta.saturating_abs() < MAX_TRUSTED_SKEW_MS {
        delta
    } else {
        0
    };

    let progress = progress_ms_raw.saturating_add(correction).clamp(0, duration);

    Progress {
        progress_ms: progress as u64,
        remaining_ms: (duration - progress) as u64,
    }
}
