//! # API Module
//!
//! HTTP endpoints of the badge service, one file per concern:
//!
//! - [`index`] - static page linking the endpoints below
//! - [`health`] - liveness probe with the crate version
//! - [`login`] / [`callback`] - one-time OAuth authorization-code flow that
//!   prints the refresh token for manual configuration
//! - [`now_playing_json`] - normalized snapshot as JSON, `Cache-Control: no-cache`
//! - [`now_playing_svg`] - the embeddable badge with `ETag` / `If-None-Match`
//!   support; always answers with an image, rendering errors into it
//!
//! All handlers read [`AppState`](crate::server::AppState) from an axum
//! `Extension` installed by [`crate::server::make_app`].

mod callback;
mod health;
mod index;
mod now_playing;

pub use callback::{callback, login};
pub use health::health;
pub use index::index;
pub use now_playing::{BadgeQuery, now_playing_json, now_playing_svg};
