//! Now-Playing Badge Library
//!
//! This library implements a small HTTP service that polls Spotify's
//! "currently playing" endpoint and renders the result as JSON or as an
//! embeddable, animated SVG badge.
//!
//! # Modules
//!
//! - `api` - HTTP handlers for the badge, JSON and OAuth endpoints
//! - `config` - Configuration management and environment variables
//! - `error` - Error types shared by the client and the service
//! - `management` - In-memory token manager and cover-art cache
//! - `now_playing` - Normalization of Spotify payloads into snapshots
//! - `progress` - Clock-skew-corrected playback progress
//! - `render` - SVG card renderer
//! - `server` - Router wiring and server startup
//! - `spotify` - Spotify accounts and Web API client
//! - `types` - Wire payloads and domain types
//! - `utils` - Escaping, time formatting, entity tags and the clock seam
//!
//! # Example
//!
//! ```
//! use nowplaying_badge::{config, server};
//!
//! #[tokio::main]
//! async fn main() -> nowplaying_badge::Res<()> {
//!     config::load_env()?;
//!     server::start_api_server(config::Config::from_env()?).await
//! }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod management;
pub mod now_playing;
pub mod progress;
pub mod render;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

/// Result alias used at the binary's top level and by server startup.
///
/// Library operations return [`error::Result`]; this boxed form lets `main`
/// combine configuration, I/O and server errors with `?`.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational line prefixed with a blue `o`.
///
/// ```
/// info!("Loaded configuration from {}", path.display());
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success line prefixed with a green checkmark.
///
/// ```
/// success!("Listening on http://{}", addr);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a fatal error with a red `!` and exits with status 1.
///
/// Only for startup failures such as missing credentials; request handlers
/// use [`warning!`] instead.
///
/// ```
/// error!("SPOTIFY_API_AUTH_CLIENT_ID must be set");
/// // not reached
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a recoverable problem prefixed with a yellow `!` to stderr.
///
/// ```
/// warning!("Failed to fetch cover art {}: {}", url, err);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
