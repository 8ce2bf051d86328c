use std::{net::SocketAddr, str::FromStr, sync::Arc};

use axum::{Extension, Router, routing::get};
use reqwest::Client;

use crate::{
    Res, api,
    config::Config,
    management::{CoverCache, HttpImageFetcher, TokenManager},
    now_playing::NowPlayingService,
    spotify::SpotifyClient,
    success,
    utils::{Clock, SystemClock},
};

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub now_playing: Arc<NowPlayingService>,
}

impl AppState {
    /// Wires the production collaborators: reqwest-backed Spotify client and
    /// cover fetcher, system clock.
    pub fn from_config(config: Config) -> Self {
        let http = Client::new();
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);

        let service = NowPlayingService::new(
            Arc::new(SpotifyClient::new(http.clone(), &config)),
            TokenManager::new(config.refresh_token.clone(), Arc::clone(&clock)),
            CoverCache::new(Arc::new(HttpImageFetcher::new(http)), Arc::clone(&clock)),
            clock,
        );

        Self {
            config: Arc::new(config),
            now_playing: Arc::new(service),
        }
    }
}

pub fn make_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(api::index))
        .route("/health", get(api::health))
        .route("/login", get(api::login))
        .route("/callback", get(api::callback))
        .route("/now-playing.json", get(api::now_playing_json))
        .route("/now-playing.svg", get(api::now_playing_svg))
        .layer(Extension(state))
}

pub async fn start_api_server(config: Config) -> Res<()> {
    let addr = SocketAddr::from_str(&config.server_address)
        .map_err(|e| format!("Failed to parse server address: {}", e))?;

    let app = make_app(AppState::from_config(config));
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    success!("Listening on http://{}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}
