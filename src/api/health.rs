use axum::{Extension, response::Json};
use serde_json::{Value, json};

use crate::server::AppState;

/// Liveness probe; also tells whether a refresh token is configured.
pub async fn health(Extension(state): Extension<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "refreshTokenConfigured": state.now_playing.has_refresh_token().await,
    }))
}
