//! The reqwest-backed clients against a local mock server.

mod common;

use std::sync::Arc;

use base64::{Engine, engine::general_purpose::STANDARD};
use common::{FixedClock, NOW};
use nowplaying_badge::{
    config::{Config, ENV_API_URL, ENV_BASE_URL, ENV_CLIENT_ID, ENV_CLIENT_SECRET, ENV_TOKEN_URL},
    error::Error,
    management::{CoverCache, FALLBACK_COVER, HttpImageFetcher},
    spotify::{SpotifyApi, SpotifyClient},
};
use reqwest::{Client, StatusCode};
use serde_json::json;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CURRENTLY_PLAYING: &str = "/v1/me/player/currently-playing";

fn client(server: &MockServer) -> SpotifyClient {
    let token_url = format!("{}/api/token", server.uri());
    let api_url = format!("{}/v1", server.uri());
    let config = Config::from_lookup(|key| match key {
        ENV_CLIENT_ID => Some("client-123".to_string()),
        ENV_CLIENT_SECRET => Some("secret".to_string()),
        ENV_BASE_URL => Some("https://badge.example.com".to_string()),
        ENV_TOKEN_URL => Some(token_url.clone()),
        ENV_API_URL => Some(api_url.clone()),
        _ => None,
    })
    .unwrap();

    SpotifyClient::new(Client::new(), &config)
}

fn basic_credentials() -> String {
    format!("Basic {}", STANDARD.encode("client-123:secret"))
}

#[tokio::test]
async fn test_no_content_means_nothing_playing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(CURRENTLY_PLAYING))
        .and(header("authorization", "Bearer access"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let playing = client(&server).currently_playing("access").await.unwrap();
    assert!(playing.is_none());
}

#[tokio::test]
async fn test_blank_body_means_nothing_playing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(CURRENTLY_PLAYING))
        .respond_with(ResponseTemplate::new(200).set_body_string(" \n"))
        .mount(&server)
        .await;

    let playing = client(&server).currently_playing("access").await.unwrap();
    assert!(playing.is_none());
}

#[tokio::test]
async fn test_currently_playing_is_decoded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(CURRENTLY_PLAYING))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "is_playing": true,
            "progress_ms": 1000,
            "item": { "name": "Song", "duration_ms": 4000 }
        })))
        .mount(&server)
        .await;

    let playing = client(&server)
        .currently_playing("access")
        .await
        .unwrap()
        .unwrap();
    assert!(playing.is_playing);
    assert_eq!(playing.item.unwrap().name.as_deref(), Some("Song"));
}

#[tokio::test]
async fn test_error_status_becomes_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(CURRENTLY_PLAYING))
        .respond_with(ResponseTemplate::new(401).set_body_string("token expired"))
        .mount(&server)
        .await;

    let err = client(&server).currently_playing("stale").await.unwrap_err();

    match &err {
        Error::Api { status, body } => {
            assert_eq!(*status, StatusCode::UNAUTHORIZED);
            assert_eq!(body, "token expired");
        }
        other => panic!("expected an API error, got {:?}", other),
    }
    assert!(err.to_string().starts_with("request returned 401"));
}

#[tokio::test]
async fn test_refresh_grant_uses_basic_auth_and_form_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .and(header("authorization", basic_credentials().as_str()))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string_contains("grant_type=refresh_token"))
        .and(body_string_contains("refresh_token=AQD-refresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "BQC-access",
            "token_type": "Bearer",
            "expires_in": 3600
        })))
        .expect(1)
        .mount(&server)
        .await;

    let token = client(&server)
        .refresh_access_token("AQD-refresh")
        .await
        .unwrap();

    assert_eq!(token.access_token, "BQC-access");
    assert_eq!(token.refresh_token, None);
}

#[tokio::test]
async fn test_code_exchange_sends_redirect_uri() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .and(header("authorization", basic_credentials().as_str()))
        .and(body_string_contains("grant_type=authorization_code"))
        .and(body_string_contains("code=abc"))
        .and(body_string_contains(
            "redirect_uri=https%3A%2F%2Fbadge.example.com%2Fcallback",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "BQC-access",
            "refresh_token": "AQD-refresh",
            "expires_in": 3600
        })))
        .expect(1)
        .mount(&server)
        .await;

    let token = client(&server).exchange_code("abc").await.unwrap();
    assert_eq!(token.refresh_token.as_deref(), Some("AQD-refresh"));
}

#[tokio::test]
async fn test_cover_keeps_served_content_type() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/image/cover"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "image/png")
                .set_body_bytes(b"cover".to_vec()),
        )
        .expect(1)
        .mount(&server)
        .await;

    let cache = CoverCache::new(
        Arc::new(HttpImageFetcher::new(Client::new())),
        FixedClock::new(NOW),
    );
    let url = format!("{}/image/cover", server.uri());

    // base64("cover") == "Y292ZXI="
    assert_eq!(cache.resolve(&url).await, "data:image/png;base64,Y292ZXI=");
    // Served from the cache the second time
    assert_eq!(cache.resolve(&url).await, "data:image/png;base64,Y292ZXI=");
}

#[tokio::test]
async fn test_missing_cover_falls_back_and_is_not_cached() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/image/gone"))
        .respond_with(ResponseTemplate::new(404))
        .expect(2)
        .mount(&server)
        .await;

    let cache = CoverCache::new(
        Arc::new(HttpImageFetcher::new(Client::new())),
        FixedClock::new(NOW),
    );
    let url = format!("{}/image/gone", server.uri());

    assert_eq!(cache.resolve(&url).await, FALLBACK_COVER);
    assert!(!cache.contains(&url).await);
    assert_eq!(cache.len().await, 0);

    // Retried on the next request
    assert_eq!(cache.resolve(&url).await, FALLBACK_COVER);
}
