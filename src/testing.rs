//! Shared helpers for tests that need a stand-in upstream.

use std::sync::Arc;

use axum::Router;

use crate::{client::ApiClient, config::ClientConfig, sign::FixedClock};

/// Serve `router` on an ephemeral local port and return its base URL.
pub async fn spawn_upstream(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}/")
}

pub fn config_for(base_url: &str) -> ClientConfig {
    ClientConfig::default().with_base_url(base_url)
}

/// Client pointed at `base_url` with the clock pinned to `now`.
pub fn client_for(base_url: &str, now: i64) -> ApiClient {
    ApiClient::with_clock(&config_for(base_url), Arc::new(FixedClock(now))).unwrap()
}
