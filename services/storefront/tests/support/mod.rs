//! Helpers shared by the storefront integration tests

#![allow(dead_code)]

use std::net::SocketAddr;

use axum::Router;
use common::Settings;
use storefront::{AppState, create_router};

/// Serve `app` on an ephemeral local port
pub async fn serve(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move { axum::serve(listener, app).await.expect("serve app") });
    addr
}

/// A local address nothing listens on
pub fn closed_addr() -> SocketAddr {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    listener.local_addr().expect("local addr")
}

pub fn settings(upstream: SocketAddr) -> Settings {
    Settings {
        bind_addr: "127.0.0.1:0".to_string(),
        catalog_base_url: format!("http://{upstream}/api/Product"),
        auth_base_url: format!("http://{upstream}/api/Auth"),
        sign_in_page: "/auth/login".to_string(),
        session_secret: "test-secret".to_string(),
        session_ttl_secs: 3600,
        upstream_timeout_secs: 5,
    }
}

/// Start the storefront in front of `upstream`
pub async fn spawn_storefront(upstream: SocketAddr) -> SocketAddr {
    let state = AppState::new(settings(upstream)).expect("app state");
    serve(create_router(state)).await
}

/// Client that reports redirects instead of following them
pub fn http() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .expect("http client")
}
