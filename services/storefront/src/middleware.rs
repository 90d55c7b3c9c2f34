//! Session middleware
//!
//! Decodes the session cookie on every request and stores the outcome in the
//! request extensions as a [`CurrentSession`]. A missing, tampered or expired
//! cookie simply means "no session".

use axum::{extract::State, http::Request, middleware::Next, response::Response};
use axum_extra::extract::cookie::CookieJar;
use common::models::SessionIdentity;
use tracing::debug;

use crate::{session::SESSION_COOKIE, state::AppState};

/// Session attached to the current request, if any
#[derive(Debug, Clone, Default)]
pub struct CurrentSession(pub Option<SessionIdentity>);

/// Session middleware
pub async fn session_middleware(
    State(state): State<AppState>,
    mut req: Request<axum::body::Body>,
    next: Next,
) -> Response {
    let jar = CookieJar::from_headers(req.headers());

    let identity = jar.get(SESSION_COOKIE).and_then(|cookie| {
        state
            .sessions
            .validate(cookie.value())
            .map_err(|e| debug!("Ignoring invalid session cookie: {}", e))
            .ok()
    });

    req.extensions_mut().insert(CurrentSession(identity));

    next.run(req).await
}
