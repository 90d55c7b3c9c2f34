//! Storefront routes

use axum::{
    Extension, Form, Json, Router,
    extract::{Query, State, rejection::FormRejection},
    http::header,
    middleware,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info, warn};

use crate::{
    AppState,
    auth::Credentials,
    catalog::{CatalogSearch, ProductSearchParams},
    error::{ApiError, ApiResult},
    middleware::{CurrentSession, session_middleware},
    session::{expired_session_cookie, session_cookie},
};

/// Error code appended to the sign-in page after a failed login
pub const SIGN_IN_ERROR: &str = "CredentialsSignin";

/// Sign-in form body
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SignInForm {
    pub email: String,
    pub password: String,
    pub callback_url: Option<String>,
}

/// Create the router for the storefront service
pub fn create_router(state: AppState) -> Router {
    let auth_routes = Router::new()
        .route("/api/auth/callback/credentials", post(sign_in))
        .route("/api/auth/session", get(get_session))
        .route("/api/auth/signout", post(sign_out))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            session_middleware,
        ));

    Router::new()
        .route("/health", get(health_check))
        .route("/api/products", get(search_products))
        .merge(auth_routes)
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "storefront"
    }))
}

/// Product search proxy
pub async fn search_products(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> ApiResult<Response> {
    let search = CatalogSearch::from(ProductSearchParams::from_pairs(pairs));

    let body = state.catalog.search(&search).await.map_err(|e| {
        error!("Failed to fetch products: {}", e);
        ApiError::ProductsUnavailable
    })?;

    Ok(([(header::CONTENT_TYPE, "application/json")], body).into_response())
}

/// Credentials sign-in
pub async fn sign_in(
    State(state): State<AppState>,
    jar: CookieJar,
    form: Result<Form<SignInForm>, FormRejection>,
) -> Response {
    let failure = Redirect::to(&format!(
        "{}?error={}",
        state.settings.sign_in_page, SIGN_IN_ERROR
    ));

    let Form(form) = match form {
        Ok(form) => form,
        Err(rejection) => {
            warn!("Rejected sign-in body: {}", rejection);
            return failure.into_response();
        }
    };

    let credentials = Credentials {
        email: form.email,
        password: form.password,
    };

    let Some(identity) = state.auth.authorize(&credentials).await else {
        return failure.into_response();
    };

    let token = match state.sessions.issue(&identity) {
        Ok(token) => token,
        Err(e) => {
            error!("Failed to sign session: {}", e);
            return failure.into_response();
        }
    };

    let target = local_redirect_target(form.callback_url.as_deref());
    (jar.add(session_cookie(token)), Redirect::to(target)).into_response()
}

/// Current session, or `{}` when signed out
pub async fn get_session(Extension(session): Extension<CurrentSession>) -> Response {
    match session.0.as_ref().and_then(|identity| identity.to_view()) {
        Some(view) => Json(view).into_response(),
        None => Json(json!({})).into_response(),
    }
}

/// Sign out
pub async fn sign_out(
    Extension(session): Extension<CurrentSession>,
    jar: CookieJar,
) -> impl IntoResponse {
    if let Some(identity) = session.0 {
        info!("User {} signed out", identity.id);
    }

    (jar.remove(expired_session_cookie()), Redirect::to("/"))
}

/// Only same-origin paths are honoured as post-login targets
fn local_redirect_target(callback_url: Option<&str>) -> &str {
    match callback_url {
        Some(url) if url.starts_with('/') && !url.starts_with("//") => url,
        _ => "/",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_redirect_target() {
        assert_eq!(local_redirect_target(None), "/");
        assert_eq!(local_redirect_target(Some("/products")), "/products");
        assert_eq!(local_redirect_target(Some("https://evil.example")), "/");
        assert_eq!(local_redirect_target(Some("//evil.example")), "/");
    }
}
