//! Signed session tokens
//!
//! After a successful login the session identity is signed into an HS256
//! JWT and handed to the browser as the `session-token` cookie. The upstream
//! bearer token travels inside the claims so later requests can recover it
//! without any server-side session store.

use anyhow::Result;
use axum_extra::extract::cookie::{Cookie, SameSite};
use chrono::Utc;
use common::Settings;
use common::models::SessionIdentity;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

/// Name of the session cookie
pub const SESSION_COOKIE: &str = "session-token";

/// Session claims
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Upstream user ID
    pub sub: String,
    pub email: String,
    pub name: String,
    /// Bearer token issued by the upstream auth service
    pub access_token: String,
    /// Issued at time
    pub iat: i64,
    /// Expiration time
    pub exp: i64,
}

impl From<SessionClaims> for SessionIdentity {
    fn from(claims: SessionClaims) -> Self {
        SessionIdentity {
            id: claims.sub,
            email: claims.email,
            name: claims.name,
            access_token: claims.access_token,
        }
    }
}

/// Session service
#[derive(Clone)]
pub struct SessionService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl_secs: u64,
}

impl SessionService {
    /// Initialize a new session service
    pub fn new(secret: &str, ttl_secs: u64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;

        SessionService {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl_secs,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(&settings.session_secret, settings.session_ttl_secs)
    }

    /// Sign a session for the given identity
    pub fn issue(&self, identity: &SessionIdentity) -> Result<String> {
        self.issue_at(identity, Utc::now().timestamp())
    }

    fn issue_at(&self, identity: &SessionIdentity, now: i64) -> Result<String> {
        let ttl = i64::try_from(self.ttl_secs)?;
        let claims = SessionClaims {
            sub: identity.id.clone(),
            email: identity.email.clone(),
            name: identity.name.clone(),
            access_token: identity.access_token.clone(),
            iat: now,
            exp: now.saturating_add(ttl),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)?;
        Ok(token)
    }

    /// Validate a session token and return the identity it carries
    pub fn validate(&self, token: &str) -> Result<SessionIdentity> {
        let token_data = decode::<SessionClaims>(token, &self.decoding_key, &self.validation)?;
        Ok(token_data.claims.into())
    }
}

/// Cookie carrying a freshly issued session
pub fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/")
        .build()
}

/// Cookie matching [`session_cookie`], for removal
pub fn expired_session_cookie() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, "")).path("/").build()
}
