//! Credentials login against the remote auth service

use common::error::{UpstreamError, UpstreamResult};
use common::models::SessionIdentity;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::validation::validate_credentials;

/// Email/password pair submitted by the sign-in form
#[derive(Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Successful upstream login body
#[derive(Debug, Deserialize)]
struct LoginResponse {
    user: UpstreamUser,
    token: String,
}

#[derive(Debug, Deserialize)]
struct UpstreamUser {
    id: UpstreamUserId,
    email: String,
    username: String,
}

/// User ids arrive as JSON numbers, occasionally as numeric strings
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum UpstreamUserId {
    Number(i64),
    Text(String),
}

impl UpstreamUserId {
    fn into_session_id(self) -> Option<String> {
        match self {
            UpstreamUserId::Number(id) => Some(id.to_string()),
            UpstreamUserId::Text(id) => id.trim().parse::<i64>().ok().map(|id| id.to_string()),
        }
    }
}

impl LoginResponse {
    fn into_identity(self) -> UpstreamResult<SessionIdentity> {
        if self.token.is_empty() {
            return Err(UpstreamError::UpstreamRejection(
                "login response carries an empty token".to_string(),
            ));
        }

        let id = self.user.id.into_session_id().ok_or_else(|| {
            UpstreamError::UpstreamRejection("login response carries a non-numeric user id".to_string())
        })?;

        Ok(SessionIdentity {
            id,
            email: self.user.email,
            name: self.user.username,
            access_token: self.token,
        })
    }
}

/// Client for the remote login endpoint
#[derive(Debug, Clone)]
pub struct AuthClient {
    client: reqwest::Client,
    login_url: String,
}

impl AuthClient {
    pub fn new(client: reqwest::Client, login_url: String) -> Self {
        Self { client, login_url }
    }

    /// Exchange credentials for a session identity
    ///
    /// Fails closed: any validation, transport or upstream problem yields
    /// `None`.
    pub async fn authorize(&self, credentials: &Credentials) -> Option<SessionIdentity> {
        match self.login(credentials).await {
            Ok(identity) => {
                info!("User {} signed in", identity.id);
                Some(identity)
            }
            Err(UpstreamError::NetworkFailure(e)) => {
                error!("Auth service unreachable: {}", e);
                None
            }
            Err(e) => {
                warn!("Sign-in rejected for {}: {}", credentials.email, e);
                None
            }
        }
    }

    async fn login(&self, credentials: &Credentials) -> UpstreamResult<SessionIdentity> {
        validate_credentials(&credentials.email, &credentials.password)?;

        let response = self
            .client
            .post(&self.login_url)
            .json(credentials)
            .send()
            .await
            .map_err(|e| UpstreamError::NetworkFailure(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::UpstreamRejection(format!(
                "auth service answered {status}"
            )));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| UpstreamError::NetworkFailure(e.to_string()))?;

        let login: LoginResponse = serde_json::from_slice(&body).map_err(|e| {
            if e.is_data() {
                UpstreamError::UpstreamRejection(format!("unexpected login response: {e}"))
            } else {
                UpstreamError::NetworkFailure(format!("login response is not JSON: {e}"))
            }
        })?;

        login.into_identity()
    }
}
