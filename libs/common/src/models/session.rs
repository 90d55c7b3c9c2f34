//! Session identity produced by a successful login

use serde::{Deserialize, Serialize};

/// Identity built from the upstream login response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionIdentity {
    /// Upstream user id, stringified
    pub id: String,
    pub email: String,
    pub name: String,
    /// Opaque bearer token issued by the upstream auth service
    pub access_token: String,
}

/// User block of the session exposed to the UI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: i64,
    pub email: String,
    pub name: String,
}

/// Session as returned by `GET /api/auth/session`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub user: SessionUser,
    pub access_token: String,
}

impl SessionIdentity {
    /// Session view for the UI, `None` when the id is not numeric
    pub fn to_view(&self) -> Option<SessionView> {
        let id = self.id.parse().ok()?;
        Some(SessionView {
            user: SessionUser {
                id,
                email: self.email.clone(),
                name: self.name.clone(),
            },
            access_token: self.access_token.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_uses_numeric_id_and_camel_case() {
        let identity = SessionIdentity {
            id: "7".to_string(),
            email: "a@b.com".to_string(),
            name: "alice".to_string(),
            access_token: "T".to_string(),
        };

        let view = serde_json::to_value(identity.to_view().unwrap()).unwrap();
        assert_eq!(
            view,
            serde_json::json!({
                "user": { "id": 7, "email": "a@b.com", "name": "alice" },
                "accessToken": "T"
            })
        );
    }
}
