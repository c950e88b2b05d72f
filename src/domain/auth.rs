//! Login and token payloads.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{UserHash, ValidationError};
use crate::domain::session::{AccessCredential, RefreshCredential, Session};

/// A platform user as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub hash: UserHash,
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default)]
    pub is_active: bool,
    /// Milliseconds since the Unix epoch.
    #[serde(default)]
    pub created_at: i64,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }
}

/// Token pair returned by login and by the refresh endpoint.
///
/// Only `accessToken` is required; a refresh response may omit the rest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthToken {
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
}

impl AuthToken {
    /// Validates the token pair into credentials.
    ///
    /// A blank refresh token counts as "none returned".
    pub fn credentials(
        &self,
    ) -> Result<(AccessCredential, Option<RefreshCredential>), ValidationError> {
        let access = AccessCredential::new(self.access_token.clone())?;
        let refresh = self
            .refresh_token
            .as_deref()
            .filter(|r| !r.trim().is_empty())
            .map(RefreshCredential::new)
            .transpose()?;
        Ok((access, refresh))
    }
}

/// Body of `POST auth/login`.
#[derive(Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Result<Self, ValidationError> {
        let email = email.into();
        let password = password.into();
        if email.trim().is_empty() {
            return Err(ValidationError::empty_field("email"));
        }
        if password.is_empty() {
            return Err(ValidationError::empty_field("password"));
        }
        Ok(Self { email, password })
    }
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Response of `POST auth/login`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub user: User,
    pub token: AuthToken,
}

impl LoginResponse {
    /// Builds the session to store after a successful login.
    pub fn session(&self) -> Result<Session, ValidationError> {
        let (access, refresh) = self.token.credentials()?;
        Ok(Session::new(access, refresh, self.user.hash.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn login_json(refresh: serde_json::Value) -> serde_json::Value {
        json!({
            "user": {
                "hash": "u-1",
                "email": "ana@example.com",
                "firstName": "Ana",
                "lastName": "Lopez",
                "isActive": true,
                "createdAt": 1700000000000i64
            },
            "token": {
                "accessToken": "A1",
                "refreshToken": refresh,
                "expiresIn": 3600,
                "tokenType": "Bearer"
            }
        })
    }

    #[test]
    fn login_response_parses_camel_case() {
        let response: LoginResponse = serde_json::from_value(login_json(json!("R1"))).unwrap();

        assert_eq!(response.user.hash.as_str(), "u-1");
        assert_eq!(response.user.full_name(), "Ana Lopez");
        assert_eq!(response.token.refresh_token.as_deref(), Some("R1"));
        assert_eq!(response.token.expires_in, Some(3600));
    }

    #[test]
    fn login_response_builds_session() {
        let response: LoginResponse = serde_json::from_value(login_json(json!("R1"))).unwrap();
        let session = response.session().unwrap();

        assert_eq!(session.access().expose(), "A1");
        assert_eq!(session.refresh().map(|r| r.expose()), Some("R1"));
        assert_eq!(session.identity().as_str(), "u-1");
    }

    #[test]
    fn blank_refresh_token_means_none() {
        let response: LoginResponse = serde_json::from_value(login_json(json!(""))).unwrap();
        assert!(response.session().unwrap().refresh().is_none());
    }

    #[test]
    fn refresh_response_may_carry_access_token_only() {
        let token: AuthToken = serde_json::from_value(json!({"accessToken": "A2"})).unwrap();
        let (access, refresh) = token.credentials().unwrap();

        assert_eq!(access.expose(), "A2");
        assert!(refresh.is_none());
    }

    #[test]
    fn empty_access_token_is_rejected() {
        let token: AuthToken = serde_json::from_value(json!({"accessToken": ""})).unwrap();
        assert_eq!(
            token.credentials().unwrap_err(),
            ValidationError::empty_field("access_token")
        );
    }

    #[test]
    fn login_request_requires_both_fields() {
        assert!(LoginRequest::new("", "pw").is_err());
        assert!(LoginRequest::new("ana@example.com", "").is_err());
        let request = LoginRequest::new("ana@example.com", "pw").unwrap();
        assert!(format!("{:?}", request).contains("[REDACTED]"));
    }
}
