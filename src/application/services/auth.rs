//! AuthService - login, password recovery, refresh and logout.

use chrono::Utc;
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use super::{decode as decode_body, expect_success, non_empty};
use crate::application::error::ClientError;
use crate::application::gateway::AuthGateway;
use crate::domain::auth::{LoginRequest, LoginResponse};
use crate::domain::foundation::UserHash;
use crate::domain::session::{LogoutReason, Session, SessionEvent};
use crate::ports::OutboundRequest;

const LOGIN_PATH: &str = "auth/login";
const RECOVER_PASSWORD_PATH: &str = "auth/recover-password";

#[derive(Debug, Deserialize)]
struct ExpiryClaims {
    exp: Option<i64>,
}

/// Returns true unless `token` is a JWT whose `exp` lies after `now`.
///
/// The signature is not checked: the client only wants to know whether the
/// backend is likely to refuse the credential.
fn jwt_expired_at(token: &str, now: i64) -> bool {
    let mut validation = Validation::default();
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    match decode::<ExpiryClaims>(token, &DecodingKey::from_secret(&[]), &validation) {
        Ok(data) => data.claims.exp.map_or(true, |exp| exp <= now),
        Err(_) => true,
    }
}

/// Authentication operations.
#[derive(Debug, Clone)]
pub struct AuthService {
    gateway: Arc<AuthGateway>,
}

impl AuthService {
    pub fn new(gateway: Arc<AuthGateway>) -> Self {
        Self { gateway }
    }

    /// Logs in and stores the resulting session.
    ///
    /// Bad credentials surface as `AuthorizationFailed` (the call is anonymous,
    /// so no refresh is attempted).
    pub async fn login(
        &self,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<LoginResponse, ClientError> {
        let request = LoginRequest::new(email, password)?;
        let outbound = OutboundRequest::post(LOGIN_PATH)
            .anonymous()
            .with_json(&request)?;

        let login: LoginResponse = decode_body(self.gateway.send(outbound).await?)?;
        let session = login.session()?;
        let identity = session.identity().clone();

        self.gateway.session_store().set(session).await?;

        tracing::info!(identity = %identity, "Logged in");
        self.gateway.publish(SessionEvent::established(identity));

        Ok(login)
    }

    /// Asks the backend to send a password recovery email.
    pub async fn recover_password(&self, email: &str) -> Result<(), ClientError> {
        let email = non_empty("email", email)?;
        let outbound = OutboundRequest::post(RECOVER_PASSWORD_PATH)
            .anonymous()
            .with_body(json!({ "email": email }));

        expect_success(self.gateway.send(outbound).await?)
    }

    /// Refreshes the session now instead of waiting for a 401.
    pub async fn refresh_token(&self) -> Result<Session, ClientError> {
        self.gateway.refresh_session().await
    }

    /// Clears the session. Safe to call when already logged out.
    pub async fn logout(&self) -> Result<(), ClientError> {
        self.gateway.session_store().clear().await?;

        tracing::info!("Logged out");
        self.gateway
            .publish(SessionEvent::logged_out(LogoutReason::UserInitiated));

        Ok(())
    }

    /// True iff an access credential is stored. Local check only.
    pub async fn is_authenticated(&self) -> Result<bool, ClientError> {
        Ok(self.gateway.session_store().is_authenticated().await?)
    }

    /// Identity reference of the current session, if any.
    pub async fn current_identity(&self) -> Result<Option<UserHash>, ClientError> {
        Ok(self
            .gateway
            .session_store()
            .get()
            .await?
            .map(|s| s.identity().clone()))
    }

    /// True when there is no session, or its access credential is not a JWT
    /// with a future `exp` claim.
    pub async fn is_token_expired(&self) -> Result<bool, ClientError> {
        let session = self.gateway.session_store().get().await?;
        Ok(match session {
            Some(session) => jwt_expired_at(session.access().expose(), Utc::now().timestamp()),
            None => true,
        })
    }
}
