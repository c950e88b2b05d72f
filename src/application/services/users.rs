//! UserService - profile, preferences, payment methods and notifications.

use std::sync::Arc;

use super::{current_identity, decode, expect_success};
use crate::application::error::ClientError;
use crate::application::gateway::AuthGateway;
use crate::domain::foundation::{NotificationHash, PaymentMethodHash, UserHash};
use crate::domain::users::{
    NewPaymentMethod, Notification, NotificationCount, PasswordChange, PaymentMethod,
    PreferencesUpdate, ProfileUpdate, UserPreferences, UserProfile,
};
use crate::ports::OutboundRequest;

#[derive(Debug, Clone)]
pub struct UserService {
    gateway: Arc<AuthGateway>,
}

impl UserService {
    pub fn new(gateway: Arc<AuthGateway>) -> Self {
        Self { gateway }
    }

    /// `users/{hash}/{rest}` for the current user.
    async fn user_path(&self, rest: &str) -> Result<String, ClientError> {
        let user: UserHash = current_identity(&self.gateway).await?;
        Ok(format!("users/{}/{}", user, rest))
    }

    // ----- Profile -----

    pub async fn profile(&self) -> Result<UserProfile, ClientError> {
        let path = self.user_path("profile").await?;
        decode(self.gateway.get(path).await?)
    }

    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<UserProfile, ClientError> {
        let path = self.user_path("profile").await?;
        decode(self.gateway.put(path, update).await?)
    }

    pub async fn update_preferences(
        &self,
        update: &PreferencesUpdate,
    ) -> Result<UserPreferences, ClientError> {
        let path = self.user_path("preferences").await?;
        decode(self.gateway.put(path, update).await?)
    }

    pub async fn change_password(&self, change: &PasswordChange) -> Result<(), ClientError> {
        let path = self.user_path("password").await?;
        expect_success(self.gateway.put(path, change).await?)
    }

    // ----- Payment methods -----

    pub async fn payment_methods(&self) -> Result<Vec<PaymentMethod>, ClientError> {
        let path = self.user_path("payment-methods").await?;
        decode(self.gateway.get(path).await?)
    }

    pub async fn add_payment_method(
        &self,
        method: &NewPaymentMethod,
    ) -> Result<PaymentMethod, ClientError> {
        method.validate()?;
        let path = self.user_path("payment-methods").await?;
        decode(self.gateway.post(path, method).await?)
    }

    pub async fn remove_payment_method(&self, method: &PaymentMethodHash) -> Result<(), ClientError> {
        let path = self.user_path(&format!("payment-methods/{}", method)).await?;
        expect_success(self.gateway.delete(path).await?)
    }

    pub async fn set_default_payment_method(
        &self,
        method: &PaymentMethodHash,
    ) -> Result<(), ClientError> {
        let path = self
            .user_path(&format!("payment-methods/{}/default", method))
            .await?;
        expect_success(self.gateway.send(OutboundRequest::put(path)).await?)
    }

    // ----- Notifications -----

    pub async fn notifications(&self) -> Result<Vec<Notification>, ClientError> {
        let path = self.user_path("notifications").await?;
        decode(self.gateway.get(path).await?)
    }

    pub async fn mark_notification_read(
        &self,
        notification: &NotificationHash,
    ) -> Result<(), ClientError> {
        let path = self
            .user_path(&format!("notifications/{}/read", notification))
            .await?;
        expect_success(self.gateway.send(OutboundRequest::put(path)).await?)
    }

    pub async fn mark_all_notifications_read(&self) -> Result<(), ClientError> {
        let path = self.user_path("notifications/read-all").await?;
        expect_success(self.gateway.send(OutboundRequest::put(path)).await?)
    }

    pub async fn delete_notification(&self, notification: &NotificationHash) -> Result<(), ClientError> {
        let path = self
            .user_path(&format!("notifications/{}", notification))
            .await?;
        expect_success(self.gateway.delete(path).await?)
    }

    pub async fn notification_count(&self) -> Result<NotificationCount, ClientError> {
        let path = self.user_path("notifications/count").await?;
        decode(self.gateway.get(path).await?)
    }
}
