//! BookingService - the current user's bookings.

use serde_json::json;
use std::sync::Arc;

use super::{current_identity, decode};
use crate::application::error::ClientError;
use crate::application::gateway::AuthGateway;
use crate::domain::bookings::{Booking, BookingRequest, BookingScope, BookingUpdate};
use crate::domain::foundation::BookingHash;
use crate::ports::OutboundRequest;

#[derive(Debug, Clone)]
pub struct BookingService {
    gateway: Arc<AuthGateway>,
}

impl BookingService {
    pub fn new(gateway: Arc<AuthGateway>) -> Self {
        Self { gateway }
    }

    /// Lists the current user's bookings in the given scope.
    pub async fn user_bookings(&self, scope: BookingScope) -> Result<Vec<Booking>, ClientError> {
        let user = current_identity(&self.gateway).await?;
        let mut request = OutboundRequest::get(format!("users/{}/bookings", user));
        if let Some(flag) = scope.query_flag() {
            request = request.with_query(flag, true);
        }

        decode(self.gateway.send(request).await?)
    }

    /// The user's most recent booking; `None` when they have none.
    pub async fn last_booking(&self) -> Result<Option<Booking>, ClientError> {
        let user = current_identity(&self.gateway).await?;
        let response = self
            .gateway
            .get(format!("users/{}/bookings/last", user))
            .await?;

        if response.status() == 404 {
            return Ok(None);
        }
        decode(response).map(Some)
    }

    pub async fn create(&self, request: &BookingRequest) -> Result<Booking, ClientError> {
        current_identity(&self.gateway).await?;
        decode(self.gateway.post("bookings", request).await?)
    }

    pub async fn cancel(&self, booking: &BookingHash) -> Result<Booking, ClientError> {
        let request = OutboundRequest::put(format!("bookings/{}/cancel", booking));
        decode(self.gateway.send(request).await?)
    }

    pub async fn set_favorite(
        &self,
        booking: &BookingHash,
        is_favorite: bool,
    ) -> Result<Booking, ClientError> {
        let request = OutboundRequest::put(format!("bookings/{}/favorite", booking))
            .with_body(json!({ "isFavorite": is_favorite }));
        decode(self.gateway.send(request).await?)
    }

    pub async fn get(&self, booking: &BookingHash) -> Result<Booking, ClientError> {
        decode(self.gateway.get(format!("bookings/{}", booking)).await?)
    }

    pub async fn update(
        &self,
        booking: &BookingHash,
        update: &BookingUpdate,
    ) -> Result<Booking, ClientError> {
        decode(
            self.gateway
                .put(format!("bookings/{}", booking), update)
                .await?,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{signed_in, signed_out};
    use super::*;
    use crate::adapters::{MockReply, MockTransport};
    use crate::domain::bookings::BookingKind;
    use crate::domain::foundation::{EventHash, UserHash, ValidationError};

    fn booking_json(hash: &str) -> serde_json::Value {
        json!({
            "hash": hash,
            "date": 1000,
            "event": {
                "hash": "ev-1",
                "title": "Yoga",
                "startDate": 1,
                "endDate": 2,
                "sport": {"hash": "sp-1", "name": "Yoga"}
            },
            "userHash": "u-1"
        })
    }

    #[tokio::test]
    async fn scoped_listing_adds_flag() {
        let transport = MockTransport::new().with_reply(
            "users/u-1/bookings",
            MockReply::json(200, json!([booking_json("bk-1")])),
        );
        let service = BookingService::new(signed_in(&transport));

        let all = service.user_bookings(BookingScope::All).await.unwrap();
        service.user_bookings(BookingScope::Upcoming).await.unwrap();

        assert_eq!(all.len(), 1);
        let calls = transport.calls_to("users/u-1/bookings");
        assert!(calls[0].query().is_empty());
        assert_eq!(
            calls[1].query(),
            &[("upcoming".to_string(), "true".to_string())]
        );
    }

    #[tokio::test]
    async fn listing_without_identity_is_a_validation_error() {
        let transport = MockTransport::new();
        let service = BookingService::new(signed_out(&transport));

        let result = service.user_bookings(BookingScope::Past).await;

        assert_eq!(
            result.unwrap_err(),
            ClientError::Validation(ValidationError::MissingIdentity)
        );
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn last_booking_not_found_is_none() {
        let transport = MockTransport::new()
            .with_reply("users/u-1/bookings/last", MockReply::status(404));
        let service = BookingService::new(signed_in(&transport));

        assert_eq!(service.last_booking().await.unwrap(), None);
    }

    #[tokio::test]
    async fn last_booking_other_errors_are_rejected() {
        let transport = MockTransport::new().with_reply(
            "users/u-1/bookings/last",
            MockReply::json(500, json!({"message": "boom"})),
        );
        let service = BookingService::new(signed_in(&transport));

        let err = service.last_booking().await.unwrap_err();

        assert_eq!(
            err,
            ClientError::Rejected {
                status: 500,
                message: Some("boom".to_string())
            }
        );
    }

    #[tokio::test]
    async fn create_posts_request_body() {
        let transport = MockTransport::new()
            .with_reply("bookings", MockReply::json(201, booking_json("bk-9")));
        let service = BookingService::new(signed_in(&transport));
        let request = BookingRequest::new(
            EventHash::new("ev-1").unwrap(),
            1000,
            UserHash::new("u-1").unwrap(),
            BookingKind::Course,
        );

        let booking = service.create(&request).await.unwrap();

        assert_eq!(booking.hash.as_str(), "bk-9");
        let body = transport.calls()[0].body().cloned().unwrap();
        assert_eq!(body["eventHash"], "ev-1");
        assert_eq!(body["isCourse"], true);
    }

    #[tokio::test]
    async fn favorite_and_cancel_use_put() {
        let transport = MockTransport::new()
            .with_reply("bookings/bk-1/favorite", MockReply::json(200, booking_json("bk-1")))
            .with_reply("bookings/bk-1/cancel", MockReply::json(200, booking_json("bk-1")));
        let service = BookingService::new(signed_in(&transport));
        let hash = BookingHash::new("bk-1").unwrap();

        service.set_favorite(&hash, true).await.unwrap();
        service.cancel(&hash).await.unwrap();

        let calls = transport.calls();
        assert_eq!(calls[0].method(), crate::ports::HttpMethod::Put);
        assert_eq!(calls[0].body(), Some(&json!({"isFavorite": true})));
        assert_eq!(calls[1].path(), "bookings/bk-1/cancel");
        assert_eq!(calls[1].body(), None);
    }
}
