//! LocationService - map locations and favorites.

use std::sync::Arc;

use super::{check_limit, decode, expect_success, non_empty};
use crate::application::error::ClientError;
use crate::application::gateway::AuthGateway;
use crate::domain::catalog::{GeoArea, MapLocation};
use crate::domain::foundation::{LocationHash, SportHash};
use crate::ports::OutboundRequest;

#[derive(Debug, Clone)]
pub struct LocationService {
    gateway: Arc<AuthGateway>,
}

impl LocationService {
    pub fn new(gateway: Arc<AuthGateway>) -> Self {
        Self { gateway }
    }

    pub async fn all(&self) -> Result<Vec<MapLocation>, ClientError> {
        decode(self.gateway.get("locations").await?)
    }

    pub async fn by_sport(&self, sport: &SportHash) -> Result<Vec<MapLocation>, ClientError> {
        decode(self.gateway.get(format!("sports/{}/locations", sport)).await?)
    }

    pub async fn nearby(&self, area: GeoArea) -> Result<Vec<MapLocation>, ClientError> {
        let request = area
            .query_pairs()
            .into_iter()
            .fold(OutboundRequest::get("locations/nearby"), |req, (k, v)| req.with_query(k, v));

        decode(self.gateway.send(request).await?)
    }

    pub async fn get(&self, location: &LocationHash) -> Result<MapLocation, ClientError> {
        decode(self.gateway.get(format!("locations/{}", location)).await?)
    }

    pub async fn search(&self, query: &str) -> Result<Vec<MapLocation>, ClientError> {
        let request =
            OutboundRequest::get("locations/search").with_query("q", non_empty("q", query)?);
        decode(self.gateway.send(request).await?)
    }

    pub async fn popular(&self, limit: u32) -> Result<Vec<MapLocation>, ClientError> {
        let request =
            OutboundRequest::get("locations/popular").with_query("limit", check_limit(limit)?);
        decode(self.gateway.send(request).await?)
    }

    pub async fn favorites(&self) -> Result<Vec<MapLocation>, ClientError> {
        decode(self.gateway.get("locations/favorites").await?)
    }

    pub async fn add_favorite(&self, location: &LocationHash) -> Result<(), ClientError> {
        let request = OutboundRequest::post(format!("locations/{}/favorite", location));
        expect_success(self.gateway.send(request).await?)
    }

    pub async fn remove_favorite(&self, location: &LocationHash) -> Result<(), ClientError> {
        expect_success(
            self.gateway
                .delete(format!("locations/{}/favorite", location))
                .await?,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{signed_in, signed_out};
    use super::*;
    use crate::adapters::{MockReply, MockTransport};
    use crate::application::error::SessionExpiredReason;
    use serde_json::json;

    fn location_json() -> serde_json::Value {
        json!({
            "hash": "loc-1",
            "name": "Beach court",
            "latitude": 39.47,
            "longitude": -0.33,
            "isOpen": true,
            "distance": 1.2
        })
    }

    #[tokio::test]
    async fn nearby_decodes_locations() {
        let transport = MockTransport::new()
            .with_reply("locations/nearby", MockReply::json(200, json!([location_json()])));
        let service = LocationService::new(signed_in(&transport));

        let locations = service
            .nearby(GeoArea::around(39.47, -0.33).unwrap())
            .await
            .unwrap();

        assert_eq!(locations[0].hash.as_str(), "loc-1");
        assert_eq!(locations[0].distance, Some(1.2));
        assert_eq!(transport.calls()[0].query().len(), 3);
    }

    #[tokio::test]
    async fn get_and_favorites() {
        let transport = MockTransport::new()
            .with_reply("locations/loc-1", MockReply::json(200, location_json()))
            .with_reply("locations/loc-1/favorite", MockReply::status(200))
            .with_reply("locations/favorites", MockReply::json(200, json!([location_json()])));
        let service = LocationService::new(signed_in(&transport));
        let hash = LocationHash::new("loc-1").unwrap();

        let location = service.get(&hash).await.unwrap();
        service.add_favorite(&hash).await.unwrap();
        let favorites = service.favorites().await.unwrap();

        assert!(location.is_open);
        assert_eq!(favorites, vec![location]);
    }

    #[tokio::test]
    async fn catalog_calls_still_need_a_session() {
        let transport = MockTransport::new();
        let service = LocationService::new(signed_out(&transport));

        let result = service.all().await;

        assert_eq!(
            result.unwrap_err(),
            ClientError::session_expired(SessionExpiredReason::NotAuthenticated)
        );
        assert_eq!(transport.call_count(), 0);
    }
}
