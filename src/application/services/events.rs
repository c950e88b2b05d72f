//! EventService - browsing and searching bookable events.

use std::sync::Arc;

use super::{check_limit, decode};
use crate::application::error::ClientError;
use crate::application::gateway::AuthGateway;
use crate::domain::catalog::{Event, GeoArea, PaginatedResponse, SearchFilters, SearchRequest};
use crate::domain::foundation::{EventHash, SportHash, UserHash, ValidationError};
use crate::ports::OutboundRequest;

#[derive(Debug, Clone)]
pub struct EventService {
    gateway: Arc<AuthGateway>,
}

impl EventService {
    pub fn new(gateway: Arc<AuthGateway>) -> Self {
        Self { gateway }
    }

    /// Lists available events; unset filters are left out of the query.
    pub async fn list(&self, filters: &SearchFilters) -> Result<Vec<Event>, ClientError> {
        filters.validate()?;
        let request = filters
            .query_pairs()
            .into_iter()
            .fold(OutboundRequest::get("events"), |req, (k, v)| req.with_query(k, v));

        decode(self.gateway.send(request).await?)
    }

    pub async fn get(&self, event: &EventHash) -> Result<Event, ClientError> {
        decode(self.gateway.get(format!("events/{}", event)).await?)
    }

    pub async fn search(
        &self,
        search: &SearchRequest,
    ) -> Result<PaginatedResponse<Event>, ClientError> {
        search.filters.validate()?;
        decode(self.gateway.post("events/search", search).await?)
    }

    pub async fn by_sport(&self, sport: &SportHash) -> Result<Vec<Event>, ClientError> {
        decode(self.gateway.get(format!("sports/{}/events", sport)).await?)
    }

    pub async fn by_instructor(&self, instructor: &UserHash) -> Result<Vec<Event>, ClientError> {
        decode(self.gateway.get(format!("users/{}/events", instructor)).await?)
    }

    pub async fn upcoming(&self, limit: u32) -> Result<Vec<Event>, ClientError> {
        let request = OutboundRequest::get("events/upcoming").with_query("limit", check_limit(limit)?);
        decode(self.gateway.send(request).await?)
    }

    pub async fn featured(&self) -> Result<Vec<Event>, ClientError> {
        decode(self.gateway.get("events/featured").await?)
    }

    /// Events between two instants, in milliseconds since the Unix epoch.
    pub async fn by_date_range(&self, start: i64, end: i64) -> Result<Vec<Event>, ClientError> {
        if start > end {
            return Err(ValidationError::invalid_format("startDate", "must not be after endDate").into());
        }
        let request = OutboundRequest::get("events")
            .with_query("startDate", start)
            .with_query("endDate", end);

        decode(self.gateway.send(request).await?)
    }

    pub async fn nearby(&self, area: GeoArea) -> Result<Vec<Event>, ClientError> {
        let request = area
            .query_pairs()
            .into_iter()
            .fold(OutboundRequest::get("events/nearby"), |req, (k, v)| req.with_query(k, v));

        decode(self.gateway.send(request).await?)
    }
}
