//! Catalog entities: sports, events and map locations, plus search inputs.

use serde::{Deserialize, Serialize};

use crate::domain::auth::User;
use crate::domain::foundation::{EventHash, LocationHash, SportHash, ValidationError};

/// Default page of "popular"/"upcoming" lists.
pub const DEFAULT_LIST_LIMIT: u32 = 10;
/// Default search radius for nearby queries, in kilometres.
pub const DEFAULT_RADIUS_KM: f64 = 10.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sport {
    pub hash: SportHash,
    pub name: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub category: String,
}

/// A bookable event. Dates are milliseconds since the Unix epoch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub hash: EventHash,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub start_date: i64,
    pub end_date: i64,
    #[serde(default)]
    pub location: String,
    pub sport: Sport,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructor: Option<User>,
    #[serde(default)]
    pub max_participants: u32,
    #[serde(default)]
    pub current_participants: u32,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub is_active: bool,
}

impl Event {
    /// Free places left, never negative.
    pub fn remaining_places(&self) -> u32 {
        self.max_participants.saturating_sub(self.current_participants)
    }

    pub fn is_full(&self) -> bool {
        self.remaining_places() == 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapLocation {
    pub hash: LocationHash,
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sport: Option<Sport>,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub is_open: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
}

/// Centre and radius of a "nearby" query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoArea {
    latitude: f64,
    longitude: f64,
    radius_km: f64,
}

impl GeoArea {
    pub fn new(latitude: f64, longitude: f64, radius_km: f64) -> Result<Self, ValidationError> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(ValidationError::invalid_format(
                "latitude",
                format!("{} is outside -90..=90", latitude),
            ));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(ValidationError::invalid_format(
                "longitude",
                format!("{} is outside -180..=180", longitude),
            ));
        }
        if !(radius_km.is_finite() && radius_km > 0.0) {
            return Err(ValidationError::invalid_format(
                "radius",
                "must be a positive number of kilometres",
            ));
        }
        Ok(Self {
            latitude,
            longitude,
            radius_km,
        })
    }

    /// Area around a point with the default radius.
    pub fn around(latitude: f64, longitude: f64) -> Result<Self, ValidationError> {
        Self::new(latitude, longitude, DEFAULT_RADIUS_KM)
    }

    /// Query pairs in the backend's `lat`/`lng`/`radius` form.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("lat", self.latitude.to_string()),
            ("lng", self.longitude.to_string()),
            ("radius", self.radius_km.to_string()),
        ]
    }
}

/// Optional filters for event listings. Unset filters are not sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchFilters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sport: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_from: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_to: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructor: Option<String>,
}

impl SearchFilters {
    /// Set filters as query pairs, in a stable order.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        let mut push = |key: &'static str, value: Option<String>| {
            if let Some(value) = value.filter(|v| !v.is_empty()) {
                pairs.push((key, value));
            }
        };
        push("sport", self.sport.clone());
        push("location", self.location.clone());
        push("dateFrom", self.date_from.map(|v| v.to_string()));
        push("dateTo", self.date_to.map(|v| v.to_string()));
        push("priceMin", self.price_min.map(|v| v.to_string()));
        push("priceMax", self.price_max.map(|v| v.to_string()));
        push("level", self.level.clone());
        push("instructor", self.instructor.clone());
        pairs
    }

    /// Rejects inverted ranges before they reach the backend.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let (Some(from), Some(to)) = (self.date_from, self.date_to) {
            if from > to {
                return Err(ValidationError::invalid_format(
                    "dateFrom",
                    "must not be after dateTo",
                ));
            }
        }
        if let (Some(min), Some(max)) = (self.price_min, self.price_max) {
            if min > max {
                return Err(ValidationError::invalid_format(
                    "priceMin",
                    "must not exceed priceMax",
                ));
            }
        }
        Ok(())
    }
}

/// Body of `POST events/search`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(default)]
    pub filters: SearchFilters,
    pub page: u32,
    pub limit: u32,
}

impl SearchRequest {
    pub fn new(page: u32, limit: u32) -> Result<Self, ValidationError> {
        if page == 0 {
            return Err(ValidationError::out_of_range("page", 1, i64::from(u32::MAX), 0));
        }
        if !(1..=100).contains(&limit) {
            return Err(ValidationError::out_of_range("limit", 1, 100, i64::from(limit)));
        }
        Ok(Self {
            query: None,
            filters: SearchFilters::default(),
            page,
            limit,
        })
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn with_filters(mut self, filters: SearchFilters) -> Self {
        self.filters = filters;
        self
    }
}

/// One page of a paginated listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    #[serde(default)]
    pub has_next: bool,
    #[serde(default)]
    pub has_prev: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn filters_emit_only_set_values() {
        let filters = SearchFilters {
            sport: Some("tennis".to_string()),
            date_from: Some(1000),
            price_max: Some(25.5),
            level: Some(String::new()),
            ..Default::default()
        };

        assert_eq!(
            filters.query_pairs(),
            vec![
                ("sport", "tennis".to_string()),
                ("dateFrom", "1000".to_string()),
                ("priceMax", "25.5".to_string()),
            ]
        );
        assert!(SearchFilters::default().query_pairs().is_empty());
    }

    #[test]
    fn filters_reject_inverted_ranges() {
        let dates = SearchFilters {
            date_from: Some(2000),
            date_to: Some(1000),
            ..Default::default()
        };
        let prices = SearchFilters {
            price_min: Some(50.0),
            price_max: Some(10.0),
            ..Default::default()
        };

        assert!(dates.validate().is_err());
        assert!(prices.validate().is_err());
        assert!(SearchFilters::default().validate().is_ok());
    }

    #[test]
    fn geo_area_validates_coordinates() {
        assert!(GeoArea::new(91.0, 0.0, 5.0).is_err());
        assert!(GeoArea::new(0.0, -181.0, 5.0).is_err());
        assert!(GeoArea::new(0.0, 0.0, 0.0).is_err());

        let area = GeoArea::around(52.5, 13.4).unwrap();
        assert_eq!(
            area.query_pairs(),
            vec![
                ("lat", "52.5".to_string()),
                ("lng", "13.4".to_string()),
                ("radius", "10".to_string()),
            ]
        );
    }

    #[test]
    fn search_request_bounds_paging() {
        assert!(SearchRequest::new(0, 10).is_err());
        assert!(SearchRequest::new(1, 0).is_err());
        assert!(SearchRequest::new(1, 101).is_err());

        let body = serde_json::to_value(SearchRequest::new(2, 20).unwrap().with_query("yoga")).unwrap();
        assert_eq!(
            body,
            json!({"query": "yoga", "filters": {}, "page": 2, "limit": 20})
        );
    }

    #[test]
    fn event_counts_remaining_places() {
        let event: Event = serde_json::from_value(json!({
            "hash": "ev-1",
            "title": "Morning surf",
            "startDate": 1,
            "endDate": 2,
            "sport": {"hash": "sp-1", "name": "Surf", "icon": "wave", "category": "water"},
            "maxParticipants": 8,
            "currentParticipants": 9
        }))
        .unwrap();

        assert_eq!(event.remaining_places(), 0);
        assert!(event.is_full());
        assert!(event.instructor.is_none());
    }

    #[test]
    fn paginated_response_parses() {
        let page: PaginatedResponse<Sport> = serde_json::from_value(json!({
            "data": [{"hash": "sp-1", "name": "Padel"}],
            "total": 1,
            "page": 1,
            "limit": 10,
            "hasNext": false
        }))
        .unwrap();

        assert_eq!(page.data.len(), 1);
        assert!(!page.has_prev);
    }
}
