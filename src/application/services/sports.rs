//! SportService - sports catalog and favorites.

use std::sync::Arc;

use super::{check_limit, decode, expect_success, non_empty, path_segment};
use crate::application::error::ClientError;
use crate::application::gateway::AuthGateway;
use crate::domain::catalog::Sport;
use crate::domain::foundation::SportHash;
use crate::ports::OutboundRequest;

#[derive(Debug, Clone)]
pub struct SportService {
    gateway: Arc<AuthGateway>,
}

impl SportService {
    pub fn new(gateway: Arc<AuthGateway>) -> Self {
        Self { gateway }
    }

    pub async fn all(&self) -> Result<Vec<Sport>, ClientError> {
        decode(self.gateway.get("sports").await?)
    }

    pub async fn get(&self, sport: &SportHash) -> Result<Sport, ClientError> {
        decode(self.gateway.get(format!("sports/{}", sport)).await?)
    }

    pub async fn by_category(&self, category: &str) -> Result<Vec<Sport>, ClientError> {
        let category = path_segment("category", category)?;
        decode(self.gateway.get(format!("sports/category/{}", category)).await?)
    }

    pub async fn popular(&self, limit: u32) -> Result<Vec<Sport>, ClientError> {
        let request = OutboundRequest::get("sports/popular").with_query("limit", check_limit(limit)?);
        decode(self.gateway.send(request).await?)
    }

    pub async fn search(&self, query: &str) -> Result<Vec<Sport>, ClientError> {
        let request = OutboundRequest::get("sports/search").with_query("q", non_empty("q", query)?);
        decode(self.gateway.send(request).await?)
    }

    pub async fn categories(&self) -> Result<Vec<String>, ClientError> {
        decode(self.gateway.get("sports/categories").await?)
    }

    pub async fn favorites(&self) -> Result<Vec<Sport>, ClientError> {
        decode(self.gateway.get("sports/favorites").await?)
    }

    pub async fn add_favorite(&self, sport: &SportHash) -> Result<(), ClientError> {
        let request = OutboundRequest::post(format!("sports/{}/favorite", sport));
        expect_success(self.gateway.send(request).await?)
    }

    pub async fn remove_favorite(&self, sport: &SportHash) -> Result<(), ClientError> {
        expect_success(self.gateway.delete(format!("sports/{}/favorite", sport)).await?)
    }
}
