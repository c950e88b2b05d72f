//! ApiClient - wires transport, session store and gateway from configuration.

use std::sync::Arc;
use tokio::sync::broadcast;

use crate::adapters::{FileSessionStore, InMemorySessionStore, ReqwestTransport, ReqwestTransportConfig};
use crate::application::error::ClientError;
use crate::application::gateway::{AuthGateway, GatewaySettings};
use crate::application::services::{
    AuthService, BookingService, EventService, LocationService, SportService, UserService,
};
use crate::config::AppConfig;
use crate::domain::session::SessionEvent;
use crate::ports::{SessionStore, Transport};

/// Entry point handing out the domain services over one shared gateway.
#[derive(Debug, Clone)]
pub struct ApiClient {
    gateway: Arc<AuthGateway>,
}

impl ApiClient {
    /// Builds a client from explicit parts.
    pub fn new(
        transport: Arc<dyn Transport>,
        store: Arc<dyn SessionStore>,
        settings: GatewaySettings,
    ) -> Self {
        Self {
            gateway: Arc::new(AuthGateway::new(transport, store, settings)),
        }
    }

    /// Builds a client from configuration.
    ///
    /// Call [`AppConfig::validate`] first. A configured storage path restores
    /// any session persisted by a previous run.
    pub async fn from_config(config: &AppConfig) -> Result<Self, ClientError> {
        let transport = ReqwestTransport::new(
            ReqwestTransportConfig::new(config.api.resolved_base_url())
                .with_timeout(config.api.timeout()),
        )?;

        let store: Arc<dyn SessionStore> = match &config.session.storage_path {
            Some(path) => Arc::new(FileSessionStore::open(path).await?),
            None => Arc::new(InMemorySessionStore::new()),
        };

        tracing::info!(
            environment = %config.api.environment,
            base_url = config.api.resolved_base_url(),
            persistent_session = config.session.is_persistent(),
            "API client configured"
        );

        Ok(Self::new(
            Arc::new(transport),
            store,
            GatewaySettings {
                locale: config.api.locale.clone(),
                refresh_path: config.api.refresh_path.clone(),
            },
        ))
    }

    pub fn gateway(&self) -> &Arc<AuthGateway> {
        &self.gateway
    }

    /// Subscribes to session lifecycle events (renewal, hard logout).
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.gateway.subscribe()
    }

    pub fn auth(&self) -> AuthService {
        AuthService::new(Arc::clone(&self.gateway))
    }

    pub fn bookings(&self) -> BookingService {
        BookingService::new(Arc::clone(&self.gateway))
    }

    pub fn events(&self) -> EventService {
        EventService::new(Arc::clone(&self.gateway))
    }

    pub fn sports(&self) -> SportService {
        SportService::new(Arc::clone(&self.gateway))
    }

    pub fn locations(&self) -> LocationService {
        LocationService::new(Arc::clone(&self.gateway))
    }

    pub fn users(&self) -> UserService {
        UserService::new(Arc::clone(&self.gateway))
    }
}
