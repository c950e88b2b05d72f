//! Application layer - the Auth Gateway and the domain callers built on it.
//!
//! This layer orchestrates ports: the gateway drives the Transport and the
//! Session Store through the authorization protocol, and each service turns a
//! domain operation into one gateway call.

pub mod client;
pub mod error;
pub mod gateway;
pub mod services;

pub use client::ApiClient;
pub use error::{ClientError, SessionExpiredReason};
pub use gateway::{AuthGateway, GatewaySettings, RefreshCoordinator, RefreshOutcome};
pub use services::{
    AuthService, BookingService, EventService, LocationService, SportService, UserService,
};
