//! Auth Gateway - credential injection, refresh and single retry.

mod auth_gateway;
mod refresh;

pub use auth_gateway::{AuthGateway, GatewaySettings, DEFAULT_REFRESH_PATH};
pub use refresh::{RefreshCoordinator, RefreshOutcome};
