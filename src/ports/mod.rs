//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between the
//! client core and the outside world. Adapters implement these ports.
//!
//! - `Transport` - performs the HTTP call and surfaces `{ status, body }`
//! - `SessionStore` - holds the current credentials and identity reference

mod session_store;
mod transport;

pub use session_store::{SessionStore, SessionStoreError};
pub use transport::{
    ApiErrorBody, ApiResponse, HttpMethod, OutboundRequest, Transport, TransportError,
};
