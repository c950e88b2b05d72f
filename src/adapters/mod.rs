//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the client core to external systems:
//! - `session` - Session Store implementations (in-memory, file)
//! - `transport` - Transport implementations (reqwest, mock)

pub mod session;
pub mod transport;

pub use session::{FileSessionStore, InMemorySessionStore};
pub use transport::{MockReply, MockTransport, ReqwestTransport, ReqwestTransportConfig};
