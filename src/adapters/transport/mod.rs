//! Transport Adapters.
//!
//! - `ReqwestTransport` - HTTP over `reqwest`
//! - `MockTransport` - scripted routes for tests

mod mock_transport;
mod reqwest_transport;

pub use mock_transport::{MockReply, MockTransport};
pub use reqwest_transport::{ReqwestTransport, ReqwestTransportConfig};
