//! NAK Booking Client - authenticated client for the NAK Sports booking API
//!
//! Every call goes through one Auth Gateway that attaches credentials,
//! refreshes an expired session once (shared across concurrent callers),
//! replays the original call exactly once, and clears the session when the
//! refresh itself fails.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;

pub use application::{ApiClient, AuthGateway, ClientError, SessionExpiredReason};
