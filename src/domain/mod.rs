//! Domain layer containing the client's pure types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (identifiers, errors, state machine trait)
//! - `session` - Credentials, the session value and its lifecycle events
//! - `gateway` - Header construction and the per-request gateway phases
//! - `auth` - Login and token payloads
//! - `catalog` - Sports, events, locations and search inputs
//! - `bookings` - Bookings and booking requests
//! - `users` - Profile, preferences, payment methods, notifications

pub mod auth;
pub mod bookings;
pub mod catalog;
pub mod foundation;
pub mod gateway;
pub mod session;
pub mod users;
