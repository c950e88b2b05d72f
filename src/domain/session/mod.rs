//! Session module - credentials, the session value, and lifecycle events.

mod credential;
mod events;
mod model;

pub use credential::{AccessCredential, RefreshCredential};
pub use events::{LogoutReason, SessionEvent};
pub use model::Session;
