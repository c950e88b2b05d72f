//! Foundation module - Shared domain primitives.
//!
//! Identifiers, validation errors, and the state machine trait that the rest
//! of the client builds on.

mod errors;
mod ids;
mod state_machine;

pub use errors::ValidationError;
pub use ids::{
    BookingHash, EventHash, LocationHash, NotificationHash, PaymentMethodHash, SportHash,
    UserHash,
};
pub use state_machine::StateMachine;
