//! Strongly-typed identifier value objects.
//!
//! The backend addresses every entity by an opaque "hash" string. Each
//! identifier rejects empty input so a path segment can never collapse.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

macro_rules! hash_id {
    ($(#[$meta:meta])* $name:ident, $field:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates the identifier, returning error if empty.
            pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
                let id = id.into();
                if id.trim().is_empty() {
                    return Err(ValidationError::empty_field($field));
                }
                Ok(Self(id))
            }

            /// Returns the inner string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

hash_id!(
    /// Identity reference of a user; the session's owner.
    UserHash,
    "user_hash"
);
hash_id!(
    /// Identifier of a booking.
    BookingHash,
    "booking_hash"
);
hash_id!(
    /// Identifier of a bookable event.
    EventHash,
    "event_hash"
);
hash_id!(
    /// Identifier of a sport.
    SportHash,
    "sport_hash"
);
hash_id!(
    /// Identifier of a map location.
    LocationHash,
    "location_hash"
);
hash_id!(
    /// Identifier of a stored payment method.
    PaymentMethodHash,
    "payment_method_hash"
);
hash_id!(
    /// Identifier of a user notification.
    NotificationHash,
    "notification_hash"
);
