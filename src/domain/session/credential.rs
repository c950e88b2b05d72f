//! Access and refresh credentials.
//!
//! Both are opaque bearer strings held in [`secrecy::Secret`] so they never
//! show up in `Debug` output. A short SHA-256 fingerprint stands in for the
//! value wherever a credential has to be identified in logs.

use secrecy::{ExposeSecret, Secret};
use sha2::{Digest, Sha256};
use std::fmt;

use crate::domain::foundation::ValidationError;

fn fingerprint_of(value: &str) -> String {
    let digest = Sha256::digest(value.as_bytes());
    digest[..4].iter().map(|b| format!("{:02x}", b)).collect()
}

macro_rules! credential {
    ($(#[$meta:meta])* $name:ident, $field:literal) => {
        $(#[$meta])*
        #[derive(Clone)]
        pub struct $name(Secret<String>);

        impl $name {
            /// Wraps a credential, rejecting empty values.
            pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
                let value = value.into();
                if value.trim().is_empty() {
                    return Err(ValidationError::empty_field($field));
                }
                Ok(Self(Secret::new(value)))
            }

            /// Exposes the raw credential for putting it on the wire.
            pub fn expose(&self) -> &str {
                self.0.expose_secret()
            }

            /// Short, non-reversible identifier for log correlation.
            pub fn fingerprint(&self) -> String {
                fingerprint_of(self.expose())
            }
        }

        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                self.expose() == other.expose()
            }
        }

        impl Eq for $name {}

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}([REDACTED {}])", stringify!($name), self.fingerprint())
            }
        }
    };
}

credential!(
    /// Short-lived token authorizing individual API calls.
    AccessCredential,
    "access_token"
);
credential!(
    /// Longer-lived token used solely to obtain a new access credential.
    RefreshCredential,
    "refresh_token"
);

impl AccessCredential {
    /// Value for the `Authorization` header.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.expose())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_credentials_are_rejected() {
        assert_eq!(
            AccessCredential::new("").unwrap_err(),
            ValidationError::empty_field("access_token")
        );
        assert_eq!(
            RefreshCredential::new("  ").unwrap_err(),
            ValidationError::empty_field("refresh_token")
        );
    }

    #[test]
    fn bearer_prefixes_token() {
        let access = AccessCredential::new("A1").unwrap();
        assert_eq!(access.bearer(), "Bearer A1");
    }

    #[test]
    fn debug_output_never_contains_the_secret() {
        let access = AccessCredential::new("super-secret-token").unwrap();
        let rendered = format!("{:?}", access);
        assert!(!rendered.contains("super-secret-token"));
        assert!(rendered.contains("REDACTED"));
    }

    #[test]
    fn fingerprint_is_stable_and_short() {
        let a = AccessCredential::new("A1").unwrap();
        let b = AccessCredential::new("A1").unwrap();
        let c = AccessCredential::new("A2").unwrap();

        assert_eq!(a.fingerprint(), b.fingerprint());
        assert_ne!(a.fingerprint(), c.fingerprint());
        assert_eq!(a.fingerprint().len(), 8);
    }

    #[test]
    fn equality_compares_values() {
        assert_eq!(
            RefreshCredential::new("R1").unwrap(),
            RefreshCredential::new("R1").unwrap()
        );
        assert_ne!(
            RefreshCredential::new("R1").unwrap(),
            RefreshCredential::new("R2").unwrap()
        );
    }
}
