//! Header Builder - per-request header set.
//!
//! A pure function of the anonymity flag and a snapshot of the session:
//! locale and content negotiation always, then either the anonymous marker or
//! a bearer credential. It never touches the Session Store itself.

use std::collections::BTreeMap;
use std::fmt;

use crate::domain::session::Session;

pub const ACCEPT_HEADER: &str = "Accept";
pub const ACCEPT_LANGUAGE_HEADER: &str = "Accept-Language";
pub const ANONYMOUS_HEADER: &str = "ANONYMOUS";
pub const AUTHORIZATION_HEADER: &str = "Authorization";
pub const CONTENT_TYPE_HEADER: &str = "Content-Type";

pub const JSON_MEDIA_TYPE: &str = "application/json";
pub const DEFAULT_LOCALE: &str = "en";

/// Header set attached to one outbound attempt.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct RequestHeaders(BTreeMap<&'static str, String>);

impl RequestHeaders {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(k, v)| (*k, v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The `Authorization` value, if one was attached.
    pub fn authorization(&self) -> Option<&str> {
        self.get(AUTHORIZATION_HEADER)
    }

    /// True if the anonymous marker is present.
    pub fn is_anonymous(&self) -> bool {
        self.get(ANONYMOUS_HEADER) == Some("true")
    }

    fn insert(&mut self, name: &'static str, value: impl Into<String>) {
        self.0.insert(name, value.into());
    }
}

impl fmt::Debug for RequestHeaders {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (name, value) in self.iter() {
            if name == AUTHORIZATION_HEADER {
                map.entry(&name, &"Bearer [REDACTED]");
            } else {
                map.entry(&name, &value);
            }
        }
        map.finish()
    }
}

/// Builds [`RequestHeaders`] for a given locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderBuilder {
    locale: String,
}

impl HeaderBuilder {
    /// Creates a builder; a blank locale falls back to [`DEFAULT_LOCALE`].
    pub fn new(locale: impl Into<String>) -> Self {
        let locale = locale.into();
        let locale = if locale.trim().is_empty() {
            DEFAULT_LOCALE.to_string()
        } else {
            locale
        };
        Self { locale }
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Builds the header set for one attempt.
    ///
    /// A non-anonymous request without a session gets no `Authorization`
    /// header at all; callers that require one must check before sending.
    pub fn build(&self, anonymous: bool, session: Option<&Session>) -> RequestHeaders {
        let mut headers = RequestHeaders::default();
        headers.insert(CONTENT_TYPE_HEADER, JSON_MEDIA_TYPE);
        headers.insert(ACCEPT_HEADER, JSON_MEDIA_TYPE);
        headers.insert(ACCEPT_LANGUAGE_HEADER, self.locale.clone());

        if anonymous {
            headers.insert(ANONYMOUS_HEADER, "true");
        } else if let Some(session) = session {
            headers.insert(AUTHORIZATION_HEADER, session.access().bearer());
        }

        headers
    }
}

impl Default for HeaderBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_LOCALE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::UserHash;
    use crate::domain::session::{AccessCredential, RefreshCredential};
    use proptest::prelude::*;

    fn session(access: &str) -> Session {
        Session::new(
            AccessCredential::new(access).unwrap(),
            Some(RefreshCredential::new("R1").unwrap()),
            UserHash::new("user-1").unwrap(),
        )
    }

    #[test]
    fn authenticated_request_carries_bearer() {
        let headers = HeaderBuilder::new("de").build(false, Some(&session("A1")));

        assert_eq!(headers.authorization(), Some("Bearer A1"));
        assert_eq!(headers.get(ACCEPT_LANGUAGE_HEADER), Some("de"));
        assert_eq!(headers.get(CONTENT_TYPE_HEADER), Some(JSON_MEDIA_TYPE));
        assert!(!headers.is_anonymous());
    }

    #[test]
    fn anonymous_request_carries_marker_and_no_credential() {
        let headers = HeaderBuilder::default().build(true, Some(&session("A1")));

        assert!(headers.is_anonymous());
        assert!(headers.authorization().is_none());
        assert_eq!(headers.get(ACCEPT_LANGUAGE_HEADER), Some("en"));
    }

    #[test]
    fn missing_session_produces_no_authorization_header() {
        let headers = HeaderBuilder::default().build(false, None);

        assert!(!headers.contains(AUTHORIZATION_HEADER));
        assert!(!headers.is_anonymous());
    }

    #[test]
    fn blank_locale_falls_back_to_default() {
        assert_eq!(HeaderBuilder::new("  ").locale(), DEFAULT_LOCALE);
    }

    #[test]
    fn debug_output_redacts_bearer() {
        let headers = HeaderBuilder::default().build(false, Some(&session("secret-A1")));
        let rendered = format!("{:?}", headers);

        assert!(!rendered.contains("secret-A1"));
        assert!(rendered.contains("REDACTED"));
    }

    proptest! {
        #[test]
        fn bearer_is_never_empty_and_never_anonymous(
            token in "[A-Za-z0-9._-]{1,64}",
            locale in "[a-z]{2}",
            anonymous in any::<bool>(),
        ) {
            let headers = HeaderBuilder::new(locale.clone()).build(anonymous, Some(&session(&token)));

            prop_assert_eq!(headers.get(ACCEPT_LANGUAGE_HEADER), Some(locale.as_str()));
            if anonymous {
                prop_assert!(headers.authorization().is_none());
                prop_assert!(headers.is_anonymous());
            } else {
                let expected = format!("Bearer {}", token);
                prop_assert_eq!(headers.authorization(), Some(expected.as_str()));
                prop_assert!(!headers.is_anonymous());
            }
        }
    }
}
