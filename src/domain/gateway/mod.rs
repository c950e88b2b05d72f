//! Gateway vocabulary - header construction and request phases.

mod headers;
mod phase;

pub use headers::{
    HeaderBuilder, RequestHeaders, ACCEPT_HEADER, ACCEPT_LANGUAGE_HEADER, ANONYMOUS_HEADER,
    AUTHORIZATION_HEADER, CONTENT_TYPE_HEADER, DEFAULT_LOCALE, JSON_MEDIA_TYPE,
};
pub use phase::GatewayPhase;
