//! Session identity extractor.
//!
//! The session is an opaque client-held string in the `sessionId` cookie. It is
//! not issued or verified by the server. Requests without the cookie (or with
//! an empty value) all share the `default-session` cart.

use axum::{
    extract::FromRequestParts,
    http::{header::COOKIE, request::Parts},
};

use vibe_commerce_core::SessionId;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "sessionId";

/// Session used when the request carries no session cookie.
pub const DEFAULT_SESSION: &str = "default-session";

/// Extractor for the caller's session id.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(CurrentSession(session): CurrentSession) -> impl IntoResponse {
///     format!("cart for {session}")
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentSession(pub SessionId);

impl<S> FromRequestParts<S> for CurrentSession
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let session = parts
            .headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|h| h.to_str().ok())
            .find_map(|header| cookie_value(header, SESSION_COOKIE_NAME))
            .unwrap_or(DEFAULT_SESSION);

        Ok(Self(SessionId::new(session)))
    }
}

/// Find a non-empty cookie value in a `Cookie` header.
fn cookie_value<'h>(header: &'h str, name: &str) -> Option<&'h str> {
    header.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        let value = value.trim().trim_matches('"');
        (key.trim() == name && !value.is_empty()).then_some(value)
    })
}
