//! # Session Middleware
//!
//! Resolves the caller's session id from the `smartkart_session` cookie.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Cookie: smartkart_session=<id> ──► valid? ──yes──► SessionId(<id>)     │
//! │                                        │                                │
//! │                                        no                               │
//! │                                        ▼                                │
//! │                              new UUID v4 ──► SessionId + Set-Cookie     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Handlers read the id with `Extension<SessionId>` and fetch the state from
//! [`AppState::session`](crate::state::AppState::session).

use std::fmt;

use axum::extract::Request;
use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::{HeaderMap, HeaderValue};
use axum::middleware::Next;
use axum::response::Response;
use tracing::{debug, warn};
use uuid::Uuid;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "smartkart_session";

const MAX_SESSION_ID_LEN: usize = 128;

/// Identity of one shopper session.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    /// Creates a fresh random id.
    pub fn generate() -> Self {
        SessionId(Uuid::new_v4().to_string())
    }

    /// Accepts a client-supplied id if it looks like one we could have issued.
    pub fn parse(raw: &str) -> Option<Self> {
        let valid = !raw.is_empty()
            && raw.len() <= MAX_SESSION_ID_LEN
            && raw.chars().all(|c| c.is_ascii_alphanumeric() || c == '-');
        valid.then(|| SessionId(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Attaches a [`SessionId`] to every request, issuing a cookie for new ones.
pub async fn session_layer(mut req: Request, next: Next) -> Response {
    let existing = session_from_headers(req.headers());
    let is_new = existing.is_none();
    let session_id = existing.unwrap_or_else(SessionId::generate);

    if is_new {
        debug!(session = %session_id, "Issuing session cookie");
    }
    req.extensions_mut().insert(session_id.clone());

    let mut response = next.run(req).await;

    if is_new {
        let cookie = format!("{SESSION_COOKIE}={session_id}; Path=/; HttpOnly; SameSite=Lax");
        match HeaderValue::from_str(&cookie) {
            Ok(value) => {
                response.headers_mut().append(SET_COOKIE, value);
            }
            Err(e) => warn!(error = %e, "Could not encode session cookie"),
        }
    }

    response
}

/// Finds a valid session id among the request's `Cookie` headers.
fn session_from_headers(headers: &HeaderMap) -> Option<SessionId> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|header| header.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .and_then(|(_, value)| SessionId::parse(value.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(cookies: &[&str]) -> HeaderMap {
        let mut headers = HeaderMap::new();
        for cookie in cookies {
            headers.append(COOKIE, HeaderValue::from_str(cookie).unwrap());
        }
        headers
    }

    #[test]
    fn test_reads_session_cookie() {
        let found = session_from_headers(&headers(&["theme=dark; smartkart_session=abc-123"]));
        assert_eq!(found.unwrap().as_str(), "abc-123");

        let found = session_from_headers(&headers(&["theme=dark", "smartkart_session=xyz"]));
        assert_eq!(found.unwrap().as_str(), "xyz");
    }

    #[test]
    fn test_missing_or_invalid_cookie() {
        assert!(session_from_headers(&headers(&[])).is_none());
        assert!(session_from_headers(&headers(&["other=1"])).is_none());
        assert!(session_from_headers(&headers(&["smartkart_session="])).is_none());
        assert!(session_from_headers(&headers(&["smartkart_session=a/b"])).is_none());
    }

    #[test]
    fn test_parse_limits_length() {
        assert!(SessionId::parse(&"a".repeat(128)).is_some());
        assert!(SessionId::parse(&"a".repeat(129)).is_none());
    }

    #[test]
    fn test_generated_ids_are_valid_and_unique() {
        let a = SessionId::generate();
        let b = SessionId::generate();
        assert_ne!(a, b);
        assert_eq!(SessionId::parse(a.as_str()), Some(a));
    }
}
