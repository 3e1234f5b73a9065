//! Integration tests for Vibe Commerce.
//!
//! # Running Tests
//!
//! ```bash
//! # Start a storefront (the memory backend needs no database)
//! STOREFRONT_STORE=memory cargo run -p vibe-commerce-storefront
//!
//! # Run integration tests
//! cargo test -p vibe-commerce-integration-tests -- --ignored
//! ```
//!
//! `STOREFRONT_BASE_URL` overrides the default `http://localhost:3000`.

use reqwest::{Client, StatusCode, header::COOKIE};
use serde_json::Value;
use uuid::Uuid;

/// Base URL for the storefront API (configurable via environment).
#[must_use]
pub fn storefront_base_url() -> String {
    std::env::var("STOREFRONT_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// HTTP client bound to one storefront session.
pub struct Shopper {
    client: Client,
    base_url: String,
    session: Option<String>,
}

impl Shopper {
    /// A shopper with a fresh, unique session cookie.
    #[must_use]
    pub fn new() -> Self {
        Self::with_session(Some(format!("it-{}", Uuid::new_v4())))
    }

    /// A shopper with the given session cookie, or none at all.
    #[must_use]
    pub fn with_session(session: Option<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: storefront_base_url(),
            session,
        }
    }

    /// The session cookie value, if any.
    #[must_use]
    pub fn session(&self) -> Option<&str> {
        self.session.as_deref()
    }

    /// Send a request and decode the JSON body (`Null` if not JSON).
    ///
    /// # Panics
    ///
    /// Panics if the server cannot be reached.
    pub async fn send(
        &self,
        method: reqwest::Method,
        path: &str,
        body: Option<&Value>,
    ) -> (StatusCode, Value) {
        let mut request = self
            .client
            .request(method, format!("{}{path}", self.base_url));
        if let Some(session) = &self.session {
            request = request.header(COOKIE, format!("sessionId={session}"));
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        #[allow(clippy::expect_used)]
        let response = request.send().await.expect("storefront should be reachable");
        let status = response.status();
        let json = response.json::<Value>().await.unwrap_or(Value::Null);
        (status, json)
    }

    /// `GET path`.
    pub async fn get(&self, path: &str) -> (StatusCode, Value) {
        self.send(reqwest::Method::GET, path, None).await
    }

    /// `POST path` with a JSON body.
    pub async fn post(&self, path: &str, body: &Value) -> (StatusCode, Value) {
        self.send(reqwest::Method::POST, path, Some(body)).await
    }

    /// `DELETE path`.
    pub async fn delete(&self, path: &str) -> (StatusCode, Value) {
        self.send(reqwest::Method::DELETE, path, None).await
    }
}

impl Default for Shopper {
    fn default() -> Self {
        Self::new()
    }
}
