//! Integration tests for Rapidkeys.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p rapidkeys-integration-tests
//! ```
//!
//! Everything runs in-process: the storefront router is driven with
//! `tower::ServiceExt::oneshot`, reviews go to a memory or temp-dir store,
//! and the completion API is a local mock server.
//!
//! # Test Categories
//!
//! - `cart_properties` - Cart quantity invariants (proptest)
//! - `catalog_filters` - Search, category and sort over the real catalog
//! - `review_store` - Review persistence on disk
//! - `storefront_routes` - HTTP routes end to end with a session cookie
//! - `assistant` - Shopping assistant against a mock completion API

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{HeaderMap, Request, StatusCode, header};
use tokio::net::TcpListener;
use tower::ServiceExt;

use rapidkeys_storefront::catalog;
use rapidkeys_storefront::claude::ClaudeClient;
use rapidkeys_storefront::config::StorefrontConfig;
use rapidkeys_storefront::services::ShoppingAssistant;
use rapidkeys_storefront::state::AppState;
use rapidkeys_storefront::store::{KeyValueStore, MemoryStore};

/// A buffered response.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    /// Parsed `HX-Trigger` header, if present.
    #[must_use]
    pub fn hx_trigger(&self) -> Option<serde_json::Value> {
        self.headers
            .get("hx-trigger")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| serde_json::from_str(v).ok())
    }
}

/// In-process storefront plus a single visitor's session cookie.
pub struct TestClient {
    app: Router,
    cookie: Option<String>,
}

impl TestClient {
    /// Storefront over `kv` with the given assistant.
    #[must_use]
    pub fn new(kv: Arc<dyn KeyValueStore>, assistant: ShoppingAssistant) -> Self {
        let state = AppState::new(StorefrontConfig::default(), kv, assistant);
        Self {
            app: rapidkeys_storefront::app(state),
            cookie: None,
        }
    }

    /// Storefront over a fresh memory store and an assistant without a key.
    #[must_use]
    pub fn unconfigured() -> Self {
        Self::new(Arc::new(MemoryStore::new()), unconfigured_assistant())
    }

    /// Send a GET request.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be built or the router fails.
    pub async fn get(&mut self, uri: &str) -> TestResponse {
        let request = self.request("GET", uri).body(Body::empty()).expect("request");
        self.send(request).await
    }

    /// Send a form-encoded POST request.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be built or the router fails.
    pub async fn post_form(&mut self, uri: &str, form: &str) -> TestResponse {
        let request = self
            .request("POST", uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form.to_string()))
            .expect("request");
        self.send(request).await
    }

    fn request(&self, method: &str, uri: &str) -> axum::http::request::Builder {
        let builder = Request::builder().method(method).uri(uri);
        match &self.cookie {
            Some(cookie) => builder.header(header::COOKIE, cookie),
            None => builder,
        }
    }

    async fn send(&mut self, request: Request<Body>) -> TestResponse {
        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        if let Some(cookie) = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(';').next())
        {
            self.cookie = Some(cookie.to_string());
        }

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        TestResponse {
            status,
            headers,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }
}

/// Assistant with no API key.
#[must_use]
pub fn unconfigured_assistant() -> ShoppingAssistant {
    ShoppingAssistant::new(None, &catalog::products())
}

/// Assistant that talks to a mock Messages endpoint at `base_url`.
///
/// # Panics
///
/// Panics if the client cannot be built.
#[must_use]
pub fn assistant_for(base_url: &str) -> ShoppingAssistant {
    ShoppingAssistant::new(Some(client_for(base_url)), &catalog::products())
}

/// Like [`assistant_for`], but giving up on each request after `timeout`.
///
/// # Panics
///
/// Panics if the client cannot be built.
#[must_use]
pub fn assistant_with_timeout(base_url: &str, timeout: Duration) -> ShoppingAssistant {
    let client = client_for(base_url).with_timeout(timeout);
    ShoppingAssistant::new(Some(client), &catalog::products())
}

fn client_for(base_url: &str) -> ClaudeClient {
    ClaudeClient::new(
        &secrecy::SecretString::from("sk-ant-integration-test"),
        "claude-sonnet-4-20250514",
        format!("{base_url}/v1/messages"),
    )
    .expect("client")
}

/// A server that accepts connections and never answers.
///
/// Returns its base URL. Accepted sockets are held open for the life of the
/// runtime.
///
/// # Panics
///
/// Panics if no local port can be bound.
pub async fn silent_server() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr: SocketAddr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });
    format!("http://{addr}")
}
