//! `HX-Trigger` response header.
//!
//! HTMX fires each key of the header's JSON object as a client-side event.
//! The base template listens for `toast` (transient notification) and
//! `cart-updated` (refresh the navbar badge and cart drawer).

use std::convert::Infallible;

use axum::http::HeaderValue;
use axum::response::{IntoResponseParts, ResponseParts};
use serde::Serialize;
use serde_json::{Map, Value};

/// Event fired after any cart change.
pub const CART_UPDATED: &str = "cart-updated";

/// Toast severity, used as a CSS modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastLevel {
    Success,
    Error,
}

/// Builder for an `HX-Trigger` header carrying one or more events.
#[derive(Debug, Clone, Default)]
pub struct HxTrigger {
    events: Map<String, Value>,
}

impl HxTrigger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an event without a payload.
    #[must_use]
    pub fn event(mut self, name: &str) -> Self {
        self.events.insert(name.to_string(), Value::Null);
        self
    }

    /// Add a `toast` event.
    #[must_use]
    pub fn toast(mut self, message: &str, level: ToastLevel) -> Self {
        self.events.insert(
            "toast".to_string(),
            serde_json::json!({ "message": message, "level": level }),
        );
        self
    }

    /// Header value as JSON.
    #[must_use]
    pub fn to_header_value(&self) -> String {
        Value::Object(self.events.clone()).to_string()
    }
}

impl IntoResponseParts for HxTrigger {
    type Error = Infallible;

    fn into_response_parts(self, mut res: ResponseParts) -> Result<ResponseParts, Self::Error> {
        match HeaderValue::from_str(&self.to_header_value()) {
            Ok(value) => {
                res.headers_mut().insert("hx-trigger", value);
            }
            Err(e) => tracing::warn!(error = %e, "Dropping unencodable HX-Trigger header"),
        }
        Ok(res)
    }
}
