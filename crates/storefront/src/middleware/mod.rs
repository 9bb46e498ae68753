//! HTTP middleware stack for the storefront.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (hub per request, HTTP transaction)
//! 2. `TraceLayer` (request span carrying `request_id`)
//! 3. Request ID (`x-request-id`, recorded on the span and Sentry scope)
//! 4. CSP nonce (per-request nonce for the inline script)
//! 5. Security headers (CSP built from the nonce, isolation headers)
//! 6. Session layer (in-memory tower-sessions store)

pub mod csp;
pub mod request_id;
pub mod security_headers;
pub mod session;

pub use csp::{CspNonce, csp_nonce_middleware};
pub use request_id::request_id_middleware;
pub use security_headers::security_headers_middleware;
pub use session::create_session_layer;
