//! Claude client errors.
//!
//! The assistant turns every one of these into the same apology, so the
//! variants only separate what is worth telling apart in logs.

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClaudeError {
    /// The configured API key cannot be sent as a header.
    #[error("invalid API key: {0}")]
    InvalidApiKey(String),

    /// Connection failure, timeout, or unreadable body.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success status. `error_type` comes from the error body when it
    /// has one, else `http_<status>`.
    #[error("API returned {status} ({error_type}): {message}")]
    Api {
        status: u16,
        error_type: String,
        message: String,
    },

    /// A success response whose body is not a Messages reply.
    #[error("parse error: {0}")]
    Parse(String),
}

impl ClaudeError {
    /// Build an `Api` error from a status and the raw response body.
    pub(crate) fn from_status(status: u16, body: String) -> Self {
        match serde_json::from_str::<ErrorBody>(&body) {
            Ok(parsed) => Self::Api {
                status,
                error_type: parsed.error.error_type,
                message: parsed.error.message,
            },
            Err(_) => Self::Api {
                status,
                error_type: format!("http_{status}"),
                message: body,
            },
        }
    }
}

/// `{"type": "error", "error": {"type": ..., "message": ...}}`
#[derive(Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    #[serde(rename = "type")]
    error_type: String,
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_reads_error_body() {
        let err = ClaudeError::from_status(
            529,
            r#"{"type":"error","error":{"type":"overloaded_error","message":"Overloaded"}}"#
                .to_string(),
        );
        assert_eq!(err.to_string(), "API returned 529 (overloaded_error): Overloaded");
    }

    #[test]
    fn test_from_status_keeps_plain_body() {
        let err = ClaudeError::from_status(502, "Bad Gateway".to_string());
        match err {
            ClaudeError::Api {
                status,
                error_type,
                message,
            } => {
                assert_eq!(status, 502);
                assert_eq!(error_type, "http_502");
                assert_eq!(message, "Bad Gateway");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
