//! Claude API client for shopping assistant replies.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use tracing::instrument;

use super::error::ClaudeError;
use super::types::{ChatRequest, ChatResponse, Message};

const ANTHROPIC_VERSION: &str = "2023-06-01";
const DEFAULT_MAX_TOKENS: u32 = 1024;
const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Upper bound on one completion call, connect to last byte.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Claude API client.
///
/// Cheap to clone; the underlying connection pool is shared.
#[derive(Clone)]
pub struct ClaudeClient {
    inner: Arc<ClaudeClientInner>,
}

struct ClaudeClientInner {
    client: reqwest::Client,
    model: String,
    api_url: String,
    timeout: Duration,
}

impl std::fmt::Debug for ClaudeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClaudeClient")
            .field("model", &self.inner.model)
            .field("api_url", &self.inner.api_url)
            .field("timeout", &self.inner.timeout)
            .finish_non_exhaustive()
    }
}

impl ClaudeClient {
    /// Create a new Claude client.
    ///
    /// # Arguments
    ///
    /// * `api_key` - Anthropic API key
    /// * `model` - Model ID
    /// * `api_url` - Messages endpoint URL
    ///
    /// # Errors
    ///
    /// Returns `ClaudeError::InvalidApiKey` if the key contains characters
    /// not allowed in a header, or `ClaudeError::Http` if the HTTP client
    /// cannot be built.
    pub fn new(
        api_key: &SecretString,
        model: impl Into<String>,
        api_url: impl Into<String>,
    ) -> Result<Self, ClaudeError> {
        let mut key_header = HeaderValue::from_str(api_key.expose_secret())
            .map_err(|e| ClaudeError::InvalidApiKey(e.to_string()))?;
        key_header.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert("x-api-key", key_header);
        headers.insert(
            "anthropic-version",
            HeaderValue::from_static(ANTHROPIC_VERSION),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            inner: Arc::new(ClaudeClientInner {
                client,
                model: model.into(),
                api_url: api_url.into(),
                timeout: DEFAULT_TIMEOUT,
            }),
        })
    }

    /// Replace the per-request timeout.
    #[must_use]
    pub fn with_timeout(self, timeout: Duration) -> Self {
        Self {
            inner: Arc::new(ClaudeClientInner {
                client: self.inner.client.clone(),
                model: self.inner.model.clone(),
                api_url: self.inner.api_url.clone(),
                timeout,
            }),
        }
    }

    /// Model ID sent with each request.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.inner.model
    }

    /// Send a single user message with a system prompt and return the reply
    /// text.
    ///
    /// The reply is the concatenation of all text blocks, which may be empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the API answers with an error
    /// status, or the body cannot be parsed.
    #[instrument(skip(self, system, user_message), fields(model = %self.inner.model))]
    pub async fn complete(&self, system: &str, user_message: &str) -> Result<String, ClaudeError> {
        let request = ChatRequest {
            model: self.inner.model.clone(),
            max_tokens: DEFAULT_MAX_TOKENS,
            messages: vec![Message::user(user_message)],
            system: Some(system.to_string()),
            temperature: Some(DEFAULT_TEMPERATURE),
        };

        let response = self
            .inner
            .client
            .post(&self.inner.api_url)
            .timeout(self.inner.timeout)
            .json(&request)
            .send()
            .await?;

        let chat = Self::handle_response(response).await?;
        tracing::debug!(
            response_id = %chat.id,
            input_tokens = chat.usage.input_tokens,
            output_tokens = chat.usage.output_tokens,
            "Claude reply received"
        );
        Ok(chat.text())
    }

    /// Parse a success body, or turn an error status into `ClaudeError::Api`.
    async fn handle_response(response: reqwest::Response) -> Result<ChatResponse, ClaudeError> {
        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            serde_json::from_str(&body)
                .map_err(|e| ClaudeError::Parse(format!("Failed to parse response: {e}")))
        } else {
            Err(ClaudeError::from_status(status.as_u16(), body))
        }
    }
}

#[cfg(test)]
mod tests {
    use mockito::{Matcher, Server};

    use super::*;

    fn client_for(server: &Server) -> ClaudeClient {
        ClaudeClient::new(
            &SecretString::from("sk-ant-test-key"),
            "claude-sonnet-4-20250514",
            format!("{}/v1/messages", server.url()),
        )
        .expect("client")
    }

    #[tokio::test]
    async fn test_complete_sends_system_and_single_message() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/messages")
            .match_header("x-api-key", "sk-ant-test-key")
            .match_header("anthropic-version", ANTHROPIC_VERSION)
            .match_body(Matcher::PartialJson(serde_json::json!({
                "model": "claude-sonnet-4-20250514",
                "system": "You are RapidBot",
                "messages": [{"role": "user", "content": "Need a mouse"}]
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                "id": "msg_01",
                "model": "claude-sonnet-4-20250514",
                "stop_reason": "end_turn",
                "content": [{"type": "text", "text": "Viper Wireless Mouse!"}],
                "usage": {"input_tokens": 20, "output_tokens": 6}
            }"#,
            )
            .create_async()
            .await;

        let reply = client_for(&server)
            .complete("You are RapidBot", "Need a mouse")
            .await
            .expect("reply");

        assert_eq!(reply, "Viper Wireless Mouse!");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_rate_limited_is_api_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1/messages")
            .with_status(429)
            .with_header("retry-after", "30")
            .create_async()
            .await;

        let err = client_for(&server).complete("s", "u").await.unwrap_err();
        assert!(matches!(err, ClaudeError::Api { status: 429, .. }));
    }

    #[tokio::test]
    async fn test_api_error_body() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1/messages")
            .with_status(529)
            .with_body(r#"{"type":"error","error":{"type":"overloaded_error","message":"Overloaded"}}"#)
            .create_async()
            .await;

        let err = client_for(&server).complete("s", "u").await.unwrap_err();
        match err {
            ClaudeError::Api {
                status,
                error_type,
                message,
            } => {
                assert_eq!(status, 529);
                assert_eq!(error_type, "overloaded_error");
                assert_eq!(message, "Overloaded");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_body_is_parse_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1/messages")
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        let err = client_for(&server).complete("s", "u").await.unwrap_err();
        assert!(matches!(err, ClaudeError::Parse(_)));
    }

    #[tokio::test]
    async fn test_slow_reply_times_out() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind");
        let url = format!("http://{}/v1/messages", listener.local_addr().expect("addr"));
        let _silent = tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });

        let client = ClaudeClient::new(&SecretString::from("sk-ant-test-key"), "m", url)
            .expect("client")
            .with_timeout(Duration::from_millis(200));

        let err = client.complete("s", "u").await.unwrap_err();
        assert!(matches!(err, ClaudeError::Http(ref e) if e.is_timeout()));
    }

    #[test]
    fn test_invalid_key_rejected() {
        let result = ClaudeClient::new(&SecretString::from("bad\nkey"), "m", "http://localhost");
        assert!(matches!(result, Err(ClaudeError::InvalidApiKey(_))));
    }

    #[test]
    fn test_claude_client_is_send_sync_clone() {
        fn assert_traits<T: Clone + Send + Sync>() {}
        assert_traits::<ClaudeClient>();
    }
}
