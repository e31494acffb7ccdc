//! HTTP transport for the generation endpoint.

use super::GenerationTransport;
use crate::error::{ApiError, TransportError};
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Serialize;
use std::time::Duration;

const HTTP_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Serialize)]
struct QuestionBody<'a> {
    question: &'a str,
}

// Per-attempt timeouts are set on each request, not on the client, so the
// request client can vary them.
fn build_http_client() -> Result<Client, ApiError> {
    Client::builder()
        .no_proxy()
        .connect_timeout(HTTP_CONNECT_TIMEOUT)
        .build()
        .map_err(|e| ApiError::ConfigError(format!("Failed to create HTTP client: {}", e)))
}

fn map_http_error(error: reqwest::Error, timeout: Duration) -> TransportError {
    if error.is_timeout() {
        TransportError::Timeout(timeout)
    } else if error.is_connect() {
        TransportError::Connect(error.to_string())
    } else {
        TransportError::Other(format!("HTTP error: {}", error))
    }
}

/// POSTs `{"question": ...}` as JSON and returns the raw response body.
pub struct HttpTransport {
    client: Client,
    endpoint: Url,
    endpoint_label: String,
}

impl HttpTransport {
    pub fn new(endpoint: &str) -> Result<Self, ApiError> {
        let endpoint = Url::parse(endpoint).map_err(|e| {
            ApiError::ConfigError(format!("Invalid generation endpoint '{}': {}", endpoint, e))
        })?;
        Ok(Self {
            client: build_http_client()?,
            endpoint_label: endpoint.to_string(),
            endpoint,
        })
    }
}

#[async_trait]
impl GenerationTransport for HttpTransport {
    async fn send(&self, instruction: &str, timeout: Duration) -> Result<String, TransportError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .header("Content-Type", "application/json")
            .timeout(timeout)
            .json(&QuestionBody {
                question: instruction,
            })
            .send()
            .await
            .map_err(|e| map_http_error(e, timeout))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response.text().await.map_err(|e| map_http_error(e, timeout))
    }

    fn endpoint(&self) -> &str {
        &self.endpoint_label
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::envelope::wrap_text;
    use crate::provider::mock::ManualClock;
    use crate::provider::{RequestClient, RetryPolicy};
    use crate::types::{GenerationRequest, GenerationResult, SERVER_ERROR_MESSAGE};
    use mockito::Matcher;
    use std::net::TcpListener;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Accepts connections and never answers. Returns the endpoint URL and
    /// the number of connections accepted so far.
    fn silent_server() -> (String, Arc<AtomicUsize>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/generate", listener.local_addr().unwrap());
        let accepted = Arc::new(AtomicUsize::new(0));
        let counter = accepted.clone();
        std::thread::spawn(move || {
            let mut held = Vec::new();
            for stream in listener.incoming().flatten() {
                counter.fetch_add(1, Ordering::SeqCst);
                held.push(stream);
            }
        });
        (url, accepted)
    }

    #[test]
    fn test_rejects_invalid_endpoint() {
        assert!(HttpTransport::new("not a url").is_err());
    }

    #[tokio::test]
    async fn test_posts_question_and_returns_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/generate")
            .match_header("content-type", "application/json")
            .match_body(Matcher::Json(serde_json::json!({ "question": "Draft minutes" })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(wrap_text("Minutes of the meeting"))
            .expect(1)
            .create_async()
            .await;

        let transport = HttpTransport::new(&format!("{}/generate", server.url())).unwrap();
        let body = transport
            .send("Draft minutes", Duration::from_secs(5))
            .await
            .unwrap();

        assert_eq!(body, wrap_text("Minutes of the meeting"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_non_success_status_is_status_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/generate")
            .with_status(500)
            .with_body("boom")
            .create_async()
            .await;

        let transport = HttpTransport::new(&format!("{}/generate", server.url())).unwrap();
        let err = transport
            .send("Draft", Duration::from_secs(5))
            .await
            .unwrap_err();

        assert_eq!(
            err,
            TransportError::Status {
                status: 500,
                body: "boom".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_client_does_not_retry_server_errors() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/generate")
            .with_status(503)
            .expect(1)
            .create_async()
            .await;

        let transport = HttpTransport::new(&format!("{}/generate", server.url())).unwrap();
        let client = RequestClient::new(
            Arc::new(transport),
            RetryPolicy {
                max_retries: 2,
                timeout: Duration::from_secs(5),
                backoff: Duration::from_millis(1),
            },
        );

        let result = client.generate(&GenerationRequest::new("Draft")).await;
        assert_eq!(result, GenerationResult::failed(SERVER_ERROR_MESSAGE));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_connection_refused_is_connect_error() {
        // Port 1 is reserved and nothing listens on it in test environments.
        let transport = HttpTransport::new("http://127.0.0.1:1/generate").unwrap();
        let err = transport
            .send("Draft", Duration::from_secs(5))
            .await
            .unwrap_err();
        assert!(matches!(err, TransportError::Connect(_)), "got {:?}", err);
        assert!(!err.is_retryable());
    }

    #[tokio::test]
    async fn test_unanswered_request_is_timeout() {
        let (url, accepted) = silent_server();
        let transport = HttpTransport::new(&url).unwrap();

        let err = transport
            .send("Draft", Duration::from_millis(300))
            .await
            .unwrap_err();

        assert_eq!(err, TransportError::Timeout(Duration::from_millis(300)));
        assert!(err.is_retryable());
        assert_eq!(accepted.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_client_retries_unanswered_requests_then_degrades() {
        let (url, accepted) = silent_server();
        let clock = Arc::new(ManualClock::new());
        let client = RequestClient::new(
            Arc::new(HttpTransport::new(&url).unwrap()),
            RetryPolicy {
                max_retries: 1,
                timeout: Duration::from_millis(200),
                backoff: Duration::from_secs(2),
            },
        )
        .with_sleeper(clock.clone());

        let result = client.generate(&GenerationRequest::new("Draft")).await;

        assert_eq!(result, GenerationResult::failed(SERVER_ERROR_MESSAGE));
        assert_eq!(accepted.load(Ordering::SeqCst), 2);
        assert_eq!(clock.sleeps(), vec![Duration::from_secs(2)]);
    }
}
