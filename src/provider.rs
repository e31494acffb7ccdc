//! Generation Endpoint Client
//!
//! Executes one generation request against the remote text-generation endpoint
//! and always returns a [`GenerationResult`]. Timeouts are retried with a fixed
//! backoff; every other failure degrades immediately to a user-safe message.

use crate::config::GenerationConfig;
use crate::error::{ApiError, TransportError};
use crate::types::{GenerationRequest, GenerationResult, SERVER_ERROR_MESSAGE};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, warn};

pub mod envelope;
pub mod http;
pub mod mock;
pub mod retry;

pub use http::HttpTransport;
pub use retry::{RetryPolicy, Sleeper, TokioSleeper};

/// One network round trip to the generation endpoint.
///
/// Implementations return the raw response body; envelope extraction is done
/// by the client so that shape checks live in one place.
#[async_trait]
pub trait GenerationTransport: Send + Sync {
    async fn send(&self, instruction: &str, timeout: Duration) -> Result<String, TransportError>;

    /// Endpoint description for logs.
    fn endpoint(&self) -> &str;
}

/// Resilient client: bounded timeout-only retry, never returns a raw error.
#[derive(Clone)]
pub struct RequestClient {
    transport: Arc<dyn GenerationTransport>,
    sleeper: Arc<dyn Sleeper>,
    policy: RetryPolicy,
}

impl RequestClient {
    pub fn new(transport: Arc<dyn GenerationTransport>, policy: RetryPolicy) -> Self {
        Self {
            transport,
            sleeper: Arc::new(TokioSleeper),
            policy,
        }
    }

    /// Build the production client (HTTP transport) from configuration.
    pub fn from_config(config: &GenerationConfig) -> Result<Self, ApiError> {
        let transport = HttpTransport::new(&config.endpoint)?;
        Ok(Self::new(Arc::new(transport), RetryPolicy::from(config)))
    }

    /// Replace the backoff sleeper (tests inject a manual clock).
    pub fn with_sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Run the request through the retry budget and return the extracted text
    /// or the last error. Only timeouts are retried.
    pub async fn attempt(&self, request: &GenerationRequest) -> Result<String, TransportError> {
        let max_retries = request.max_retries().unwrap_or(self.policy.max_retries);
        let timeout = request.timeout().unwrap_or(self.policy.timeout);
        let max_attempts = max_retries.saturating_add(1);
        let mut attempt = 1;

        loop {
            debug!(
                endpoint = %self.transport.endpoint(),
                attempt,
                max_attempts,
                instruction_len = request.instruction().len(),
                "Sending generation request"
            );

            let outcome = match self.transport.send(request.instruction(), timeout).await {
                Ok(body) => envelope::extract_text(&body).map_err(TransportError::from),
                Err(err) => Err(err),
            };

            match outcome {
                Ok(text) => {
                    debug!(attempt, text_len = text.len(), "Generation request succeeded");
                    return Ok(text);
                }
                Err(err) if err.is_retryable() && attempt < max_attempts => {
                    warn!(
                        attempt,
                        max_attempts,
                        backoff_ms = self.policy.backoff.as_millis() as u64,
                        error = %err,
                        "Generation request timed out, retrying"
                    );
                    self.sleeper.sleep(self.policy.backoff).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// Run the request to a terminal result.
    pub async fn generate(&self, request: &GenerationRequest) -> GenerationResult {
        match self.attempt(request).await {
            Ok(text) => GenerationResult::Ok { text },
            Err(TransportError::Malformed(err)) => {
                warn!(error = %err, "Generation response had no usable text");
                GenerationResult::failed(request.failure_message())
            }
            Err(err) => {
                error!(error = %err, "Generation request failed");
                GenerationResult::failed(SERVER_ERROR_MESSAGE)
            }
        }
    }
}
