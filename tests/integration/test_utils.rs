//! Shared test utilities for integration tests

use draftdesk::error::TransportError;
use draftdesk::generation::GenerationExecutor;
use draftdesk::provider::mock::{ManualClock, ScriptedTransport};
use draftdesk::provider::{RequestClient, RetryPolicy};
use std::sync::Arc;
use std::time::Duration;

/// Scripted executor on virtual time. Returns the transport for call
/// inspection and the clock for backoff assertions.
pub fn scripted_executor(
    replies: Vec<Result<String, TransportError>>,
) -> (Arc<ScriptedTransport>, Arc<ManualClock>, GenerationExecutor) {
    let clock = Arc::new(ManualClock::new());
    let transport = Arc::new(ScriptedTransport::new(replies).with_clock(clock.clone()));
    let client = RequestClient::new(transport.clone(), RetryPolicy::default())
        .with_sleeper(clock.clone());
    (transport, clock, GenerationExecutor::new(client))
}

pub fn timeout() -> Result<String, TransportError> {
    Err(TransportError::Timeout(Duration::from_secs(120)))
}
