//! Scripted transport and manual clock for exercising the client without a
//! network or real sleeps.

use super::{GenerationTransport, Sleeper};
use crate::error::TransportError;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

/// Virtual time: `sleep` advances the clock instantly and records the delay.
#[derive(Debug, Default)]
pub struct ManualClock {
    elapsed: Mutex<Duration>,
    sleeps: Mutex<Vec<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn elapsed(&self) -> Duration {
        *self.elapsed.lock()
    }

    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.lock().clone()
    }
}

#[async_trait]
impl Sleeper for ManualClock {
    async fn sleep(&self, duration: Duration) {
        *self.elapsed.lock() += duration;
        self.sleeps.lock().push(duration);
    }
}

/// One observed call to [`ScriptedTransport::send`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallRecord {
    pub instruction: String,
    pub timeout: Duration,
    /// Virtual time of the call; zero when no clock is attached.
    pub at: Duration,
}

/// Replays a fixed list of replies in order, recording every call.
pub struct ScriptedTransport {
    replies: Mutex<VecDeque<Result<String, TransportError>>>,
    calls: Mutex<Vec<CallRecord>>,
    clock: Option<Arc<ManualClock>>,
}

impl ScriptedTransport {
    pub fn new(replies: Vec<Result<String, TransportError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            calls: Mutex::new(Vec::new()),
            clock: None,
        }
    }

    pub fn with_clock(mut self, clock: Arc<ManualClock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn calls(&self) -> Vec<CallRecord> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    pub fn instructions(&self) -> Vec<String> {
        self.calls
            .lock()
            .iter()
            .map(|c| c.instruction.clone())
            .collect()
    }
}

#[async_trait]
impl GenerationTransport for ScriptedTransport {
    async fn send(&self, instruction: &str, timeout: Duration) -> Result<String, TransportError> {
        let at = self
            .clock
            .as_ref()
            .map(|c| c.elapsed())
            .unwrap_or_default();
        self.calls.lock().push(CallRecord {
            instruction: instruction.to_string(),
            timeout,
            at,
        });
        self.replies
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Other("no scripted reply left".to_string())))
    }

    fn endpoint(&self) -> &str {
        "scripted"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_replays_in_order_then_errors() {
        let transport = ScriptedTransport::new(vec![Ok("a".to_string())]);
        assert_eq!(
            transport.send("one", Duration::from_secs(1)).await,
            Ok("a".to_string())
        );
        assert!(transport.send("two", Duration::from_secs(1)).await.is_err());
        assert_eq!(transport.instructions(), vec!["one", "two"]);
    }

    #[tokio::test]
    async fn test_clock_stamps_calls() {
        let clock = Arc::new(ManualClock::new());
        let transport =
            ScriptedTransport::new(vec![Ok("a".to_string()), Ok("b".to_string())])
                .with_clock(clock.clone());
        transport.send("one", Duration::from_secs(1)).await.unwrap();
        clock.sleep(Duration::from_secs(2)).await;
        transport.send("two", Duration::from_secs(1)).await.unwrap();

        let calls = transport.calls();
        assert_eq!(calls[0].at, Duration::ZERO);
        assert_eq!(calls[1].at, Duration::from_secs(2));
    }
}
