//! Chained multi-part generation.
//!
//! Parts run strictly in order. Part 1 failing fails the whole chain; a later
//! part failing keeps the text generated so far and appends that part's
//! notice, which differs between an unusable reply and a transport error. No
//! part is issued after a failure.

use crate::error::TransportError;
use crate::generation::plan::ChainPlan;
use crate::provider::RequestClient;
use crate::types::GenerationResult;
use tracing::{debug, warn};

pub const PART_SEPARATOR: &str = "\n\n";

pub struct ChainedGenerator<'a> {
    client: &'a RequestClient,
}

impl<'a> ChainedGenerator<'a> {
    pub fn new(client: &'a RequestClient) -> Self {
        Self { client }
    }

    pub async fn generate(&self, plan: &ChainPlan) -> GenerationResult {
        let mut texts: Vec<String> = Vec::with_capacity(plan.len());

        for (index, part) in plan.parts().iter().enumerate() {
            debug!(part = index + 1, total = plan.len(), "Issuing chain part");
            if index == 0 {
                match self.client.generate(part.request()).await {
                    GenerationResult::Ok { text } => texts.push(text),
                    failed => {
                        warn!("First chain part failed, abandoning chain");
                        return failed;
                    }
                }
                continue;
            }
            match self.client.attempt(part.request()).await {
                Ok(text) => texts.push(text),
                Err(err) => {
                    warn!(
                        part = index + 1,
                        total = plan.len(),
                        error = %err,
                        "Chain part failed, keeping earlier parts"
                    );
                    let notice = match err {
                        TransportError::Malformed(_) => plan.notice_for(index),
                        _ => plan.error_notice_for(index),
                    };
                    texts.push(notice);
                    break;
                }
            }
        }

        GenerationResult::ok(texts.join(PART_SEPARATOR))
    }
}
