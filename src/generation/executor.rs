//! Plan executor: dispatches a plan to the request client or the chain
//! generator. Sessions only see this seam.

use crate::generation::chain::ChainedGenerator;
use crate::generation::plan::GenerationPlan;
use crate::provider::RequestClient;
use crate::types::GenerationResult;
use async_trait::async_trait;

#[async_trait]
pub trait PlanExecutor: Send + Sync {
    async fn execute(&self, plan: &GenerationPlan) -> GenerationResult;
}

/// Executes plans over a [`RequestClient`].
#[derive(Clone)]
pub struct GenerationExecutor {
    client: RequestClient,
}

impl GenerationExecutor {
    pub fn new(client: RequestClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &RequestClient {
        &self.client
    }
}

#[async_trait]
impl PlanExecutor for GenerationExecutor {
    async fn execute(&self, plan: &GenerationPlan) -> GenerationResult {
        match plan {
            GenerationPlan::Single(request) => self.client.generate(request).await,
            GenerationPlan::Chained(chain) => ChainedGenerator::new(&self.client).generate(chain).await,
        }
    }
}
