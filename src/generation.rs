//! Generation plans and their execution.
//!
//! A tool's assembler produces a [`GenerationPlan`]; the executor runs it
//! through the request client, either as one request or as an ordered chain
//! of parts.

pub mod chain;
pub mod executor;
pub mod plan;

pub use chain::ChainedGenerator;
pub use executor::{GenerationExecutor, PlanExecutor};
pub use plan::{
    ChainPart, ChainPlan, GenerationPlan, DEFAULT_PART_ERROR_NOTICE, DEFAULT_PART_NOTICE,
};
