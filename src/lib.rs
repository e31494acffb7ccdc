//! Draftdesk: wizard-driven document generation
//!
//! Each tool collects structured input over one or more wizard steps,
//! assembles a deterministic instruction, and submits it to a remote
//! text-generation endpoint. Multi-part documents are generated as a chain
//! of requests whose outputs are concatenated.

pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod fields;
pub mod generation;
pub mod logging;
pub mod prompt;
pub mod provider;
pub mod tools;
pub mod types;
pub mod wizard;
