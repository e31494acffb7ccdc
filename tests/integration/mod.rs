//! Integration tests for draftdesk wizards, chaining and the CLI context

mod catalogue;
mod chained_generation;
mod cli_context;
mod http_generation;
mod test_utils;
mod wizard_flow;
