//! Property-based tests for assembler determinism and wizard gating

mod determinism;
mod wizard_gating;
