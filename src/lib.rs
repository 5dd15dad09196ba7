//! gradebox: output verification core for an automated contest-judging pipeline
//! Decides whether sandboxed submission output matches a reference output and
//! turns the answer into a score with a human-readable explanation
//!
//! # Architecture
//!
//! This crate is organized around the evaluation-step contract:
//!
//! ## Sandbox Capability ([`sandbox`])
//! - [`sandbox::Sandbox`]: file-existence check and lazy line-stream reads,
//!   the only surface an evaluation step consumes
//! - [`sandbox::LineStream`]: one byte line at a time, empty reads once
//!   exhausted
//! - [`sandbox::dir`]: directory-backed sandbox over the files a prior
//!   execution step left behind
//!
//! ## Evaluation Steps ([`steps`])
//! - [`steps::step`]: the pluggable `EvaluationStep` contract
//! - [`steps::whitediff`]: built-in whitespace-insensitive comparator
//! - [`steps::registry`]: comparator lookup by name
//!
//! ## Messages ([`messages`])
//! - [`messages::MessageCatalog`]: startup-loaded, read-only outcome
//!   message templates
//!
//! # Design Principles
//!
//! 1. **Bytes, not text** - submission output is untrusted and may be
//!    binary, malformed, or huge; nothing assumes an encoding
//! 2. **Streaming** - one line in memory at a time, mismatches fail fast
//! 3. **Zero means wrong** - a 0.0 score always means "verified incorrect";
//!    infrastructure failures surface as errors, never as scores

// Sandbox Capability
pub mod sandbox;

// Evaluation Steps
pub mod steps;

// Messages
pub mod messages;

// CLI entrypoint wiring for the gradebox binary.
pub mod cli;

// Core types
pub mod types;

// Re-export commonly used types for convenience
pub use types::{EvalError, Outcome, Result};
