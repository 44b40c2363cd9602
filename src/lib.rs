//! Vigil - entropy-gated LLM evaluation pipeline
//!
//! Generates answers through an OpenAI-compatible provider, scores each
//! answer's token-level uncertainty, routes uncertain answers through
//! NLI-based validators, and records one row per prompt.

pub mod agent;
pub mod cli;
pub mod config;
pub mod dataset;
pub mod features;
pub mod generation;
pub mod logging;
pub mod pipeline;
pub mod routing;
pub mod validation;
