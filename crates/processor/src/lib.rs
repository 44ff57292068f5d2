//! Natural language command processing for the trading intent pipeline.
//!
//! This crate provides:
//! - The [`Processor`] surface callers use to parse free text
//! - The [`ClassificationProvider`] boundary and a Wit.ai implementation
//! - Per-request cancellation and deadlines

pub mod context;
pub mod processor;
pub mod provider;
pub mod witai;

pub use context::RequestContext;
pub use processor::{CommandProcessor, Processor};
pub use provider::ClassificationProvider;
pub use witai::WitAiProvider;
