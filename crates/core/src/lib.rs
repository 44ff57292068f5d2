//! Core types and configuration for the trading intent pipeline.
//!
//! This crate provides shared types used across all other crates:
//! - The normalized command and its validation outcome
//! - The provider-neutral classification result
//! - Configuration structures
//! - Common error types

pub mod config;
pub mod error;
pub mod types;

pub use config::{Config, NormalizerConfig, ProviderConfig};
pub use error::{Error, Result};
pub use types::*;
