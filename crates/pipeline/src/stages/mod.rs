//! Stage implementations for the score pipeline.
//!
//! This module contains the concrete stages that can be composed into a
//! StagePipeline.

pub mod prompt_boost;
pub mod zero_signal;

// Re-export for convenience
pub use prompt_boost::{BoostMode, DEFAULT_BETA, PromptBooster};
pub use zero_signal::ZeroSignalFilter;
