//! Pipeline for combining and adjusting recommendation scores.
//!
//! This crate provides:
//! - HybridCombiner for merging CF and CB scores into one entry per item
//! - PromptTokenizer for turning a free-text prompt into keywords
//! - ScoreStage trait and StagePipeline for composing passes over the entries
//! - Stage implementations (PromptBooster, ZeroSignalFilter)
//!
//! ## Architecture
//! The pipeline processes one request in stages:
//! 1. HybridCombiner mixes the two sources (`alpha * cf + (1 - alpha) * cb`)
//! 2. Stages adjust the entries (prompt boost, optional zero-signal drop)
//! 3. The engine ranks what comes out
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::{HybridCombiner, PromptTokenizer, RequestContext, StagePipeline};
//! use pipeline::stages::*;
//!
//! let tokenizer = PromptTokenizer::new();
//! let pipeline = StagePipeline::new()
//!     .add_stage(PromptBooster::new(&catalog, &tokenizer, 0.2));
//!
//! let entries = HybridCombiner::new(0.6).combine(&catalog, &cf, &cb, &user);
//! let context = RequestContext::new(user, tokenizer.tokenize("sci-fi with ai"));
//! let boosted = pipeline.apply(entries, &context)?;
//! ```

pub mod context;
pub mod hybrid;
pub mod stage_pipeline;
pub mod stages;
pub mod tokenizer;
pub mod traits;

// Re-export main types
pub use context::RequestContext;
pub use hybrid::{DEFAULT_ALPHA, DEFAULT_CONTENT_SCALE, HybridCombiner};
pub use stage_pipeline::StagePipeline;
pub use tokenizer::{DEFAULT_STOPWORDS, PromptTokenizer};
pub use traits::ScoreStage;
