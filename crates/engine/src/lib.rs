//! Engine crate for the hybrid movie recommender.
//!
//! Ties the catalog, the rating sources and the scoring pipeline together
//! behind a single `recommend(title, rating, prompt, top_n)` call.

pub mod config;
pub mod error;
pub mod orchestrator;

pub use config::EngineConfig;
pub use error::{EngineError, Result};
pub use orchestrator::{RecommendRequest, Recommendation, RecommendationEngine};
