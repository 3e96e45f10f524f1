//! Core traits for the scoring pipeline.
//!
//! This module defines the ScoreStage trait that allows composable,
//! extensible passes over the hybrid scores of one request.

use crate::context::RequestContext;
use anyhow::Result;
use sources::ScoreEntry;

/// One pass over a request's score entries.
///
/// ## Design Note
/// - `Send + Sync` lets one pipeline serve concurrent requests
/// - Stages take ownership of the Vec<ScoreEntry> and return the new set,
///   so they can adjust scores in place or drop entries without cloning
pub trait ScoreStage: Send + Sync {
    /// Returns the name of this stage (for logging/debugging)
    fn name(&self) -> &str;

    /// Apply this stage to a set of entries.
    ///
    /// # Arguments
    /// * `entries` - The score entries (takes ownership)
    /// * `context` - Active user and prompt keywords
    ///
    /// # Returns
    /// * `Ok(Vec<ScoreEntry>)` - The adjusted entries
    /// * `Err` - If the stage fails
    fn apply(&self, entries: Vec<ScoreEntry>, context: &RequestContext) -> Result<Vec<ScoreEntry>>;
}
