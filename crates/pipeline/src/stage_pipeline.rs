//! The StagePipeline orchestrates multiple score stages.
//!
//! This module provides the main StagePipeline struct that chains
//! stages together using the builder pattern.

use crate::context::RequestContext;
use crate::traits::ScoreStage;
use anyhow::Result;
use sources::ScoreEntry;
use tracing;

/// Chains score stages together into a processing pipeline.
///
/// ## Usage
/// ```ignore
/// let pipeline = StagePipeline::new()
///     .add_stage(PromptBooster::new(catalog.clone(), &tokenizer, 0.2))
///     .add_stage(ZeroSignalFilter);
///
/// let boosted = pipeline.apply(entries, &context)?;
/// ```
pub struct StagePipeline {
    stages: Vec<Box<dyn ScoreStage>>,
}

impl StagePipeline {
    /// Create a new empty StagePipeline.
    pub fn new() -> Self {
        Self { stages: Vec::new() }
    }

    /// Add a stage to the pipeline (builder pattern).
    pub fn add_stage(mut self, stage: impl ScoreStage + 'static) -> Self {
        self.stages.push(Box::new(stage));
        self
    }

    /// Names of the stages in execution order
    pub fn stage_names(&self) -> Vec<&str> {
        self.stages.iter().map(|stage| stage.name()).collect()
    }

    /// Apply all stages in sequence to the entries.
    ///
    /// # Returns
    /// * `Ok(Vec<ScoreEntry>)` - The entries after all stages
    /// * `Err` - If any stage fails
    pub fn apply(&self, entries: Vec<ScoreEntry>, context: &RequestContext) -> Result<Vec<ScoreEntry>> {
        let mut current = entries;
        for stage in &self.stages {
            tracing::debug!(
                "Applying stage: {} (input count: {})",
                stage.name(),
                current.len()
            );
            current = stage.apply(current, context)?;
            tracing::debug!(
                "Stage applied: {} (output count: {})",
                stage.name(),
                current.len()
            );
        }
        Ok(current)
    }
}

impl Default for StagePipeline {
    fn default() -> Self {
        Self::new()
    }
}
