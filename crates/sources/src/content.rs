//! Content-based profiler.
//!
//! ## Algorithm
//! 1. Take the items the user rated at or above the "liked" threshold
//! 2. Sum their tag vectors, each weighted by its rating -> profile
//! 3. Score each candidate by cosine(profile, candidate tag vector)
//!
//! A user with no liked items has no profile and every item scores 0.0.

use crate::similarity::{TagSpace, cosine};
use crate::user_context::UserContext;
use data_loader::{ItemId, RatingValue};
use std::collections::BTreeMap;
use tracing::{debug, instrument};

/// Default minimum rating for an item to count as liked
pub const DEFAULT_LIKED_THRESHOLD: RatingValue = 4;

/// Builds a tag profile from liked items and scores items against it
#[derive(Debug, Clone)]
pub struct CbProfiler {
    liked_threshold: RatingValue,
}

impl CbProfiler {
    pub fn new() -> Self {
        Self {
            liked_threshold: DEFAULT_LIKED_THRESHOLD,
        }
    }

    /// Configure the liked threshold (default: 4)
    pub fn with_liked_threshold(mut self, threshold: RatingValue) -> Self {
        self.liked_threshold = threshold;
        self
    }

    pub fn liked_threshold(&self) -> RatingValue {
        self.liked_threshold
    }

    /// Rating-weighted sum of the liked items' tag vectors.
    ///
    /// `None` when nothing is liked or every liked item is untagged.
    pub fn build_profile(&self, tags: &TagSpace, context: &UserContext) -> Option<Vec<f32>> {
        let liked = context.liked_items(self.liked_threshold);
        if liked.is_empty() {
            return None;
        }

        let mut profile = vec![0.0f32; tags.dimension()];
        for (item_id, rating) in liked {
            if let Some(vector) = tags.vector(item_id) {
                for (acc, &weight) in profile.iter_mut().zip(vector) {
                    *acc += weight * rating as f32;
                }
            }
        }

        profile.iter().any(|&w| w != 0.0).then_some(profile)
    }

    /// CB score for each candidate the user hasn't rated
    #[instrument(skip_all, fields(user_id = context.user_id, threshold = self.liked_threshold))]
    pub fn score(
        &self,
        tags: &TagSpace,
        context: &UserContext,
        candidates: &[ItemId],
    ) -> BTreeMap<ItemId, f32> {
        let profile = self.build_profile(tags, context);
        if profile.is_none() {
            debug!("No liked items, content scores fall back to 0.0");
        }

        candidates
            .iter()
            .filter(|&&item_id| !context.has_rated(item_id))
            .map(|&item_id| {
                let score = match (&profile, tags.vector(item_id)) {
                    (Some(profile), Some(vector)) => cosine(profile, vector),
                    _ => 0.0,
                };
                (item_id, score)
            })
            .collect()
    }
}

impl Default for CbProfiler {
    fn default() -> Self {
        Self::new()
    }
}
