//! Collaborative filtering predictor.
//!
//! "Users who rated like you rated this item N."
//!
//! ## Algorithm
//! For every candidate item the user hasn't rated:
//! 1. Take the other users who rated that item
//! 2. Score each by cosine similarity to the active user (co-rated items only)
//! 3. Keep the top K with positive similarity
//! 4. Predict the similarity-weighted mean of their ratings
//!
//! An item none of the neighbours rated predicts 0.0 ("no signal").

use crate::similarity::SimilarityEngine;
use crate::user_context::UserContext;
use data_loader::{ItemId, RatingSource, UserId};
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, instrument};

/// Default neighbourhood size
pub const DEFAULT_NEIGHBORS: usize = 5;

/// Predicts per-item scores from similar users' ratings
#[derive(Debug, Clone)]
pub struct CfPredictor {
    /// How many of the most similar raters contribute to each prediction
    neighbors: usize,
}

impl CfPredictor {
    pub fn new() -> Self {
        Self {
            neighbors: DEFAULT_NEIGHBORS,
        }
    }

    /// Configure the neighbourhood size K (default: 5)
    pub fn with_neighbors(mut self, neighbors: usize) -> Self {
        self.neighbors = neighbors;
        self
    }

    pub fn neighbors(&self) -> usize {
        self.neighbors
    }

    /// Predict a CF score for each candidate the user hasn't rated.
    ///
    /// Rated candidates are skipped; every other candidate gets an entry,
    /// 0.0 when no neighbour rated it.
    #[instrument(skip_all, fields(user_id = context.user_id, k = self.neighbors))]
    pub fn predict<R: RatingSource + ?Sized>(
        &self,
        engine: &SimilarityEngine<'_, R>,
        context: &UserContext,
        candidates: &[ItemId],
    ) -> BTreeMap<ItemId, f32> {
        // Similarity to each rater is the same for every item, compute once
        let mut similarity_cache: HashMap<UserId, f32> = HashMap::new();
        let mut predictions = BTreeMap::new();

        for &item_id in candidates {
            if context.has_rated(item_id) {
                continue;
            }

            let raters = engine.ratings().ratings_for_item(item_id);
            let mut neighbours: Vec<(UserId, f32, f32)> = raters
                .iter()
                .filter(|&(&user_id, _)| user_id != context.user_id)
                .filter_map(|(&user_id, &rating)| {
                    let similarity = *similarity_cache
                        .entry(user_id)
                        .or_insert_with(|| engine.user_similarity(context.user_id, user_id));
                    (similarity > 0.0).then_some((user_id, similarity, rating as f32))
                })
                .collect();

            // Most similar first; user id keeps ties deterministic
            neighbours.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
            neighbours.truncate(self.neighbors);

            predictions.insert(item_id, weighted_mean(&neighbours));
        }

        debug!(
            "CF predicted {} items ({} with signal) from {} candidate raters",
            predictions.len(),
            predictions.values().filter(|&&score| score > 0.0).count(),
            similarity_cache.len()
        );
        predictions
    }
}

impl Default for CfPredictor {
    fn default() -> Self {
        Self::new()
    }
}

/// Similarity-weighted mean rating, 0.0 when there is no weight
fn weighted_mean(neighbours: &[(UserId, f32, f32)]) -> f32 {
    let (numerator, denominator) = neighbours
        .iter()
        .fold((0.0f32, 0.0f32), |(num, den), &(_, similarity, rating)| {
            (num + similarity * rating, den + similarity.abs())
        });

    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}
