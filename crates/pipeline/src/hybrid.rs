//! Hybrid combiner: merges the CF and CB sources into one score per item.
//!
//! `hybrid = alpha * cf + (1 - alpha) * content_scale * cb`
//!
//! CF predictions live on the 1-5 rating scale while CB is a cosine in
//! [0, 1]; `content_scale` lifts CB onto the rating scale before mixing.
//! With `content_scale = 1.0` this is the plain convex combination.

use data_loader::{Catalog, ItemId};
use sources::{ScoreEntry, UserContext};
use std::collections::BTreeMap;
use tracing::debug;

/// Default CF weight
pub const DEFAULT_ALPHA: f32 = 0.6;

/// Default multiplier applied to CB cosine scores
pub const DEFAULT_CONTENT_SCALE: f32 = 5.0;

/// Mixes CF and CB scores as `alpha * cf + (1 - alpha) * content_scale * cb`.
///
/// The default `content_scale` of 5.0 puts CB on the CF rating scale;
/// `with_content_scale(1.0)` gives the plain `alpha * cf + (1 - alpha) * cb`.
#[derive(Debug, Clone, Copy)]
pub struct HybridCombiner {
    alpha: f32,
    content_scale: f32,
}

impl HybridCombiner {
    pub fn new(alpha: f32) -> Self {
        Self {
            alpha,
            content_scale: DEFAULT_CONTENT_SCALE,
        }
    }

    /// Configure the CB multiplier (default: 5.0)
    pub fn with_content_scale(mut self, content_scale: f32) -> Self {
        self.content_scale = content_scale;
        self
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn content_scale(&self) -> f32 {
        self.content_scale
    }

    /// One entry per catalog item the user hasn't rated, in load order.
    ///
    /// Items missing from either score map contribute 0.0 from that side.
    pub fn combine(
        &self,
        catalog: &Catalog,
        cf_scores: &BTreeMap<ItemId, f32>,
        cb_scores: &BTreeMap<ItemId, f32>,
        user: &UserContext,
    ) -> Vec<ScoreEntry> {
        let entries: Vec<ScoreEntry> = catalog
            .all()
            .iter()
            .filter(|item| !user.has_rated(item.id))
            .map(|item| {
                let cf = cf_scores.get(&item.id).copied().unwrap_or(0.0);
                let cb = cb_scores.get(&item.id).copied().unwrap_or(0.0);
                let contributions = (
                    self.alpha * cf,
                    (1.0 - self.alpha) * self.content_scale * cb,
                );
                ScoreEntry::new(item.id, cf, cb, contributions)
            })
            .collect();

        debug!(
            "Combined {} entries (alpha {}, content scale {})",
            entries.len(),
            self.alpha,
            self.content_scale
        );
        entries
    }
}

impl Default for HybridCombiner {
    fn default() -> Self {
        Self::new(DEFAULT_ALPHA)
    }
}
