//! Shared score types passed from the sources into the pipeline.

use data_loader::ItemId;
use serde::{Deserialize, Serialize};

/// Which signal contributed most to an item's hybrid score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Signal {
    /// Similar users rated it
    Collaborative,
    /// Its tags match the user's liked items
    Content,
    /// No signal from either side
    None,
}

/// Per-item scores for one request.
///
/// Built once per request in catalog order and discarded after ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub item_id: ItemId,
    /// Similarity-weighted mean rating from neighbours, 0.0 without signal
    pub cf_score: f32,
    /// Cosine between the item's tags and the user profile, 0.0 without signal
    pub cb_score: f32,
    pub hybrid_score: f32,
    /// Hybrid score after the prompt boost; equals `hybrid_score` until boosted
    pub boosted_score: f32,
    /// Item tags fully covered by the prompt keywords, in tag order
    pub matched_tags: Vec<String>,
    /// Weighted CF and CB contributions to `hybrid_score`
    pub contributions: (f32, f32),
}

impl ScoreEntry {
    pub fn new(item_id: ItemId, cf_score: f32, cb_score: f32, contributions: (f32, f32)) -> Self {
        let hybrid_score = contributions.0 + contributions.1;
        Self {
            item_id,
            cf_score,
            cb_score,
            hybrid_score,
            boosted_score: hybrid_score,
            matched_tags: Vec::new(),
            contributions,
        }
    }

    /// True once the prompt boost matched at least one tag
    pub fn is_boosted(&self) -> bool {
        !self.matched_tags.is_empty()
    }

    pub fn dominant_signal(&self) -> Signal {
        let (cf, cb) = self.contributions;
        if cf <= 0.0 && cb <= 0.0 {
            Signal::None
        } else if cf >= cb {
            Signal::Collaborative
        } else {
            Signal::Content
        }
    }
}
