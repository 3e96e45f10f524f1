//! Stage that boosts items whose tags match the prompt keywords.
//!
//! ## Algorithm
//! 1. Every item tag is tokenized with the prompt tokenizer once, up front
//! 2. A tag matches when all of its tokens are among the prompt keywords
//!    ("sci-fi" needs both "sci" and "fi")
//! 3. `overlap` = number of matching tags
//! 4. Multiplicative: `boosted = hybrid * (1 + beta * overlap)`
//!    Additive:       `boosted = hybrid + beta * overlap`
//!
//! An empty keyword set leaves every score untouched.

use crate::context::RequestContext;
use crate::tokenizer::PromptTokenizer;
use crate::traits::ScoreStage;
use anyhow::Result;
use data_loader::{Catalog, ItemId};
use serde::{Deserialize, Serialize};
use sources::ScoreEntry;
use std::collections::{BTreeSet, HashMap};

/// Default boost per matching tag
pub const DEFAULT_BETA: f32 = 0.2;

/// How the overlap count is applied to the hybrid score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoostMode {
    /// Scale the score by `1 + beta * overlap`
    #[default]
    Multiplicative,
    /// Add `beta * overlap` to the score
    Additive,
}

impl BoostMode {
    /// Apply `overlap` matches to a score
    pub fn boost(self, score: f32, beta: f32, overlap: usize) -> f32 {
        let overlap = overlap as f32;
        match self {
            BoostMode::Multiplicative => score * (1.0 + beta * overlap),
            BoostMode::Additive => score + beta * overlap,
        }
    }
}

/// Boosts entries by prompt keyword / tag overlap.
pub struct PromptBooster {
    /// Item id -> (tag, tag tokens); tags that tokenize to nothing are dropped
    tag_terms: HashMap<ItemId, Vec<(String, BTreeSet<String>)>>,
    beta: f32,
    mode: BoostMode,
}

impl PromptBooster {
    /// Create a new PromptBooster.
    ///
    /// # Arguments
    /// * `catalog` - Items whose tags are matched
    /// * `tokenizer` - The tokenizer prompts are parsed with
    /// * `beta` - Boost per matching tag (typically 0.2)
    pub fn new(catalog: &Catalog, tokenizer: &PromptTokenizer, beta: f32) -> Self {
        let tag_terms = catalog
            .all()
            .iter()
            .map(|item| {
                let terms = item
                    .tags
                    .iter()
                    .map(|tag| (tag.clone(), tokenizer.tokenize(tag)))
                    .filter(|(_, tokens)| !tokens.is_empty())
                    .collect();
                (item.id, terms)
            })
            .collect();

        Self {
            tag_terms,
            beta,
            mode: BoostMode::default(),
        }
    }

    /// Configure how the boost is applied (default: multiplicative)
    pub fn with_mode(mut self, mode: BoostMode) -> Self {
        self.mode = mode;
        self
    }

    /// Tags of an item that the keywords fully cover, in tag order
    pub fn matching_tags(&self, item_id: ItemId, keywords: &BTreeSet<String>) -> Vec<String> {
        if keywords.is_empty() {
            return Vec::new();
        }
        self.tag_terms
            .get(&item_id)
            .map(|terms| {
                terms
                    .iter()
                    .filter(|(_, tokens)| tokens.is_subset(keywords))
                    .map(|(tag, _)| tag.clone())
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl ScoreStage for PromptBooster {
    fn name(&self) -> &str {
        "PromptBooster"
    }

    fn apply(&self, entries: Vec<ScoreEntry>, context: &RequestContext) -> Result<Vec<ScoreEntry>> {
        if context.keywords.is_empty() {
            return Ok(entries);
        }

        let boosted = entries
            .into_iter()
            .map(|mut entry| {
                let matched = self.matching_tags(entry.item_id, &context.keywords);
                entry.boosted_score = self.mode.boost(entry.hybrid_score, self.beta, matched.len());
                entry.matched_tags = matched;
                entry
            })
            .collect();
        Ok(boosted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::{Dataset, ItemDefinition};
    use sources::UserContext;

    fn create_test_catalog() -> Catalog {
        let item = |id, title: &str, tags: &[&str]| ItemDefinition {
            id,
            title: title.to_string(),
            year: None,
            genres: Vec::new(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
        };
        let dataset = Dataset {
            items: vec![
                item(1, "Inception", &["sci-fi", "thriller"]),
                item(2, "Titanic", &["romance", "drama"]),
                item(3, "Matrix", &["sci-fi", "action", "kung fu"]),
            ],
            ratings: Vec::new(),
        };
        dataset.build().unwrap().0
    }

    fn context_for(prompt: &str) -> RequestContext {
        RequestContext::new(UserContext::default(), PromptTokenizer::new().tokenize(prompt))
    }

    fn entries() -> Vec<ScoreEntry> {
        vec![
            ScoreEntry::new(2, 4.0, 0.0, (2.0, 0.0)),
            ScoreEntry::new(3, 4.0, 0.2, (2.0, 0.5)),
        ]
    }

    #[test]
    fn test_tag_needs_all_tokens() {
        let catalog = create_test_catalog();
        let booster = PromptBooster::new(&catalog, &PromptTokenizer::new(), DEFAULT_BETA);

        let keywords = PromptTokenizer::new().tokenize("sci-fi action");
        assert_eq!(booster.matching_tags(3, &keywords), vec!["action", "sci-fi"]);

        // "sci" alone does not cover "sci-fi"
        let keywords = PromptTokenizer::new().tokenize("sci action");
        assert_eq!(booster.matching_tags(3, &keywords), vec!["action"]);

        let keywords = PromptTokenizer::new().tokenize("some kung fu please");
        assert_eq!(booster.matching_tags(3, &keywords), vec!["kung fu"]);
        assert!(booster.matching_tags(2, &keywords).is_empty());
        assert!(booster.matching_tags(99, &keywords).is_empty());
    }

    #[test]
    fn test_multiplicative_boost() {
        let catalog = create_test_catalog();
        let booster = PromptBooster::new(&catalog, &PromptTokenizer::new(), 0.2);

        let output = booster.apply(entries(), &context_for("sci-fi action")).unwrap();

        assert_eq!(output[0].boosted_score, output[0].hybrid_score);
        assert!(!output[0].is_boosted());
        assert!((output[1].boosted_score - 2.5 * 1.4).abs() < 1e-6);
        assert_eq!(output[1].matched_tags, vec!["action", "sci-fi"]);
    }

    #[test]
    fn test_additive_boost() {
        let catalog = create_test_catalog();
        let booster = PromptBooster::new(&catalog, &PromptTokenizer::new(), 0.5)
            .with_mode(BoostMode::Additive);

        let output = booster.apply(entries(), &context_for("drama")).unwrap();

        assert!((output[0].boosted_score - 2.5).abs() < 1e-6);
        assert_eq!(output[1].boosted_score, output[1].hybrid_score);
    }

    #[test]
    fn test_empty_prompt_is_noop() {
        let catalog = create_test_catalog();
        let booster = PromptBooster::new(&catalog, &PromptTokenizer::new(), 0.2);

        for prompt in ["", "   ", "recommend me a movie"] {
            let output = booster.apply(entries(), &context_for(prompt)).unwrap();
            assert_eq!(output, entries());
        }
    }

    #[test]
    fn test_boost_is_monotonic() {
        for mode in [BoostMode::Multiplicative, BoostMode::Additive] {
            for beta in [0.0, 0.1, 0.2, 1.0] {
                for overlap in 0..4 {
                    let score = 2.75;
                    let boosted = mode.boost(score, beta, overlap);
                    assert!(boosted >= score);
                    if beta > 0.0 {
                        assert_eq!(boosted == score, overlap == 0);
                    }
                }
            }
        }
    }
}
