//! # Recommendation Engine
//!
//! This module coordinates one recommendation request:
//! 1. Validate the rating and resolve the title (fail fast, nothing scored yet)
//! 2. Layer the ephemeral rating over the community matrix
//! 3. Build the active user's context
//! 4. Predict CF scores and CB scores for every other item
//! 5. Combine them into hybrid scores
//! 6. Run the stage pipeline (prompt boost, optional zero-signal drop)
//! 7. Rank by boosted score, ties by catalog order, and return the top N
//!
//! The base data is shared read-only behind `Arc`s and every request works on
//! its own `RatingOverlay`, so the engine can be cloned into any number of
//! threads without one request seeing another's rating.

use std::sync::Arc;
use std::time::Instant;

use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::config::EngineConfig;
use crate::error::{EngineError, Result};
use data_loader::{ACTIVE_USER, Catalog, Dataset, Item, MAX_RATING, MIN_RATING, RatingMatrix, RatingValue};
use pipeline::stages::{PromptBooster, ZeroSignalFilter};
use pipeline::{HybridCombiner, PromptTokenizer, RequestContext, StagePipeline};
use sources::{
    CbProfiler, CfPredictor, ScoreEntry, Signal, SimilarityEngine, TagSpace, build_user_context,
};

/// Final recommendation returned to the caller
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub item_id: u32,
    pub title: String,
    pub year: Option<u16>,
    pub genres: Vec<String>,
    /// Ranking score (hybrid score after the prompt boost)
    pub score: f32,
    pub cf_score: f32,
    pub cb_score: f32,
    pub hybrid_score: f32,
    /// Item tags matched by the prompt; non-empty means boosted
    pub matched_tags: Vec<String>,
    pub signal: Signal,
    pub explanation: String,
}

impl Recommendation {
    pub fn is_boosted(&self) -> bool {
        !self.matched_tags.is_empty()
    }
}

/// One request for `recommend_many`
#[derive(Debug, Clone)]
pub struct RecommendRequest {
    pub title: String,
    pub rating: i64,
    pub prompt: String,
    /// `None` uses the configured default
    pub top_n: Option<usize>,
}

impl RecommendRequest {
    pub fn new(title: impl Into<String>, rating: i64, prompt: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            rating,
            prompt: prompt.into(),
            top_n: None,
        }
    }

    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = Some(top_n);
        self
    }
}

/// Hybrid CF + CB recommender over an immutable catalog and rating matrix
#[derive(Clone)]
pub struct RecommendationEngine {
    catalog: Arc<Catalog>,
    ratings: Arc<RatingMatrix>,
    tags: Arc<TagSpace>,
    cf: CfPredictor,
    cb: CbProfiler,
    combiner: HybridCombiner,
    tokenizer: Arc<PromptTokenizer>,
    pipeline: Arc<StagePipeline>,
    config: Arc<EngineConfig>,
}

impl RecommendationEngine {
    /// Create an engine with all components initialized
    ///
    /// # Arguments
    /// * `catalog` - The validated item catalog
    /// * `ratings` - Community ratings validated against the catalog
    /// * `config` - Scoring parameters; rejected if out of range
    pub fn new(catalog: Catalog, ratings: RatingMatrix, config: EngineConfig) -> Result<Self> {
        config.validate()?;

        let tags = TagSpace::build(&catalog, config.tag_weighting);
        let tokenizer = PromptTokenizer::with_stopwords(&config.stopwords);

        let mut pipeline = StagePipeline::new().add_stage(
            PromptBooster::new(&catalog, &tokenizer, config.beta).with_mode(config.boost_mode),
        );
        if config.drop_zero_signal {
            pipeline = pipeline.add_stage(ZeroSignalFilter);
        }

        let cf = CfPredictor::new().with_neighbors(config.neighbors);
        let cb = CbProfiler::new().with_liked_threshold(config.liked_threshold);
        let combiner = HybridCombiner::new(config.alpha).with_content_scale(config.content_scale);

        info!(
            "Engine ready: {} items, {} ratings, {} tags, stages [{}]",
            catalog.len(),
            ratings.len(),
            tags.dimension(),
            pipeline.stage_names().join(", ")
        );

        Ok(Self {
            catalog: Arc::new(catalog),
            ratings: Arc::new(ratings),
            tags: Arc::new(tags),
            cf,
            cb,
            combiner,
            tokenizer: Arc::new(tokenizer),
            pipeline: Arc::new(pipeline),
            config: Arc::new(config),
        })
    }

    /// Validate a raw dataset and build an engine over it
    pub fn from_dataset(dataset: Dataset, config: EngineConfig) -> Result<Self> {
        let (catalog, ratings) = dataset.build()?;
        Self::new(catalog, ratings, config)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Main entry point: rank items for one title + rating + prompt
    ///
    /// # Arguments
    /// * `title` - Title the user rated (exact, case-insensitive)
    /// * `rating` - The user's rating, 1-5
    /// * `prompt` - Free text; its keywords boost matching items
    /// * `top_n` - Maximum number of results
    ///
    /// # Returns
    /// Recommendations sorted by score (highest first), never containing the
    /// rated title itself
    #[instrument(skip(self, prompt), fields(prompt_len = prompt.len()))]
    pub fn recommend(
        &self,
        title: &str,
        rating: i64,
        prompt: &str,
        top_n: usize,
    ) -> Result<Vec<Recommendation>> {
        let start_time = Instant::now();

        // Input validation happens before any scoring work
        let rating = Self::validate_rating(rating)?;
        let seed = self
            .catalog
            .lookup_by_title(title)
            .map_err(|_| EngineError::NotFound {
                title: title.to_string(),
            })?;

        let entries = self.score(seed, rating, prompt)?;
        let recommendations = self.rank_and_select(entries, top_n);

        info!(
            "Recommended {} items for '{}' rated {} in {:.2?}",
            recommendations.len(),
            seed.title,
            rating,
            start_time.elapsed()
        );
        Ok(recommendations)
    }

    /// `recommend` with the configured default result count
    pub fn recommend_default(&self, title: &str, rating: i64, prompt: &str) -> Result<Vec<Recommendation>> {
        self.recommend(title, rating, prompt, self.config.default_top_n)
    }

    /// Evaluate independent requests in parallel.
    ///
    /// Results come back in request order; each request gets its own
    /// overlay, exactly as if it had been made alone.
    pub fn recommend_many(&self, requests: &[RecommendRequest]) -> Vec<Result<Vec<Recommendation>>> {
        requests
            .par_iter()
            .map(|request| {
                self.recommend(
                    &request.title,
                    request.rating,
                    &request.prompt,
                    request.top_n.unwrap_or(self.config.default_top_n),
                )
            })
            .collect()
    }

    /// Check the raw rating against the 1-5 scale
    fn validate_rating(rating: i64) -> Result<RatingValue> {
        if (MIN_RATING as i64..=MAX_RATING as i64).contains(&rating) {
            Ok(rating as RatingValue)
        } else {
            Err(EngineError::InvalidRating { rating })
        }
    }

    /// Hybrid and boosted scores for every item except the seed
    fn score(&self, seed: &Item, rating: RatingValue, prompt: &str) -> Result<Vec<ScoreEntry>> {
        // Request-local view: base matrix + this one rating
        let overlay = self
            .ratings
            .add_ephemeral_rating(ACTIVE_USER, seed.id, rating)?;
        let user = build_user_context(&overlay, ACTIVE_USER);
        let similarity = SimilarityEngine::new(&overlay, self.tags.as_ref());

        let candidates: Vec<_> = self.catalog.all().iter().map(|item| item.id).collect();
        let cf_scores = self.cf.predict(&similarity, &user, &candidates);
        let cb_scores = self.cb.score(&self.tags, &user, &candidates);
        let entries = self.combiner.combine(&self.catalog, &cf_scores, &cb_scores, &user);
        debug!("Combined {} entries for seed {}", entries.len(), seed.id);

        let keywords = self.tokenizer.tokenize(prompt);
        debug!("Prompt keywords: {:?}", keywords);
        let context = RequestContext::new(user, keywords);

        Ok(self.pipeline.apply(entries, &context)?)
    }

    /// Rank entries by boosted score and select top N
    fn rank_and_select(&self, mut entries: Vec<ScoreEntry>, top_n: usize) -> Vec<Recommendation> {
        // Sort by score DESC, then by catalog load order
        entries.sort_by(|a, b| {
            b.boosted_score.total_cmp(&a.boosted_score).then_with(|| {
                self.catalog
                    .position(a.item_id)
                    .cmp(&self.catalog.position(b.item_id))
            })
        });

        entries.truncate(top_n);

        entries
            .into_iter()
            .filter_map(|entry| {
                let item = self.catalog.get(entry.item_id)?;
                Some(Recommendation {
                    item_id: item.id,
                    title: item.title.clone(),
                    year: item.year,
                    genres: item.genres.clone(),
                    score: entry.boosted_score,
                    cf_score: entry.cf_score,
                    cb_score: entry.cb_score,
                    hybrid_score: entry.hybrid_score,
                    signal: entry.dominant_signal(),
                    explanation: explain(&entry),
                    matched_tags: entry.matched_tags,
                })
            })
            .collect()
    }
}

/// Human-readable account of where a score came from
fn explain(entry: &ScoreEntry) -> String {
    let mut explanation = match entry.dominant_signal() {
        Signal::Collaborative => format!(
            "Similar users rated it {:.2} (content match {:.2})",
            entry.cf_score, entry.cb_score
        ),
        Signal::Content => format!(
            "Tags match what you liked ({:.2}, similar users {:.2})",
            entry.cb_score, entry.cf_score
        ),
        Signal::None => "No rating or tag signal".to_string(),
    };
    if entry.is_boosted() {
        explanation.push_str(&format!("; boosted by prompt: {}", entry.matched_tags.join(", ")));
    }
    explanation
}
