//! Integration tests for the pipeline.
//!
//! These tests verify that the sources, the combiner and the stages work
//! together in a realistic scenario.

use data_loader::{ACTIVE_USER, Catalog, Dataset, ItemId, RatingMatrix};
use pipeline::stages::*;
use pipeline::{HybridCombiner, PromptTokenizer, RequestContext, StagePipeline};
use sources::{CbProfiler, CfPredictor, ScoreEntry, SimilarityEngine, TagSpace, TagWeighting, build_user_context};

fn create_test_setup() -> (Catalog, RatingMatrix, TagSpace) {
    let (catalog, ratings) = Dataset::sample().build().unwrap();
    let tags = TagSpace::build(&catalog, TagWeighting::TfIdf);
    (catalog, ratings, tags)
}

fn run(
    catalog: &Catalog,
    ratings: &RatingMatrix,
    tags: &TagSpace,
    seed: ItemId,
    rating: u8,
    prompt: &str,
    pipeline: &StagePipeline,
) -> Vec<ScoreEntry> {
    let overlay = ratings.add_ephemeral_rating(ACTIVE_USER, seed, rating).unwrap();
    let user = build_user_context(&overlay, ACTIVE_USER);
    let engine = SimilarityEngine::new(&overlay, tags);
    let candidates: Vec<ItemId> = catalog.all().iter().map(|i| i.id).collect();

    let cf = CfPredictor::new().predict(&engine, &user, &candidates);
    let cb = CbProfiler::new().score(tags, &user, &candidates);
    let entries = HybridCombiner::default().combine(catalog, &cf, &cb, &user);

    let tokenizer = PromptTokenizer::new();
    let context = RequestContext::new(user, tokenizer.tokenize(prompt));
    pipeline.apply(entries, &context).unwrap()
}

#[test]
fn test_full_pipeline_excludes_seed() {
    let (catalog, ratings, tags) = create_test_setup();
    let tokenizer = PromptTokenizer::new();
    let pipeline = StagePipeline::new().add_stage(PromptBooster::new(&catalog, &tokenizer, DEFAULT_BETA));

    let entries = run(&catalog, &ratings, &tags, 1, 5, "", &pipeline);

    assert_eq!(entries.len(), catalog.len() - 1);
    assert!(entries.iter().all(|e| e.item_id != 1));
    assert!(entries.iter().all(|e| e.boosted_score == e.hybrid_score));
}

#[test]
fn test_prompt_boost_after_combining() {
    let (catalog, ratings, tags) = create_test_setup();
    let tokenizer = PromptTokenizer::new();
    let pipeline = StagePipeline::new().add_stage(PromptBooster::new(&catalog, &tokenizer, DEFAULT_BETA));

    let plain = run(&catalog, &ratings, &tags, 1, 5, "", &pipeline);
    let boosted = run(&catalog, &ratings, &tags, 1, 5, "sci-fi with AI", &pipeline);

    for (before, after) in plain.iter().zip(&boosted) {
        assert_eq!(before.item_id, after.item_id);
        assert_eq!(before.hybrid_score, after.hybrid_score);
        assert!(after.boosted_score >= before.boosted_score);
    }

    // The Matrix carries both "sci-fi" and "ai"
    let matrix = boosted.iter().find(|e| e.item_id == 4).unwrap();
    assert_eq!(matrix.matched_tags, vec!["ai", "sci-fi"]);
}

#[test]
fn test_zero_signal_filter_in_pipeline() {
    let (catalog, ratings, tags) = create_test_setup();
    let pipeline = StagePipeline::new().add_stage(ZeroSignalFilter);

    // Parasite at 2 stars: no liked items, and only bianca shares Parasite
    let entries = run(&catalog, &ratings, &tags, 5, 2, "", &pipeline);

    let ids: Vec<ItemId> = entries.iter().map(|e| e.item_id).collect();
    assert_eq!(ids, vec![3]);
    assert!(entries[0].cb_score == 0.0 && entries[0].cf_score > 0.0);
}
