//! Example: CF and CB scores for one seed rating
//!
//! Run with: cargo run --package sources --example score_sources
//!
//! This example shows how to:
//! 1. Build the sample catalog and rating matrix
//! 2. Layer one ephemeral rating over the community data
//! 3. Compute collaborative and content scores for every other item

use data_loader::{ACTIVE_USER, Dataset};
use sources::{CbProfiler, CfPredictor, SimilarityEngine, TagSpace, TagWeighting, build_user_context};

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter("debug")
        .init();

    let (catalog, ratings) = Dataset::sample().build()?;
    let tags = TagSpace::build(&catalog, TagWeighting::TfIdf);
    println!("Tag vocabulary ({}): {}\n", tags.dimension(), tags.vocabulary().join(", "));

    let seed = catalog.lookup_by_title("Inception")?;
    let overlay = ratings.add_ephemeral_rating(ACTIVE_USER, seed.id, 5)?;
    let context = build_user_context(&overlay, ACTIVE_USER);
    let engine = SimilarityEngine::new(&overlay, &tags);

    let candidates: Vec<_> = catalog.all().iter().map(|item| item.id).collect();
    let cf = CfPredictor::new().predict(&engine, &context, &candidates);
    let cb = CbProfiler::new().score(&tags, &context, &candidates);

    println!("Seed: {} rated 5", seed.title);
    for item in catalog.all() {
        if item.id == seed.id {
            continue;
        }
        println!(
            "  {:<20} cf {:.3}  cb {:.3}  tag-sim {:.3}",
            item.title,
            cf.get(&item.id).copied().unwrap_or_default(),
            cb.get(&item.id).copied().unwrap_or_default(),
            engine.item_tag_similarity(seed.id, item.id)
        );
    }

    Ok(())
}
