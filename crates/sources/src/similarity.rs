//! Cosine similarity between users (rating vectors) and between items
//! (tag vectors).
//!
//! All "no signal" cases are defined as 0.0: an empty rating intersection,
//! a zero tag vector, an unknown item. Nothing here returns NaN.

use data_loader::{Catalog, ItemId, RatingSource, UserId, UserVector};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use tracing::debug;

/// Cosine similarity of two dense vectors of equal length.
///
/// Returns 0.0 if either vector is all zeros; the result is clamped to
/// [-1, 1] so rounding can't push it outside the range.
pub fn cosine(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len());

    let (dot, norm_a, norm_b) = a
        .iter()
        .zip(b)
        .fold((0.0f32, 0.0f32, 0.0f32), |(dot, na, nb), (&x, &y)| {
            (dot + x * y, na + x * x, nb + y * y)
        });

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    (dot / (norm_a.sqrt() * norm_b.sqrt())).clamp(-1.0, 1.0)
}

/// Cosine similarity of two users restricted to the items both rated.
///
/// Empty intersection means 0.0.
pub fn user_similarity(a: &UserVector, b: &UserVector) -> f32 {
    let (shared_a, shared_b): (Vec<f32>, Vec<f32>) = a
        .iter()
        .filter_map(|(item, &ra)| b.get(item).map(|&rb| (ra as f32, rb as f32)))
        .unzip();

    if shared_a.is_empty() {
        return 0.0;
    }
    cosine(&shared_a, &shared_b)
}

/// How each tag contributes to an item's vector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TagWeighting {
    /// 1.0 for every present tag
    Binary,
    /// Smoothed inverse document frequency: rare tags weigh more
    #[default]
    TfIdf,
}

/// Item tag vectors over the fixed global vocabulary.
///
/// The vocabulary is the sorted union of every item's tags and never
/// changes after construction.
#[derive(Debug, Clone)]
pub struct TagSpace {
    vocabulary: Vec<String>,
    vectors: HashMap<ItemId, Vec<f32>>,
    weighting: TagWeighting,
}

impl TagSpace {
    pub fn build(catalog: &Catalog, weighting: TagWeighting) -> Self {
        let vocabulary: Vec<String> = catalog
            .all()
            .iter()
            .flat_map(|item| item.tags.iter().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let index: HashMap<&str, usize> = vocabulary
            .iter()
            .enumerate()
            .map(|(i, tag)| (tag.as_str(), i))
            .collect();

        // Document frequency per tag (tags are a set, so each item counts once)
        let mut df = vec![0u32; vocabulary.len()];
        for item in catalog.all() {
            for tag in &item.tags {
                df[index[tag.as_str()]] += 1;
            }
        }

        let n = catalog.len() as f32;
        let weights: Vec<f32> = df
            .iter()
            .map(|&d| match weighting {
                TagWeighting::Binary => 1.0,
                TagWeighting::TfIdf => ((n + 1.0) / (d as f32 + 1.0)).ln() + 1.0,
            })
            .collect();

        let vectors = catalog
            .all()
            .iter()
            .map(|item| {
                let mut vector = vec![0.0; vocabulary.len()];
                for tag in &item.tags {
                    let i = index[tag.as_str()];
                    vector[i] = weights[i];
                }
                (item.id, vector)
            })
            .collect();

        debug!(
            "Built {:?} tag space: {} tags, {} items",
            weighting,
            vocabulary.len(),
            catalog.len()
        );

        Self {
            vocabulary,
            vectors,
            weighting,
        }
    }

    /// Sorted global tag vocabulary
    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    pub fn dimension(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn weighting(&self) -> TagWeighting {
        self.weighting
    }

    /// Tag vector of an item, `None` for unknown ids
    pub fn vector(&self, item_id: ItemId) -> Option<&[f32]> {
        self.vectors.get(&item_id).map(Vec::as_slice)
    }

    /// Cosine similarity of two items' tag vectors (0.0 for unknown items)
    pub fn item_similarity(&self, a: ItemId, b: ItemId) -> f32 {
        match (self.vector(a), self.vector(b)) {
            (Some(va), Some(vb)) => cosine(va, vb),
            _ => 0.0,
        }
    }
}

/// Similarity queries against one request's rating view and the tag space.
pub struct SimilarityEngine<'a, R: RatingSource + ?Sized> {
    ratings: &'a R,
    tags: &'a TagSpace,
}

impl<'a, R: RatingSource + ?Sized> SimilarityEngine<'a, R> {
    pub fn new(ratings: &'a R, tags: &'a TagSpace) -> Self {
        Self { ratings, tags }
    }

    /// The rating view this engine reads
    pub fn ratings(&self) -> &'a R {
        self.ratings
    }

    pub fn tags(&self) -> &'a TagSpace {
        self.tags
    }

    /// User-user cosine over co-rated items
    pub fn user_similarity(&self, a: UserId, b: UserId) -> f32 {
        user_similarity(&self.ratings.ratings_for_user(a), &self.ratings.ratings_for_user(b))
    }

    /// Item-item cosine over the full tag vocabulary
    pub fn item_tag_similarity(&self, a: ItemId, b: ItemId) -> f32 {
        self.tags.item_similarity(a, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::{Dataset, ItemDefinition, RatingEntry};

    fn create_test_dataset() -> Dataset {
        let item = |id, title: &str, tags: &[&str]| ItemDefinition {
            id,
            title: title.to_string(),
            year: None,
            genres: Vec::new(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
        };
        Dataset {
            items: vec![
                item(1, "Inception", &["sci-fi", "thriller"]),
                item(2, "Titanic", &["romance", "drama"]),
                item(3, "Matrix", &["sci-fi", "action"]),
                item(4, "Untagged", &[]),
            ],
            ratings: vec![
                RatingEntry::new(1, 1, 5),
                RatingEntry::new(1, 2, 1),
                RatingEntry::new(2, 1, 5),
                RatingEntry::new(2, 2, 1),
                RatingEntry::new(3, 3, 4),
            ],
        }
    }

    #[test]
    fn test_cosine_self_and_zero() {
        let v = [1.0, 2.0, 3.0];
        assert!((cosine(&v, &v) - 1.0).abs() < 1e-6);
        assert_eq!(cosine(&v, &[0.0, 0.0, 0.0]), 0.0);
        assert_eq!(cosine(&[0.0, 0.0], &[0.0, 0.0]), 0.0);
        assert!((cosine(&[1.0, 0.0], &[-1.0, 0.0]) + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_user_similarity_uses_intersection_only() {
        let a = UserVector::from([(1, 5), (2, 3)]);
        let b = UserVector::from([(1, 5), (9, 1)]);
        // Only item 1 is shared: [5] vs [5]
        assert!((user_similarity(&a, &b) - 1.0).abs() < 1e-6);

        let c = UserVector::from([(7, 4)]);
        assert_eq!(user_similarity(&a, &c), 0.0);
        assert_eq!(user_similarity(&a, &UserVector::new()), 0.0);
    }

    #[test]
    fn test_user_similarity_is_in_range() {
        let a = UserVector::from([(1, 5), (2, 1), (3, 2)]);
        let b = UserVector::from([(1, 1), (2, 5), (3, 4)]);
        let sim = user_similarity(&a, &b);
        assert!(sim > 0.0 && sim < 1.0);
    }

    #[test]
    fn test_tag_space_vocabulary_and_vectors() {
        let (catalog, _) = create_test_dataset().build().unwrap();
        let space = TagSpace::build(&catalog, TagWeighting::Binary);

        assert_eq!(
            space.vocabulary(),
            &["action", "drama", "romance", "sci-fi", "thriller"]
        );
        assert_eq!(space.vector(3).unwrap(), &[1.0, 0.0, 0.0, 1.0, 0.0]);
        assert!(space.vector(99).is_none());
    }

    #[test]
    fn test_item_similarity() {
        let (catalog, _) = create_test_dataset().build().unwrap();

        for weighting in [TagWeighting::Binary, TagWeighting::TfIdf] {
            let space = TagSpace::build(&catalog, weighting);

            assert!((space.item_similarity(1, 1) - 1.0).abs() < 1e-6);
            assert!(space.item_similarity(1, 3) > 0.0);
            assert_eq!(space.item_similarity(1, 2), 0.0);
            // Zero vector never divides by zero
            assert_eq!(space.item_similarity(1, 4), 0.0);
            assert_eq!(space.item_similarity(4, 4), 0.0);
        }
    }

    #[test]
    fn test_tfidf_weights_rare_tags_higher() {
        let (catalog, _) = create_test_dataset().build().unwrap();
        let space = TagSpace::build(&catalog, TagWeighting::TfIdf);

        // "sci-fi" appears twice, "action" once
        let vector = space.vector(3).unwrap();
        assert!(vector[0] > vector[3]);
    }

    #[test]
    fn test_similarity_engine_over_ratings() {
        let (catalog, ratings) = create_test_dataset().build().unwrap();
        let space = TagSpace::build(&catalog, TagWeighting::Binary);
        let engine = SimilarityEngine::new(&ratings, &space);

        assert!((engine.user_similarity(1, 2) - 1.0).abs() < 1e-6);
        assert_eq!(engine.user_similarity(1, 3), 0.0);
        assert_eq!(engine.user_similarity(1, 42), 0.0);
        assert!(engine.item_tag_similarity(1, 3) > 0.0);
    }
}
