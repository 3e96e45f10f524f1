//! Core domain types for the recommendation dataset.
//!
//! Raw definitions (`ItemDefinition`, `RatingEntry`, `Dataset`) are what the
//! caller hands over; `Item` is the normalized, immutable form the catalog
//! keeps for the lifetime of the process.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

// =============================================================================
// Type Aliases
// =============================================================================

/// Unique identifier for a community user
pub type UserId = u32;

/// Unique identifier for a catalog item
pub type ItemId = u32;

/// Rating on the 1-5 scale
pub type RatingValue = u8;

/// Sparse ratings of one user, keyed by item (only rated items present)
pub type UserVector = BTreeMap<ItemId, RatingValue>;

/// Sparse ratings of one item, keyed by user
pub type ItemRatings = BTreeMap<UserId, RatingValue>;

/// Id reserved for the requesting user's ephemeral rating.
///
/// Community data may not use it, so the overlay can never shadow a real user.
pub const ACTIVE_USER: UserId = 0;

/// Lowest valid rating
pub const MIN_RATING: RatingValue = 1;

/// Highest valid rating
pub const MAX_RATING: RatingValue = 5;

// =============================================================================
// Items
// =============================================================================

/// Raw catalog entry as supplied by the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemDefinition {
    pub id: ItemId,
    pub title: String,
    #[serde(default)]
    pub year: Option<u16>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// A catalog item after normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    /// Display title, as supplied
    pub title: String,
    pub year: Option<u16>,
    /// Display genres, as supplied
    pub genres: Vec<String>,
    /// Lowercased union of genres and free tags; the content features
    pub tags: BTreeSet<String>,
}

impl From<ItemDefinition> for Item {
    fn from(def: ItemDefinition) -> Self {
        let tags = def
            .genres
            .iter()
            .chain(def.tags.iter())
            .map(|t| normalize_tag(t))
            .filter(|t| !t.is_empty())
            .collect();

        Self {
            id: def.id,
            title: def.title.trim().to_string(),
            year: def.year,
            genres: def.genres,
            tags,
        }
    }
}

// =============================================================================
// Ratings
// =============================================================================

/// A single community rating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingEntry {
    pub user_id: UserId,
    pub item_id: ItemId,
    pub rating: RatingValue,
}

impl RatingEntry {
    pub fn new(user_id: UserId, item_id: ItemId, rating: RatingValue) -> Self {
        Self {
            user_id,
            item_id,
            rating,
        }
    }
}

// =============================================================================
// Dataset
// =============================================================================

/// The raw catalog plus the community rating rows.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    pub items: Vec<ItemDefinition>,
    #[serde(default)]
    pub ratings: Vec<RatingEntry>,
}

// =============================================================================
// Normalization
// =============================================================================

/// Lookup key for a title: trimmed, lowercased, inner whitespace collapsed.
pub fn normalize_title(title: &str) -> String {
    title
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Canonical form of a tag or genre.
pub fn normalize_tag(tag: &str) -> String {
    normalize_title(tag)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_title() {
        assert_eq!(normalize_title("  The   Dark Knight "), "the dark knight");
        assert_eq!(normalize_title("INCEPTION"), "inception");
        assert_eq!(normalize_title("   "), "");
    }

    #[test]
    fn test_item_from_definition_merges_genres_and_tags() {
        let item = Item::from(ItemDefinition {
            id: 4,
            title: " The Matrix ".to_string(),
            year: Some(1999),
            genres: vec!["Action".to_string(), "Sci-Fi".to_string()],
            tags: vec!["Kung  Fu".to_string(), "AI".to_string(), " ".to_string()],
        });

        assert_eq!(item.title, "The Matrix");
        assert_eq!(item.genres, vec!["Action", "Sci-Fi"]);
        let tags: Vec<&str> = item.tags.iter().map(String::as_str).collect();
        assert_eq!(tags, vec!["action", "ai", "kung fu", "sci-fi"]);
    }

    #[test]
    fn test_dataset_deserialize_defaults() {
        let json = r#"{"items": [{"id": 1, "title": "Solo"}]}"#;
        let dataset: Dataset = serde_json::from_str(json).unwrap();

        assert_eq!(dataset.items.len(), 1);
        assert!(dataset.items[0].genres.is_empty());
        assert!(dataset.ratings.is_empty());
    }
}
