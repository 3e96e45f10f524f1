//! Community rating matrix and the per-request ephemeral overlay.
//!
//! The base `RatingMatrix` is built once and never mutated. A request adds
//! the active user's single rating through `RatingOverlay`, which borrows the
//! base and answers queries as if the extra entry were present. Concurrent
//! requests each hold their own overlay, so none can see another's rating.

use crate::catalog::Catalog;
use crate::error::{DataError, Result};
use crate::types::{
    ACTIVE_USER, ItemId, ItemRatings, MAX_RATING, MIN_RATING, RatingEntry, RatingValue, UserId,
    UserVector,
};
use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// Read access to a user-item rating matrix.
///
/// Implemented by the static base and by the ephemeral overlay, so scoring
/// code never needs to know which one it is reading.
pub trait RatingSource: Send + Sync {
    /// Sparse vector of one user's ratings (empty if unknown)
    fn ratings_for_user(&self, user_id: UserId) -> Cow<'_, UserVector>;

    /// All ratings received by one item (empty if unrated)
    fn ratings_for_item(&self, item_id: ItemId) -> Cow<'_, ItemRatings>;
}

/// Check a raw rating against the 1-5 scale
pub fn validate_rating(rating: RatingValue) -> Result<()> {
    if (MIN_RATING..=MAX_RATING).contains(&rating) {
        Ok(())
    } else {
        Err(DataError::InvalidValue {
            field: "rating".to_string(),
            value: rating.to_string(),
        })
    }
}

/// Static community ratings, indexed both by user and by item.
#[derive(Debug, Clone, Default)]
pub struct RatingMatrix {
    by_user: BTreeMap<UserId, UserVector>,
    by_item: HashMap<ItemId, ItemRatings>,
}

impl RatingMatrix {
    /// Build the matrix from community rows, validating every entry
    /// against the catalog.
    pub fn new(catalog: &Catalog, entries: Vec<RatingEntry>) -> Result<Self> {
        let mut matrix = Self::default();

        for entry in entries {
            if entry.user_id == ACTIVE_USER {
                return Err(DataError::ReservedUserId(entry.user_id));
            }
            if !catalog.contains(entry.item_id) {
                return Err(DataError::MissingReference {
                    entity: "Item".to_string(),
                    id: entry.item_id,
                });
            }
            validate_rating(entry.rating)?;

            let previous = matrix
                .by_user
                .entry(entry.user_id)
                .or_default()
                .insert(entry.item_id, entry.rating);
            if previous.is_some() {
                return Err(DataError::DuplicateRating {
                    user_id: entry.user_id,
                    item_id: entry.item_id,
                });
            }
            matrix
                .by_item
                .entry(entry.item_id)
                .or_default()
                .insert(entry.user_id, entry.rating);
        }

        debug!(
            "Rating matrix built: {} users, {} rated items, {} ratings",
            matrix.by_user.len(),
            matrix.by_item.len(),
            matrix.len()
        );
        Ok(matrix)
    }

    /// Total number of ratings
    pub fn len(&self) -> usize {
        self.by_user.values().map(|v| v.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_user.is_empty()
    }

    /// Layer one ephemeral rating over this matrix for a single request.
    ///
    /// The base is only borrowed; dropping the overlay leaves no trace.
    pub fn add_ephemeral_rating(
        &self,
        user_id: UserId,
        item_id: ItemId,
        rating: RatingValue,
    ) -> Result<RatingOverlay<'_>> {
        validate_rating(rating)?;
        Ok(RatingOverlay {
            base: self,
            entry: RatingEntry::new(user_id, item_id, rating),
        })
    }
}

impl RatingSource for RatingMatrix {
    fn ratings_for_user(&self, user_id: UserId) -> Cow<'_, UserVector> {
        match self.by_user.get(&user_id) {
            Some(vector) => Cow::Borrowed(vector),
            None => Cow::Owned(UserVector::new()),
        }
    }

    fn ratings_for_item(&self, item_id: ItemId) -> Cow<'_, ItemRatings> {
        match self.by_item.get(&item_id) {
            Some(ratings) => Cow::Borrowed(ratings),
            None => Cow::Owned(ItemRatings::new()),
        }
    }
}

/// Copy-on-write view: the static base plus exactly one extra rating.
#[derive(Debug, Clone, Copy)]
pub struct RatingOverlay<'a> {
    base: &'a RatingMatrix,
    entry: RatingEntry,
}

impl RatingSource for RatingOverlay<'_> {
    fn ratings_for_user(&self, user_id: UserId) -> Cow<'_, UserVector> {
        let base = self.base.ratings_for_user(user_id);
        if user_id != self.entry.user_id {
            return base;
        }
        let mut vector = base.into_owned();
        vector.insert(self.entry.item_id, self.entry.rating);
        Cow::Owned(vector)
    }

    fn ratings_for_item(&self, item_id: ItemId) -> Cow<'_, ItemRatings> {
        let base = self.base.ratings_for_item(item_id);
        if item_id != self.entry.item_id {
            return base;
        }
        let mut ratings = base.into_owned();
        ratings.insert(self.entry.user_id, self.entry.rating);
        Cow::Owned(ratings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ItemDefinition;

    fn create_test_catalog() -> Catalog {
        Catalog::from_definitions(
            (1..=3)
                .map(|id| ItemDefinition {
                    id,
                    title: format!("Item {}", id),
                    year: None,
                    genres: Vec::new(),
                    tags: Vec::new(),
                })
                .collect(),
        )
        .unwrap()
    }

    fn create_test_matrix(catalog: &Catalog) -> RatingMatrix {
        RatingMatrix::new(
            catalog,
            vec![
                RatingEntry::new(1, 1, 5),
                RatingEntry::new(1, 2, 3),
                RatingEntry::new(2, 2, 4),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_indices_by_user_and_item() {
        let catalog = create_test_catalog();
        let matrix = create_test_matrix(&catalog);

        assert_eq!(matrix.len(), 3);
        assert_eq!(matrix.ratings_for_user(2).len(), 1);
        assert_eq!(matrix.ratings_for_user(1).get(&2), Some(&3));
        assert_eq!(matrix.ratings_for_item(2).len(), 2);
        assert!(matrix.ratings_for_item(3).is_empty());
        assert!(matrix.ratings_for_user(42).is_empty());
    }

    #[test]
    fn test_rejects_unknown_item() {
        let catalog = create_test_catalog();
        let result = RatingMatrix::new(&catalog, vec![RatingEntry::new(1, 99, 4)]);
        assert!(matches!(result, Err(DataError::MissingReference { id: 99, .. })));
    }

    #[test]
    fn test_rejects_out_of_range_rating() {
        let catalog = create_test_catalog();
        for bad in [0, 6] {
            let result = RatingMatrix::new(&catalog, vec![RatingEntry::new(1, 1, bad)]);
            assert!(matches!(result, Err(DataError::InvalidValue { .. })));
        }
    }

    #[test]
    fn test_rejects_duplicate_and_reserved_user() {
        let catalog = create_test_catalog();

        let duplicate = RatingMatrix::new(
            &catalog,
            vec![RatingEntry::new(1, 1, 4), RatingEntry::new(1, 1, 2)],
        );
        assert!(matches!(duplicate, Err(DataError::DuplicateRating { .. })));

        let reserved = RatingMatrix::new(&catalog, vec![RatingEntry::new(ACTIVE_USER, 1, 4)]);
        assert!(matches!(reserved, Err(DataError::ReservedUserId(_))));
    }

    #[test]
    fn test_overlay_adds_exactly_one_entry() {
        let catalog = create_test_catalog();
        let matrix = create_test_matrix(&catalog);

        let overlay = matrix.add_ephemeral_rating(ACTIVE_USER, 3, 5).unwrap();

        assert_eq!(*overlay.ratings_for_user(ACTIVE_USER), UserVector::from([(3, 5)]));
        assert_eq!(overlay.ratings_for_item(3).get(&ACTIVE_USER), Some(&5));
        // Other users and items read straight through
        assert_eq!(overlay.ratings_for_user(1), matrix.ratings_for_user(1));
        assert_eq!(overlay.ratings_for_item(2), matrix.ratings_for_item(2));
    }

    #[test]
    fn test_overlay_leaves_base_untouched() {
        let catalog = create_test_catalog();
        let matrix = create_test_matrix(&catalog);

        {
            let first = matrix.add_ephemeral_rating(ACTIVE_USER, 1, 2).unwrap();
            let second = matrix.add_ephemeral_rating(ACTIVE_USER, 2, 5).unwrap();
            assert_eq!(first.ratings_for_user(ACTIVE_USER).get(&2), None);
            assert_eq!(second.ratings_for_user(ACTIVE_USER).get(&1), None);
        }

        assert!(matrix.ratings_for_user(ACTIVE_USER).is_empty());
        assert_eq!(matrix.len(), 3);
    }

    #[test]
    fn test_overlay_rejects_invalid_rating() {
        let catalog = create_test_catalog();
        let matrix = create_test_matrix(&catalog);
        assert!(matrix.add_ephemeral_rating(ACTIVE_USER, 1, 0).is_err());
    }
}
