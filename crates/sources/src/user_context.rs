//! Per-request view of the active user.
//!
//! Gathered once from the rating view so the CF and CB passes don't query
//! the matrix for the same user over and over.

use data_loader::{ItemId, RatingSource, RatingValue, UserId, UserVector};

/// What the sources need to know about the user being scored
#[derive(Debug, Clone, Default)]
pub struct UserContext {
    pub user_id: UserId,
    /// Every rating the user has in this view (the seed included)
    pub ratings: UserVector,
}

impl UserContext {
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            ..Default::default()
        }
    }

    /// Has the user rated this item in the current view?
    pub fn has_rated(&self, item_id: ItemId) -> bool {
        self.ratings.contains_key(&item_id)
    }

    /// Items rated at or above `threshold`, in item id order
    pub fn liked_items(&self, threshold: RatingValue) -> Vec<(ItemId, RatingValue)> {
        self.ratings
            .iter()
            .filter(|&(_, &rating)| rating >= threshold)
            .map(|(&item, &rating)| (item, rating))
            .collect()
    }
}

/// Build a UserContext from any rating view.
///
/// Users with no ratings get an empty context rather than an error; the
/// sources turn that into zero scores.
pub fn build_user_context<R: RatingSource + ?Sized>(ratings: &R, user_id: UserId) -> UserContext {
    UserContext {
        user_id,
        ratings: ratings.ratings_for_user(user_id).into_owned(),
    }
}
