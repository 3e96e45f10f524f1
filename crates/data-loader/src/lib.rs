//! # Data Loader Crate
//!
//! This crate owns the immutable base data of the recommender: the item
//! catalog and the community rating matrix.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (Item, RatingEntry, Dataset, id aliases)
//! - **catalog**: Item registry with exact normalized title lookup
//! - **ratings**: RatingMatrix and the per-request RatingOverlay
//! - **loader**: JSON loading and validation into Catalog + RatingMatrix
//! - **sample**: Built-in five-film dataset
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::{Dataset, RatingSource, ACTIVE_USER};
//!
//! let (catalog, ratings) = Dataset::sample().build()?;
//! let inception = catalog.lookup_by_title("inception")?;
//!
//! // One request's view: the base plus a single ephemeral rating
//! let overlay = ratings.add_ephemeral_rating(ACTIVE_USER, inception.id, 5)?;
//! assert_eq!(overlay.ratings_for_user(ACTIVE_USER).len(), 1);
//! ```

// Public modules
pub mod catalog;
pub mod error;
pub mod loader;
pub mod ratings;
pub mod sample;
pub mod types;

// Re-export commonly used types for convenience
pub use catalog::Catalog;
pub use error::{DataError, Result};
pub use ratings::{RatingMatrix, RatingOverlay, RatingSource, validate_rating};
pub use types::{
    // Type aliases
    ItemId,
    ItemRatings,
    RatingValue,
    UserId,
    UserVector,
    // Constants
    ACTIVE_USER,
    MAX_RATING,
    MIN_RATING,
    // Core types
    Dataset,
    Item,
    ItemDefinition,
    RatingEntry,
    // Helpers
    normalize_tag,
    normalize_title,
};
