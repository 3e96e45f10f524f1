//! Error types for the data-loader crate.
//!
//! Every way the raw catalog or community ratings can be malformed is a
//! variant here, so the engine can refuse a bad dataset at construction
//! time instead of producing odd scores later.

use crate::types::{ItemId, UserId};
use thiserror::Error;

/// Errors that can occur while loading, validating or querying the dataset
#[derive(Error, Debug)]
pub enum DataError {
    /// I/O error occurred while reading a dataset file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Dataset file is not valid JSON or has the wrong shape
    #[error("Malformed dataset: {0}")]
    Json(#[from] serde_json::Error),

    /// Two catalog items share the same id
    #[error("Duplicate item id {id}")]
    DuplicateItem { id: ItemId },

    /// Two catalog items normalize to the same title
    #[error("Duplicate title '{title}' (items {first} and {second})")]
    DuplicateTitle {
        title: String,
        first: ItemId,
        second: ItemId,
    },

    /// Referenced entity doesn't exist (e.g., rating for a non-existent item)
    #[error("Missing reference: {entity} with id {id}")]
    MissingReference { entity: String, id: u32 },

    /// A data field had an invalid value
    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    /// The same user rated the same item twice
    #[error("User {user_id} rated item {item_id} more than once")]
    DuplicateRating { user_id: UserId, item_id: ItemId },

    /// Community data used the id reserved for the active user
    #[error("User id {0} is reserved for the active user")]
    ReservedUserId(UserId),

    /// Title lookup found no catalog item
    #[error("No item titled '{title}'")]
    TitleNotFound { title: String },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataError>;
