//! Errors surfaced by the recommendation engine.
//!
//! Only bad input is an error. Sparse data ("no similar users", "no liked
//! items", "no prompt") degrades to zero scores and never reaches here.

use data_loader::DataError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    /// The submitted title matches no catalog item
    #[error("Movie '{title}' not found in the catalog")]
    NotFound { title: String },

    /// The submitted rating is outside 1-5
    #[error("Rating {rating} is outside the 1-5 scale")]
    InvalidRating { rating: i64 },

    /// A configuration value is out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The dataset failed validation
    #[error(transparent)]
    Data(#[from] DataError),

    /// A pipeline stage failed
    #[error(transparent)]
    Pipeline(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;
