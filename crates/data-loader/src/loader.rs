//! Loading a `Dataset` and turning it into validated base data.
//!
//! The JSON layout mirrors the serde derives on `Dataset`:
//!
//! ```json
//! {
//!   "items":   [{"id": 1, "title": "Inception", "year": 2010,
//!                "genres": ["Action", "Sci-Fi"], "tags": ["dream"]}],
//!   "ratings": [{"user_id": 1, "item_id": 1, "rating": 5}]
//! }
//! ```

use crate::catalog::Catalog;
use crate::error::Result;
use crate::ratings::RatingMatrix;
use crate::types::Dataset;
use std::fs;
use std::path::Path;
use tracing::info;

impl Dataset {
    /// Parse a dataset from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a dataset file
    pub fn load_json(path: &Path) -> Result<Self> {
        info!("Loading dataset from {:?}", path);
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Validate and index the dataset.
    ///
    /// Steps:
    /// 1. Normalize items and build the catalog (unique ids and titles)
    /// 2. Build the rating matrix (every rating references a catalog item)
    pub fn build(self) -> Result<(Catalog, RatingMatrix)> {
        let catalog = Catalog::from_definitions(self.items)?;
        let ratings = RatingMatrix::new(&catalog, self.ratings)?;

        info!(
            "Dataset ready: {} items, {} community ratings",
            catalog.len(),
            ratings.len()
        );
        Ok((catalog, ratings))
    }
}
