//! # Sources Crate
//!
//! The two score sources of the hybrid recommender and the similarity
//! measures they share.
//!
//! ## Components
//!
//! ### Similarity
//! - User-user cosine over co-rated items (`user_similarity`)
//! - Item-item cosine over tag vectors (`TagSpace`)
//! - `SimilarityEngine` bundles both for one request's rating view
//!
//! ### Collaborative filtering (`CfPredictor`)
//! "Users who rated like you rated this item N": similarity-weighted mean
//! of the top-K most similar raters of each candidate.
//!
//! ### Content-based (`CbProfiler`)
//! Profile = rating-weighted sum of liked items' tag vectors; each candidate
//! scores by cosine against it.
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::{Dataset, ACTIVE_USER};
//! use sources::{build_user_context, CbProfiler, CfPredictor, SimilarityEngine, TagSpace, TagWeighting};
//!
//! let (catalog, ratings) = Dataset::sample().build()?;
//! let tags = TagSpace::build(&catalog, TagWeighting::TfIdf);
//!
//! let overlay = ratings.add_ephemeral_rating(ACTIVE_USER, 1, 5)?;
//! let context = build_user_context(&overlay, ACTIVE_USER);
//! let engine = SimilarityEngine::new(&overlay, &tags);
//!
//! let candidates: Vec<_> = catalog.all().iter().map(|i| i.id).collect();
//! let cf = CfPredictor::new().predict(&engine, &context, &candidates);
//! let cb = CbProfiler::new().score(&tags, &context, &candidates);
//! ```

// Public modules
pub mod collaborative;
pub mod content;
pub mod similarity;
pub mod types;
pub mod user_context;

// Re-export commonly used types
pub use collaborative::{CfPredictor, DEFAULT_NEIGHBORS};
pub use content::{CbProfiler, DEFAULT_LIKED_THRESHOLD};
pub use similarity::{SimilarityEngine, TagSpace, TagWeighting, cosine, user_similarity};
pub use types::{ScoreEntry, Signal};
pub use user_context::{UserContext, build_user_context};
