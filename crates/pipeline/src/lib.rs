//! Content-based similarity model for a movie catalog.
//!
//! This crate provides:
//! - Tag construction from decoded catalog rows
//! - A bounded bag-of-words vectorizer
//! - All-pairs cosine similarity
//! - Persistence of the item table and the similarity matrix
//! - `ModelBuilder`, which runs the stages end to end
//!
//! ## Architecture
//! The build is a single linear pass:
//! 1. Joined rows are decoded and turned into tag strings
//! 2. Tag strings become count vectors over a shared vocabulary
//! 3. Count vectors become an N x N similarity matrix
//! 4. The table and matrix are written as two artifacts, both indexed by row
//!    position
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::{BuildConfig, BuildOutcome, ModelBuilder};
//!
//! let outcome = ModelBuilder::new(BuildConfig::default()).build()?;
//! println!("{}", outcome.message());
//! ```

pub mod config;
pub mod stopwords;
pub mod tags;
pub mod table;
pub mod vectorizer;
pub mod similarity;
pub mod persist;
pub mod model;

// Re-export main types
pub use config::BuildConfig;
pub use model::{BuildOutcome, BuildSummary, Model, ModelBuilder};
pub use persist::{ArtifactPaths, ModelStore};
pub use similarity::{SimilarityMatrix, cosine_similarity};
pub use table::{EnrichedMovie, ItemTable};
pub use tags::{TagFields, build_tags, clean_tokens};
pub use vectorizer::{CountVectorizer, FeatureMatrix, Vocabulary};
