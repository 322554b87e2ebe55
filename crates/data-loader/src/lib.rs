//! # Data Loader Crate
//!
//! Loads the movie item table and the contributor (credits) table, joins them
//! by movie id, and decodes the semi-structured list columns.
//!
//! ## Main Components
//!
//! - **types**: Raw and joined row types (MovieRecord, CreditRecord, MovieRow, MovieCatalog)
//! - **parser**: Parse the two CSV files into Rust structs
//! - **index**: Left-join contributor rows onto item rows
//! - **literal**: Parse Python/JSON literal cells into `serde_json::Value`
//! - **fields**: Best-effort name extraction (names, cast, role filter)
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::{MovieCatalog, fields};
//! use std::path::Path;
//!
//! let catalog = MovieCatalog::load_from_files(
//!     Path::new("Movies 500.csv"),
//!     Path::new("Credits 500.csv"),
//! )?;
//!
//! for row in catalog.rows() {
//!     let genres = fields::parse_names(row.movie.genres.as_deref());
//!     let directors = fields::get_directors(row.crew.as_deref(), fields::DIRECTOR_JOB);
//!     println!("{}: {:?} by {:?}", row.movie.title, genres, directors);
//! }
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod parser;
pub mod index;
pub mod literal;
pub mod fields;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, Result};
pub use fields::{DEFAULT_TOP_CAST, DIRECTOR_JOB, Decoded};
pub use types::{
    // Type aliases
    MovieId,
    // Core types
    CreditRecord,
    MovieCatalog,
    MovieRecord,
    MovieRow,
};
