//! Core domain types for the movie catalog.
//!
//! The item table and the contributor table are kept close to their CSV
//! shape: semi-structured columns (`genres`, `keywords`, `cast`, `crew`) stay
//! as raw strings here and are decoded later by [`crate::fields`].

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// =============================================================================
// Type Aliases
// =============================================================================

/// Catalog identifier of a movie (the `id` column of the item table)
pub type MovieId = u32;

// =============================================================================
// Raw Table Rows
// =============================================================================

/// One row of the item table.
///
/// `None` means the CSV cell was empty. Columns the pipeline does not read
/// are carried in `extra` so they survive into the persisted table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieRecord {
    pub id: MovieId,
    pub title: String,
    /// Free-text synopsis
    pub overview: Option<String>,
    /// Stringified list of `{name: ..}` records
    pub genres: Option<String>,
    /// Stringified list of `{name: ..}` records
    pub keywords: Option<String>,
    /// Every other column of the source row, keyed by header name
    pub extra: BTreeMap<String, String>,
}

impl MovieRecord {
    /// Create a record with only an id and title set
    pub fn new(id: MovieId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            overview: None,
            genres: None,
            keywords: None,
            extra: BTreeMap::new(),
        }
    }
}

/// One row of the contributor table, already keyed by the item's id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditRecord {
    pub movie_id: MovieId,
    /// Stringified list of cast records, each with a `name`
    pub cast: Option<String>,
    /// Stringified list of crew records, each with `name` and `job`
    pub crew: Option<String>,
}

/// An item row after the left join with the contributor table.
///
/// `cast` and `crew` are `None` when the contributor table had no row for
/// this item, exactly as if the cells had been empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieRow {
    pub movie: MovieRecord,
    pub cast: Option<String>,
    pub crew: Option<String>,
}

// =============================================================================
// MovieCatalog
// =============================================================================

/// The joined catalog, in item-table row order.
///
/// Row order is significant: downstream artifacts are indexed by position,
/// so nothing here ever re-sorts.
#[derive(Debug, Clone, Default)]
pub struct MovieCatalog {
    pub(crate) rows: Vec<MovieRow>,
}

impl MovieCatalog {
    /// Creates an empty catalog
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    /// All joined rows in source order
    pub fn rows(&self) -> &[MovieRow] {
        &self.rows
    }

    /// Get a row by its position in the item table
    pub fn get(&self, position: usize) -> Option<&MovieRow> {
        self.rows.get(position)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Consume the catalog, yielding its rows
    pub fn into_rows(self) -> Vec<MovieRow> {
        self.rows
    }
}
