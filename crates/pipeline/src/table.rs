//! The enriched item table.
//!
//! Each joined catalog row is decoded and given its tag string. Row `i` of
//! the table is row `i` of the similarity matrix; nothing after enrichment
//! may reorder rows.

use crate::config::BuildConfig;
use crate::tags::{TagFields, build_tags};
use data_loader::fields::{get_cast, get_directors, parse_names};
use data_loader::{MovieId, MovieRow};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One catalog row plus its derived columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedMovie {
    /// Same value as `source.movie.id`, kept as a top-level column for lookups
    pub movie_id: MovieId,
    pub title: String,
    /// The joined source row, unchanged
    pub source: MovieRow,
    pub genres_parsed: Vec<String>,
    pub keywords_parsed: Vec<String>,
    pub cast_parsed: Vec<String>,
    pub director_parsed: Vec<String>,
    pub tags: String,
}

impl EnrichedMovie {
    /// Decode a joined row and build its tags. Never fails: undecodable
    /// fields come out empty.
    pub fn from_row(source: MovieRow, config: &BuildConfig) -> Self {
        let genres_parsed = parse_names(source.movie.genres.as_deref());
        let keywords_parsed = parse_names(source.movie.keywords.as_deref());
        let cast_parsed = get_cast(source.cast.as_deref(), config.top_cast);
        let director_parsed = get_directors(source.crew.as_deref(), &config.director_job);

        let tags = build_tags(&TagFields {
            overview: source.movie.overview.as_deref(),
            genres: &genres_parsed,
            keywords: &keywords_parsed,
            cast: &cast_parsed,
            directors: &director_parsed,
        });

        Self {
            movie_id: source.movie.id,
            title: source.movie.title.clone(),
            source,
            genres_parsed,
            keywords_parsed,
            cast_parsed,
            director_parsed,
            tags,
        }
    }
}

/// Enriched rows in catalog order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemTable {
    rows: Vec<EnrichedMovie>,
}

impl ItemTable {
    /// Enrich every row. Rows are independent and processed in parallel;
    /// output order matches input order.
    pub fn enrich(rows: Vec<MovieRow>, config: &BuildConfig) -> Self {
        let rows = rows
            .into_par_iter()
            .map(|row| EnrichedMovie::from_row(row, config))
            .collect();
        Self { rows }
    }

    pub fn rows(&self) -> &[EnrichedMovie] {
        &self.rows
    }

    /// Row at a similarity-matrix position
    pub fn get(&self, position: usize) -> Option<&EnrichedMovie> {
        self.rows.get(position)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Tag strings in row order, the vectorizer's input
    pub fn tags(&self) -> Vec<&str> {
        self.rows.iter().map(|row| row.tags.as_str()).collect()
    }

    /// Row position of a catalog id
    pub fn position_of(&self, movie_id: MovieId) -> Option<usize> {
        self.rows.iter().position(|row| row.movie_id == movie_id)
    }

    /// Full id -> row position map, for consumers doing many lookups
    pub fn position_index(&self) -> HashMap<MovieId, usize> {
        self.rows
            .iter()
            .enumerate()
            .map(|(i, row)| (row.movie_id, i))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::MovieRecord;

    fn row(id: MovieId, overview: Option<&str>, cast: Option<&str>, crew: Option<&str>) -> MovieRow {
        let mut movie = MovieRecord::new(id, format!("Movie {}", id));
        movie.overview = overview.map(str::to_string);
        movie.genres = Some("[{'id': 28, 'name': 'Action'}, {'id': 878, 'name': 'Science Fiction'}]".to_string());
        movie.keywords = Some("[{'id': 1, 'name': 'space war'}]".to_string());
        MovieRow {
            movie,
            cast: cast.map(str::to_string),
            crew: crew.map(str::to_string),
        }
    }

    #[test]
    fn test_enriched_row() {
        let source = row(
            19995,
            Some("In the 22nd century"),
            Some("[{'name': 'Sam Worthington'}, {'name': 'Zoe Saldana'}, {'name': 'Sigourney Weaver'}, {'name': 'Stephen Lang'}]"),
            Some("[{'job': 'Director', 'name': 'James Cameron'}, {'job': 'Editor', 'name': 'John Refoua'}]"),
        );
        let enriched = EnrichedMovie::from_row(source, &BuildConfig::default());

        assert_eq!(enriched.movie_id, 19995);
        assert_eq!(enriched.genres_parsed, vec!["Action", "Science Fiction"]);
        assert_eq!(enriched.cast_parsed.len(), 3);
        assert_eq!(enriched.director_parsed, vec!["James Cameron"]);
        assert_eq!(
            enriched.tags,
            "In the 22nd century action sciencefiction spacewar samworthington zoesaldana sigourneyweaver jamescameron"
        );
    }

    #[test]
    fn test_missing_credits_give_empty_lists() {
        let enriched = EnrichedMovie::from_row(row(1, None, None, Some("garbage")), &BuildConfig::default());
        assert!(enriched.cast_parsed.is_empty());
        assert!(enriched.director_parsed.is_empty());
        assert_eq!(enriched.tags, "action sciencefiction spacewar");
    }

    #[test]
    fn test_enrich_preserves_order_and_positions() {
        let rows = (0..64).rev().map(|id| row(id, None, None, None)).collect();
        let table = ItemTable::enrich(rows, &BuildConfig::default());

        assert_eq!(table.len(), 64);
        assert_eq!(table.get(0).unwrap().movie_id, 63);
        assert_eq!(table.position_of(0), Some(63));
        assert_eq!(table.position_of(1000), None);
        assert_eq!(table.position_index().get(&10), Some(&53));
    }
}
