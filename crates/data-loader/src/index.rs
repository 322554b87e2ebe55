//! Building the joined catalog.
//!
//! The item table drives the join: every item row appears exactly once, in
//! file order, and picks up the contributor row with the same id if there is
//! one (a left join).

use crate::error::{DataLoadError, Result};
use crate::parser;
use crate::types::*;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use tracing::{debug, info, warn};

impl MovieCatalog {
    /// Load and join both tables.
    ///
    /// The two files are parsed in parallel with `rayon::join`.
    pub fn load_from_files(movies_path: &Path, credits_path: &Path) -> Result<Self> {
        info!(
            "Loading catalog from {:?} and {:?}",
            movies_path, credits_path
        );

        let (movies, credits) = rayon::join(
            || parser::parse_movies(movies_path),
            || parser::parse_credits(credits_path),
        );
        let movies = movies?;
        let credits = credits?;

        info!(
            "Loaded {} movies, {} credit rows",
            movies.len(),
            credits.len()
        );

        let file = movies_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| movies_path.display().to_string());
        Self::from_records(movies, credits).map_err(|e| match e {
            DataLoadError::DuplicateId { id, .. } => DataLoadError::DuplicateId { file, id },
            other => other,
        })
    }

    /// Join already-parsed tables.
    ///
    /// Items without a contributor row get `None` cast and crew. When the
    /// contributor table repeats an id, the first row is used.
    pub fn from_records(movies: Vec<MovieRecord>, credits: Vec<CreditRecord>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(movies.len());
        for movie in &movies {
            if !seen.insert(movie.id) {
                return Err(DataLoadError::DuplicateId {
                    file: "item table".to_string(),
                    id: movie.id,
                });
            }
        }

        let mut by_id: HashMap<MovieId, CreditRecord> = HashMap::with_capacity(credits.len());
        for credit in credits {
            if by_id.contains_key(&credit.movie_id) {
                warn!(movie_id = credit.movie_id, "duplicate credit row ignored");
                continue;
            }
            by_id.insert(credit.movie_id, credit);
        }

        let mut unmatched = 0usize;
        let rows: Vec<MovieRow> = movies
            .into_iter()
            .map(|movie| {
                let credit = by_id.remove(&movie.id);
                if credit.is_none() {
                    unmatched += 1;
                }
                let (cast, crew) = credit.map(|c| (c.cast, c.crew)).unwrap_or((None, None));
                MovieRow { movie, cast, crew }
            })
            .collect();

        debug!(
            rows = rows.len(),
            without_credits = unmatched,
            orphan_credits = by_id.len(),
            "joined item and contributor tables"
        );

        Ok(Self { rows })
    }
}
