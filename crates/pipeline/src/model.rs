//! # Model Builder
//!
//! Runs the whole build as one forward pass:
//! 1. Check that both input files exist (otherwise stop, writing nothing)
//! 2. Load and join the item and contributor tables
//! 3. Decode list columns and build tag strings
//! 4. Vectorize the tags
//! 5. Compute the similarity matrix
//! 6. Persist the item table and the matrix

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use data_loader::{MovieCatalog, MovieRow};
use tracing::{info, instrument, warn};

use crate::config::BuildConfig;
use crate::persist::{ArtifactPaths, ModelStore};
use crate::similarity::{SimilarityMatrix, cosine_similarity};
use crate::table::ItemTable;
use crate::vectorizer::{CountVectorizer, FeatureMatrix, Vocabulary};

/// An in-memory model, before persistence
#[derive(Debug, Clone)]
pub struct Model {
    pub table: ItemTable,
    pub vocabulary: Vocabulary,
    pub features: FeatureMatrix,
    pub similarity: SimilarityMatrix,
}

impl Model {
    /// Build everything downstream of the joined catalog rows.
    pub fn from_rows(rows: Vec<MovieRow>, config: &BuildConfig) -> Self {
        let table = ItemTable::enrich(rows, config);
        info!("Built tags for {} movies", table.len());

        let vectorizer = CountVectorizer::new(config.max_features);
        let (vocabulary, features) = vectorizer.fit_transform(&table.tags());
        info!("Vectorized with {} vocabulary terms", vocabulary.len());

        let similarity = cosine_similarity(&features);
        info!("Computed {}x{} similarity matrix", similarity.n(), similarity.n());

        Self {
            table,
            vocabulary,
            features,
            similarity,
        }
    }
}

/// Summary of a completed build
#[derive(Debug, Clone, PartialEq)]
pub struct BuildSummary {
    pub items: usize,
    pub vocabulary_size: usize,
    pub paths: ArtifactPaths,
}

/// How a build ended
#[derive(Debug, Clone, PartialEq)]
pub enum BuildOutcome {
    /// One or both inputs were absent; nothing was read or written
    MissingInputs { movies: PathBuf, credits: PathBuf },
    Built(BuildSummary),
}

impl BuildOutcome {
    /// Human-readable message for the end of a run
    pub fn message(&self) -> String {
        match self {
            BuildOutcome::MissingInputs { movies, credits } => format!(
                "Required CSV files not found. Place \"{}\" and \"{}\" here.",
                movies.display(),
                credits.display()
            ),
            BuildOutcome::Built(summary) => format!(
                "Built model files: {} and {}",
                summary.paths.movie_list.display(),
                summary.paths.similarity.display()
            ),
        }
    }
}

/// Drives a build from files to artifacts
pub struct ModelBuilder {
    config: BuildConfig,
}

impl ModelBuilder {
    pub fn new(config: BuildConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    /// Run the build.
    ///
    /// Missing inputs are reported through [`BuildOutcome::MissingInputs`],
    /// not as an error. Errors are reserved for unreadable tables and
    /// failed writes.
    #[instrument(skip(self), fields(movies = ?self.config.movies_path, credits = ?self.config.credits_path))]
    pub fn build(&self) -> Result<BuildOutcome> {
        let config = &self.config;
        if !(config.movies_path.is_file() && config.credits_path.is_file()) {
            warn!("input files missing, nothing to build");
            return Ok(BuildOutcome::MissingInputs {
                movies: config.movies_path.clone(),
                credits: config.credits_path.clone(),
            });
        }

        let start = Instant::now();
        let catalog = MovieCatalog::load_from_files(&config.movies_path, &config.credits_path)
            .context("Failed to load movie catalog")?;

        let model = Model::from_rows(catalog.into_rows(), config);

        let paths = ModelStore::new(&config.output_dir)
            .save(&model.table, &model.similarity)
            .context("Failed to persist model")?;

        info!("Model built in {:?}", start.elapsed());
        Ok(BuildOutcome::Built(BuildSummary {
            items: model.table.len(),
            vocabulary_size: model.vocabulary.len(),
            paths,
        }))
    }
}
