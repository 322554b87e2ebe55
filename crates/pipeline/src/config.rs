//! Build configuration.
//!
//! Defaults reproduce the fixed layout of a model build: both CSVs in the
//! working directory, artifacts under `model/`, a 5000-term vocabulary, the
//! top three cast members and directors from the crew list.

pub use data_loader::{DEFAULT_TOP_CAST, DIRECTOR_JOB};
use std::path::PathBuf;

/// Default item table file name
pub const DEFAULT_MOVIES_FILE: &str = "Movies 500.csv";

/// Default contributor table file name
pub const DEFAULT_CREDITS_FILE: &str = "Credits 500.csv";

/// Default artifact directory
pub const DEFAULT_OUTPUT_DIR: &str = "model";

/// Default vocabulary cap
pub const DEFAULT_MAX_FEATURES: usize = 5000;

/// Everything a model build needs to know.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildConfig {
    pub movies_path: PathBuf,
    pub credits_path: PathBuf,
    pub output_dir: PathBuf,
    /// Maximum number of vocabulary terms
    pub max_features: usize,
    /// Number of leading cast members kept per movie
    pub top_cast: usize,
    /// Crew job label treated as director (matched ignoring case)
    pub director_job: String,
}

impl BuildConfig {
    pub fn new() -> Self {
        Self {
            movies_path: PathBuf::from(DEFAULT_MOVIES_FILE),
            credits_path: PathBuf::from(DEFAULT_CREDITS_FILE),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            max_features: DEFAULT_MAX_FEATURES,
            top_cast: DEFAULT_TOP_CAST,
            director_job: DIRECTOR_JOB.to_string(),
        }
    }

    pub fn with_movies_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.movies_path = path.into();
        self
    }

    pub fn with_credits_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.credits_path = path.into();
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Configure the vocabulary cap (default: 5000)
    pub fn with_max_features(mut self, max_features: usize) -> Self {
        self.max_features = max_features;
        self
    }

    /// Configure how many cast members are kept (default: 3)
    pub fn with_top_cast(mut self, top_cast: usize) -> Self {
        self.top_cast = top_cast;
        self
    }

    pub fn with_director_job(mut self, job: impl Into<String>) -> Self {
        self.director_job = job.into();
        self
    }
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self::new()
    }
}
