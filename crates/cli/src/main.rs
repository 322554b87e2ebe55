use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use pipeline::config::{
    DEFAULT_CREDITS_FILE, DEFAULT_MAX_FEATURES, DEFAULT_MOVIES_FILE, DEFAULT_OUTPUT_DIR,
    DEFAULT_TOP_CAST, DIRECTOR_JOB,
};
use pipeline::{BuildConfig, BuildOutcome, ModelBuilder};
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

/// Build the content-based movie similarity model
#[derive(Parser)]
#[command(name = "build-model")]
#[command(about = "Build a content-based similarity model from movie and credits CSVs", long_about = None)]
struct Cli {
    /// Item table (movies) CSV
    #[arg(long, default_value = DEFAULT_MOVIES_FILE)]
    movies: PathBuf,

    /// Contributor table (credits) CSV
    #[arg(long, default_value = DEFAULT_CREDITS_FILE)]
    credits: PathBuf,

    /// Directory the model artifacts are written to
    #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,

    /// Maximum vocabulary size
    #[arg(long, default_value_t = DEFAULT_MAX_FEATURES)]
    max_features: usize,

    /// Number of leading cast members used per movie
    #[arg(long, default_value_t = DEFAULT_TOP_CAST)]
    top_cast: usize,

    /// Crew job label treated as director (case-insensitive)
    #[arg(long, default_value = DIRECTOR_JOB)]
    director_job: String,
}

impl Cli {
    fn into_config(self) -> BuildConfig {
        BuildConfig::new()
            .with_movies_path(self.movies)
            .with_credits_path(self.credits)
            .with_output_dir(self.output_dir)
            .with_max_features(self.max_features)
            .with_top_cast(self.top_cast)
            .with_director_job(self.director_job)
    }
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Cli::parse().into_config();

    let start = Instant::now();
    let outcome = ModelBuilder::new(config)
        .build()
        .context("Model build failed")?;

    match &outcome {
        BuildOutcome::MissingInputs { .. } => {
            println!("{}", outcome.message().yellow());
        }
        BuildOutcome::Built(summary) => {
            info!(
                items = summary.items,
                vocabulary = summary.vocabulary_size,
                "build finished"
            );
            println!(
                "{} {} ({} movies, {} terms, {:?})",
                "✓".green(),
                outcome.message(),
                summary.items,
                summary.vocabulary_size,
                start.elapsed()
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_build_config() {
        let cli = Cli::try_parse_from(["build-model"]).unwrap();
        assert_eq!(cli.into_config(), BuildConfig::default());
    }

    #[test]
    fn test_flags_reach_build_config() {
        let cli = Cli::try_parse_from([
            "build-model",
            "--movies",
            "m.csv",
            "--output-dir",
            "out",
            "--top-cast",
            "5",
            "--director-job",
            "Producer",
        ])
        .unwrap();
        let config = cli.into_config();
        assert_eq!(config.movies_path, PathBuf::from("m.csv"));
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(config.top_cast, 5);
        assert_eq!(config.director_job, "Producer");
        assert_eq!(config.credits_path, PathBuf::from(DEFAULT_CREDITS_FILE));
    }
}
