//! Integration tests for the model build.
//!
//! These tests write small CSV tables into a temporary directory and run
//! `ModelBuilder` over them end to end.

use pipeline::{BuildConfig, BuildOutcome, ModelBuilder, ModelStore};
use std::fs;
use std::path::Path;

const MOVIES_CSV: &str = "\
budget,genres,id,keywords,overview,title
237000000,\"[{'id': 28, 'name': 'Action'}, {'id': 878, 'name': 'Science Fiction'}]\",19995,\"[{'id': 1463, 'name': 'culture clash'}]\",A paraplegic marine dispatched to the moon Pandora.,Avatar
300000000,\"[{'id': 12, 'name': 'Adventure'}, {'id': 28, 'name': 'Action'}]\",285,\"[{'id': 270, 'name': 'ocean'}]\",Captain Barbossa returns from the dead.,Pirates of the Caribbean
245000000,\"[{'id': 28, 'name': 'Action'}]\",206647,not a list,A cryptic message from the past.,Spectre
";

const CREDITS_CSV: &str = "\
movie_id,title,cast,crew
19995,Avatar,\"[{'name': 'Sam Worthington'}, {'name': 'Zoe Saldana'}, {'name': 'Sigourney Weaver'}, {'name': 'Stephen Lang'}]\",\"[{'job': 'Director', 'name': 'James Cameron'}]\"
285,Pirates of the Caribbean,\"[{'name': 'Johnny Depp'}]\",\"[{'job': 'director', 'name': 'Gore Verbinski'}, {'job': 'Producer', 'name': 'Jerry Bruckheimer'}]\"
";

fn config_in(dir: &Path) -> BuildConfig {
    BuildConfig::new()
        .with_movies_path(dir.join("Movies 500.csv"))
        .with_credits_path(dir.join("Credits 500.csv"))
        .with_output_dir(dir.join("model"))
}

fn write_inputs(dir: &Path) {
    fs::write(dir.join("Movies 500.csv"), MOVIES_CSV).unwrap();
    fs::write(dir.join("Credits 500.csv"), CREDITS_CSV).unwrap();
}

#[test]
fn test_full_build_with_missing_contributor_row() {
    let dir = tempfile::tempdir().unwrap();
    write_inputs(dir.path());
    let config = config_in(dir.path());

    let outcome = ModelBuilder::new(config.clone()).build().unwrap();
    let summary = match outcome {
        BuildOutcome::Built(summary) => summary,
        other => panic!("expected a built model, got {:?}", other),
    };
    assert_eq!(summary.items, 3);
    assert!(summary.vocabulary_size > 0);

    let store = ModelStore::new(&config.output_dir);
    let table = store.load_item_table().unwrap();
    let sim = store.load_similarity().unwrap();

    assert_eq!(table.len(), 3);
    assert_eq!(sim.n(), 3);
    assert!(sim.is_symmetric());

    // Row order follows the item table
    let ids: Vec<_> = table.rows().iter().map(|r| r.movie_id).collect();
    assert_eq!(ids, vec![19995, 285, 206647]);

    let avatar = table.get(0).unwrap();
    assert_eq!(avatar.cast_parsed, vec!["Sam Worthington", "Zoe Saldana", "Sigourney Weaver"]);
    assert_eq!(avatar.director_parsed, vec!["James Cameron"]);
    assert!(avatar.tags.ends_with("samworthington zoesaldana sigourneyweaver jamescameron"));
    assert_eq!(avatar.source.movie.extra.get("budget").map(String::as_str), Some("237000000"));

    let pirates = table.get(1).unwrap();
    assert_eq!(pirates.director_parsed, vec!["Gore Verbinski"]);

    // Spectre has no credits row and an undecodable keywords cell
    let spectre = table.get(2).unwrap();
    assert!(spectre.cast_parsed.is_empty());
    assert!(spectre.director_parsed.is_empty());
    assert!(spectre.keywords_parsed.is_empty());
    assert_eq!(spectre.tags, "A cryptic message from the past. action");

    for i in 0..3 {
        assert_eq!(sim.get(i, i), 1.0);
    }
    // All three share the "action" genre token
    assert!(sim.get(0, 2) > 0.0);
    assert_eq!(table.position_of(206647), Some(2));
}

#[test]
fn test_missing_files_produce_no_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());

    let outcome = ModelBuilder::new(config.clone()).build().unwrap();
    assert!(matches!(outcome, BuildOutcome::MissingInputs { .. }));
    assert!(outcome.message().contains("Movies 500.csv"));
    assert!(outcome.message().contains("Credits 500.csv"));
    assert!(!config.output_dir.exists());
}

#[test]
fn test_one_missing_file_halts() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("Movies 500.csv"), MOVIES_CSV).unwrap();
    let config = config_in(dir.path());

    let outcome = ModelBuilder::new(config.clone()).build().unwrap();
    assert!(matches!(outcome, BuildOutcome::MissingInputs { .. }));
    assert!(!config.output_dir.exists());
}

#[test]
fn test_empty_movie_gets_zero_vector() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("Movies 500.csv"),
        "id,title,overview,genres,keywords\n1,Hero,action hero smith,,\n2,Copy,action hero smith,,\n3,Blank,,,\n",
    )
    .unwrap();
    fs::write(dir.path().join("Credits 500.csv"), "movie_id,cast,crew\n").unwrap();
    let config = config_in(dir.path());

    ModelBuilder::new(config.clone()).build().unwrap();
    let store = ModelStore::new(&config.output_dir);
    let table = store.load_item_table().unwrap();
    let sim = store.load_similarity().unwrap();

    assert_eq!(table.get(2).unwrap().tags, "");
    assert!((sim.get(0, 1) - 1.0).abs() < 1e-9);
    assert_eq!(sim.get(2, 2), 0.0);
    assert_eq!(sim.get(0, 2), 0.0);
}
