//! CSV parsing for the item and contributor tables.
//!
//! - item table: must have `id`; `title`, `overview`, `genres`, `keywords`
//!   are read when present, everything else lands in `MovieRecord::extra`
//! - contributor table: keyed by `movie_id` (or `id`), with `cast` and `crew`
//!
//! Empty cells are read as `None`.

use crate::error::{DataLoadError, Result};
use crate::types::*;
use csv::{ReaderBuilder, StringRecord};
use std::collections::BTreeMap;
use std::fs::File;
use std::path::Path;

/// Columns of the item table the pipeline reads directly
const MOVIE_COLUMNS: [&str; 5] = ["id", "title", "overview", "genres", "keywords"];

/// Identifier columns accepted in the contributor table, in order of preference
const CREDIT_ID_COLUMNS: [&str; 2] = ["movie_id", "id"];

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn open_reader(path: &Path) -> Result<(csv::Reader<File>, StringRecord)> {
    let file = File::open(path).map_err(|_| DataLoadError::FileNotFound {
        path: path.display().to_string(),
    })?;
    let mut reader = ReaderBuilder::new().has_headers(true).from_reader(file);
    let headers = reader
        .headers()
        .map_err(|source| DataLoadError::CsvError {
            file: file_label(path),
            source,
        })?
        .clone();
    Ok((reader, headers))
}

fn column_index(headers: &StringRecord, name: &str) -> Option<usize> {
    headers.iter().position(|h| h.trim() == name)
}

/// Read a cell, mapping empty strings to `None`
fn cell(record: &StringRecord, index: Option<usize>) -> Option<String> {
    index
        .and_then(|i| record.get(i))
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn parse_id(raw: Option<&str>, file: &str, line: usize) -> Result<MovieId> {
    let raw = raw.map(str::trim).unwrap_or_default();
    raw.parse().map_err(|e| DataLoadError::ParseError {
        file: file.to_string(),
        line,
        reason: format!("Invalid id '{}': {}", raw, e),
    })
}

/// Parse the item table
pub fn parse_movies(path: &Path) -> Result<Vec<MovieRecord>> {
    let file = file_label(path);
    let (mut reader, headers) = open_reader(path)?;

    let id_col = column_index(&headers, "id").ok_or_else(|| DataLoadError::MissingColumn {
        file: file.clone(),
        column: "id".to_string(),
    })?;
    let title_col = column_index(&headers, "title");
    let overview_col = column_index(&headers, "overview");
    let genres_col = column_index(&headers, "genres");
    let keywords_col = column_index(&headers, "keywords");

    let mut movies = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        // line 1 is the header row
        let line_no = idx + 2;
        let record = record.map_err(|source| DataLoadError::CsvError {
            file: file.clone(),
            source,
        })?;

        let extra: BTreeMap<String, String> = headers
            .iter()
            .zip(record.iter())
            .filter(|(header, _)| !MOVIE_COLUMNS.contains(&header.trim()))
            .map(|(header, value)| (header.to_string(), value.to_string()))
            .collect();

        movies.push(MovieRecord {
            id: parse_id(record.get(id_col), &file, line_no)?,
            title: cell(&record, title_col).unwrap_or_default(),
            overview: cell(&record, overview_col),
            genres: cell(&record, genres_col),
            keywords: cell(&record, keywords_col),
            extra,
        });
    }
    Ok(movies)
}

/// Parse the contributor table
pub fn parse_credits(path: &Path) -> Result<Vec<CreditRecord>> {
    let file = file_label(path);
    let (mut reader, headers) = open_reader(path)?;

    let id_col = CREDIT_ID_COLUMNS
        .iter()
        .find_map(|name| column_index(&headers, name))
        .ok_or_else(|| DataLoadError::MissingColumn {
            file: file.clone(),
            column: CREDIT_ID_COLUMNS.join(" or "),
        })?;
    let cast_col = column_index(&headers, "cast");
    let crew_col = column_index(&headers, "crew");

    let mut credits = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        let line_no = idx + 2;
        let record = record.map_err(|source| DataLoadError::CsvError {
            file: file.clone(),
            source,
        })?;

        credits.push(CreditRecord {
            movie_id: parse_id(record.get(id_col), &file, line_no)?,
            cast: cell(&record, cast_col),
            crew: cell(&record, crew_col),
        });
    }
    Ok(credits)
}
