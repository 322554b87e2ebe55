//! Decoding of the semi-structured list columns.
//!
//! A cell such as `genres` holds a serialized list of records. Decoding is
//! best-effort: an absent cell, a cell that fails to parse, or a cell that is
//! not a list all yield an empty result. Nothing in this module returns an
//! error to the caller.
//!
//! ```ignore
//! use data_loader::fields::{parse_names, get_cast, get_directors};
//!
//! let genres = parse_names(Some("[{'id': 28, 'name': 'Action'}]"));
//! assert_eq!(genres, vec!["Action"]);
//!
//! let cast = get_cast(movie.cast.as_deref(), 3);
//! let directors = get_directors(movie.crew.as_deref(), DIRECTOR_JOB);
//! ```

use crate::literal::parse_literal;
use serde_json::{Map, Value};
use tracing::trace;

/// Job label identifying a film's director in crew records
pub const DIRECTOR_JOB: &str = "director";

/// Default number of leading cast members kept per movie
pub const DEFAULT_TOP_CAST: usize = 3;

/// Outcome of decoding a list cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Decoded {
    /// The cell decoded to a list; elements are kept as-is, in source order
    Records(Vec<Value>),
    /// The cell was absent, malformed, or not a list
    Empty,
}

impl Decoded {
    /// Iterate over the elements that are key/value records.
    /// Any other element kind is skipped.
    pub fn records(&self) -> impl Iterator<Item = &Map<String, Value>> {
        let items: &[Value] = match self {
            Decoded::Records(items) => items,
            Decoded::Empty => &[],
        };
        items.iter().filter_map(Value::as_object)
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Decoded::Records(items) => items.is_empty(),
            Decoded::Empty => true,
        }
    }
}

/// Decode a raw cell into its list of elements.
///
/// The cell is parsed once as-is. If that fails, doubled quote characters
/// (`""`, left behind by some CSV writers) are collapsed and parsing is
/// retried once.
pub fn decode_records(raw: Option<&str>) -> Decoded {
    let Some(raw) = raw else {
        return Decoded::Empty;
    };

    let parsed = parse_literal(raw).or_else(|first| {
        trace!(error = %first, "retrying with collapsed quotes");
        parse_literal(&raw.replace("\"\"", "\""))
    });

    match parsed {
        Ok(Value::Array(items)) => Decoded::Records(items),
        Ok(_) => Decoded::Empty,
        Err(e) => {
            trace!(error = %e, "field decode failed, treating as empty");
            Decoded::Empty
        }
    }
}

/// Extract names from a list cell, in source order.
///
/// Each record contributes its `name`, or its `title` when `name` is missing
/// or falsy. Records with neither are skipped.
pub fn parse_names(raw: Option<&str>) -> Vec<String> {
    decode_records(raw)
        .records()
        .filter_map(|record| {
            truthy_text(record.get("name")).or_else(|| truthy_text(record.get("title")))
        })
        .collect()
}

/// The first `top_n` cast names, in billing order.
pub fn get_cast(raw: Option<&str>, top_n: usize) -> Vec<String> {
    let mut names = parse_names(raw);
    names.truncate(top_n);
    names
}

/// Names of crew members whose `job` equals `role`, ignoring case.
///
/// Records without a textual `job` are excluded, as are matching records
/// whose `name` is not a string.
pub fn get_directors(raw: Option<&str>, role: &str) -> Vec<String> {
    let role = role.to_lowercase();
    decode_records(raw)
        .records()
        .filter(|record| {
            record
                .get("job")
                .and_then(Value::as_str)
                .is_some_and(|job| !job.is_empty() && job.to_lowercase() == role)
        })
        .filter_map(|record| record.get("name").and_then(Value::as_str))
        .map(str::to_string)
        .collect()
}

/// Render a scalar as text if it counts as "present": non-empty strings,
/// non-zero numbers and `true`. Nulls, containers and falsy scalars give `None`.
fn truthy_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64().is_some_and(|f| f != 0.0) => Some(n.to_string()),
        Value::Bool(true) => Some("True".to_string()),
        _ => None,
    }
}
