//! Bag-of-words vectorization of tag strings.
//!
//! ## Algorithm
//! 1. Lowercase each document and split it into word tokens (runs of
//!    alphanumeric or `_` characters, at least two characters long)
//! 2. Drop English stop words
//! 3. Count every remaining token across the whole corpus
//! 4. Keep the `max_features` most frequent tokens; ties at the cutoff are
//!    broken lexicographically so the result never depends on hash order
//! 5. Assign column positions to the kept tokens in lexicographic order
//! 6. Emit one count row per document

use crate::stopwords::is_stop_word;
use rayon::prelude::*;
use std::collections::HashMap;
use tracing::{debug, instrument};

/// Split text into lowercase word tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|token| token.chars().count() >= 2)
        .map(str::to_string)
        .collect()
}

/// Tokens of `text` that are candidates for the vocabulary
fn content_tokens(text: &str) -> Vec<String> {
    tokenize(text)
        .into_iter()
        .filter(|token| !is_stop_word(token))
        .collect()
}

/// The retained terms and their column positions. Immutable once built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Vocabulary {
    /// Terms in column order
    terms: Vec<String>,
    positions: HashMap<String, usize>,
}

impl Vocabulary {
    fn from_sorted_terms(terms: Vec<String>) -> Self {
        let positions = terms
            .iter()
            .enumerate()
            .map(|(i, term)| (term.clone(), i))
            .collect();
        Self { terms, positions }
    }

    /// Column position of a term, if it was retained
    pub fn position(&self, term: &str) -> Option<usize> {
        self.positions.get(term).copied()
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

/// Dense row-major count matrix: one row per document, one column per term.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMatrix {
    n_rows: usize,
    n_cols: usize,
    data: Vec<u32>,
}

impl FeatureMatrix {
    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn n_cols(&self) -> usize {
        self.n_cols
    }

    /// Count vector of one document
    pub fn row(&self, i: usize) -> &[u32] {
        &self.data[i * self.n_cols..(i + 1) * self.n_cols]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u32]> {
        (0..self.n_rows).map(move |i| self.row(i))
    }

    /// True when document `i` has no vocabulary tokens at all
    pub fn is_zero_row(&self, i: usize) -> bool {
        self.row(i).iter().all(|&c| c == 0)
    }
}

/// Count vectorizer with a bounded vocabulary and stop-word removal.
#[derive(Debug, Clone)]
pub struct CountVectorizer {
    max_features: usize,
}

impl CountVectorizer {
    pub fn new(max_features: usize) -> Self {
        Self { max_features }
    }

    /// Learn the vocabulary from `documents`.
    pub fn fit<S: AsRef<str> + Sync>(&self, documents: &[S]) -> Vocabulary {
        let counts = documents
            .par_iter()
            .map(|doc| {
                let mut local: HashMap<String, u64> = HashMap::new();
                for token in content_tokens(doc.as_ref()) {
                    *local.entry(token).or_insert(0) += 1;
                }
                local
            })
            .reduce(HashMap::new, |mut acc, local| {
                for (token, n) in local {
                    *acc.entry(token).or_insert(0) += n;
                }
                acc
            });

        let mut ranked: Vec<(String, u64)> = counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked.truncate(self.max_features);

        let mut terms: Vec<String> = ranked.into_iter().map(|(term, _)| term).collect();
        terms.sort();

        debug!(terms = terms.len(), "vocabulary built");
        Vocabulary::from_sorted_terms(terms)
    }

    /// Count vocabulary terms in each document. Out-of-vocabulary tokens
    /// are ignored.
    pub fn transform<S: AsRef<str> + Sync>(
        &self,
        vocabulary: &Vocabulary,
        documents: &[S],
    ) -> FeatureMatrix {
        let n_cols = vocabulary.len();
        let data: Vec<u32> = documents
            .par_iter()
            .flat_map_iter(|doc| {
                let mut row = vec![0u32; n_cols];
                for token in tokenize(doc.as_ref()) {
                    if let Some(col) = vocabulary.position(&token) {
                        row[col] += 1;
                    }
                }
                row
            })
            .collect();

        FeatureMatrix {
            n_rows: documents.len(),
            n_cols,
            data,
        }
    }

    #[instrument(skip(self, documents), fields(documents = documents.len()))]
    pub fn fit_transform<S: AsRef<str> + Sync>(
        &self,
        documents: &[S],
    ) -> (Vocabulary, FeatureMatrix) {
        let vocabulary = self.fit(documents);
        let features = self.transform(&vocabulary, documents);
        (vocabulary, features)
    }
}
