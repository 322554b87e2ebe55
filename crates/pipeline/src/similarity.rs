//! All-pairs cosine similarity.
//!
//! `sim[i][j] = dot(row_i, row_j) / (||row_i|| * ||row_j||)`
//!
//! Conventions:
//! - any pair involving a zero vector scores 0
//! - the diagonal is exactly 1 for non-zero rows and 0 for zero rows
//!
//! Only the upper triangle is computed; the lower triangle is mirrored from
//! it, so the matrix is symmetric bit-for-bit. Memory is O(n²) by design.

use crate::vectorizer::FeatureMatrix;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Square similarity matrix indexed by item row position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityMatrix {
    n: usize,
    /// Row-major, `n * n` entries
    data: Vec<f64>,
}

impl SimilarityMatrix {
    /// Number of items (rows and columns)
    pub fn n(&self) -> usize {
        self.n
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[i * self.n + j]
    }

    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.n..(i + 1) * self.n]
    }

    /// Check `sim[i][j] == sim[j][i]` for every pair
    pub fn is_symmetric(&self) -> bool {
        (0..self.n).all(|i| (i + 1..self.n).all(|j| self.get(i, j) == self.get(j, i)))
    }
}

/// Non-zero entries of a count row as `(column, count)`, ascending by column
type SparseRow = Vec<(usize, u64)>;

fn sparse_row(row: &[u32]) -> SparseRow {
    row.iter()
        .enumerate()
        .filter(|&(_, &c)| c > 0)
        .map(|(col, &c)| (col, u64::from(c)))
        .collect()
}

/// Exact integer dot product of two sparse rows
fn sparse_dot(a: &[(usize, u64)], b: &[(usize, u64)]) -> u64 {
    let (mut i, mut j, mut sum) = (0, 0, 0u64);
    while i < a.len() && j < b.len() {
        match a[i].0.cmp(&b[j].0) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                sum += a[i].1 * b[j].1;
                i += 1;
                j += 1;
            }
        }
    }
    sum
}

/// Compute the cosine similarity of every pair of rows.
#[instrument(skip(features), fields(rows = features.n_rows(), cols = features.n_cols()))]
pub fn cosine_similarity(features: &FeatureMatrix) -> SimilarityMatrix {
    let n = features.n_rows();
    let rows: Vec<SparseRow> = features.rows().map(sparse_row).collect();
    let norms: Vec<f64> = rows
        .iter()
        .map(|row| (sparse_dot(row, row) as f64).sqrt())
        .collect();

    // upper[i] holds sim[i][j] for j in i..n
    let upper: Vec<Vec<f64>> = (0..n)
        .into_par_iter()
        .map(|i| {
            (i..n)
                .map(|j| {
                    if norms[i] == 0.0 || norms[j] == 0.0 {
                        0.0
                    } else if i == j {
                        1.0
                    } else {
                        let dot = sparse_dot(&rows[i], &rows[j]) as f64;
                        (dot / (norms[i] * norms[j])).clamp(0.0, 1.0)
                    }
                })
                .collect()
        })
        .collect();

    let mut data = vec![0.0; n * n];
    for (i, tail) in upper.iter().enumerate() {
        for (offset, &value) in tail.iter().enumerate() {
            let j = i + offset;
            data[i * n + j] = value;
            data[j * n + i] = value;
        }
    }

    SimilarityMatrix { n, data }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vectorizer::CountVectorizer;

    fn similarity_of(docs: &[&str]) -> SimilarityMatrix {
        let (_, features) = CountVectorizer::new(5000).fit_transform(docs);
        cosine_similarity(&features)
    }

    #[test]
    fn test_identical_documents_score_one() {
        let sim = similarity_of(&["action hero smith", "action hero smith", "quiet drama"]);
        assert!((sim.get(0, 1) - 1.0).abs() < 1e-9);
        assert_eq!(sim.get(0, 2), 0.0);
    }

    #[test]
    fn test_known_value() {
        // [1, 1] vs [1, 0] -> 1 / sqrt(2)
        let sim = similarity_of(&["alpha beta", "alpha"]);
        assert!((sim.get(0, 1) - std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-9);
    }

    #[test]
    fn test_diagonal_and_zero_rows() {
        let sim = similarity_of(&["space opera", "", "the and of"]);
        assert_eq!(sim.get(0, 0), 1.0);
        assert_eq!(sim.get(1, 1), 0.0);
        assert_eq!(sim.get(2, 2), 0.0);
        assert_eq!(sim.get(0, 1), 0.0);
        assert_eq!(sim.get(1, 2), 0.0);
    }

    #[test]
    fn test_generated_corpora_are_symmetric_and_bounded() {
        let words = ["space", "alien", "war", "love", "heist", "robot", "ocean", "king"];
        for seed in 0..20usize {
            let docs: Vec<String> = (0..12)
                .map(|d| {
                    (0..(d * 7 + seed) % 6)
                        .map(|k| words[(d * 3 + k * 5 + seed) % words.len()])
                        .collect::<Vec<_>>()
                        .join(" ")
                })
                .collect();
            let (_, features) = CountVectorizer::new(5000).fit_transform(&docs);
            let sim = cosine_similarity(&features);

            assert_eq!(sim.n(), 12);
            assert!(sim.is_symmetric());
            for i in 0..sim.n() {
                assert!(sim.row(i).iter().all(|&v| (0.0..=1.0).contains(&v)));
                let expected = if features.is_zero_row(i) { 0.0 } else { 1.0 };
                assert_eq!(sim.get(i, i), expected);
            }
        }
    }

    #[test]
    fn test_empty_matrix() {
        let sim = similarity_of(&[]);
        assert_eq!(sim.n(), 0);
        assert!(sim.is_symmetric());
    }
}
