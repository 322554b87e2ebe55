//! Model persistence.
//!
//! Two independent bincode files are written into the output directory:
//! - `movie_list.bin`: the [`ItemTable`]
//! - `similarity.bin`: the [`SimilarityMatrix`]
//!
//! Both are indexed by row position. Both files are staged as `.tmp`
//! siblings before either is renamed into place, so a failed write leaves
//! the previous pair untouched.

use crate::similarity::SimilarityMatrix;
use crate::table::ItemTable;
use anyhow::{Context, Result, bail};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// File name of the enriched item table
pub const MOVIE_LIST_FILE: &str = "movie_list.bin";

/// File name of the similarity matrix
pub const SIMILARITY_FILE: &str = "similarity.bin";

/// Where a build wrote its artifacts
#[derive(Debug, Clone, PartialEq)]
pub struct ArtifactPaths {
    pub movie_list: PathBuf,
    pub similarity: PathBuf,
}

impl ArtifactPaths {
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            movie_list: dir.join(MOVIE_LIST_FILE),
            similarity: dir.join(SIMILARITY_FILE),
        }
    }
}

/// Writes and reads model artifacts in one directory.
pub struct ModelStore {
    dir: PathBuf,
}

impl ModelStore {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn paths(&self) -> ArtifactPaths {
        ArtifactPaths::in_dir(&self.dir)
    }

    /// Persist both artifacts. Refuses to write if the table and matrix
    /// disagree on the number of items.
    pub fn save(&self, table: &ItemTable, similarity: &SimilarityMatrix) -> Result<ArtifactPaths> {
        if table.len() != similarity.n() {
            bail!(
                "item table has {} rows but similarity matrix is {}x{}",
                table.len(),
                similarity.n(),
                similarity.n()
            );
        }

        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create output directory {:?}", self.dir))?;

        let paths = self.paths();
        let staged_table = stage(&paths.movie_list, table)?;
        let staged_similarity = match stage(&paths.similarity, similarity) {
            Ok(staged) => staged,
            Err(e) => {
                let _ = fs::remove_file(&staged_table);
                return Err(e);
            }
        };
        commit(&staged_table, &paths.movie_list)?;
        commit(&staged_similarity, &paths.similarity)?;

        info!(
            "Saved {} items to {:?} and {:?}",
            table.len(),
            paths.movie_list,
            paths.similarity
        );
        Ok(paths)
    }

    pub fn load_item_table(&self) -> Result<ItemTable> {
        read(&self.paths().movie_list)
    }

    pub fn load_similarity(&self) -> Result<SimilarityMatrix> {
        read(&self.paths().similarity)
    }
}

/// Serialize `value` next to `path` and return the staged file
fn stage<T: Serialize>(path: &Path, value: &T) -> Result<PathBuf> {
    let data = bincode::serialize(value)
        .map_err(|e| anyhow::anyhow!("Serialization error for {:?}: {}", path, e))?;
    let temp = path.with_extension("tmp");
    if let Err(e) = fs::write(&temp, &data) {
        let _ = fs::remove_file(&temp);
        return Err(e).with_context(|| format!("Failed to write {:?}", temp));
    }
    debug!(bytes = data.len(), "staged {:?}", temp);
    Ok(temp)
}

fn commit(temp: &Path, path: &Path) -> Result<()> {
    fs::rename(temp, path).with_context(|| format!("Failed to move {:?} into place", path))
}

fn read<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let data = fs::read(path).with_context(|| format!("Failed to read {:?}", path))?;
    bincode::deserialize(&data)
        .map_err(|e| anyhow::anyhow!("Deserialization error for {:?}: {}", path, e))
}
