//! Combined review output
//!
//! One JSON array holds the reviews of every run. It is loaded at startup,
//! appended to in memory, and rewritten in full at the end through a
//! temporary file in the same directory, so an interrupted save never
//! leaves a truncated array behind.
//!
//! Prior entries are kept as raw JSON values. A record written by an older
//! tool (numeric rating, missing keys) survives the rewrite untouched.

use serde::Serialize;
use serde_json::Value;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tokio::time::timeout;
use tracing::{info, warn};

use super::types::Review;

/// Timeout for the blocking serialize-and-write task
const BLOCKING_SAVE_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize reviews: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to replace {path}: {source}")]
    Persist {
        path: PathBuf,
        #[source]
        source: tempfile::PersistError,
    },

    #[error("Save task failed: {0}")]
    Task(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// One element of the combined array
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
enum StoredRecord {
    /// Loaded from disk, written back as it was read
    Prior(Value),
    Collected(Review),
}

impl StoredRecord {
    fn to_review(&self) -> Option<Review> {
        match self {
            Self::Prior(value) => serde_json::from_value(value.clone()).ok(),
            Self::Collected(review) => Some(review.clone()),
        }
    }
}

/// Ordered review collection backed by a JSON file
#[derive(Debug)]
pub struct ReviewStore {
    path: PathBuf,
    records: Vec<StoredRecord>,
}

impl ReviewStore {
    /// Load prior reviews from `path`.
    ///
    /// Any JSON array is kept whole, whatever its elements look like. A
    /// missing file or content that is not a JSON array starts an empty
    /// collection. Read errors on an existing file are returned so that the
    /// save at the end cannot clobber data we failed to read.
    pub async fn load(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();

        let records = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => match serde_json::from_str::<Vec<Value>>(&raw) {
                Ok(values) => {
                    info!("Loaded {} prior reviews from {}", values.len(), path.display());
                    values.into_iter().map(StoredRecord::Prior).collect()
                }
                Err(e) => {
                    warn!(
                        "Ignoring review file {} that is not a JSON array: {}",
                        path.display(),
                        e
                    );
                    Vec::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(source) => return Err(StoreError::Io { path, source }),
        };

        Ok(Self { path, records })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Entries that parse as [`Review`], in file order.
    ///
    /// Prior entries with a different shape are skipped here but still
    /// saved.
    pub fn reviews(&self) -> impl Iterator<Item = Review> + '_ {
        self.records.iter().filter_map(StoredRecord::to_review)
    }

    /// Number of entries, including ones that are not [`Review`]-shaped
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn extend(&mut self, reviews: impl IntoIterator<Item = Review>) {
        self.records
            .extend(reviews.into_iter().map(StoredRecord::Collected));
    }

    /// Rewrite the file with every review, pretty-printed.
    pub async fn save(&self) -> StoreResult<()> {
        let path = self.path.clone();
        let records = self.records.clone();

        let task = tokio::task::spawn_blocking(move || write_atomically(&path, &records));

        match timeout(BLOCKING_SAVE_TIMEOUT, task).await {
            Ok(Ok(result)) => result,
            Ok(Err(e)) => Err(StoreError::Task(e.to_string())),
            Err(_) => Err(StoreError::Task(format!(
                "timed out after {BLOCKING_SAVE_TIMEOUT:?}"
            ))),
        }
    }
}

fn write_atomically(path: &Path, records: &[StoredRecord]) -> StoreResult<()> {
    let json = serde_json::to_string_pretty(records)?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let io_err = |source| StoreError::Io {
        path: dir.clone(),
        source,
    };

    std::fs::create_dir_all(&dir).map_err(io_err)?;
    let mut tmp = tempfile::NamedTempFile::new_in(&dir).map_err(io_err)?;
    tmp.write_all(json.as_bytes()).map_err(io_err)?;
    tmp.as_file().sync_all().map_err(io_err)?;

    tmp.persist(path).map_err(|source| StoreError::Persist {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}
