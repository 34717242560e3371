//! Catalog persistence: a single JSON snapshot per crawl run.
//!
//! The serving layer must always have a valid catalog to answer from, so
//! `load` can never fail — a missing or malformed snapshot degrades to an
//! empty catalog with a fresh timestamp and a warning in the log.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::{RwLock, RwLockReadGuard};

use matprix_core::Product;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("snapshot write failed for {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("snapshot serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// The in-memory collection of harvested records for one crawl run.
///
/// Record order reflects completion order of concurrent category crawls
/// and carries no meaning; everything derived from a catalog must treat
/// it as an unordered bag.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub scraped_at: DateTime<Utc>,
    pub products: Vec<Product>,
}

/// On-disk snapshot shape. `total_products` is redundant with the sequence
/// length but kept in the document for consumers that only want the count.
#[derive(Serialize)]
struct SnapshotDocument<'a> {
    scraped_at: DateTime<Utc>,
    total_products: usize,
    products: &'a [Product],
}

/// Tolerant load-side counterpart: unknown keys are ignored, missing keys
/// fall back to defaults.
#[derive(Deserialize)]
struct SnapshotFile {
    #[serde(default)]
    scraped_at: Option<DateTime<Utc>>,
    #[serde(default)]
    products: Vec<Product>,
}

impl Catalog {
    /// A catalog with zero records and a fresh timestamp.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            scraped_at: Utc::now(),
            products: Vec::new(),
        }
    }

    /// Wraps freshly harvested records, stamping the snapshot time.
    #[must_use]
    pub fn from_products(products: Vec<Product>) -> Self {
        Self {
            scraped_at: Utc::now(),
            products,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Loads a snapshot from disk.
    ///
    /// Missing file, unreadable file, and malformed JSON all yield an
    /// empty catalog rather than an error; the cause is logged.
    #[must_use]
    pub fn load(path: &Path) -> Self {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "snapshot not readable, starting with empty catalog"
                );
                return Self::empty();
            }
        };

        match serde_json::from_str::<SnapshotFile>(&content) {
            Ok(snapshot) => {
                let catalog = Self {
                    scraped_at: snapshot.scraped_at.unwrap_or_else(Utc::now),
                    products: snapshot.products,
                };
                tracing::info!(
                    path = %path.display(),
                    products = catalog.len(),
                    "loaded catalog snapshot"
                );
                catalog
            }
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "snapshot failed to parse, starting with empty catalog"
                );
                Self::empty()
            }
        }
    }

    /// Writes the snapshot, overwriting any prior one and creating parent
    /// directories as needed.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Io`] on filesystem failure and
    /// [`CatalogError::Serialize`] if the document cannot be encoded.
    pub fn save(&self, path: &Path) -> Result<(), CatalogError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| CatalogError::Io {
                    path: parent.display().to_string(),
                    source: e,
                })?;
            }
        }

        let document = SnapshotDocument {
            scraped_at: self.scraped_at,
            total_products: self.products.len(),
            products: &self.products,
        };
        let json = serde_json::to_string_pretty(&document)?;
        std::fs::write(path, json).map_err(|e| CatalogError::Io {
            path: path.display().to_string(),
            source: e,
        })?;

        tracing::info!(
            path = %path.display(),
            products = self.products.len(),
            "saved catalog snapshot"
        );
        Ok(())
    }
}

/// Shared, reloadable view of the persisted catalog used by the serving
/// layer. Load-and-replace happens under the write lock, so a refresh
/// never races a reader and two refreshes cannot interleave.
pub struct CatalogStore {
    path: PathBuf,
    inner: RwLock<Catalog>,
}

impl CatalogStore {
    /// Loads the snapshot at `path` (empty catalog if absent) and keeps
    /// the location for later reloads.
    #[must_use]
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let catalog = Catalog::load(&path);
        Self {
            path,
            inner: RwLock::new(catalog),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read access to the current catalog view.
    pub async fn catalog(&self) -> RwLockReadGuard<'_, Catalog> {
        self.inner.read().await
    }

    /// Re-reads the snapshot from disk and atomically replaces the
    /// in-memory view. Returns the new record count.
    pub async fn reload(&self) -> usize {
        let fresh = Catalog::load(&self.path);
        let count = fresh.len();
        *self.inner.write().await = fresh;
        count
    }
}
