//! Keyed on-disk store for generated images.
//!
//! Every request writes under its own id, so concurrent requests never share
//! a file. Writes land in a hidden temporary file first and are renamed into
//! place.

use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use scene_common::ImageryError;
use thiserror::Error;
use tokio::fs;
use tracing::debug;
use uuid::Uuid;

pub const NATURAL_COLOR_SUFFIX: &str = "natural_color_image.png";
pub const NDVI_SUFFIX: &str = "ndvi_image.png";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Invalid image name: {0}")]
    InvalidName(String),

    #[error("Image not found: {0}")]
    NotFound(String),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<StoreError> for ImageryError {
    fn from(err: StoreError) -> Self {
        ImageryError::StorageError(err.to_string())
    }
}

/// Directory of generated PNG files.
#[derive(Debug, Clone)]
pub struct ImageStore {
    root: PathBuf,
}

impl ImageStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the store directory if needed.
    pub async fn ensure_dir(&self) -> Result<(), StoreError> {
        fs::create_dir_all(&self.root)
            .await
            .map_err(|source| self.io_error(&self.root, source))
    }

    /// A fresh request id.
    pub fn new_request_id() -> Uuid {
        Uuid::new_v4()
    }

    /// File name of an image produced by request `id`.
    pub fn image_name(id: &Uuid, suffix: &str) -> String {
        format!("{}_{}", id, suffix)
    }

    /// Write `bytes` under `name`, replacing any previous file atomically.
    pub async fn put(&self, name: &str, bytes: &[u8]) -> Result<PathBuf, StoreError> {
        let path = self.resolve(name)?;
        let tmp = self.root.join(format!(".{}.tmp", name));

        fs::write(&tmp, bytes)
            .await
            .map_err(|source| self.io_error(&tmp, source))?;
        if let Err(source) = fs::rename(&tmp, &path).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(self.io_error(&path, source));
        }

        debug!(path = %path.display(), bytes = bytes.len(), "Stored image");
        Ok(path)
    }

    /// Open a stored image for reading.
    pub async fn open(&self, name: &str) -> Result<fs::File, StoreError> {
        let path = self.resolve(name)?;
        match fs::File::open(&path).await {
            Ok(file) => Ok(file),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StoreError::NotFound(name.to_string()))
            }
            Err(source) => Err(self.io_error(&path, source)),
        }
    }

    /// Delete images last modified more than `max_age` ago.
    ///
    /// Returns the number of files removed. Files that vanish mid-sweep are
    /// skipped.
    pub async fn remove_older_than(&self, max_age: Duration) -> Result<usize, StoreError> {
        let cutoff = SystemTime::now()
            .checked_sub(max_age)
            .unwrap_or(SystemTime::UNIX_EPOCH);

        let mut entries = fs::read_dir(&self.root)
            .await
            .map_err(|source| self.io_error(&self.root, source))?;

        let mut removed = 0;
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|source| self.io_error(&self.root, source))?
        {
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            if !is_generated_image(name) {
                continue;
            }
            let Ok(metadata) = entry.metadata().await else {
                continue;
            };
            let modified = metadata.modified().unwrap_or(SystemTime::now());
            if modified < cutoff && fs::remove_file(entry.path()).await.is_ok() {
                removed += 1;
            }
        }
        Ok(removed)
    }

    /// Map a client-supplied name to a path inside the store.
    fn resolve(&self, name: &str) -> Result<PathBuf, StoreError> {
        let valid = !name.is_empty()
            && !name.starts_with('.')
            && !name.contains(['/', '\\'])
            && !name.contains("..")
            && name.ends_with(".png");
        if !valid {
            return Err(StoreError::InvalidName(name.to_string()));
        }
        Ok(self.root.join(name))
    }

    fn io_error(&self, path: &Path, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

fn is_generated_image(name: &str) -> bool {
    name.ends_with(NATURAL_COLOR_SUFFIX) || name.ends_with(NDVI_SUFFIX)
}
