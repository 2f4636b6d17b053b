use std::io::ErrorKind;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, instrument, warn};

use super::error::StoreError;

const EMPTY_COLLECTION: &[u8] = b"[]";

/// A collection of records persisted as a single JSON array.
///
/// `load` never fails on missing or unreadable content: an absent file is
/// created holding `[]`, and an empty or corrupt file reads as an empty
/// collection. `save` rewrites the whole file in place. There is no lock and
/// no atomic rename, so when two processes save the same file the last write
/// wins.
#[derive(Debug, Clone)]
pub struct JsonStore<T> {
    path: PathBuf,
    _record: PhantomData<fn() -> T>,
}

impl<T> JsonStore<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _record: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub async fn load(&self) -> Result<Vec<T>, StoreError> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                self.create_empty().await?;
                return Ok(Vec::new());
            }
            Err(e) => return Err(StoreError::io(&self.path, e)),
        };

        if bytes.iter().all(u8::is_ascii_whitespace) {
            debug!("Collection file is empty");
            return Ok(Vec::new());
        }

        match serde_json::from_slice::<Vec<T>>(&bytes) {
            Ok(records) => {
                debug!(count = records.len(), "Loaded collection");
                Ok(records)
            }
            Err(e) => {
                warn!(error = %e, "Collection file is corrupt, treating as empty");
                Ok(Vec::new())
            }
        }
    }

    #[instrument(skip(self, records), fields(path = %self.path.display(), count = records.len()))]
    pub async fn save(&self, records: &[T]) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(records)?;
        self.ensure_parent().await?;
        fs::write(&self.path, json)
            .await
            .map_err(|e| StoreError::io(&self.path, e))?;
        debug!("Saved collection");
        Ok(())
    }

    /// Exclusive create, so a second process creating the same file at the
    /// same moment leaves the first one's content alone.
    async fn create_empty(&self) -> Result<(), StoreError> {
        self.ensure_parent().await?;
        match fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.path)
            .await
        {
            Ok(mut file) => {
                file.write_all(EMPTY_COLLECTION)
                    .await
                    .map_err(|e| StoreError::io(&self.path, e))?;
                file.flush()
                    .await
                    .map_err(|e| StoreError::io(&self.path, e))?;
                debug!("Created empty collection file");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => Ok(()),
            Err(e) => Err(StoreError::io(&self.path, e)),
        }
    }

    async fn ensure_parent(&self) -> Result<(), StoreError> {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent)
                .await
                .map_err(|e| StoreError::io(parent, e)),
            _ => Ok(()),
        }
    }
}
