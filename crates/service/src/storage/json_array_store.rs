use std::{io::ErrorKind, marker::PhantomData, path::PathBuf};
use tokio::fs;
use tracing::{debug, error, warn};

use crate::errors::ServiceError;

pub const READ_FAILED: &str = "Erro ao ler o arquivo de filmes";
pub const WRITE_FAILED: &str = "Erro ao salvar o arquivo de filmes";

/// Generic JSON file-backed array store.
///
/// Every `load` reads the whole file and every `save` overwrites it in place
/// (pretty-printed, 2-space indent). There is no lock and no rename step, so
/// concurrent writers can lose updates and a crash mid-write can truncate
/// the file.
pub struct JsonArrayStore<T> {
    file_path: PathBuf,
    _items: PhantomData<fn() -> T>,
}

impl<T> JsonArrayStore<T>
where
    T: serde::Serialize + serde::de::DeserializeOwned,
{
    /// Point the store at a file. The file is not created or touched here.
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { file_path: path.into(), _items: PhantomData }
    }

    /// Read the whole collection.
    ///
    /// Returns `Ok(None)` when the file is missing, unreadable, or blank, so
    /// callers can treat an absent store as "nothing there". Content that is
    /// not a JSON array of `T` is a storage error.
    pub async fn load(&self) -> Result<Option<Vec<T>>, ServiceError> {
        let bytes = match fs::read(&self.file_path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.file_path.display(), "backing file missing");
                return Ok(None);
            }
            Err(e) => {
                warn!(path = %self.file_path.display(), error = %e, "backing file unreadable");
                return Ok(None);
            }
        };

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }

        serde_json::from_slice(&bytes).map(Some).map_err(|e| {
            error!(path = %self.file_path.display(), error = %e, "backing file is not a valid array");
            ServiceError::Storage(READ_FAILED.into())
        })
    }

    /// Overwrite the file with the full collection.
    pub async fn save(&self, items: &[T]) -> Result<(), ServiceError> {
        let data = serde_json::to_vec_pretty(items).map_err(|e| {
            error!(error = %e, "serialize collection failed");
            ServiceError::Storage(WRITE_FAILED.into())
        })?;
        fs::write(&self.file_path, data).await.map_err(|e| {
            error!(path = %self.file_path.display(), error = %e, "write backing file failed");
            ServiceError::Storage(WRITE_FAILED.into())
        })?;
        Ok(())
    }
}
