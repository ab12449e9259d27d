//! Key/value persistence the entry log writes its serialized collection to.
//!
//! The storage never looks inside the blobs it keeps. A missing key reads as
//! `Ok(None)`; failures are always reported as a [`StorageError`].
use std::{
    collections::HashMap,
    future::Future,
    io::ErrorKind,
    path::PathBuf,
    sync::Arc,
};

use thiserror::Error;
use tokio::sync::Mutex;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

pub trait Storage {
    fn read(&self, key: &str) -> impl Future<Output = Result<Option<String>, StorageError>> + Send;

    fn write(&self, key: &str, blob: String)
    -> impl Future<Output = Result<(), StorageError>> + Send;

    fn remove(&self, key: &str) -> impl Future<Output = Result<(), StorageError>> + Send;
}

impl<S: Storage + Send + Sync + ?Sized> Storage for Arc<S> {
    fn read(&self, key: &str) -> impl Future<Output = Result<Option<String>, StorageError>> + Send {
        (**self).read(key)
    }

    fn write(
        &self,
        key: &str,
        blob: String,
    ) -> impl Future<Output = Result<(), StorageError>> + Send {
        (**self).write(key, blob)
    }

    fn remove(&self, key: &str) -> impl Future<Output = Result<(), StorageError>> + Send {
        (**self).remove(key)
    }
}

/// Process-local storage, lost on exit.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    blobs: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    async fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.blobs.lock().await.get(key).cloned())
    }

    async fn write(&self, key: &str, blob: String) -> Result<(), StorageError> {
        self.blobs.lock().await.insert(key.to_string(), blob);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.blobs.lock().await.remove(key);
        Ok(())
    }
}

/// One `<key>.json` file per key inside `dir`.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    dir: PathBuf,
}

impl JsonFileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl Storage for JsonFileStorage {
    async fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        match tokio::fs::read_to_string(self.path(key)).await {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    async fn write(&self, key: &str, blob: String) -> Result<(), StorageError> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self.path(key);
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, blob).await?;
        tokio::fs::rename(&tmp, &path).await?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        match tokio::fs::remove_file(self.path(key)).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
