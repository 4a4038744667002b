use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::domain::study::{FileStorage, StorageError};

/// Keeps uploaded materials as flat files under one directory
pub struct LocalFileStorage {
  root: PathBuf,
}

impl LocalFileStorage {
  /// Creates the directory when missing
  pub async fn new(root: impl AsRef<Path>) -> Result<Self, StorageError> {
    let root = root.as_ref().to_path_buf();
    tokio::fs::create_dir_all(&root).await?;
    tracing::info!(directory = %root.display(), "Material storage ready");
    Ok(Self { root })
  }

  fn path_for(&self, storage_name: &str) -> Result<PathBuf, StorageError> {
    let valid = !storage_name.is_empty()
      && storage_name != "."
      && storage_name != ".."
      && !storage_name.contains(['/', '\\']);

    if !valid {
      return Err(StorageError::InvalidName(storage_name.to_string()));
    }
    Ok(self.root.join(storage_name))
  }
}

#[async_trait]
impl FileStorage for LocalFileStorage {
  async fn store(&self, storage_name: &str, bytes: &[u8]) -> Result<(), StorageError> {
    let path = self.path_for(storage_name)?;
    tokio::fs::write(&path, bytes).await?;
    tracing::debug!(path = %path.display(), size = bytes.len(), "Stored file");
    Ok(())
  }

  async fn read(&self, storage_name: &str) -> Result<Vec<u8>, StorageError> {
    let path = self.path_for(storage_name)?;
    match tokio::fs::read(&path).await {
      Ok(bytes) => Ok(bytes),
      Err(e) if e.kind() == ErrorKind::NotFound => {
        Err(StorageError::NotFound(storage_name.to_string()))
      }
      Err(e) => Err(e.into()),
    }
  }

  async fn delete(&self, storage_name: &str) -> Result<(), StorageError> {
    let path = self.path_for(storage_name)?;
    match tokio::fs::remove_file(&path).await {
      Ok(()) => Ok(()),
      Err(e) if e.kind() == ErrorKind::NotFound => {
        Err(StorageError::NotFound(storage_name.to_string()))
      }
      Err(e) => Err(e.into()),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use uuid::Uuid;

  async fn storage() -> (LocalFileStorage, PathBuf) {
    let dir = std::env::temp_dir().join(format!("pdfocus-storage-{}", Uuid::new_v4()));
    (LocalFileStorage::new(&dir).await.unwrap(), dir)
  }

  #[tokio::test]
  async fn test_store_read_delete() {
    let (storage, dir) = storage().await;

    storage.store("abc.pdf", b"%PDF-1.7").await.unwrap();
    assert_eq!(storage.read("abc.pdf").await.unwrap(), b"%PDF-1.7");

    storage.delete("abc.pdf").await.unwrap();
    assert!(matches!(
      storage.read("abc.pdf").await,
      Err(StorageError::NotFound(_))
    ));
    assert!(matches!(
      storage.delete("abc.pdf").await,
      Err(StorageError::NotFound(_))
    ));

    tokio::fs::remove_dir_all(dir).await.unwrap();
  }

  #[tokio::test]
  async fn test_rejects_path_traversal() {
    let (storage, dir) = storage().await;

    for name in ["../etc/passwd", "a/b.pdf", "..", "", "a\\b"] {
      assert!(matches!(
        storage.store(name, b"x").await,
        Err(StorageError::InvalidName(_))
      ));
    }

    tokio::fs::remove_dir_all(dir).await.unwrap();
  }
}
