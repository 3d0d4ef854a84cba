#[cfg(feature = "storage-local")]
use crate::LocalStorage;
use crate::{Storage, StorageBackend, StorageError, StorageResult};
use std::sync::Arc;

/// Create a storage backend based on configuration
pub async fn create_storage(backend: &str, local_path: &str) -> StorageResult<Arc<dyn Storage>> {
    let backend: StorageBackend = backend.parse()?;

    match backend {
        #[cfg(feature = "storage-local")]
        StorageBackend::Local => {
            if local_path.is_empty() {
                return Err(StorageError::ConfigError(
                    "LOCAL_STORAGE_PATH not configured".to_string(),
                ));
            }

            let storage = LocalStorage::new(local_path).await?;
            Ok(Arc::new(storage))
        }

        #[cfg(not(feature = "storage-local"))]
        StorageBackend::Local => Err(StorageError::ConfigError(
            "Local storage backend not available (storage-local feature not enabled)".to_string(),
        )),
    }
}

#[cfg(all(test, feature = "storage-local"))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_local_storage() {
        let dir = tempfile::tempdir().unwrap();
        let storage = create_storage("local", dir.path().to_str().unwrap())
            .await
            .unwrap();
        assert_eq!(storage.backend_type(), StorageBackend::Local);
    }

    #[tokio::test]
    async fn test_unknown_backend_rejected() {
        let result = create_storage("s3", "/tmp").await;
        assert!(matches!(result, Err(StorageError::ConfigError(_))));
    }

    #[tokio::test]
    async fn test_empty_path_rejected() {
        let result = create_storage("local", "").await;
        assert!(matches!(result, Err(StorageError::ConfigError(_))));
    }
}
