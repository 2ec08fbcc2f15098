//! # File-backed donor store
//!
//! [`FileStore`] persists the donor blob to a single file on disk. It is the
//! backend for native (desktop) runs, where there is no localStorage.
//!
//! The file holds exactly what a browser build would put under
//! [`crate::DONORS_KEY`]: one JSON array of donor records.

use std::path::PathBuf;

use crate::registry::{DonorStore, StoreError};

/// Filesystem-backed DonorStore for native persistence.
#[derive(Clone, Debug)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// `path` is the blob file itself, e.g. `<data_dir>/bloodconnect/donors.json`.
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl DonorStore for FileStore {
    async fn load(&self) -> Option<String> {
        std::fs::read_to_string(&self.path).ok()
    }

    async fn save(&self, blob: &str) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| StoreError::Backend(e.to_string()))?;
        }
        std::fs::write(&self.path, blob).map_err(|e| StoreError::Backend(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BloodGroup, DonorRecord};
    use crate::registry::DonorRegistry;
    use chrono::Utc;

    #[tokio::test]
    async fn test_file_store_roundtrip() {
        let dir = std::env::temp_dir().join(format!("bloodconnect_test_{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        let path = dir.join("donors.json");

        let registry = DonorRegistry::new(FileStore::new(path.clone()));
        registry
            .append(DonorRecord {
                id: 1,
                provider_id: "sub-1".into(),
                provider_email: "donor@example.com".into(),
                name: "Test Donor".into(),
                age: 41,
                blood_group: BloodGroup::AbPositive,
                contact: "555-0100".into(),
                address: "Brooklyn, NY".into(),
                lat: 40.6782,
                lng: -73.9442,
                registered_at: Utc::now(),
            })
            .await
            .unwrap();

        // Re-open from the same path
        let reopened = DonorRegistry::new(FileStore::new(path));
        let donors = reopened.list_all().await;
        assert_eq!(donors.len(), 1);
        assert_eq!(donors[0].blood_group, BloodGroup::AbPositive);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn test_missing_file_reads_as_empty() {
        let path = std::env::temp_dir().join("bloodconnect_does_not_exist.json");
        let registry = DonorRegistry::new(FileStore::new(path));
        assert!(registry.list_all().await.is_empty());
    }
}
