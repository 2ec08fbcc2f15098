use std::sync::{Arc, Mutex};

use crate::registry::{DonorStore, StoreError};

/// In-memory DonorStore for testing and as a last-resort fallback.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    blob: Arc<Mutex<Option<String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DonorStore for MemoryStore {
    async fn load(&self) -> Option<String> {
        self.blob.lock().unwrap().clone()
    }

    async fn save(&self, blob: &str) -> Result<(), StoreError> {
        *self.blob.lock().unwrap() = Some(blob.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BloodGroup, DonorRecord, InvalidRecord};
    use crate::registry::{DonorRegistry, StoreError};
    use chrono::Utc;

    fn record(id: u64, blood_group: BloodGroup) -> DonorRecord {
        DonorRecord {
            id,
            provider_id: format!("sub-{id}"),
            provider_email: "donor@example.com".into(),
            name: "Test Donor".into(),
            age: 28,
            blood_group,
            contact: "555-0100".into(),
            address: "New York, NY".into(),
            lat: 40.7128,
            lng: -74.0060,
            registered_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_append_and_list() {
        let registry = DonorRegistry::new(MemoryStore::new());

        // Initially empty
        assert!(registry.list_all().await.is_empty());

        registry.append(record(1, BloodGroup::OPositive)).await.unwrap();
        registry.append(record(2, BloodGroup::ANegative)).await.unwrap();

        let donors = registry.list_all().await;
        assert_eq!(donors.len(), 2);
        assert_eq!(donors[0].id, 1);
        assert_eq!(donors[1].id, 2);
    }

    #[tokio::test]
    async fn test_list_preserves_insertion_order() {
        let registry = DonorRegistry::new(MemoryStore::new());

        for id in [10, 3, 7] {
            registry.append(record(id, BloodGroup::BPositive)).await.unwrap();
        }

        let ids: Vec<u64> = registry.list_all().await.iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![10, 3, 7]);
    }

    #[tokio::test]
    async fn test_append_rejects_duplicate_id() {
        let registry = DonorRegistry::new(MemoryStore::new());

        registry.append(record(1, BloodGroup::OPositive)).await.unwrap();
        let err = registry
            .append(record(1, BloodGroup::ANegative))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::InvalidRecord(InvalidRecord::DuplicateId(1))
        ));

        // The collection is untouched
        assert_eq!(registry.list_all().await.len(), 1);
    }

    #[tokio::test]
    async fn test_append_rejects_invalid_coordinates() {
        let registry = DonorRegistry::new(MemoryStore::new());

        let mut bad = record(1, BloodGroup::OPositive);
        bad.lat = 120.0;
        assert!(registry.append(bad).await.is_err());
        assert!(registry.list_all().await.is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_blob_reads_as_empty() {
        let store = MemoryStore::new();
        store.save("this is not json").await.unwrap();

        let registry = DonorRegistry::new(store);
        assert!(registry.list_all().await.is_empty());
    }

    #[tokio::test]
    async fn test_allocate_id_avoids_existing_ids() {
        let registry = DonorRegistry::new(MemoryStore::new());

        // A record with an id far in the future
        let far_future = u64::MAX - 1;
        registry
            .append(record(far_future, BloodGroup::OPositive))
            .await
            .unwrap();

        let id = registry.allocate_id().await;
        assert!(id > far_future);
    }

    #[tokio::test]
    async fn test_allocate_id_is_time_based_when_unconstrained() {
        let registry = DonorRegistry::new(MemoryStore::new());
        let before = chrono::Utc::now().timestamp_millis() as u64;
        let id = registry.allocate_id().await;
        assert!(id >= before);
    }
}
