//! # Donor registry: append-only collection on an abstract blob store
//!
//! This module is the core of the storage layer. [`DonorRegistry`] keeps the
//! full donor collection as a single JSON array blob behind the [`DonorStore`]
//! trait, so the same logic works against browser localStorage
//! ([`crate::LocalStore`]), a file on disk ([`crate::FileStore`]), or an
//! in-memory store for tests ([`crate::MemoryStore`]).
//!
//! ## [`DonorStore`] trait
//!
//! Two async methods: `load` for the whole blob (absent storage reads as
//! `None`) and `save` for the whole blob. The blob lives under one well-known
//! key, [`DONORS_KEY`], with no schema version envelope; the layout is the
//! one the app has always written, and renaming a field would silently orphan
//! existing records.
//!
//! ## Operations
//!
//! | Method | Description |
//! |--------|-------------|
//! | [`list_all`](DonorRegistry::list_all) | Every record, insertion order preserved. Never fails: absent or unparsable storage reads as an empty collection. |
//! | [`append`](DonorRegistry::append) | Validates the record's invariants, then read-modify-writes the whole collection. |
//! | [`allocate_id`](DonorRegistry::allocate_id) | A fresh identifier: current time in milliseconds, bumped past any existing id. |
//!
//! The read-modify-write in `append` is atomic only from this caller's
//! perspective. Nothing guards against a concurrent external writer (a second
//! tab), which can lose updates; single-tab usage assumed.

use chrono::Utc;
use serde_json::Error as JsonError;

use crate::models::{DonorRecord, InvalidRecord};

/// The localStorage/file key under which the whole collection is stored.
pub const DONORS_KEY: &str = "bloodConnectDonors";

/// Async trait for loading and saving the serialized donor collection.
pub trait DonorStore {
    /// Read the stored blob. `None` when nothing has been stored yet or the
    /// backing storage is unavailable.
    fn load(&self) -> impl std::future::Future<Output = Option<String>>;
    /// Replace the stored blob.
    fn save(&self, blob: &str) -> impl std::future::Future<Output = Result<(), StoreError>>;
}

/// Why an append did not persist.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("invalid donor record: {0}")]
    InvalidRecord(#[from] InvalidRecord),
    #[error("could not serialize donor records: {0}")]
    Serialize(#[from] JsonError),
    #[error("could not persist donor records: {0}")]
    Backend(String),
}

/// The donor collection, backed by a [`DonorStore`].
pub struct DonorRegistry<S: DonorStore> {
    store: S,
}

impl<S: DonorStore> DonorRegistry<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// All persisted records, in insertion order.
    ///
    /// Read-only and infallible: a missing blob is an empty collection, and a
    /// blob that no longer parses is treated the same way rather than taking
    /// the locator down with it.
    pub async fn list_all(&self) -> Vec<DonorRecord> {
        let Some(blob) = self.store.load().await else {
            return Vec::new();
        };
        serde_json::from_str(&blob).unwrap_or_default()
    }

    /// Validate `record` and append it to the collection.
    ///
    /// Checks the coordinate invariants and id uniqueness before writing;
    /// on any failure the stored collection is left untouched.
    pub async fn append(&self, record: DonorRecord) -> Result<(), StoreError> {
        record.validate()?;

        let mut donors = self.list_all().await;
        if donors.iter().any(|d| d.id == record.id) {
            return Err(InvalidRecord::DuplicateId(record.id).into());
        }
        donors.push(record);

        let blob = serde_json::to_string(&donors)?;
        self.store.save(&blob).await
    }

    /// Allocate an identifier that is unique across the stored collection.
    ///
    /// Milliseconds since the epoch, like the ids already in circulation, but
    /// bumped past the highest existing id so rapid consecutive submissions
    /// within the same millisecond cannot collide.
    pub async fn allocate_id(&self) -> u64 {
        let now = Utc::now().timestamp_millis().max(0) as u64;
        let max_existing = self
            .list_all()
            .await
            .iter()
            .map(|d| d.id)
            .max()
            .unwrap_or(0);
        now.max(max_existing + 1)
    }
}
