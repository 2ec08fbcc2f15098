//! # localStorage donor store: browser-side persistence
//!
//! [`LocalStore`] is the [`DonorStore`] implementation used on the **web
//! platform**. The whole donor collection lives as one JSON string under the
//! [`DONORS_KEY`] localStorage key, which is also where earlier versions of
//! the app kept it, so existing data keeps working.
//!
//! ## Error handling
//!
//! Reads silently swallow errors and report `None`: an unavailable or
//! blocked localStorage degrades to "no donors yet" rather than crashing the
//! page. Writes are fallible, because losing a registration must surface to
//! the user.
//!
//! ## Known limitation
//!
//! `append` on the registry is read-modify-write over this single key with no
//! cross-tab locking; two tabs writing concurrently can lose one update.
//! Single-tab usage assumed.

use crate::registry::{DonorStore, StoreError, DONORS_KEY};

/// localStorage-backed DonorStore for the web platform.
#[derive(Clone, Debug, Default)]
pub struct LocalStore;

impl LocalStore {
    pub fn new() -> Self {
        Self
    }

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }
}

impl DonorStore for LocalStore {
    async fn load(&self) -> Option<String> {
        Self::storage()?.get_item(DONORS_KEY).ok().flatten()
    }

    async fn save(&self, blob: &str) -> Result<(), StoreError> {
        let storage = Self::storage()
            .ok_or_else(|| StoreError::Backend("localStorage is unavailable".to_string()))?;
        storage
            .set_item(DONORS_KEY, blob)
            .map_err(|e| StoreError::Backend(format!("{e:?}")))
    }
}
