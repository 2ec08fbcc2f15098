//! Shared registry constructor for all platforms.
//!
//! Returns a [`store::DonorRegistry`] backed by the appropriate
//! [`store::DonorStore`]:
//! - **Web** (WASM + `web` feature): localStorage via [`store::LocalStore`]
//! - **Desktop** (native): a blob file via [`store::FileStore`]

/// Create a platform-appropriate donor registry.
pub fn make_registry() -> store::DonorRegistry<impl store::DonorStore> {
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    {
        store::DonorRegistry::new(store::LocalStore::new())
    }
    #[cfg(not(all(target_arch = "wasm32", feature = "web")))]
    {
        let path = dirs::data_dir()
            .unwrap_or_else(|| std::path::PathBuf::from("."))
            .join("bloodconnect")
            .join("donors.json");
        store::DonorRegistry::new(store::FileStore::new(path))
    }
}
