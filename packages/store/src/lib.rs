pub mod models;
pub mod registry;

mod memory;
pub use memory::MemoryStore;

mod file;
pub use file::FileStore;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod local;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use local::LocalStore;

pub use models::{BloodGroup, DonorRecord, GroupFilter, InvalidRecord, UnknownBloodGroup};
pub use registry::{DonorRegistry, DonorStore, StoreError, DONORS_KEY};
