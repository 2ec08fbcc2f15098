//! This crate contains all shared UI for the workspace.

pub mod components;

mod donors;
pub use donors::make_registry;

mod session;
pub use session::{on_identity, use_session, SessionProvider, SessionState};

pub mod locator;
pub use locator::{apply_filter, filter_records, MapSurface, MarkerSet};

mod navbar;
pub use navbar::Navbar;
