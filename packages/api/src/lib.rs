//! # API crate: external collaborators and the registration flow
//!
//! Everything the frontend needs that is not storage lives here: the narrow
//! contracts for the identity, geocoding, and device-location providers, and
//! the registration flow that merges their outputs into a donor record.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`identity`] | Decoding the provider's signed identity assertion into a page-session [`IdentitySession`] |
//! | [`geocode`] | The two-operation [`Geocoder`] boundary (forward/reverse) and its error taxonomy |
//! | [`location`] | One-shot device location capture: options, state machine, best-effort reverse geocoding |
//! | [`registration`] | [`RegistrationFlow::submit`]: precondition checks, coordinate resolution, persistence |
//!
//! The provider traits keep the core provider-agnostic: the browser bindings
//! in the `web` crate implement them against Google's APIs, and the tests
//! implement them with fakes.

pub mod geocode;
pub mod identity;
pub mod location;
pub mod registration;

pub use geocode::{Coordinates, GeocodeError, Geocoder};
pub use identity::{decode_assertion, IdentityError, IdentitySession};
pub use location::{
    resolve_location, CaptureOptions, CaptureState, CapturedLocation, LocationError,
    LocationProvider, Position,
};
pub use registration::{RegistrationFlow, RegistrationInput, SubmitError};
