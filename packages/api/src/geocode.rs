//! # Geocoding boundary
//!
//! Address ↔ coordinate translation, isolated behind a two-function trait so
//! the registration flow and location capture never see the provider. Both
//! operations are single-shot: no retry, no caching.

use serde::{Deserialize, Serialize};

/// A latitude/longitude pair.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// Why a geocoding request produced no coordinates or address.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeocodeError {
    /// The provider script is not loaded on this page.
    #[error("the geocoding service is not available")]
    ServiceUnavailable,
    /// The provider reported a non-success status for the request.
    #[error("geocoding was not successful: {0}")]
    NoMatch(String),
}

/// Async address ↔ coordinate translation.
pub trait Geocoder {
    /// Resolve a free-text address to coordinates.
    fn forward(
        &self,
        address: &str,
    ) -> impl std::future::Future<Output = Result<Coordinates, GeocodeError>>;

    /// Resolve coordinates to the first formatted-address result.
    fn reverse(
        &self,
        lat: f64,
        lng: f64,
    ) -> impl std::future::Future<Output = Result<String, GeocodeError>>;
}
