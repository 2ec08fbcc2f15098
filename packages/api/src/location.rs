//! # Device location capture
//!
//! One-shot, retry-free capture of the device position, with a small state
//! machine the UI drives:
//!
//! ```text
//! Idle ──begin()──▶ Requesting ──complete(Ok)──▶ Resolved
//!                        │
//!                        └─────complete(Err)──▶ Failed
//! ```
//!
//! `begin()` refuses to start while a capture is already `Requesting`, which
//! coalesces concurrent triggers; either terminal state restarts on the next
//! `begin()`.
//!
//! [`resolve_location`] does the actual work: ask the [`LocationProvider`]
//! for a fresh position, then attempt a best-effort reverse geocode. Reverse
//! failure never discards the resolved coordinates; only the derived address
//! text is omitted, and [`CapturedLocation::display_address`] falls back to
//! showing the coordinates.

use std::time::Duration;

use crate::geocode::Geocoder;

/// Options for a single capture.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CaptureOptions {
    pub high_accuracy: bool,
    /// How long to wait for the device before giving up.
    pub timeout: Duration,
    /// Maximum acceptable age of an OS-cached position. Zero means every
    /// capture must be fresh.
    pub maximum_age: Duration,
}

impl Default for CaptureOptions {
    fn default() -> Self {
        Self {
            high_accuracy: true,
            timeout: Duration::from_secs(10),
            maximum_age: Duration::ZERO,
        }
    }
}

/// A device position with its reported accuracy.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Position {
    pub lat: f64,
    pub lng: f64,
    /// Accuracy radius in meters, as reported by the device.
    pub accuracy_m: f64,
}

/// Why a capture failed. Messages are shown to the user as-is.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LocationError {
    #[error("location access was denied; please allow location access and try again")]
    PermissionDenied,
    #[error("location information is unavailable")]
    Unavailable,
    #[error("the location request timed out")]
    TimedOut,
}

/// One-shot device positioning.
///
/// The provider honors [`CaptureOptions`] itself (timeout included), so a
/// call either resolves or fails within the configured window.
pub trait LocationProvider {
    fn current_position(
        &self,
        options: &CaptureOptions,
    ) -> impl std::future::Future<Output = Result<Position, LocationError>>;
}

/// A resolved position plus the best-effort reverse-geocoded address.
#[derive(Clone, Debug, PartialEq)]
pub struct CapturedLocation {
    pub position: Position,
    /// `None` when reverse geocoding failed; the coordinates still stand.
    pub address: Option<String>,
}

impl CapturedLocation {
    /// The address text to show, falling back to a coordinate display when
    /// reverse geocoding produced nothing.
    pub fn display_address(&self) -> String {
        match &self.address {
            Some(a) => a.clone(),
            None => format!("{:.6}, {:.6}", self.position.lat, self.position.lng),
        }
    }
}

/// The capture lifecycle as the UI sees it.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum CaptureState {
    #[default]
    Idle,
    Requesting,
    Resolved(CapturedLocation),
    Failed(LocationError),
}

impl CaptureState {
    /// Enter `Requesting`. Returns `false` when a capture is already in
    /// flight, coalescing the trigger.
    pub fn begin(&mut self) -> bool {
        if matches!(self, CaptureState::Requesting) {
            return false;
        }
        *self = CaptureState::Requesting;
        true
    }

    /// Apply the outcome of the capture started by [`begin`](Self::begin).
    pub fn complete(&mut self, outcome: Result<CapturedLocation, LocationError>) {
        *self = match outcome {
            Ok(captured) => CaptureState::Resolved(captured),
            Err(err) => CaptureState::Failed(err),
        };
    }

    pub fn is_requesting(&self) -> bool {
        matches!(self, CaptureState::Requesting)
    }

    pub fn resolved(&self) -> Option<&CapturedLocation> {
        match self {
            CaptureState::Resolved(captured) => Some(captured),
            _ => None,
        }
    }
}

/// Capture a fresh position and reverse-geocode it, best-effort.
pub async fn resolve_location<P, G>(
    provider: &P,
    geocoder: &G,
    options: &CaptureOptions,
) -> Result<CapturedLocation, LocationError>
where
    P: LocationProvider,
    G: Geocoder,
{
    let position = provider.current_position(options).await?;

    let address = match geocoder.reverse(position.lat, position.lng).await {
        Ok(formatted) => Some(formatted),
        Err(err) => {
            tracing::warn!("reverse geocoding failed: {err}");
            None
        }
    };

    Ok(CapturedLocation { position, address })
}
