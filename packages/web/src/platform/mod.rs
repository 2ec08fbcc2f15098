//! Platform providers for the web crate.
//!
//! On wasm these are real bindings to the browser APIs and the Google
//! provider scripts; on native builds they are inert fallbacks so the same
//! views compile and degrade the way the web page does when a provider
//! script is missing.

#[cfg(target_arch = "wasm32")]
mod geolocation;
#[cfg(target_arch = "wasm32")]
mod identity;
#[cfg(target_arch = "wasm32")]
mod js;
#[cfg(target_arch = "wasm32")]
mod maps;

#[cfg(target_arch = "wasm32")]
pub use identity::mount_sign_in;

/// The map type behind the locator's [`ui::MarkerSet`].
#[cfg(target_arch = "wasm32")]
pub type MapHandle = maps::DonorMap;
#[cfg(not(target_arch = "wasm32"))]
pub type MapHandle = NoMap;

/// The platform geocoder.
#[cfg(target_arch = "wasm32")]
pub fn geocoder() -> impl api::Geocoder {
    maps::MapsGeocoder
}
#[cfg(not(target_arch = "wasm32"))]
pub fn geocoder() -> impl api::Geocoder {
    OfflineGeocoder
}

/// The platform device-location provider.
#[cfg(target_arch = "wasm32")]
pub fn location_provider() -> impl api::LocationProvider {
    geolocation::DeviceLocation
}
#[cfg(not(target_arch = "wasm32"))]
pub fn location_provider() -> impl api::LocationProvider {
    NoDeviceLocation
}

/// Mount the donor map into the element with `element_id`.
/// `None` when no map provider is available; the locator then shows the
/// list-only fallback.
#[cfg(target_arch = "wasm32")]
pub fn mount_map(element_id: &str) -> Option<MapHandle> {
    maps::DonorMap::mount(element_id)
}
#[cfg(not(target_arch = "wasm32"))]
pub fn mount_map(_element_id: &str) -> Option<MapHandle> {
    None
}

/// Render the sign-in button. Native builds have no identity provider.
#[cfg(not(target_arch = "wasm32"))]
pub fn mount_sign_in(_container_id: &str, _on_credential: impl FnMut(String) + 'static) -> bool {
    false
}

#[cfg(not(target_arch = "wasm32"))]
struct OfflineGeocoder;

#[cfg(not(target_arch = "wasm32"))]
impl api::Geocoder for OfflineGeocoder {
    async fn forward(&self, _address: &str) -> Result<api::Coordinates, api::GeocodeError> {
        Err(api::GeocodeError::ServiceUnavailable)
    }

    async fn reverse(&self, _lat: f64, _lng: f64) -> Result<String, api::GeocodeError> {
        Err(api::GeocodeError::ServiceUnavailable)
    }
}

#[cfg(not(target_arch = "wasm32"))]
struct NoDeviceLocation;

#[cfg(not(target_arch = "wasm32"))]
impl api::LocationProvider for NoDeviceLocation {
    async fn current_position(
        &self,
        _options: &api::CaptureOptions,
    ) -> Result<api::Position, api::LocationError> {
        Err(api::LocationError::Unavailable)
    }
}

/// Marker surface that never gets instantiated; it only gives the locator a
/// concrete map type on native builds.
#[cfg(not(target_arch = "wasm32"))]
pub struct NoMap;

#[cfg(not(target_arch = "wasm32"))]
impl ui::MapSurface for NoMap {
    type Marker = ();

    fn add_marker(&self, _donor: &store::DonorRecord) {}

    fn remove_marker(&self, _marker: ()) {}
}
