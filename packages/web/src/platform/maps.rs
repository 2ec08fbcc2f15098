//! Bindings to the Google Maps JS API: the donor map with its markers and
//! info windows, and the geocoder behind address lookups.

use store::DonorRecord;
use ui::MapSurface;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

use api::{Coordinates, GeocodeError};

use super::js::{global_path_exists, lat_lng, obj};

// Default viewport when no donor is selected.
const CENTER_LAT: f64 = 40.7128;
const CENTER_LNG: f64 = -74.0060;
const DEFAULT_ZOOM: f64 = 12.0;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = ["google", "maps"], js_name = Map)]
    type JsMap;

    #[wasm_bindgen(constructor, js_namespace = ["google", "maps"], js_class = "Map")]
    fn new(element: &web_sys::Element, options: &JsValue) -> JsMap;
}

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = ["google", "maps"], js_name = Marker)]
    type JsMarker;

    #[wasm_bindgen(constructor, js_namespace = ["google", "maps"], js_class = "Marker")]
    fn new(options: &JsValue) -> JsMarker;

    #[wasm_bindgen(method, js_name = setMap)]
    fn set_map(this: &JsMarker, map: &JsValue);

    #[wasm_bindgen(method, js_name = addListener)]
    fn add_listener(this: &JsMarker, event: &str, handler: &js_sys::Function);
}

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = ["google", "maps"], js_name = InfoWindow)]
    type JsInfoWindow;

    #[wasm_bindgen(constructor, js_namespace = ["google", "maps"], js_class = "InfoWindow")]
    fn new(options: &JsValue) -> JsInfoWindow;

    #[wasm_bindgen(method)]
    fn open(this: &JsInfoWindow, map: &JsMap, anchor: &JsMarker);
}

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = ["google", "maps"], js_name = Geocoder)]
    type JsGeocoder;

    #[wasm_bindgen(constructor, js_namespace = ["google", "maps"], js_class = "Geocoder")]
    fn new() -> JsGeocoder;

    #[wasm_bindgen(method)]
    fn geocode(this: &JsGeocoder, request: &JsValue, callback: &js_sys::Function);
}

fn maps_loaded() -> bool {
    global_path_exists(&["google", "maps"])
}

/// `api::Geocoder` backed by `google.maps.Geocoder`.
pub struct MapsGeocoder;

impl MapsGeocoder {
    /// Run one geocode request and return the first result.
    async fn first_result(request: JsValue) -> Result<JsValue, GeocodeError> {
        if !maps_loaded() {
            return Err(GeocodeError::ServiceUnavailable);
        }
        let geocoder = JsGeocoder::new();
        let promise = js_sys::Promise::new(&mut |resolve, _reject| {
            let callback = Closure::once_into_js(move |results: JsValue, status: JsValue| {
                let settled = js_sys::Array::of2(&results, &status);
                let _ = resolve.call1(&JsValue::UNDEFINED, &settled);
            });
            geocoder.geocode(&request, callback.unchecked_ref());
        });
        let settled = JsFuture::from(promise)
            .await
            .map_err(|_| GeocodeError::ServiceUnavailable)?;
        let settled = js_sys::Array::from(&settled);
        let status = settled.get(1).as_string().unwrap_or_default();
        if status != "OK" {
            return Err(GeocodeError::NoMatch(status));
        }
        let first = settled
            .get(0)
            .dyn_into::<js_sys::Array>()
            .map(|results| results.get(0))
            .unwrap_or(JsValue::UNDEFINED);
        if first.is_undefined() || first.is_null() {
            return Err(GeocodeError::NoMatch("empty result set".to_string()));
        }
        Ok(first)
    }
}

fn malformed() -> GeocodeError {
    GeocodeError::NoMatch("malformed geocoder response".to_string())
}

fn field(value: &JsValue, key: &str) -> Result<JsValue, GeocodeError> {
    js_sys::Reflect::get(value, &JsValue::from_str(key)).map_err(|_| malformed())
}

/// Call a zero-argument method and read the result as a number. The maps API
/// exposes `location.lat()` / `location.lng()` as functions.
fn call_number(value: &JsValue, key: &str) -> Result<f64, GeocodeError> {
    let method = field(value, key)?
        .dyn_into::<js_sys::Function>()
        .map_err(|_| malformed())?;
    method
        .call0(value)
        .ok()
        .and_then(|n| n.as_f64())
        .ok_or_else(malformed)
}

impl api::Geocoder for MapsGeocoder {
    async fn forward(&self, address: &str) -> Result<Coordinates, GeocodeError> {
        let request = obj(&[("address", JsValue::from_str(address))]);
        let first = Self::first_result(request).await?;
        let geometry = field(&first, "geometry")?;
        let location = field(&geometry, "location")?;
        Ok(Coordinates {
            lat: call_number(&location, "lat")?,
            lng: call_number(&location, "lng")?,
        })
    }

    async fn reverse(&self, lat: f64, lng: f64) -> Result<String, GeocodeError> {
        let request = obj(&[("location", lat_lng(lat, lng))]);
        let first = Self::first_result(request).await?;
        field(&first, "formatted_address")?
            .as_string()
            .ok_or_else(malformed)
    }
}

/// A mounted map. Dropping a [`DonorMarker`] detaches it from the map and
/// releases its click handler.
pub struct DonorMap {
    map: JsMap,
}

pub struct DonorMarker {
    marker: JsMarker,
    _click: Closure<dyn FnMut()>,
}

impl DonorMap {
    /// Mount a map into the element with `element_id`. `None` when the maps
    /// script has not loaded or the element is missing.
    pub fn mount(element_id: &str) -> Option<Self> {
        if !maps_loaded() {
            return None;
        }
        let document = web_sys::window()?.document()?;
        let element = document.get_element_by_id(element_id)?;
        let options = obj(&[
            ("zoom", DEFAULT_ZOOM.into()),
            ("center", lat_lng(CENTER_LAT, CENTER_LNG)),
        ]);
        Some(Self {
            map: JsMap::new(&element, &options),
        })
    }
}

impl MapSurface for DonorMap {
    type Marker = DonorMarker;

    fn add_marker(&self, donor: &DonorRecord) -> DonorMarker {
        let title = format!("{} Donor", donor.blood_group);
        let marker = JsMarker::new(&obj(&[
            ("position", lat_lng(donor.lat, donor.lng)),
            ("map", self.map.clone().into()),
            ("title", JsValue::from_str(&title)),
        ]));

        let content = format!(
            "<div class=\"marker-info\">\
             <h3>{} Donor</h3>\
             <p><strong>Location:</strong> {}</p>\
             <p><strong>Contact:</strong> {}</p>\
             </div>",
            donor.blood_group, donor.address, donor.contact
        );
        let info = JsInfoWindow::new(&obj(&[("content", JsValue::from_str(&content))]));

        let map = self.map.clone();
        let anchor = marker.clone();
        let click = Closure::<dyn FnMut()>::new(move || {
            info.open(&map, &anchor);
        });
        marker.add_listener("click", click.as_ref().unchecked_ref());

        DonorMarker {
            marker,
            _click: click,
        }
    }

    fn remove_marker(&self, marker: DonorMarker) {
        marker.marker.set_map(&JsValue::NULL);
    }
}
