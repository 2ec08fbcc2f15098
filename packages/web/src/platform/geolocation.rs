//! `navigator.geolocation` as an [`api::LocationProvider`].

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

use api::{CaptureOptions, LocationError, LocationProvider, Position};

pub struct DeviceLocation;

impl LocationProvider for DeviceLocation {
    async fn current_position(&self, options: &CaptureOptions) -> Result<Position, LocationError> {
        let geolocation = web_sys::window()
            .and_then(|window| window.navigator().geolocation().ok())
            .ok_or(LocationError::Unavailable)?;

        let position_options = web_sys::PositionOptions::new();
        position_options.set_enable_high_accuracy(options.high_accuracy);
        position_options.set_timeout(options.timeout.as_millis() as u32);
        position_options.set_maximum_age(options.maximum_age.as_millis() as u32);

        let promise = js_sys::Promise::new(&mut |resolve, reject| {
            let on_position = Closure::once_into_js(move |position: JsValue| {
                let _ = resolve.call1(&JsValue::UNDEFINED, &position);
            });
            let on_error = Closure::once_into_js(move |error: JsValue| {
                let _ = reject.call1(&JsValue::UNDEFINED, &error);
            });
            let _ = geolocation.get_current_position_with_error_callback_and_options(
                on_position.unchecked_ref(),
                Some(on_error.unchecked_ref()),
                &position_options,
            );
        });

        match JsFuture::from(promise).await {
            Ok(value) => {
                let position: web_sys::Position =
                    value.dyn_into().map_err(|_| LocationError::Unavailable)?;
                let coords = position.coords();
                Ok(Position {
                    lat: coords.latitude(),
                    lng: coords.longitude(),
                    accuracy_m: coords.accuracy(),
                })
            }
            Err(error) => Err(map_position_error(&error)),
        }
    }
}

fn map_position_error(error: &JsValue) -> LocationError {
    match error.dyn_ref::<web_sys::PositionError>().map(|e| e.code()) {
        Some(web_sys::PositionError::PERMISSION_DENIED) => LocationError::PermissionDenied,
        Some(web_sys::PositionError::TIMEOUT) => LocationError::TimedOut,
        _ => LocationError::Unavailable,
    }
}
