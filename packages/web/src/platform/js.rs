//! Small helpers for talking to plain JS objects.

use wasm_bindgen::JsValue;

/// Build a JS object literal from key/value pairs.
pub fn obj(entries: &[(&str, JsValue)]) -> JsValue {
    let target = js_sys::Object::new();
    for (key, value) in entries {
        let _ = js_sys::Reflect::set(&target, &JsValue::from_str(key), value);
    }
    target.into()
}

/// A `{ lat, lng }` literal, the shape the maps API expects.
pub fn lat_lng(lat: f64, lng: f64) -> JsValue {
    obj(&[("lat", lat.into()), ("lng", lng.into())])
}

/// Walk `window.<path[0]>.<path[1]>...` and report whether every segment is
/// present. Provider scripts load asynchronously, so globals appear late.
pub fn global_path_exists(path: &[&str]) -> bool {
    let Some(window) = web_sys::window() else {
        return false;
    };
    let mut current: JsValue = window.into();
    for segment in path {
        let Ok(next) = js_sys::Reflect::get(&current, &JsValue::from_str(segment)) else {
            return false;
        };
        if next.is_undefined() || next.is_null() {
            return false;
        }
        current = next;
    }
    true
}
