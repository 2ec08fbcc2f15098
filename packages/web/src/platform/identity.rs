//! Google Identity Services binding. Renders the sign-in button and hands
//! the raw credential assertion back to the caller.

use wasm_bindgen::prelude::*;

use super::js::{global_path_exists, obj};

const CLIENT_ID: &str =
    "983746584602-386n53g0jts7ok670dkdvpe0m8t4rtm1.apps.googleusercontent.com";

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = ["google", "accounts", "id"], js_name = initialize)]
    fn gsi_initialize(config: &JsValue);

    #[wasm_bindgen(js_namespace = ["google", "accounts", "id"], js_name = renderButton)]
    fn gsi_render_button(parent: &web_sys::Element, options: &JsValue);
}

/// Initialize the identity provider and render its button into the element
/// with `container_id`. Returns `false` when the provider script has not
/// loaded yet or the container is missing; callers retry.
pub fn mount_sign_in(container_id: &str, on_credential: impl FnMut(String) + 'static) -> bool {
    if !global_path_exists(&["google", "accounts", "id"]) {
        return false;
    }
    let Some(document) = web_sys::window().and_then(|window| window.document()) else {
        return false;
    };
    let Some(container) = document.get_element_by_id(container_id) else {
        return false;
    };

    let mut on_credential = on_credential;
    let callback = Closure::<dyn FnMut(JsValue)>::new(move |response: JsValue| {
        let assertion = js_sys::Reflect::get(&response, &JsValue::from_str("credential"))
            .ok()
            .and_then(|value| value.as_string());
        match assertion {
            Some(assertion) => on_credential(assertion),
            None => tracing::warn!("credential response without a credential field"),
        }
    });

    let config = obj(&[
        ("client_id", JsValue::from_str(CLIENT_ID)),
        ("callback", callback.as_ref().clone()),
    ]);
    gsi_initialize(&config);
    // The provider keeps calling back for the lifetime of the page.
    callback.forget();

    let options = obj(&[
        ("theme", JsValue::from_str("outline")),
        ("size", JsValue::from_str("large")),
        ("text", JsValue::from_str("sign_in_with")),
        ("shape", JsValue::from_str("rectangular")),
    ]);
    gsi_render_button(&container, &options);
    true
}
