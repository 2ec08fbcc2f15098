//! Donor registration page: sign-in, the form, and location capture.

use dioxus::prelude::*;

use api::{CaptureOptions, CaptureState, RegistrationFlow, RegistrationInput};
use store::BloodGroup;
use ui::components::{Button, ButtonVariant, Input};
use ui::use_session;

use crate::platform;

/// Kick off one location capture. No-op while a capture is in flight.
fn start_capture(mut capture: Signal<CaptureState>, mut address: Signal<String>) {
    if !capture.write().begin() {
        return;
    }
    spawn(async move {
        let outcome = api::resolve_location(
            &platform::location_provider(),
            &platform::geocoder(),
            &CaptureOptions::default(),
        )
        .await;
        if let Ok(captured) = &outcome {
            if let Some(formatted) = &captured.address {
                address.set(formatted.clone());
            }
        }
        capture.write().complete(outcome);
    });
}

#[component]
pub fn Register() -> Element {
    let session = use_session();

    let mut name = use_signal(String::new);
    let mut age = use_signal(String::new);
    let mut blood_group = use_signal(String::new);
    let mut contact = use_signal(String::new);
    let mut address = use_signal(String::new);

    let mut capture = use_signal(CaptureState::default);
    let mut submitting = use_signal(|| false);
    let mut submit_error = use_signal(|| None::<String>);
    let mut registered = use_signal(|| false);

    // Mount the sign-in button once its container exists. The provider
    // script loads asynchronously, so poll briefly.
    use_effect(move || {
        #[cfg(target_arch = "wasm32")]
        {
            spawn(async move {
                for _ in 0..50 {
                    if session.peek().session.is_some() {
                        return;
                    }
                    let mounted = platform::mount_sign_in("google-sign-in", move |assertion| {
                        ui::on_identity(session, &assertion);
                    });
                    if mounted {
                        return;
                    }
                    gloo_timers::future::sleep(std::time::Duration::from_millis(100)).await;
                }
                tracing::warn!("identity provider script never loaded");
            });
        }
    });

    // After sign-in: prefill the name and capture the location once.
    let mut prefilled = use_signal(|| false);
    use_effect(move || {
        let state = session();
        if let Some(active) = &state.session {
            if !*prefilled.peek() {
                prefilled.set(true);
                if name.peek().is_empty() {
                    name.set(active.name.clone());
                }
                start_capture(capture, address);
            }
        }
    });

    let submit = move |evt: FormEvent| {
        evt.prevent_default();
        if *submitting.peek() {
            return;
        }
        submitting.set(true);
        submit_error.set(None);
        registered.set(false);

        spawn(async move {
            let flow = RegistrationFlow::new(ui::make_registry(), platform::geocoder());
            let input = RegistrationInput {
                name: name.peek().clone(),
                age: age.peek().clone(),
                blood_group: blood_group.peek().clone(),
                contact: contact.peek().clone(),
                address: address.peek().clone(),
                location: capture.peek().resolved().map(|c| api::Coordinates {
                    lat: c.position.lat,
                    lng: c.position.lng,
                }),
            };
            let active = session.peek().session.clone();

            match flow.submit(active.as_ref(), &input).await {
                Ok(record) => {
                    tracing::info!(id = record.id, "donor registered");
                    registered.set(true);
                    name.set(String::new());
                    age.set(String::new());
                    blood_group.set(String::new());
                    contact.set(String::new());
                    address.set(String::new());
                    capture.set(CaptureState::Idle);
                }
                Err(err) => submit_error.set(Some(err.to_string())),
            }
            submitting.set(false);
        });
    };

    let state = session();
    let capture_state = capture();
    let capture_status = match &capture_state {
        CaptureState::Idle => None,
        CaptureState::Requesting => Some(("pending", "Requesting your location...".to_string())),
        CaptureState::Resolved(captured) => Some((
            "ok",
            format!(
                "Location captured (accuracy {:.0} m): {}",
                captured.position.accuracy_m,
                captured.display_address()
            ),
        )),
        CaptureState::Failed(err) => Some(("error", err.to_string())),
    };

    rsx! {
        section { class: "register",
            h1 { "Become a Blood Donor" }

            if let Some(active) = &state.session {
                p { class: "user-info", "Signed in as {active.name} ({active.email})" }
            } else {
                div { class: "sign-in",
                    p { "Sign in with Google to register as a donor." }
                    div { id: "google-sign-in" }
                    if let Some(err) = &state.error {
                        p { class: "form-message error", "{err}" }
                    }
                }
            }

            form { class: "register-form", onsubmit: submit,
                Input {
                    placeholder: "Full Name",
                    value: "{name}",
                    oninput: move |evt: FormEvent| name.set(evt.value()),
                }
                Input {
                    r#type: "number",
                    placeholder: "Age",
                    value: "{age}",
                    oninput: move |evt: FormEvent| age.set(evt.value()),
                }
                select {
                    class: "input",
                    value: "{blood_group}",
                    onchange: move |evt| blood_group.set(evt.value()),
                    option { value: "", "Select Blood Group" }
                    for group in BloodGroup::ALL {
                        option { value: "{group}", "{group}" }
                    }
                }
                Input {
                    r#type: "tel",
                    placeholder: "Contact Number",
                    value: "{contact}",
                    oninput: move |evt: FormEvent| contact.set(evt.value()),
                }
                Input {
                    placeholder: "Address",
                    value: "{address}",
                    oninput: move |evt: FormEvent| address.set(evt.value()),
                }

                div { class: "capture",
                    Button {
                        variant: ButtonVariant::Secondary,
                        disabled: capture_state.is_requesting(),
                        onclick: move |_| start_capture(capture, address),
                        if capture_state.is_requesting() {
                            "Getting your location..."
                        } else {
                            "Use My Current Location"
                        }
                    }
                    if let Some((kind, text)) = &capture_status {
                        p { class: "capture-status {kind}", "{text}" }
                    }
                }

                Button {
                    r#type: "submit",
                    disabled: submitting(),
                    if submitting() { "Registering..." } else { "Register as Donor" }
                }

                if let Some(err) = submit_error() {
                    p { class: "form-message error", "{err}" }
                }
                if registered() {
                    p { class: "form-message success",
                        "Thank you for registering! You can find yourself on the donor map."
                    }
                }
            }
        }
    }
}
