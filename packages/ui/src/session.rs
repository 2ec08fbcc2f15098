//! Identity session context for the UI.
//!
//! The session is page-scoped: it starts empty, is filled when the identity
//! provider delivers an assertion, and a reload clears it. Nothing here is
//! persisted.

use api::{decode_assertion, IdentitySession};
use dioxus::prelude::*;

/// Sign-in state for the application.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SessionState {
    pub session: Option<IdentitySession>,
    /// User-facing message from the last failed sign-in attempt.
    pub error: Option<String>,
}

/// Get the current session state.
/// Returns a signal that updates when the user signs in.
pub fn use_session() -> Signal<SessionState> {
    use_context::<Signal<SessionState>>()
}

/// Provider component that holds the session state.
/// Wrap the app with this component to enable sign-in.
#[component]
pub fn SessionProvider(children: Element) -> Element {
    let session_state = use_signal(SessionState::default);
    use_context_provider(|| session_state);

    rsx! {
        {children}
    }
}

/// The single identity callback: decode the provider's assertion and install
/// the session. A rejected assertion surfaces as a sign-in error instead of
/// faulting the page.
pub fn on_identity(mut state: Signal<SessionState>, assertion: &str) {
    match decode_assertion(assertion) {
        Ok(session) => state.set(SessionState { session: Some(session), error: None }),
        Err(err) => {
            tracing::warn!("identity assertion rejected: {err}");
            state.set(SessionState { session: None, error: Some(err.to_string()) });
        }
    }
}
