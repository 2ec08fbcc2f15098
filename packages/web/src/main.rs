use dioxus::prelude::*;

use ui::{Navbar, SessionProvider};
use views::{Locator, Register};

mod platform;
mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(Shell)]
        #[route("/")]
        Root {},
        #[route("/register")]
        Register {},
        #[route("/locator")]
        Locator {},
}

const FAVICON: Asset = asset!("/assets/favicon.ico");
const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        // Global app resources
        document::Link { rel: "icon", href: FAVICON }
        document::Link { rel: "stylesheet", href: MAIN_CSS }
        // Provider scripts load asynchronously; the platform layer polls for
        // their globals before using them.
        document::Script { src: "https://accounts.google.com/gsi/client" }
        document::Script { src: "https://maps.googleapis.com/maps/api/js?key=YOUR_API_KEY" }

        SessionProvider {
            Router::<Route> {}
        }
    }
}

/// Navbar above every page.
#[component]
fn Shell() -> Element {
    rsx! {
        Navbar {
            Link { class: "nav-link", to: Route::Register {}, "Become a Donor" }
            Link { class: "nav-link", to: Route::Locator {}, "Find Donors" }
        }
        Outlet::<Route> {}
    }
}

/// Redirect `/` to `/register`
#[component]
fn Root() -> Element {
    let nav = use_navigator();
    nav.replace(Route::Register {});
    rsx! {}
}
