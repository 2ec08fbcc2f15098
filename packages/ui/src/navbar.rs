use dioxus::prelude::*;

#[component]
pub fn Navbar(children: Element) -> Element {
    rsx! {
        nav {
            class: "navbar",
            span { class: "navbar-brand", "BloodConnect" }
            div {
                class: "navbar-links",
                {children}
            }
        }
    }
}
