//! Donor locator page: the filter, the donor list, and the map.
//!
//! List rows and map markers are both re-derived from the stored collection
//! whenever the donors load or the filter changes.

use dioxus::prelude::*;

use store::{DonorRecord, GroupFilter};
use ui::{filter_records, MarkerSet};

use crate::platform::{self, MapHandle};

const MAP_ELEMENT_ID: &str = "map";

/// Re-render the markers for the current donors and filter. Does nothing
/// until the map has mounted.
fn refresh_markers(
    donors: Signal<Vec<DonorRecord>>,
    filter: Signal<GroupFilter>,
    mut markers: Signal<Option<MarkerSet<MapHandle>>>,
) {
    let visible = filter_records(&donors.peek(), *filter.peek());
    if let Some(markers) = &mut *markers.write() {
        markers.render(&visible);
    }
}

#[component]
pub fn Locator() -> Element {
    let mut donors = use_signal(Vec::<DonorRecord>::new);
    let mut filter = use_signal(|| GroupFilter::All);
    let mut markers = use_signal(|| None::<MarkerSet<MapHandle>>);

    // Load the stored collection once.
    let _donors_resource = use_resource(move || async move {
        let loaded = ui::make_registry().list_all().await;
        tracing::debug!(count = loaded.len(), "donor collection loaded");
        donors.set(loaded);
        refresh_markers(donors, filter, markers);
    });

    // Mount the map after the first render put its element in the document.
    use_effect(move || {
        if markers.peek().is_none() {
            if let Some(map) = platform::mount_map(MAP_ELEMENT_ID) {
                markers.set(Some(MarkerSet::new(map)));
                refresh_markers(donors, filter, markers);
            }
        }
    });

    let visible = filter_records(&donors.read(), filter());
    let map_ready = markers.read().is_some();

    rsx! {
        section { class: "locator",
            h1 { "Find Blood Donors" }

            div { class: "filter-bar",
                label { r#for: "group-filter", "Blood group:" }
                select {
                    id: "group-filter",
                    class: "input",
                    value: "{filter}",
                    onchange: move |evt| {
                        if let Ok(parsed) = evt.value().parse::<GroupFilter>() {
                            filter.set(parsed);
                            refresh_markers(donors, filter, markers);
                        }
                    },
                    option { value: "all", "All Blood Groups" }
                    for group in store::BloodGroup::ALL {
                        option { value: "{group}", "{group}" }
                    }
                }
            }

            div { id: MAP_ELEMENT_ID, class: "map",
                if !map_ready {
                    div { class: "map-placeholder",
                        "Map is unavailable. Matching donors are listed below."
                    }
                }
            }

            div { class: "donor-list",
                if visible.is_empty() {
                    p { class: "no-donors", "No donors found matching criteria." }
                } else {
                    for donor in visible {
                        div { class: "donor-card", key: "{donor.id}",
                            span { class: "donor-group", "{donor.blood_group}" }
                            div { class: "donor-details",
                                h3 { "{donor.name}" }
                                p { "Age: {donor.age}" }
                                p { "{donor.address}" }
                                a { class: "donor-contact", href: "tel:{donor.contact}",
                                    "{donor.contact}"
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
