//! # Locator projection: one collection, two views
//!
//! The locator shows the same filtered donor set twice: as list rows and as
//! map markers. Both projections are re-derived from scratch on every filter
//! change; no incremental diffing, which is fine at the record counts a
//! single browser holds.
//!
//! [`MarkerSet`] owns the marker lifecycle: every marker created by a
//! previous render is released before the next render adds its own, so N
//! consecutive filter changes leave exactly one marker per matching record
//! and nothing accumulates on the map.

use store::{DonorRecord, GroupFilter};

/// The marker primitives the locator needs from a map provider.
///
/// `Marker` is whatever handle the provider uses to identify an overlay;
/// releasing it must remove the overlay from the map.
pub trait MapSurface {
    type Marker;

    /// Create a point marker for one donor (title and click-activated detail
    /// popup included, where the provider supports them).
    fn add_marker(&self, donor: &DonorRecord) -> Self::Marker;

    /// Release a marker created by [`add_marker`](Self::add_marker).
    fn remove_marker(&self, marker: Self::Marker);
}

/// The set of currently live markers on a [`MapSurface`].
pub struct MarkerSet<M: MapSurface> {
    surface: M,
    live: Vec<M::Marker>,
}

impl<M: MapSurface> MarkerSet<M> {
    pub fn new(surface: M) -> Self {
        Self { surface, live: Vec::new() }
    }

    /// Replace the live markers with one marker per donor.
    ///
    /// Previous markers are released first; after this call exactly
    /// `donors.len()` markers exist.
    pub fn render(&mut self, donors: &[DonorRecord]) {
        for marker in self.live.drain(..) {
            self.surface.remove_marker(marker);
        }
        self.live = donors.iter().map(|d| self.surface.add_marker(d)).collect();
    }

    /// Number of live markers.
    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    pub fn surface(&self) -> &M {
        &self.surface
    }
}

/// Project the collection through a filter, preserving insertion order.
pub fn filter_records(donors: &[DonorRecord], filter: GroupFilter) -> Vec<DonorRecord> {
    donors.iter().filter(|d| filter.matches(d)).cloned().collect()
}

/// Re-derive both views for a filter change: returns the list rows and
/// renders the matching markers.
pub fn apply_filter<M: MapSurface>(
    markers: &mut MarkerSet<M>,
    donors: &[DonorRecord],
    filter: GroupFilter,
) -> Vec<DonorRecord> {
    let visible = filter_records(donors, filter);
    markers.render(&visible);
    visible
}
