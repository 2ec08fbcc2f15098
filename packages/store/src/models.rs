//! # Domain models for donors
//!
//! Defines the data structures persisted by [`crate::DonorRegistry`] and the
//! filter type the locator uses to project them. Everything here is
//! `Serialize + Deserialize` because the whole collection is stored as one
//! JSON blob in client storage.
//!
//! ## Types
//!
//! | Type | Represents |
//! |------|-----------|
//! | [`BloodGroup`] | One of the eight ABO/Rh categories. Serialized as its display label (`"O+"`, `"AB-"`, ...). |
//! | [`DonorRecord`] | A single registered donor: identity reference, profile fields, coordinates, and an immutable registration timestamp. |
//! | [`GroupFilter`] | The locator filter: either `All` or one exact blood group. |
//! | [`InvalidRecord`] | The ways a record can violate the collection's invariants. |
//!
//! Serde field names keep the layout of the blob the app has always written
//! (`googleId`, `bloodGroup`, `registeredAt`, ...), so previously stored
//! collections keep parsing.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A standard ABO/Rh blood group.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BloodGroup {
    #[serde(rename = "A+")]
    APositive,
    #[serde(rename = "A-")]
    ANegative,
    #[serde(rename = "B+")]
    BPositive,
    #[serde(rename = "B-")]
    BNegative,
    #[serde(rename = "AB+")]
    AbPositive,
    #[serde(rename = "AB-")]
    AbNegative,
    #[serde(rename = "O+")]
    OPositive,
    #[serde(rename = "O-")]
    ONegative,
}

impl BloodGroup {
    /// Every group, in the order the registration form lists them.
    pub const ALL: [BloodGroup; 8] = [
        BloodGroup::APositive,
        BloodGroup::ANegative,
        BloodGroup::BPositive,
        BloodGroup::BNegative,
        BloodGroup::AbPositive,
        BloodGroup::AbNegative,
        BloodGroup::OPositive,
        BloodGroup::ONegative,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BloodGroup::APositive => "A+",
            BloodGroup::ANegative => "A-",
            BloodGroup::BPositive => "B+",
            BloodGroup::BNegative => "B-",
            BloodGroup::AbPositive => "AB+",
            BloodGroup::AbNegative => "AB-",
            BloodGroup::OPositive => "O+",
            BloodGroup::ONegative => "O-",
        }
    }
}

impl fmt::Display for BloodGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BloodGroup {
    type Err = UnknownBloodGroup;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BloodGroup::ALL
            .into_iter()
            .find(|g| g.as_str() == s)
            .ok_or_else(|| UnknownBloodGroup(s.to_string()))
    }
}

/// Error returned when a string is not one of the eight blood group labels.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown blood group: {0:?}")]
pub struct UnknownBloodGroup(pub String);

/// One registered donor.
///
/// Records are append-only: once created they are never mutated, and the
/// registry exposes no update or delete operation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DonorRecord {
    /// Unique within the collection; allocated from the current time in
    /// milliseconds, bumped past any existing id.
    pub id: u64,
    /// Subject identifier from the external identity provider.
    #[serde(rename = "googleId")]
    pub provider_id: String,
    /// Email from the external identity provider.
    #[serde(rename = "googleEmail")]
    pub provider_email: String,
    pub name: String,
    pub age: u8,
    #[serde(rename = "bloodGroup")]
    pub blood_group: BloodGroup,
    pub contact: String,
    /// Free-text address, either typed or reverse-geocoded.
    pub address: String,
    pub lat: f64,
    pub lng: f64,
    /// Creation time; immutable after the record is appended.
    #[serde(rename = "registeredAt")]
    pub registered_at: DateTime<Utc>,
}

impl DonorRecord {
    /// Check the per-record invariants: finite coordinates within the valid
    /// latitude/longitude ranges. Id uniqueness is checked by the registry,
    /// which can see the whole collection.
    pub fn validate(&self) -> Result<(), InvalidRecord> {
        if !self.lat.is_finite() || !self.lng.is_finite() {
            return Err(InvalidRecord::NonFiniteCoordinate);
        }
        if !(-90.0..=90.0).contains(&self.lat) {
            return Err(InvalidRecord::LatitudeOutOfRange(self.lat));
        }
        if !(-180.0..=180.0).contains(&self.lng) {
            return Err(InvalidRecord::LongitudeOutOfRange(self.lng));
        }
        Ok(())
    }
}

/// An invariant violation that keeps a record out of the collection.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvalidRecord {
    #[error("latitude {0} is outside [-90, 90]")]
    LatitudeOutOfRange(f64),
    #[error("longitude {0} is outside [-180, 180]")]
    LongitudeOutOfRange(f64),
    #[error("coordinates must be finite numbers")]
    NonFiniteCoordinate,
    #[error("a donor record with id {0} already exists")]
    DuplicateId(u64),
}

/// The locator's blood group filter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GroupFilter {
    /// Matches every record.
    All,
    /// Matches records with exactly this group.
    Group(BloodGroup),
}

impl GroupFilter {
    pub fn matches(&self, record: &DonorRecord) -> bool {
        match self {
            GroupFilter::All => true,
            GroupFilter::Group(g) => record.blood_group == *g,
        }
    }
}

impl fmt::Display for GroupFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupFilter::All => f.write_str("all"),
            GroupFilter::Group(g) => g.fmt(f),
        }
    }
}

impl FromStr for GroupFilter {
    type Err = UnknownBloodGroup;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            return Ok(GroupFilter::All);
        }
        BloodGroup::from_str(s).map(GroupFilter::Group)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(blood_group: BloodGroup, lat: f64, lng: f64) -> DonorRecord {
        DonorRecord {
            id: 1,
            provider_id: "sub-1".into(),
            provider_email: "donor@example.com".into(),
            name: "Test Donor".into(),
            age: 30,
            blood_group,
            contact: "555-0100".into(),
            address: "New York, NY".into(),
            lat,
            lng,
            registered_at: Utc::now(),
        }
    }

    #[test]
    fn blood_group_labels_round_trip() {
        for g in BloodGroup::ALL {
            assert_eq!(BloodGroup::from_str(g.as_str()), Ok(g));
        }
        assert!(BloodGroup::from_str("C+").is_err());
    }

    #[test]
    fn blood_group_serializes_as_label() {
        let json = serde_json::to_string(&BloodGroup::AbNegative).unwrap();
        assert_eq!(json, "\"AB-\"");
        let back: BloodGroup = serde_json::from_str("\"O+\"").unwrap();
        assert_eq!(back, BloodGroup::OPositive);
    }

    #[test]
    fn record_keeps_original_blob_field_names() {
        let json = serde_json::to_string(&record(BloodGroup::OPositive, 40.7, -74.0)).unwrap();
        assert!(json.contains("\"googleId\""));
        assert!(json.contains("\"googleEmail\""));
        assert!(json.contains("\"bloodGroup\""));
        assert!(json.contains("\"registeredAt\""));
    }

    #[test]
    fn validate_rejects_out_of_range_coordinates() {
        assert!(record(BloodGroup::OPositive, 40.7, -74.0).validate().is_ok());
        assert_eq!(
            record(BloodGroup::OPositive, 91.0, 0.0).validate(),
            Err(InvalidRecord::LatitudeOutOfRange(91.0))
        );
        assert_eq!(
            record(BloodGroup::OPositive, 0.0, -181.0).validate(),
            Err(InvalidRecord::LongitudeOutOfRange(-181.0))
        );
        assert_eq!(
            record(BloodGroup::OPositive, f64::NAN, 0.0).validate(),
            Err(InvalidRecord::NonFiniteCoordinate)
        );
    }

    #[test]
    fn filter_all_matches_every_group() {
        let a = record(BloodGroup::OPositive, 40.7, -74.0);
        let b = record(BloodGroup::ANegative, 40.7, -74.0);
        assert!(GroupFilter::All.matches(&a));
        assert!(GroupFilter::All.matches(&b));
    }

    #[test]
    fn filter_group_matches_exact_equality_only() {
        let a = record(BloodGroup::OPositive, 40.7, -74.0);
        let b = record(BloodGroup::ANegative, 40.7, -74.0);
        let filter = GroupFilter::Group(BloodGroup::OPositive);
        assert!(filter.matches(&a));
        assert!(!filter.matches(&b));
    }

    #[test]
    fn filter_parses_all_and_labels() {
        assert_eq!(GroupFilter::from_str("all"), Ok(GroupFilter::All));
        assert_eq!(
            GroupFilter::from_str("B+"),
            Ok(GroupFilter::Group(BloodGroup::BPositive))
        );
        assert!(GroupFilter::from_str("everything").is_err());
    }
}
