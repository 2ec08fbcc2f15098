//! # Registration flow
//!
//! [`RegistrationFlow::submit`] turns validated form input, the identity
//! session, and a coordinate pair into exactly one appended [`DonorRecord`].
//!
//! Preconditions are checked in order and short-circuit:
//!
//! 1. an identity session must exist, else [`SubmitError::NotAuthenticated`];
//! 2. every required field must be non-empty (and age/blood group must parse),
//!    else [`SubmitError::MissingFields`];
//! 3. a usable coordinate pair must exist, taken from a prior location
//!    capture or resolved by forward-geocoding the address:
//!    [`SubmitError::Geocode`] when the provider fails,
//!    [`SubmitError::MissingLocation`] when no finite in-range pair results.
//!
//! On any failure the store is untouched and the form keeps its values; the
//! caller surfaces the error text directly.

use std::str::FromStr;

use chrono::Utc;
use store::{BloodGroup, DonorRecord, DonorRegistry, DonorStore, StoreError};

use crate::geocode::{Coordinates, GeocodeError, Geocoder};
use crate::identity::IdentitySession;

/// Raw form input plus the optional previously captured coordinates.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RegistrationInput {
    pub name: String,
    pub age: String,
    pub blood_group: String,
    pub contact: String,
    pub address: String,
    /// Filled by a successful location capture; when absent, the address is
    /// forward-geocoded instead.
    pub location: Option<Coordinates>,
}

/// Why a submission did not produce a record. Messages are user-facing.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("please sign in first to register as a donor")]
    NotAuthenticated,
    #[error("please fill in all fields")]
    MissingFields,
    #[error("please provide your location: capture it or enter a valid address")]
    MissingLocation,
    #[error(transparent)]
    Geocode(#[from] GeocodeError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// The registration use case, with its collaborators passed in explicitly.
pub struct RegistrationFlow<S: DonorStore, G: Geocoder> {
    registry: DonorRegistry<S>,
    geocoder: G,
}

impl<S: DonorStore, G: Geocoder> RegistrationFlow<S, G> {
    pub fn new(registry: DonorRegistry<S>, geocoder: G) -> Self {
        Self { registry, geocoder }
    }

    pub fn registry(&self) -> &DonorRegistry<S> {
        &self.registry
    }

    /// Validate, resolve coordinates, and append a new donor record.
    pub async fn submit(
        &self,
        session: Option<&IdentitySession>,
        input: &RegistrationInput,
    ) -> Result<DonorRecord, SubmitError> {
        let session = session.ok_or(SubmitError::NotAuthenticated)?;

        let name = input.name.trim();
        let age_text = input.age.trim();
        let group_text = input.blood_group.trim();
        let contact = input.contact.trim();
        let address = input.address.trim();

        if name.is_empty()
            || age_text.is_empty()
            || group_text.is_empty()
            || contact.is_empty()
            || address.is_empty()
        {
            return Err(SubmitError::MissingFields);
        }
        // The form constrains these inputs; anything unparsable counts as
        // not filled in.
        let age: u8 = age_text.parse().map_err(|_| SubmitError::MissingFields)?;
        let blood_group =
            BloodGroup::from_str(group_text).map_err(|_| SubmitError::MissingFields)?;

        let coords = match input.location {
            Some(coords) => coords,
            None => self.geocoder.forward(address).await?,
        };
        if !is_usable(&coords) {
            return Err(SubmitError::MissingLocation);
        }

        let record = DonorRecord {
            id: self.registry.allocate_id().await,
            provider_id: session.subject.clone(),
            provider_email: session.email.clone(),
            name: name.to_string(),
            age,
            blood_group,
            contact: contact.to_string(),
            address: address.to_string(),
            lat: coords.lat,
            lng: coords.lng,
            registered_at: Utc::now(),
        };
        self.registry.append(record.clone()).await?;

        Ok(record)
    }
}

/// A coordinate pair the store would accept: finite and in range.
fn is_usable(coords: &Coordinates) -> bool {
    coords.lat.is_finite()
        && coords.lng.is_finite()
        && (-90.0..=90.0).contains(&coords.lat)
        && (-180.0..=180.0).contains(&coords.lng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use store::MemoryStore;

    /// One known address; everything else is a provider miss.
    struct FakeGeocoder;

    impl Geocoder for FakeGeocoder {
        async fn forward(&self, address: &str) -> Result<Coordinates, GeocodeError> {
            match address {
                "New York, NY" => Ok(Coordinates { lat: 40.7128, lng: -74.0060 }),
                "Nowhere" => Err(GeocodeError::NoMatch("ZERO_RESULTS".to_string())),
                _ => Err(GeocodeError::ServiceUnavailable),
            }
        }

        async fn reverse(&self, _lat: f64, _lng: f64) -> Result<String, GeocodeError> {
            Err(GeocodeError::ServiceUnavailable)
        }
    }

    fn flow() -> RegistrationFlow<MemoryStore, FakeGeocoder> {
        RegistrationFlow::new(DonorRegistry::new(MemoryStore::new()), FakeGeocoder)
    }

    fn session() -> IdentitySession {
        IdentitySession {
            subject: "108236451".into(),
            email: "donor@example.com".into(),
            name: "Jane Doe".into(),
        }
    }

    fn input() -> RegistrationInput {
        RegistrationInput {
            name: "Jane Doe".into(),
            age: "29".into(),
            blood_group: "O+".into(),
            contact: "555-0100".into(),
            address: "New York, NY".into(),
            location: Some(Coordinates { lat: 40.7128, lng: -74.0060 }),
        }
    }

    #[tokio::test]
    async fn valid_submit_appends_exactly_one_record() {
        let flow = flow();
        let record = flow.submit(Some(&session()), &input()).await.unwrap();

        assert_eq!(record.provider_id, "108236451");
        assert_eq!(record.provider_email, "donor@example.com");
        assert_eq!(record.blood_group, BloodGroup::OPositive);
        assert_eq!(record.age, 29);

        let donors = flow.registry().list_all().await;
        assert_eq!(donors.len(), 1);
        assert_eq!(donors[0], record);
    }

    #[tokio::test]
    async fn prior_records_are_unchanged_by_submit() {
        let flow = flow();
        let first = flow.submit(Some(&session()), &input()).await.unwrap();

        let mut second_input = input();
        second_input.blood_group = "A-".into();
        flow.submit(Some(&session()), &second_input).await.unwrap();

        let donors = flow.registry().list_all().await;
        assert_eq!(donors.len(), 2);
        assert_eq!(donors[0], first);
    }

    #[tokio::test]
    async fn no_session_is_not_authenticated() {
        let flow = flow();
        let err = flow.submit(None, &input()).await.unwrap_err();
        assert!(matches!(err, SubmitError::NotAuthenticated));
        assert!(flow.registry().list_all().await.is_empty());
    }

    #[tokio::test]
    async fn any_missing_field_fails_and_leaves_store_unchanged() {
        let flow = flow();
        let blank = |f: fn(&mut RegistrationInput)| {
            let mut i = input();
            f(&mut i);
            i
        };
        let cases = [
            blank(|i| i.name.clear()),
            blank(|i| i.age = "  ".into()),
            blank(|i| i.blood_group.clear()),
            blank(|i| i.contact.clear()),
            blank(|i| i.address.clear()),
            blank(|i| i.age = "not-a-number".into()),
            blank(|i| i.blood_group = "Q+".into()),
        ];

        for case in cases {
            let err = flow.submit(Some(&session()), &case).await.unwrap_err();
            assert!(matches!(err, SubmitError::MissingFields), "case: {case:?}");
        }
        assert!(flow.registry().list_all().await.is_empty());
    }

    #[tokio::test]
    async fn address_is_geocoded_when_no_captured_location() {
        let flow = flow();
        let mut no_capture = input();
        no_capture.location = None;

        let record = flow.submit(Some(&session()), &no_capture).await.unwrap();
        assert_eq!(record.lat, 40.7128);
        assert_eq!(record.lng, -74.0060);
    }

    #[tokio::test]
    async fn geocoder_failure_surfaces_and_stores_nothing() {
        let flow = flow();
        let mut bad = input();
        bad.location = None;
        bad.address = "Nowhere".into();

        let err = flow.submit(Some(&session()), &bad).await.unwrap_err();
        assert!(matches!(err, SubmitError::Geocode(GeocodeError::NoMatch(_))));
        assert!(flow.registry().list_all().await.is_empty());
    }

    #[tokio::test]
    async fn unusable_coordinates_are_missing_location() {
        let flow = flow();
        let mut nan = input();
        nan.location = Some(Coordinates { lat: f64::NAN, lng: -74.0 });

        let err = flow.submit(Some(&session()), &nan).await.unwrap_err();
        assert!(matches!(err, SubmitError::MissingLocation));
        assert!(flow.registry().list_all().await.is_empty());
    }

    #[tokio::test]
    async fn consecutive_submissions_get_distinct_ids() {
        let flow = flow();
        let a = flow.submit(Some(&session()), &input()).await.unwrap();
        let b = flow.submit(Some(&session()), &input()).await.unwrap();
        assert_ne!(a.id, b.id);
    }
}
