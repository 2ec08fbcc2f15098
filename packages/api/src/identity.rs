//! # Identity assertion decoding
//!
//! The sign-in provider hands the page a signed identity assertion (a compact
//! JWT). [`decode_assertion`] extracts the standard claims (subject, email,
//! display name) into an [`IdentitySession`].
//!
//! The signature is **not** verified. The session never crosses a trust
//! boundary: it only tags locally created records with who filled in the
//! form, on the user's own device. Anything that needs to trust the identity
//! must verify the token against the provider's keys instead of using this.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::Deserialize;

/// The currently signed-in identity, for the duration of the page session.
///
/// Never persisted; a reload clears it.
#[derive(Clone, Debug, PartialEq)]
pub struct IdentitySession {
    /// Provider subject id (`sub` claim).
    pub subject: String,
    pub email: String,
    /// Display name; may be empty when the provider sends no `name` claim.
    pub name: String,
}

/// Why an assertion could not be turned into a session.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum IdentityError {
    #[error("the identity assertion is not a well-formed token")]
    MalformedAssertion,
    #[error("the identity assertion carries unreadable claims")]
    InvalidClaims,
}

/// Standard claims we read from the assertion payload.
#[derive(Debug, Deserialize)]
struct Claims {
    sub: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    name: String,
}

/// Decode a compact identity assertion into a session.
///
/// Splits the token, base64url-decodes the claims segment, and parses the
/// standard claims. Errors are surfaced to the user instead of aborting the
/// page; a garbled credential just means "sign-in did not work".
pub fn decode_assertion(token: &str) -> Result<IdentitySession, IdentityError> {
    let mut segments = token.split('.');
    let _header = segments.next().ok_or(IdentityError::MalformedAssertion)?;
    let payload = segments.next().ok_or(IdentityError::MalformedAssertion)?;

    let bytes = URL_SAFE_NO_PAD
        .decode(payload)
        .map_err(|_| IdentityError::MalformedAssertion)?;
    let claims: Claims =
        serde_json::from_slice(&bytes).map_err(|_| IdentityError::InvalidClaims)?;

    Ok(IdentitySession {
        subject: claims.sub,
        email: claims.email,
        name: claims.name,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assertion_with_payload(payload_json: &str) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"RS256","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode(payload_json.as_bytes());
        format!("{header}.{payload}.fakesignature")
    }

    #[test]
    fn decodes_standard_claims() {
        let token = assertion_with_payload(
            r#"{"sub":"108236451","email":"donor@example.com","name":"Jane Doe"}"#,
        );
        let session = decode_assertion(&token).unwrap();
        assert_eq!(session.subject, "108236451");
        assert_eq!(session.email, "donor@example.com");
        assert_eq!(session.name, "Jane Doe");
    }

    #[test]
    fn missing_optional_claims_default_to_empty() {
        let token = assertion_with_payload(r#"{"sub":"108236451"}"#);
        let session = decode_assertion(&token).unwrap();
        assert_eq!(session.subject, "108236451");
        assert!(session.email.is_empty());
        assert!(session.name.is_empty());
    }

    #[test]
    fn truncated_token_is_malformed() {
        assert_eq!(
            decode_assertion("onlyonesegment"),
            Err(IdentityError::MalformedAssertion)
        );
    }

    #[test]
    fn garbage_payload_is_malformed() {
        assert_eq!(
            decode_assertion("header.!!notbase64!!.sig"),
            Err(IdentityError::MalformedAssertion)
        );
    }

    #[test]
    fn non_json_payload_is_invalid_claims() {
        let payload = URL_SAFE_NO_PAD.encode(b"not json at all");
        let token = format!("header.{payload}.sig");
        assert_eq!(decode_assertion(&token), Err(IdentityError::InvalidClaims));
    }

    #[test]
    fn missing_subject_is_invalid_claims() {
        let token = assertion_with_payload(r#"{"email":"donor@example.com"}"#);
        assert_eq!(decode_assertion(&token), Err(IdentityError::InvalidClaims));
    }
}
