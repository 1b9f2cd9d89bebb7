//! Unverified view over a bearer token's payload.
//!
//! The signature segment is never checked here. [`UnverifiedClaims`] is only
//! good for client-side hints (which screen to render first); anything that
//! grants access must be re-confirmed by a trusted profile fetch.

use base64::Engine as _;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

use eventhub_core::UserUid;

use crate::roles::Role;
use crate::token::strip_bearer;

/// Accepts padded or unpadded input; url-safe characters are mapped first.
const PAYLOAD_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// Payload keys that may carry the subject, in lookup order.
const SUBJECT_KEYS: [&str; 4] = ["sub", "uid", "id", "user_uid"];

/// Claims read from a token without verifying its signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnverifiedClaims {
    pub subject_id: String,
    /// Role literal exactly as encoded in the payload.
    pub role: String,
    pub issued_at: Option<DateTime<Utc>>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl UnverifiedClaims {
    /// The role mapped onto the fixed enumeration (trimmed, case-insensitive).
    pub fn normalized_role(&self) -> Option<Role> {
        Role::parse(&self.role)
    }

    pub fn user_uid(&self) -> Option<UserUid> {
        UserUid::parse(&self.subject_id).ok()
    }

    /// Tokens without an `exp` claim never expire from the client's view.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|exp| now >= exp)
    }
}

/// Decode the payload segment of `token`.
///
/// Returns `None` for an empty token, a token without exactly three
/// dot-separated segments, or a payload that is not base64-encoded JSON
/// carrying a subject and a role. Never panics.
pub fn decode(token: &str) -> Option<UnverifiedClaims> {
    let token = strip_bearer(token);
    if token.is_empty() {
        return None;
    }

    let mut segments = token.split('.');
    let (Some(_header), Some(payload), Some(_signature), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return None;
    };

    let normalized: String = payload
        .chars()
        .map(|c| match c {
            '-' => '+',
            '_' => '/',
            other => other,
        })
        .collect();
    let bytes = PAYLOAD_ENGINE.decode(normalized).ok()?;
    let payload: Map<String, Value> = serde_json::from_slice(&bytes).ok()?;

    let subject_id = SUBJECT_KEYS
        .iter()
        .find_map(|key| payload.get(*key).and_then(scalar_to_string))?;
    let role = payload.get("role").and_then(Value::as_str)?.to_string();

    Some(UnverifiedClaims {
        subject_id,
        role,
        issued_at: payload.get("iat").and_then(unix_seconds),
        expires_at: payload.get("exp").and_then(unix_seconds),
    })
}

/// Raw role literal of `token`.
pub fn role_of(token: &str) -> Option<String> {
    decode(token).map(|claims| claims.role)
}

/// Subject identifier of `token`.
pub fn subject_of(token: &str) -> Option<String> {
    decode(token).map(|claims| claims.subject_id)
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn unix_seconds(value: &Value) -> Option<DateTime<Utc>> {
    let secs = value
        .as_i64()
        .or_else(|| value.as_f64().map(|f| f.trunc() as i64))?;
    DateTime::from_timestamp(secs, 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use jsonwebtoken::{Algorithm, EncodingKey, Header};
    use proptest::prelude::*;
    use serde_json::json;

    fn mint(payload: &Value) -> String {
        jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            payload,
            &EncodingKey::from_secret(b"unit-test-secret"),
        )
        .unwrap()
    }

    fn handmade(payload: &str) -> String {
        format!(
            "{}.{}.sig",
            URL_SAFE_NO_PAD.encode(r#"{"alg":"none"}"#),
            URL_SAFE_NO_PAD.encode(payload)
        )
    }

    #[test]
    fn decodes_signed_token() {
        let token = mint(&json!({
            "sub": "usr_42",
            "role": "ADMIN",
            "iat": 1_700_000_000,
            "exp": 1_700_003_600,
        }));

        let claims = decode(&token).unwrap();
        assert_eq!(claims.subject_id, "usr_42");
        assert_eq!(claims.role, "ADMIN");
        assert_eq!(claims.normalized_role(), Some(Role::Admin));
        assert_eq!(claims.issued_at.unwrap().timestamp(), 1_700_000_000);
        assert_eq!(claims.expires_at.unwrap().timestamp(), 1_700_003_600);
    }

    #[test]
    fn strips_case_insensitive_bearer_prefix() {
        let token = mint(&json!({ "uid": "u1", "role": "USER" }));
        assert_eq!(decode(&format!("Bearer {token}")).unwrap().subject_id, "u1");
        assert_eq!(decode(&format!("bEaReR {token}")).unwrap().subject_id, "u1");
    }

    #[test]
    fn role_is_not_normalized_by_decoder() {
        let token = mint(&json!({ "id": 7, "role": " admin" }));
        let claims = decode(&token).unwrap();
        assert_eq!(claims.role, " admin");
        assert_eq!(claims.subject_id, "7");
        assert_eq!(claims.normalized_role(), Some(Role::Admin));
        assert_eq!(role_of(&token).as_deref(), Some(" admin"));
        assert_eq!(subject_of(&token).as_deref(), Some("7"));
    }

    #[test]
    fn accepts_padded_standard_base64_payload() {
        use base64::engine::general_purpose::STANDARD;
        let payload = STANDARD.encode(r#"{"sub":"ab?","role":"USER"}"#);
        let token = format!("h.{payload}.s");
        assert_eq!(decode(&token).unwrap().subject_id, "ab?");
    }

    #[test]
    fn rejects_malformed_tokens() {
        assert_eq!(decode(""), None);
        assert_eq!(decode("Bearer "), None);
        assert_eq!(decode("only.two"), None);
        assert_eq!(decode("a.b.c.d"), None);
        assert_eq!(decode("a.!!!.c"), None);
        assert_eq!(decode(&handmade("not json")), None);
        assert_eq!(decode(&handmade("[1,2,3]")), None);
    }

    #[test]
    fn rejects_payload_without_subject_or_role() {
        assert_eq!(decode(&handmade(r#"{"role":"ADMIN"}"#)), None);
        assert_eq!(decode(&handmade(r#"{"sub":"u1"}"#)), None);
        assert_eq!(decode(&handmade(r#"{"sub":"u1","role":5}"#)), None);
    }

    #[test]
    fn expiry_is_reported_not_enforced() {
        let token = handmade(r#"{"sub":"u1","role":"USER","exp":1000}"#);
        let claims = decode(&token).unwrap();
        let later = DateTime::from_timestamp(2000, 0).unwrap();
        let earlier = DateTime::from_timestamp(10, 0).unwrap();
        assert!(claims.is_expired(later));
        assert!(!claims.is_expired(earlier));

        let open_ended = decode(&handmade(r#"{"sub":"u1","role":"USER"}"#)).unwrap();
        assert!(!open_ended.is_expired(later));
    }

    proptest! {
        #[test]
        fn role_round_trips_literally(role in "\\PC{0,24}", sub in "[a-z0-9]{1,16}") {
            let token = mint(&json!({ "sub": sub, "role": role }));
            let claims = decode(&token).unwrap();
            prop_assert_eq!(claims.role, role);
            prop_assert_eq!(claims.subject_id, sub);
        }

        #[test]
        fn wrong_segment_count_is_none(parts in prop::collection::vec("[A-Za-z0-9_-]{0,12}", 0..6)) {
            prop_assume!(parts.len() != 3);
            let token = parts.join(".");
            prop_assert_eq!(decode(&token), None);
        }

        #[test]
        fn arbitrary_input_never_panics(raw in "\\PC{0,64}") {
            let _ = decode(&raw);
        }
    }
}
