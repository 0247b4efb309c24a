//! Session login support.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// An authenticated broker session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Broker user id.
    pub user_id: String,
    /// Display name.
    #[serde(default)]
    pub user_name: String,
    /// Token used to authorize API calls for the rest of the day.
    pub access_token: String,
    /// Token for public streams.
    #[serde(default)]
    pub public_token: String,
}

/// Computes the checksum sent with a request-token exchange:
/// hex-encoded SHA-256 of `api_key + request_token + api_secret`.
#[must_use]
pub fn session_checksum(api_key: &str, request_token: &str, api_secret: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(api_key.as_bytes());
    hasher.update(request_token.as_bytes());
    hasher.update(api_secret.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checksum_matches_concatenation() {
        let split = session_checksum("key", "token", "secret");
        let joined = hex::encode(Sha256::digest(b"keytokensecret"));
        assert_eq!(split, joined);
        assert_eq!(split.len(), 64);
    }

    #[test]
    fn test_checksum_known_value() {
        assert_eq!(
            session_checksum("", "", ""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_session_defaults() {
        let session: Session =
            serde_json::from_str(r#"{"user_id":"AB1234","access_token":"xyz"}"#).unwrap();
        assert_eq!(session.user_id, "AB1234");
        assert!(session.user_name.is_empty());
    }
}
