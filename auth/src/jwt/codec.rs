use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use hmac::Hmac;
use hmac::Mac;
use serde::Deserialize;
use serde::Serialize;
use sha2::Sha256;

use super::errors::TokenError;
use super::key::SecretKey;

type HmacSha256 = Hmac<Sha256>;

pub(crate) const SEPARATOR: char = '.';
pub(crate) const ALGORITHM: &str = "HS256";
pub(crate) const TOKEN_TYPE: &str = "JWT";

/// Token header. Field order is part of the wire format.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub(crate) struct Header {
    pub alg: String,
    pub typ: String,
}

impl Header {
    pub fn hs256() -> Self {
        Self {
            alg: ALGORITHM.to_string(),
            typ: TOKEN_TYPE.to_string(),
        }
    }
}

/// JSON-encode a value and wrap it as a base64url segment.
pub(crate) fn encode_segment<T: Serialize>(value: &T) -> Result<String, TokenError> {
    let json = serde_json::to_vec(value).map_err(|e| TokenError::EncodingFailed(e.to_string()))?;
    Ok(URL_SAFE_NO_PAD.encode(json))
}

/// Unwrap a base64url segment and parse its JSON.
pub(crate) fn decode_segment<T: for<'de> Deserialize<'de>>(
    segment: &str,
    name: &str,
) -> Result<T, TokenError> {
    let json = URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|e| TokenError::DecodingFailed(format!("{} is not base64url: {}", name, e)))?;
    serde_json::from_slice(&json)
        .map_err(|e| TokenError::DecodingFailed(format!("{} is not valid JSON: {}", name, e)))
}

fn mac_over(key: &SecretKey, signing_input: &str) -> Result<HmacSha256, TokenError> {
    let mut mac = HmacSha256::new_from_slice(key.as_bytes())
        .map_err(|e| TokenError::InvalidKey(e.to_string()))?;
    mac.update(signing_input.as_bytes());
    Ok(mac)
}

/// HMAC-SHA256 over `signing_input`, base64url encoded.
pub(crate) fn sign(key: &SecretKey, signing_input: &str) -> Result<String, TokenError> {
    let mac = mac_over(key, signing_input)?;
    Ok(URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes()))
}

/// Recompute the signature and compare it to `signature` in constant time.
///
/// An undecodable signature segment counts as a mismatch.
pub(crate) fn verify_signature(
    key: &SecretKey,
    signing_input: &str,
    signature: &str,
) -> Result<(), TokenError> {
    let provided = URL_SAFE_NO_PAD
        .decode(signature)
        .map_err(|_| TokenError::InvalidSignature)?;
    mac_over(key, signing_input)?
        .verify_slice(&provided)
        .map_err(|_| TokenError::InvalidSignature)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_segment() {
        let segment = encode_segment(&Header::hs256()).unwrap();
        // base64url of {"alg":"HS256","typ":"JWT"}
        assert_eq!(segment, "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9");
    }

    #[test]
    fn test_sign_is_deterministic_and_keyed() {
        let key = SecretKey::new("secret_one").unwrap();
        let other = SecretKey::new("secret_two").unwrap();

        let first = sign(&key, "a.b").unwrap();
        assert_eq!(first, sign(&key, "a.b").unwrap());
        assert_ne!(first, sign(&other, "a.b").unwrap());
        assert_ne!(first, sign(&key, "a.c").unwrap());
        assert!(!first.contains('='));
    }

    #[test]
    fn test_verify_signature() {
        let key = SecretKey::new("secret_one").unwrap();
        let signature = sign(&key, "a.b").unwrap();

        assert_eq!(verify_signature(&key, "a.b", &signature), Ok(()));
        assert_eq!(
            verify_signature(&key, "a.c", &signature),
            Err(TokenError::InvalidSignature)
        );
        assert_eq!(
            verify_signature(&key, "a.b", "%%%"),
            Err(TokenError::InvalidSignature)
        );
        assert_eq!(
            verify_signature(&key, "a.b", &signature[..10]),
            Err(TokenError::InvalidSignature)
        );
    }

    #[test]
    fn test_decode_segment_errors() {
        let result = decode_segment::<Header>("!!!", "header");
        assert!(matches!(result, Err(TokenError::DecodingFailed(_))));

        let not_json = URL_SAFE_NO_PAD.encode(b"not json");
        let result = decode_segment::<Header>(&not_json, "header");
        assert!(matches!(result, Err(TokenError::DecodingFailed(_))));
    }
}
