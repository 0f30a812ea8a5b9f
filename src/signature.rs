// src/signature.rs
use axum::http::HeaderMap;
use ed25519_dalek::{Signature, Verifier, VerifyingKey};
use tracing::debug;

pub const SIGNATURE_HEADER: &str = "x-signature-ed25519";
pub const TIMESTAMP_HEADER: &str = "x-signature-timestamp";

pub const MIN_SIGNATURE_LEN: usize = 64;
pub const MIN_TIMESTAMP_LEN: usize = 10;

/// Why a request failed authentication. Only used for diagnostics; every
/// variant maps to the same 401.
#[derive(Debug, thiserror::Error)]
pub enum SignatureError {
    #[error("missing header {0}")]
    Missing(&'static str),
    #[error("header {0} is too short")]
    TooShort(&'static str),
    #[error("signature is not valid hex or has the wrong length")]
    Decode,
    #[error("signature does not match")]
    Mismatch,
}

/// Signature and timestamp headers that passed the shape check.
#[derive(Debug)]
pub struct SignedHeaders<'a> {
    pub signature: &'a str,
    pub timestamp: &'a str,
}

/// Cheap shape validation that must pass before any cryptographic work.
pub fn extract_headers(headers: &HeaderMap) -> Result<SignedHeaders<'_>, SignatureError> {
    let signature = header_str(headers, SIGNATURE_HEADER)?;
    let timestamp = header_str(headers, TIMESTAMP_HEADER)?;

    if signature.len() < MIN_SIGNATURE_LEN {
        return Err(SignatureError::TooShort(SIGNATURE_HEADER));
    }
    if timestamp.len() < MIN_TIMESTAMP_LEN {
        return Err(SignatureError::TooShort(TIMESTAMP_HEADER));
    }
    Ok(SignedHeaders {
        signature,
        timestamp,
    })
}

fn header_str<'a>(headers: &'a HeaderMap, name: &'static str) -> Result<&'a str, SignatureError> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .ok_or(SignatureError::Missing(name))
}

/// Detached Ed25519 check over `timestamp || raw_body`.
pub fn verify(raw_body: &[u8], signature: &str, timestamp: &str, key: &VerifyingKey) -> bool {
    match check(raw_body, signature, timestamp, key) {
        Ok(()) => true,
        Err(e) => {
            debug!(reason = %e, "signature check failed");
            false
        }
    }
}

fn check(
    raw_body: &[u8],
    signature: &str,
    timestamp: &str,
    key: &VerifyingKey,
) -> Result<(), SignatureError> {
    let sig_bytes = hex::decode(signature).map_err(|_| SignatureError::Decode)?;
    let sig = Signature::from_slice(&sig_bytes).map_err(|_| SignatureError::Decode)?;

    let message = [timestamp.as_bytes(), raw_body].concat();
    key.verify(&message, &sig)
        .map_err(|_| SignatureError::Mismatch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{sign, signing_key};

    const TS: &str = "1700000000";
    const BODY: &[u8] = br#"{"type":1}"#;

    #[test]
    fn accepts_valid_signature() {
        let key = signing_key().verifying_key();
        let sig = sign(TS, BODY);
        assert!(verify(BODY, &sig, TS, &key));
    }

    #[test]
    fn rejects_any_single_byte_mutation() {
        let key = signing_key().verifying_key();
        let sig = sign(TS, BODY);

        for i in 0..BODY.len() {
            let mut body = BODY.to_vec();
            body[i] ^= 0x01;
            assert!(!verify(&body, &sig, TS, &key), "body byte {i}");
        }

        for i in 0..TS.len() {
            let mut ts = TS.as_bytes().to_vec();
            ts[i] = if ts[i] == b'9' { b'0' } else { ts[i] + 1 };
            let ts = String::from_utf8(ts).unwrap();
            assert!(!verify(BODY, &sig, &ts, &key), "timestamp byte {i}");
        }

        let raw = hex::decode(&sig).unwrap();
        for i in 0..raw.len() {
            let mut mutated = raw.clone();
            mutated[i] ^= 0x01;
            assert!(!verify(BODY, &hex::encode(mutated), TS, &key), "sig byte {i}");
        }
    }

    #[test]
    fn reserialized_body_does_not_verify() {
        let key = signing_key().verifying_key();
        let sig = sign(TS, BODY);
        assert!(!verify(br#"{ "type": 1 }"#, &sig, TS, &key));
    }

    #[test]
    fn undecodable_signature_is_a_failure_not_a_panic() {
        let key = signing_key().verifying_key();
        let not_hex = "zz".repeat(64);
        assert!(matches!(
            check(BODY, &not_hex, TS, &key),
            Err(SignatureError::Decode)
        ));
        let short = "ab".repeat(32);
        assert!(matches!(
            check(BODY, &short, TS, &key),
            Err(SignatureError::Decode)
        ));
    }

    #[test]
    fn header_shape_checks() {
        let mut headers = HeaderMap::new();
        assert!(matches!(
            extract_headers(&headers),
            Err(SignatureError::Missing(SIGNATURE_HEADER))
        ));

        headers.insert(SIGNATURE_HEADER, "a".repeat(128).parse().unwrap());
        assert!(matches!(
            extract_headers(&headers),
            Err(SignatureError::Missing(TIMESTAMP_HEADER))
        ));

        headers.insert(TIMESTAMP_HEADER, "123".parse().unwrap());
        assert!(matches!(
            extract_headers(&headers),
            Err(SignatureError::TooShort(TIMESTAMP_HEADER))
        ));

        headers.insert(TIMESTAMP_HEADER, TS.parse().unwrap());
        headers.insert(SIGNATURE_HEADER, "a".repeat(63).parse().unwrap());
        assert!(matches!(
            extract_headers(&headers),
            Err(SignatureError::TooShort(SIGNATURE_HEADER))
        ));

        headers.insert(SIGNATURE_HEADER, "a".repeat(128).parse().unwrap());
        let ok = extract_headers(&headers).unwrap();
        assert_eq!(ok.timestamp, TS);
    }
}
